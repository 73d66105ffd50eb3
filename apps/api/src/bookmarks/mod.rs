// Bookmarks: a list loaded once from key-value storage and written through on every change.

pub mod handlers;
pub mod service;
pub mod store;
