// Search-as-you-type over bookmarks: a pure filter plus a per-client
// debounced dispatcher that only runs the query once input goes quiet.

pub mod coalescer;
pub mod debounce;
pub mod filter;
pub mod handlers;
