pub mod bookmark;
pub mod suggestion;
