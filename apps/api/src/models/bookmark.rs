use serde::{Deserialize, Serialize};

pub type BookmarkId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub fav: bool,
}
