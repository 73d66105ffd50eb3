use serde::{Deserialize, Serialize};

pub type SuggestionId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// A single actionable recommendation produced by resume analysis.
///
/// Only `completed` changes after the list is created; everything else is
/// fixed for the lifetime of the analysis session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: SuggestionId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: String,
    #[serde(default)]
    pub completed: bool,
}

impl Suggestion {
    pub fn new(
        id: SuggestionId,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            priority,
            category: category.into(),
            completed: false,
        }
    }
}
