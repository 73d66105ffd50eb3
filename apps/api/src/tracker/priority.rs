use serde::Serialize;

use crate::models::suggestion::Priority;

/// Display metadata for a priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityBadge {
    pub weight: u8,
    pub icon: &'static str,
    pub color: &'static str,
}

impl Priority {
    pub fn badge(&self) -> PriorityBadge {
        match self {
            Priority::High => PriorityBadge {
                weight: 3,
                icon: "alert-circle",
                color: "red",
            },
            Priority::Medium => PriorityBadge {
                weight: 2,
                icon: "alert-triangle",
                color: "amber",
            },
            Priority::Low => PriorityBadge {
                weight: 1,
                icon: "info",
                color: "green",
            },
        }
    }
}

/// Classifies a raw priority label. Labels outside `high`/`medium`/`low`
/// have no badge.
pub fn classify_priority(label: &str) -> Option<PriorityBadge> {
    let priority = match label {
        "high" => Priority::High,
        "medium" => Priority::Medium,
        "low" => Priority::Low,
        _ => return None,
    };
    Some(priority.badge())
}
