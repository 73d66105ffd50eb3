use serde::Serialize;

use crate::models::suggestion::Suggestion;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub completed_count: usize,
    pub total: usize,
    pub progress_percent: f64,
}

/// Completion statistics over a suggestion list. An empty list reports 0%.
pub fn compute_progress(suggestions: &[Suggestion]) -> Progress {
    let total = suggestions.len();
    let completed_count = suggestions.iter().filter(|s| s.completed).count();
    let progress_percent = if total > 0 {
        completed_count as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    Progress {
        completed_count,
        total,
        progress_percent,
    }
}
