//! Completion state machine for a suggestion list.
//!
//! Two observable states: `Incomplete` (empty, or at least one open item) and
//! `Complete` (non-empty, everything checked off). Entering `Complete` raises a
//! single `CelebrationEvent`; leaving it re-arms the trigger without any event.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::models::suggestion::{Suggestion, SuggestionId};
use crate::tracker::grouping::{group_by_category, CategoryGroup};
use crate::tracker::progress::{compute_progress, Progress};

#[derive(Debug, Error, PartialEq)]
pub enum TrackerError {
    #[error("Duplicate suggestion id {0}")]
    DuplicateId(SuggestionId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionState {
    Incomplete,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CelebrationEvent {
    pub total: usize,
    pub reached_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// No suggestion carries the requested id. Nothing changed.
    NotFound,
    Toggled {
        id: SuggestionId,
        completed: bool,
        state: CompletionState,
        celebration: Option<CelebrationEvent>,
    },
}

#[derive(Debug, Clone)]
pub struct SuggestionTracker {
    suggestions: Vec<Suggestion>,
    celebrated: bool,
}

impl SuggestionTracker {
    /// Builds a tracker over a freshly analyzed list.
    ///
    /// A list that is already fully complete starts with the celebration spent,
    /// so only a real transition into `Complete` fires an event.
    pub fn new(suggestions: Vec<Suggestion>) -> Result<Self, TrackerError> {
        ensure_unique_ids(&suggestions)?;
        let celebrated = is_complete(&suggestions);
        Ok(Self {
            suggestions,
            celebrated,
        })
    }

    /// Discards the current list in favour of a new analysis result.
    pub fn replace(&mut self, suggestions: Vec<Suggestion>) -> Result<(), TrackerError> {
        *self = Self::new(suggestions)?;
        Ok(())
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn state(&self) -> CompletionState {
        if is_complete(&self.suggestions) {
            CompletionState::Complete
        } else {
            CompletionState::Incomplete
        }
    }

    pub fn progress(&self) -> Progress {
        compute_progress(&self.suggestions)
    }

    pub fn groups(&self) -> Vec<CategoryGroup> {
        group_by_category(&self.suggestions)
    }

    /// Flips `completed` on the suggestion with `id`.
    pub fn toggle(&mut self, id: SuggestionId) -> ToggleOutcome {
        let Some(suggestion) = self.suggestions.iter_mut().find(|s| s.id == id) else {
            return ToggleOutcome::NotFound;
        };
        suggestion.completed = !suggestion.completed;
        let completed = suggestion.completed;

        let state = self.state();
        let celebration = match state {
            CompletionState::Complete if !self.celebrated => {
                self.celebrated = true;
                Some(CelebrationEvent {
                    total: self.suggestions.len(),
                    reached_at: Utc::now(),
                })
            }
            CompletionState::Complete => None,
            CompletionState::Incomplete => {
                self.celebrated = false;
                None
            }
        };

        ToggleOutcome::Toggled {
            id,
            completed,
            state,
            celebration,
        }
    }
}

fn is_complete(suggestions: &[Suggestion]) -> bool {
    !suggestions.is_empty() && suggestions.iter().all(|s| s.completed)
}

fn ensure_unique_ids(suggestions: &[Suggestion]) -> Result<(), TrackerError> {
    let mut seen = HashSet::with_capacity(suggestions.len());
    for s in suggestions {
        if !seen.insert(s.id) {
            return Err(TrackerError::DuplicateId(s.id));
        }
    }
    Ok(())
}
