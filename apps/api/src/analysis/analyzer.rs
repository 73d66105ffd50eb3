//! Resume Analyzer — pluggable, trait-based producer of suggestion lists.
//!
//! Default: `StaticResumeAnalyzer` (deterministic, no external calls).
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>` so a real engine can be
//! swapped in without touching handlers.

use async_trait::async_trait;
use tracing::debug;

use crate::analysis::catalog::{input_too_short, standard_suggestions};
use crate::errors::AppError;
use crate::models::suggestion::Suggestion;

/// Produces the complete suggestion list for a resume in one call.
///
/// Implementations must be deterministic for a given input and must never
/// return a partial list. Too-short input is answered with a single
/// informational suggestion rather than an error.
#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, raw_text: &str) -> Result<Vec<Suggestion>, AppError>;
}

pub struct StaticResumeAnalyzer {
    min_chars: usize,
}

impl StaticResumeAnalyzer {
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }
}

#[async_trait]
impl ResumeAnalyzer for StaticResumeAnalyzer {
    async fn analyze(&self, raw_text: &str) -> Result<Vec<Suggestion>, AppError> {
        let preview: String = raw_text.chars().take(50).collect();
        debug!("Analyzing resume text: {preview:?}...");

        // Length in UTF-16 code units, matching how browser clients measure text
        if raw_text.encode_utf16().count() < self.min_chars {
            return Ok(vec![input_too_short()]);
        }

        Ok(standard_suggestions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::catalog::INPUT_TOO_SHORT_TITLE;
    use crate::models::suggestion::Priority;

    const RESUME: &str = "Senior engineer. Managed team delivering payments platform across three regions.";

    #[tokio::test]
    async fn test_empty_input_yields_single_notice() {
        let analyzer = StaticResumeAnalyzer::new(50);
        let out = analyzer.analyze("").await.unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].priority, Priority::High);
        assert_eq!(out[0].title, INPUT_TOO_SHORT_TITLE);
    }

    #[tokio::test]
    async fn test_threshold_is_exclusive() {
        let analyzer = StaticResumeAnalyzer::new(50);
        let just_short = "x".repeat(49);
        let exact = "x".repeat(50);
        assert_eq!(analyzer.analyze(&just_short).await.unwrap().len(), 1);
        assert_eq!(analyzer.analyze(&exact).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_threshold_counts_utf16_units() {
        let analyzer = StaticResumeAnalyzer::new(10);
        // 9 BMP characters: 9 UTF-16 units, 27 bytes
        let text = "履歴書履歴書履歴書";
        let out = analyzer.analyze(text).await.unwrap();
        assert_eq!(out[0].title, INPUT_TOO_SHORT_TITLE);
    }

    #[tokio::test]
    async fn test_astral_characters_count_twice() {
        let analyzer = StaticResumeAnalyzer::new(50);
        // 30 emoji: 30 scalar values, 60 UTF-16 units
        let emoji = "😀".repeat(30);
        let out = analyzer.analyze(&emoji).await.unwrap();
        assert_eq!(out.len(), 4);

        // 24 emoji: 48 UTF-16 units
        let short = "😀".repeat(24);
        let out = analyzer.analyze(&short).await.unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, INPUT_TOO_SHORT_TITLE);
    }

    #[tokio::test]
    async fn test_full_analysis_is_deterministic() {
        let analyzer = StaticResumeAnalyzer::new(50);
        let a = analyzer.analyze(RESUME).await.unwrap();
        let b = analyzer.analyze(RESUME).await.unwrap();
        assert_eq!(a, b);
        assert!(a.iter().all(|s| !s.completed));

        let mut ids: Vec<_> = a.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), a.len(), "ids must be unique");
    }
}
