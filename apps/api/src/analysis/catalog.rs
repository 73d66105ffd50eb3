//! Fixed suggestion content returned by the static analyzer.

use crate::models::suggestion::{Priority, Suggestion};

pub const INPUT_TOO_SHORT_ID: u32 = 999;
pub const INPUT_TOO_SHORT_TITLE: &str = "Input Too Short";

/// The single informational suggestion returned when there is not enough text to analyze.
pub fn input_too_short() -> Suggestion {
    Suggestion::new(
        INPUT_TOO_SHORT_ID,
        INPUT_TOO_SHORT_TITLE,
        "Please paste or upload a full resume for proper analysis.",
        Priority::High,
        "Input Check",
    )
}

pub fn standard_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion::new(
            1,
            "Quantify Achievements",
            "Replace 'Managed team' with 'Managed 5-person team, boosting productivity by 20%'.",
            Priority::High,
            "Content & Impact",
        ),
        Suggestion::new(
            2,
            "Check Keywords",
            "Ensure 3-5 keywords from the target job description are present.",
            Priority::Medium,
            "Targeting",
        ),
        Suggestion::new(
            3,
            "Font Consistency",
            "Verify that only one or two standard fonts are used throughout.",
            Priority::Low,
            "Formatting",
        ),
        Suggestion::new(
            4,
            "Remove 'References Available'",
            "This phrase is unnecessary; recruiters assume references are available.",
            Priority::Medium,
            "Brevity",
        ),
    ]
}
