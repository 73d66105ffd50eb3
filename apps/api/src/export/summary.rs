//! Summary export — renders a suggestion list into a downloadable document.
//!
//! Default: `MarkdownSummaryExporter`, a checklist grouped by category.
//! Rich formats plug in behind `SummaryExporter` without touching handlers.

use std::fmt::Write as _;
use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::models::suggestion::Suggestion;
use crate::tracker::grouping::group_by_category;
use crate::tracker::progress::compute_progress;

const DEFAULT_LABEL: &str = "resume";

#[derive(Debug, Clone)]
pub struct SummaryArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

#[async_trait]
pub trait SummaryExporter: Send + Sync {
    async fn export(&self, suggestions: &[Suggestion], label: &str)
        -> Result<SummaryArtifact, AppError>;
}

pub struct MarkdownSummaryExporter;

#[async_trait]
impl SummaryExporter for MarkdownSummaryExporter {
    async fn export(
        &self,
        suggestions: &[Suggestion],
        label: &str,
    ) -> Result<SummaryArtifact, AppError> {
        let label = display_label(label);
        let document = render_markdown(suggestions, label)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to render summary: {e}")))?;
        let file_name = format!("{}-suggestions.md", slugify(label));

        info!(
            "Exported {} suggestions to {file_name} ({} bytes)",
            suggestions.len(),
            document.len()
        );

        Ok(SummaryArtifact {
            file_name,
            content_type: "text/markdown; charset=utf-8",
            bytes: Bytes::from(document),
        })
    }
}

fn display_label(label: &str) -> &str {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        DEFAULT_LABEL
    } else {
        trimmed
    }
}

fn render_markdown(suggestions: &[Suggestion], label: &str) -> Result<String, std::fmt::Error> {
    let progress = compute_progress(suggestions);
    let mut out = String::new();

    writeln!(out, "# Resume Suggestions: {label}")?;
    writeln!(out)?;
    writeln!(
        out,
        "Progress: {} of {} completed ({:.0}%)",
        progress.completed_count, progress.total, progress.progress_percent
    )?;

    if suggestions.is_empty() {
        writeln!(out)?;
        writeln!(out, "_No suggestions._")?;
        return Ok(out);
    }

    for group in group_by_category(suggestions) {
        writeln!(out)?;
        writeln!(out, "## {}", group.category)?;
        writeln!(out)?;
        for s in &group.suggestions {
            let mark = if s.completed { 'x' } else { ' ' };
            writeln!(
                out,
                "- [{mark}] **{}** ({}): {}",
                s.title,
                s.priority.as_str(),
                s.description
            )?;
        }
    }

    Ok(out)
}

/// Lowercase ASCII slug of the label's file stem, `-` separated.
fn slugify(label: &str) -> String {
    let stem = Path::new(label)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(label);

    let mut slug = String::with_capacity(stem.len());
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        DEFAULT_LABEL.to_string()
    } else {
        slug.to_string()
    }
}
