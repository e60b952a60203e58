use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::report::EvaluationStatus;
use crate::summary::SummaryStats;

/// Canonical summary artifact written for downstream dashboard consumers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryArtifact {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    /// Digest of the taxonomy revision the summary was rendered against.
    pub taxonomy_digest: Option<String>,
    pub summary: SummaryStats,
}

impl SummaryArtifact {
    pub fn new(summary: SummaryStats, taxonomy_digest: Option<String>) -> Self {
        Self {
            schema_version: "1".to_string(),
            generated_at: Utc::now(),
            taxonomy_digest,
            summary,
        }
    }
}

/// Write summary.json in pretty JSON format.
pub fn write_summary_json(path: &Path, artifact: &SummaryArtifact) -> Result<()> {
    let content = serde_json::to_string_pretty(artifact).context("serialize summary artifact")?;
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

/// Render the dashboard cards as markdown for terminal or comment output.
pub fn render_summary_md(summary: &SummaryStats) -> String {
    let mut out = String::new();
    out.push_str("# Ringkasan Laporan\n\n");
    out.push_str(&format!("- Total Laporan: {}\n", summary.total_reports));
    for status in EvaluationStatus::ALL {
        out.push_str(&format!(
            "- {}: {}\n",
            status.label(),
            summary.count_for(status)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> SummaryStats {
        SummaryStats {
            total_reports: 5,
            ready_for_evaluation: 2,
            in_evaluation: 1,
            completed: 1,
            needs_re_review: 1,
        }
    }

    #[test]
    fn test_markdown_lists_every_card() {
        let md = render_summary_md(&sample_stats());
        assert!(md.contains("Total Laporan: 5"));
        assert!(md.contains("Siap Dievaluasi: 2"));
        assert!(md.contains("Dalam Evaluasi: 1"));
        assert!(md.contains("Selesai: 1"));
        assert!(md.contains("Perlu Review Ulang: 1"));
    }

    #[test]
    fn test_artifact_serializes_with_schema_version() {
        let artifact = SummaryArtifact::new(sample_stats(), Some("abc123".into()));
        let json = serde_json::to_string(&artifact).unwrap();
        assert!(json.contains("\"schema_version\":\"1\""));
        assert!(json.contains("\"total_reports\":5"));
    }
}
