//! Stored analysis records, as supplied by the history collaborator.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::AnalysisRecordId;

use super::response_parser::{ParsedAnalysis, ResponseParser};
use super::window::AnalysisMode;

/// A previously produced analysis. Read-only from the domain's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: AnalysisRecordId,
    /// Creation instant in the writer's local offset.
    pub created_at: DateTime<FixedOffset>,
    /// Raw model output. Absent or blank for failed analyses.
    #[serde(default)]
    pub raw_response_text: Option<String>,
    pub entry_type: String,
}

impl AnalysisRecord {
    /// Creates a record for a completed analysis of the given mode.
    pub fn completed(
        created_at: DateTime<FixedOffset>,
        mode: AnalysisMode,
        response: impl Into<String>,
    ) -> Self {
        Self {
            id: AnalysisRecordId::new(),
            created_at,
            raw_response_text: Some(response.into()),
            entry_type: mode.as_str().to_string(),
        }
    }

    /// Returns the response text when present and not blank.
    pub fn response_text(&self) -> Option<&str> {
        self.raw_response_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    /// Whether this record holds a usable response.
    pub fn is_complete(&self) -> bool {
        self.response_text().is_some()
    }

    /// Parses the response text. Incomplete records parse to empty fields.
    pub fn parsed(&self) -> ParsedAnalysis {
        self.response_text()
            .map(ResponseParser::parse)
            .unwrap_or_default()
    }
}
