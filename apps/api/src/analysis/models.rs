//! Request and result types for resume analysis.

use serde::{Deserialize, Serialize};

/// A validated analysis request. Only constructed by
/// [`crate::analysis::validation::validate_request`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub resume_text: String,
}

/// One position pulled out of the resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkHistoryEntry {
    pub company: String,
    pub title: String,
    pub summary: String,
}

/// A company the model suggests applying to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedCompany {
    pub name: String,
    pub url: String,
    pub reason: String,
    /// Which previous employer this suggestion resembles.
    pub based_on: String,
}

/// Full structured output of an analysis, relayed to the caller as-is.
///
/// Every field is required: a model reply missing any of them is rejected
/// rather than patched up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub work_history: Vec<WorkHistoryEntry>,
    pub suggested_titles: Vec<String>,
    pub suggested_companies: Vec<SuggestedCompany>,
}
