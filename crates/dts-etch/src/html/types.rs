//! HTML report types
//!
//! Supporting types for HTML change report generation.

use crate::diff::ChangeSummary;
use serde::Serialize;

/// Template context for a change report page
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    /// Page title
    pub title: String,
    /// Version the report compares from
    pub old_version: Option<String>,
    /// Version the report compares to
    pub new_version: Option<String>,
    /// Counts per change kind
    pub summary: ChangeSummary,
    /// Pre-rendered, escaped chip lines
    pub changes: Vec<String>,
}
