//! HTML change reports
//!
//! Renders a change list as a standalone HTML page. Each change becomes a
//! chip line (see [`Change::to_html`]); the page around it comes from an
//! embedded handlebars template.

pub mod types;

pub use types::ReportContext;

use crate::diagnostics::{EtchError, EtchResult};
use crate::diff::{Change, ChangeSummary};
use handlebars::Handlebars;

const CHANGES_TEMPLATE: &str = include_str!("templates/changes.hbs");

/// HTML change report generator
pub struct HtmlReport<'reg> {
    registry: Handlebars<'reg>,
    title: String,
    versions: Option<(String, String)>,
}

impl HtmlReport<'_> {
    /// Create a report generator with the given page title
    pub fn new(title: impl Into<String>) -> EtchResult<Self> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string("changes", CHANGES_TEMPLATE)
            .map_err(|e| EtchError::Template(e.to_string()))?;

        Ok(Self {
            registry,
            title: title.into(),
            versions: None,
        })
    }

    /// Show the compared versions under the title
    pub fn with_versions(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.versions = Some((old.into(), new.into()));
        self
    }

    /// Build the template context for a change list
    pub fn context(&self, changes: &[Change]) -> ReportContext {
        let (old_version, new_version) = match &self.versions {
            Some((old, new)) => (Some(old.clone()), Some(new.clone())),
            None => (None, None),
        };
        ReportContext {
            title: self.title.clone(),
            old_version,
            new_version,
            summary: ChangeSummary::from_changes(changes),
            changes: changes.iter().map(Change::to_html).collect(),
        }
    }

    /// Render a full page
    pub fn render(&self, changes: &[Change]) -> EtchResult<String> {
        self.registry
            .render("changes", &self.context(changes))
            .map_err(|e| EtchError::Template(e.to_string()))
    }
}
