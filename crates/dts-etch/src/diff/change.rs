//! Change records produced by structure comparison

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// One unit of difference between two structures
///
/// Serialized as a flat record tagged by `type`:
///
/// ```json
/// { "type": "changed", "groupName": "Color", "changeDetail": "",
///   "oldValue": "Color.BLUE", "newValue": "Color.CYAN" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Change {
    /// Present only in the new structure
    #[serde(rename_all = "camelCase")]
    Added {
        group_name: String,
        #[serde(default)]
        change_detail: String,
        new_value: String,
    },

    /// Present only in the old structure
    #[serde(rename_all = "camelCase")]
    Removed {
        group_name: String,
        #[serde(default)]
        change_detail: String,
        old_value: String,
    },

    /// Present in both with a different rendering
    #[serde(rename_all = "camelCase")]
    Changed {
        group_name: String,
        #[serde(default)]
        change_detail: String,
        old_value: String,
        new_value: String,
    },

    /// Blank line closing a container that had changes
    Separator,
}

impl Change {
    /// Create an added record
    pub fn added(group_name: impl Into<String>, new_value: impl Into<String>) -> Self {
        Change::Added {
            group_name: group_name.into(),
            change_detail: String::new(),
            new_value: new_value.into(),
        }
    }

    /// Create a removed record
    pub fn removed(group_name: impl Into<String>, old_value: impl Into<String>) -> Self {
        Change::Removed {
            group_name: group_name.into(),
            change_detail: String::new(),
            old_value: old_value.into(),
        }
    }

    /// Create a changed record
    pub fn changed(
        group_name: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Change::Changed {
            group_name: group_name.into(),
            change_detail: String::new(),
            old_value: old_value.into(),
            new_value: new_value.into(),
        }
    }

    /// Set the detail prefix shown before the values
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        match &mut self {
            Change::Added { change_detail, .. }
            | Change::Removed { change_detail, .. }
            | Change::Changed { change_detail, .. } => *change_detail = detail.into(),
            Change::Separator => {}
        }
        self
    }

    /// Name of the declaration this change is grouped under
    pub fn group_name(&self) -> Option<&str> {
        match self {
            Change::Added { group_name, .. }
            | Change::Removed { group_name, .. }
            | Change::Changed { group_name, .. } => Some(group_name),
            Change::Separator => None,
        }
    }

    /// Detail prefix, empty for separators
    pub fn change_detail(&self) -> &str {
        match self {
            Change::Added { change_detail, .. }
            | Change::Removed { change_detail, .. }
            | Change::Changed { change_detail, .. } => change_detail,
            Change::Separator => "",
        }
    }

    /// Old side value, if the record has one
    pub fn old_value(&self) -> Option<&str> {
        match self {
            Change::Removed { old_value, .. } | Change::Changed { old_value, .. } => {
                Some(old_value)
            }
            Change::Added { .. } | Change::Separator => None,
        }
    }

    /// New side value, if the record has one
    pub fn new_value(&self) -> Option<&str> {
        match self {
            Change::Added { new_value, .. } | Change::Changed { new_value, .. } => {
                Some(new_value)
            }
            Change::Removed { .. } | Change::Separator => None,
        }
    }

    /// Whether this is a separator record
    pub fn is_separator(&self) -> bool {
        matches!(self, Change::Separator)
    }

    /// Chip label used by the HTML rendering
    pub fn label(&self) -> &'static str {
        match self {
            Change::Added { .. } => "ADDED",
            Change::Removed { .. } => "REMOVED",
            Change::Changed { .. } => "CHANGED",
            Change::Separator => "",
        }
    }

    /// The value text after the detail prefix (`old -> new` for changes)
    pub fn value_text(&self) -> String {
        match self {
            Change::Added { new_value, .. } => new_value.clone(),
            Change::Removed { old_value, .. } => old_value.clone(),
            Change::Changed {
                old_value,
                new_value,
                ..
            } => format!("{} -> {}", old_value, new_value),
            Change::Separator => String::new(),
        }
    }

    /// Render as an HTML chip line
    pub fn to_html(&self) -> String {
        if self.is_separator() {
            return "<br>".to_string();
        }
        format!(
            "<div class=\"change\"><div class=\"chip chip-{}\">{}</div> {}{}</div>",
            self.label().to_lowercase(),
            self.label(),
            html_escape::encode_text(self.change_detail()),
            html_escape::encode_text(&self.value_text())
        )
    }
}

impl Display for Change {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let sigil = match self {
            Change::Added { .. } => "+",
            Change::Removed { .. } => "-",
            Change::Changed { .. } => "!",
            Change::Separator => return Ok(()),
        };
        write!(f, "{} {}{}", sigil, self.change_detail(), self.value_text())
    }
}

/// Count of records per change kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
}

impl ChangeSummary {
    /// Summarize a change list
    pub fn from_changes(changes: &[Change]) -> Self {
        changes
            .iter()
            .fold(ChangeSummary::default(), |mut summary, change| {
                match change {
                    Change::Added { .. } => summary.added += 1,
                    Change::Removed { .. } => summary.removed += 1,
                    Change::Changed { .. } => summary.changed += 1,
                    Change::Separator => {}
                }
                summary
            })
    }

    /// Total number of non-separator records
    pub fn total(&self) -> usize {
        self.added + self.removed + self.changed
    }

    /// Whether no differences were found
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Display for ChangeSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} added, {} removed, {} changed",
            self.added, self.removed, self.changed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_display() {
        assert_eq!(Change::added("Color", "Color.CYAN").to_string(), "+ Color.CYAN");
        assert_eq!(Change::removed("Color", "Color.BLUE").to_string(), "- Color.BLUE");
        assert_eq!(
            Change::changed("Color", "Color.BLUE", "Color.CYAN").to_string(),
            "! Color.BLUE -> Color.CYAN"
        );
        assert_eq!(
            Change::changed("Entity", "class", "interface")
                .with_detail("Entity type: ")
                .to_string(),
            "! Entity type: class -> interface"
        );
        assert_eq!(Change::Separator.to_string(), "");
    }

    #[test]
    fn test_json_shape() {
        let change = Change::changed("Color", "Color.BLUE", "Color.CYAN");
        assert_eq!(
            serde_json::to_value(&change).unwrap(),
            json!({
                "type": "changed",
                "groupName": "Color",
                "changeDetail": "",
                "oldValue": "Color.BLUE",
                "newValue": "Color.CYAN",
            })
        );
        assert_eq!(
            serde_json::to_value(Change::Separator).unwrap(),
            json!({ "type": "separator" })
        );
    }

    #[test]
    fn test_json_decode_without_detail() {
        let change: Change = serde_json::from_value(json!({
            "type": "added",
            "groupName": "World",
            "newValue": "World.getDimension(id: string): Dimension",
        }))
        .unwrap();
        assert_eq!(
            change,
            Change::added("World", "World.getDimension(id: string): Dimension")
        );
    }

    #[test]
    fn test_html_is_escaped() {
        let change = Change::added("World", "World.getPlayers(): Array<Player>");
        assert_eq!(
            change.to_html(),
            "<div class=\"change\"><div class=\"chip chip-added\">ADDED</div> \
             World.getPlayers(): Array&lt;Player&gt;</div>"
        );
        assert_eq!(Change::Separator.to_html(), "<br>");
        assert!(Change::changed("A", "a", "b")
            .to_html()
            .contains("a -&gt; b"));
    }

    #[test]
    fn test_summary() {
        let changes = vec![
            Change::added("A", "A.x: string"),
            Change::removed("A", "A.y: string"),
            Change::added("A", "A.z: string"),
            Change::Separator,
        ];
        let summary = ChangeSummary::from_changes(&changes);
        assert_eq!(summary.added, 2);
        assert_eq!(summary.removed, 1);
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.to_string(), "2 added, 1 removed, 0 changed");
    }
}
