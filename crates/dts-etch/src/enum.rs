//! Enum declarations
//!
//! Enums are recorded by member name only; initializers do not take part
//! in the structure.

use serde::{Deserialize, Serialize};

/// Enum declaration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDecl {
    /// Enum name
    pub name: String,

    /// Member names in declaration order
    #[serde(default)]
    pub values: Vec<String>,
}

impl EnumDecl {
    /// Create an empty enum declaration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Add a member
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Member names sorted lexicographically, as compared by the differencer
    pub fn sorted_values(&self) -> Vec<&str> {
        let mut values: Vec<&str> = self.values.iter().map(String::as_str).collect();
        values.sort_unstable();
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_values_keep_source_order() {
        let decl = EnumDecl::new("Color")
            .with_value("RED")
            .with_value("BLUE")
            .with_value("GREEN");
        assert_eq!(decl.sorted_values(), vec!["BLUE", "GREEN", "RED"]);
        assert_eq!(decl.values, vec!["RED", "BLUE", "GREEN"]);
    }
}
