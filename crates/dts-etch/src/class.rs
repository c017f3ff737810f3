//! Class declarations

use crate::node::Declaration;
use serde::{Deserialize, Serialize};

/// Class declaration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDecl {
    /// Class name
    pub name: String,

    /// Members (methods, constructors, accessors and fields) in source order
    #[serde(default)]
    pub properties: Vec<Declaration>,

    /// Name in the `extends` clause
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub super_class: Option<String>,
}

impl ClassDecl {
    /// Create an empty class declaration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            super_class: None,
        }
    }

    /// Add a member
    pub fn with_member(mut self, member: Declaration) -> Self {
        self.properties.push(member);
        self
    }

    /// Set the superclass
    pub fn with_super_class(mut self, name: impl Into<String>) -> Self {
        self.super_class = Some(name.into());
        self
    }
}
