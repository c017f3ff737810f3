//! Interface declarations

use crate::node::Declaration;
use serde::{Deserialize, Serialize};

/// Interface declaration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDecl {
    /// Interface name
    pub name: String,

    /// Property and method signatures in source order
    #[serde(default)]
    pub properties: Vec<Declaration>,

    /// Extended interfaces; qualified names are written `Left.Right`
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub extends: Vec<String>,
}

impl InterfaceDecl {
    /// Create an empty interface declaration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            extends: Vec::new(),
        }
    }

    /// Add a member
    pub fn with_member(mut self, member: Declaration) -> Self {
        self.properties.push(member);
        self
    }

    /// Add an extended interface
    pub fn with_extends(mut self, name: impl Into<String>) -> Self {
        self.extends.push(name.into());
        self
    }
}
