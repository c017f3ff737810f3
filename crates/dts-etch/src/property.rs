//! Property declarations
//!
//! Class fields, interface property signatures and top-level variables
//! all reduce to a name and a rendered type.

use serde::{Deserialize, Serialize};

/// Property declaration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDecl {
    /// Property name; string keys are written `'key'`
    pub name: String,

    /// Rendered type
    pub property_type: String,
}

impl PropertyDecl {
    /// Create a property
    pub fn new(name: impl Into<String>, property_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property_type: property_type.into(),
        }
    }
}
