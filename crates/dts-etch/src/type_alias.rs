//! Type alias declarations

use serde::{Deserialize, Serialize};

/// Type alias declaration
///
/// The aliased type is stored under `propertyType` to stay compatible with
/// existing stored documents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAliasDecl {
    /// Alias name
    pub name: String,

    /// Rendered aliased type
    pub property_type: String,
}

impl TypeAliasDecl {
    /// Create a type alias
    pub fn new(name: impl Into<String>, property_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property_type: property_type.into(),
        }
    }
}
