//! Parameter declarations

use serde::{Deserialize, Serialize};

/// Method parameter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDecl {
    /// Parameter name; rest parameters are written `...name`
    pub name: String,

    /// Rendered type; `void` when the parameter has no annotation
    pub parameter_type: String,
}

impl ParameterDecl {
    /// Create a parameter
    pub fn new(name: impl Into<String>, parameter_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter_type: parameter_type.into(),
        }
    }
}
