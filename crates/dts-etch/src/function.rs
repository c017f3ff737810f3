//! Method declarations
//!
//! Methods cover class methods, constructors and accessors, interface
//! method signatures and ambient top-level functions. Only the latter
//! come without a `result`.

use crate::node::Declaration;
use serde::{Deserialize, Serialize};

/// Method or function declaration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDecl {
    /// Method name
    pub name: String,

    /// Parameter declarations in order
    #[serde(default)]
    pub parameters: Vec<Declaration>,

    /// Rendered return type
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub result: Option<String>,
}

impl MethodDecl {
    /// Create a method without parameters or result
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            result: None,
        }
    }

    /// Add a parameter
    pub fn with_param(mut self, param: Declaration) -> Self {
        self.parameters.push(param);
        self
    }

    /// Set the rendered result type
    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// `a: string, b: number`
    pub fn param_list(&self) -> String {
        self.parameters
            .iter()
            .map(Declaration::param_fragment)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::mock_param;

    #[test]
    fn test_param_list() {
        let method = MethodDecl::new("set")
            .with_param(mock_param("key", "string"))
            .with_param(mock_param("value", "number"))
            .with_result("void");
        assert_eq!(method.param_list(), "key: string, value: number");
    }
}
