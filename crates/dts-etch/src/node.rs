//! Declaration node types
//!
//! A [`Declaration`] is one entry of an extracted structure. The JSON
//! form is the stored document format: a `type` tag plus kind-specific
//! fields, e.g.
//!
//! ```json
//! { "type": "property", "name": "id", "propertyType": "string" }
//! ```

use crate::class::ClassDecl;
use crate::function::MethodDecl;
use crate::interface::InterfaceDecl;
use crate::params::ParameterDecl;
use crate::property::PropertyDecl;
use crate::r#enum::EnumDecl;
use crate::type_alias::TypeAliasDecl;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location of a syntax node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    /// 1-indexed line number
    pub line: usize,
    /// 0-indexed column number
    pub col: usize,
}

impl Location {
    /// Create a new location
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Kind of declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Enum,
    Class,
    Interface,
    Method,
    Property,
    Parameter,
    TypeAlias,
}

impl DeclarationKind {
    /// Tag used in the stored document
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Enum => "enum",
            DeclarationKind::Class => "class",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Method => "method",
            DeclarationKind::Property => "property",
            DeclarationKind::Parameter => "parameter",
            DeclarationKind::TypeAlias => "type_alias",
        }
    }

    /// Whether declarations of this kind hold members
    pub fn is_container(&self) -> bool {
        matches!(self, DeclarationKind::Class | DeclarationKind::Interface)
    }

    /// Whether declarations of this kind are compared by their display text
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            DeclarationKind::Method
                | DeclarationKind::Property
                | DeclarationKind::Parameter
                | DeclarationKind::TypeAlias
        )
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declaration of an extracted structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Declaration {
    Enum(EnumDecl),
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Method(MethodDecl),
    Property(PropertyDecl),
    Parameter(ParameterDecl),
    TypeAlias(TypeAliasDecl),
}

impl Declaration {
    /// Declaration name
    pub fn name(&self) -> &str {
        match self {
            Declaration::Enum(d) => &d.name,
            Declaration::Class(d) => &d.name,
            Declaration::Interface(d) => &d.name,
            Declaration::Method(d) => &d.name,
            Declaration::Property(d) => &d.name,
            Declaration::Parameter(d) => &d.name,
            Declaration::TypeAlias(d) => &d.name,
        }
    }

    /// Declaration kind
    pub fn kind(&self) -> DeclarationKind {
        match self {
            Declaration::Enum(_) => DeclarationKind::Enum,
            Declaration::Class(_) => DeclarationKind::Class,
            Declaration::Interface(_) => DeclarationKind::Interface,
            Declaration::Method(_) => DeclarationKind::Method,
            Declaration::Property(_) => DeclarationKind::Property,
            Declaration::Parameter(_) => DeclarationKind::Parameter,
            Declaration::TypeAlias(_) => DeclarationKind::TypeAlias,
        }
    }

    /// Members of a class or interface; empty for every other kind
    pub fn members(&self) -> &[Declaration] {
        match self {
            Declaration::Class(d) => &d.properties,
            Declaration::Interface(d) => &d.properties,
            _ => &[],
        }
    }

    /// Enum values; empty for every other kind
    pub fn enum_values(&self) -> &[String] {
        match self {
            Declaration::Enum(d) => &d.values,
            _ => &[],
        }
    }

    /// Rendered type of a property, parameter or type alias
    pub fn type_text(&self) -> Option<&str> {
        match self {
            Declaration::Property(d) => Some(&d.property_type),
            Declaration::Parameter(d) => Some(&d.parameter_type),
            Declaration::TypeAlias(d) => Some(&d.property_type),
            _ => None,
        }
    }

    /// `name: type` as it appears inside a parameter list
    pub fn param_fragment(&self) -> String {
        format!("{}: {}", self.name(), self.type_text().unwrap_or("void"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{mock_class, mock_method, mock_param, mock_property};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_tags() {
        assert_eq!(DeclarationKind::TypeAlias.as_str(), "type_alias");
        assert_eq!(DeclarationKind::Class.to_string(), "class");
        assert!(DeclarationKind::Interface.is_container());
        assert!(DeclarationKind::TypeAlias.is_leaf());
        assert!(DeclarationKind::Parameter.is_leaf());
        assert!(!DeclarationKind::Enum.is_leaf());
        assert!(!DeclarationKind::Enum.is_container());
    }

    #[test]
    fn test_members() {
        let method = mock_method("add", vec![mock_param("a", "number")], Some("void"));
        assert!(method.members().is_empty());

        let class = mock_class("Calc", vec![method, mock_property("total", "number")]);
        assert_eq!(class.members().len(), 2);
    }

    #[test]
    fn test_param_fragment() {
        assert_eq!(mock_param("a", "string").param_fragment(), "a: string");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(mock_property("id", "string")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "property", "name": "id", "propertyType": "string" })
        );
    }
}
