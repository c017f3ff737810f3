//! Name lookup with parent links
//!
//! The differencer needs each declaration's container name to qualify
//! display strings (`Entity.kill(): boolean`). Instead of writing a back
//! reference into the declarations, the link is kept next to each entry
//! of a per-comparison lookup table, so structures are never mutated and
//! can be diffed any number of times.

use crate::node::Declaration;
use std::collections::BTreeMap;

/// A declaration together with the name of its container
#[derive(Debug, Clone, Copy)]
pub struct Linked<'a> {
    pub decl: &'a Declaration,
    pub parent: Option<&'a str>,
}

impl<'a> Linked<'a> {
    /// Name the change is grouped under: the container, or the
    /// declaration itself at top level
    pub fn group_name(&self) -> &'a str {
        self.parent.unwrap_or_else(|| self.decl.name())
    }

    /// `Parent.` prefix for qualified names, empty at top level
    pub fn prefix(&self) -> String {
        match self.parent {
            Some(parent) => format!("{}.", parent),
            None => String::new(),
        }
    }
}

/// Sorted name to declaration lookup
///
/// Same-named siblings collapse to the last one.
#[derive(Debug, Default)]
pub struct DeclIndex<'a> {
    entries: BTreeMap<&'a str, Linked<'a>>,
}

impl<'a> DeclIndex<'a> {
    /// Index a top-level structure
    pub fn top_level(decls: &'a [Declaration]) -> Self {
        Self::build(decls, None)
    }

    /// Index the members of a class or interface
    ///
    /// Anything else has no members and yields an empty index.
    pub fn members_of(container: Option<&'a Declaration>) -> Self {
        match container {
            Some(decl) => Self::build(decl.members(), Some(decl.name())),
            None => Self::default(),
        }
    }

    fn build(decls: &'a [Declaration], parent: Option<&'a str>) -> Self {
        let mut entries = BTreeMap::new();
        for decl in decls {
            entries.insert(decl.name(), Linked { decl, parent });
        }
        Self { entries }
    }

    /// Look up an entry by name
    pub fn get(&self, name: &str) -> Option<Linked<'a>> {
        self.entries.get(name).copied()
    }

    /// Whether a name is present
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
