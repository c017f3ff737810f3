//! Structure comparison
//!
//! Compares two extracted structures and reports added, removed and
//! changed declarations. Names are visited in lexicographic order: first
//! every name of the old structure, then every name of the new one. Within
//! a class or interface the same two-pass order is applied to its members.
//! A name present on both sides is compared in both passes, so each shared
//! difference is reported twice unless [`DiffOptions::dedupe_shared_names`]
//! is set.
//!
//! # Example
//!
//! ```
//! use dts_etch::diff::compare_structures;
//! use dts_etch::test::mock_enum;
//!
//! let old = vec![mock_enum("Color", &["RED", "GREEN", "BLUE"])];
//! let new = vec![mock_enum("Color", &["RED", "GREEN", "CYAN"])];
//! let changes = compare_structures(&old, &new);
//! assert_eq!(changes[0].to_string(), "! Color.BLUE -> Color.CYAN");
//! ```

pub mod change;
pub mod index;
pub mod members;

pub use change::{Change, ChangeSummary};
pub use index::{DeclIndex, Linked};

use crate::node::{Declaration, DeclarationKind};
use serde::{Deserialize, Serialize};

/// Options for [`compare_structures_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// Skip names already visited in the pass over the old structure
    /// when walking the new one, so a shared difference is reported once.
    /// Off by default: stored reports list shared differences twice.
    #[serde(default)]
    pub dedupe_shared_names: bool,
}

impl DiffOptions {
    pub fn with_dedupe_shared_names(mut self, dedupe: bool) -> Self {
        self.dedupe_shared_names = dedupe;
        self
    }
}

/// Compare two structures with default options
pub fn compare_structures(old: &[Declaration], new: &[Declaration]) -> Vec<Change> {
    compare_structures_with(old, new, &DiffOptions::default())
}

/// Compare two structures
pub fn compare_structures_with(
    old: &[Declaration],
    new: &[Declaration],
    options: &DiffOptions,
) -> Vec<Change> {
    let old_index = DeclIndex::top_level(old);
    let new_index = DeclIndex::top_level(new);

    let mut differ = Differ {
        options,
        changes: Vec::new(),
    };
    differ.compare_indexes(&old_index, &new_index);

    tracing::debug!(
        old = old.len(),
        new = new.len(),
        changes = differ.changes.len(),
        "compared structures"
    );

    differ.changes
}

/// Canonical display text of a declaration
///
/// Members are qualified by their container (`Entity.kill(): boolean`).
/// Methods without a result (ambient functions) omit the `: result` part.
pub fn display_text(linked: &Linked<'_>) -> String {
    let prefix = linked.prefix();
    match linked.decl {
        Declaration::Enum(e) => format!("enum {}", e.name),
        Declaration::Class(c) => format!("class {}", c.name),
        Declaration::Interface(i) => format!("interface {}", i.name),
        Declaration::Method(m) => match &m.result {
            Some(result) => format!("{}{}({}): {}", prefix, m.name, m.param_list(), result),
            None => format!("{}{}({})", prefix, m.name, m.param_list()),
        },
        Declaration::Property(p) => format!("{}{}: {}", prefix, p.name, p.property_type),
        Declaration::Parameter(p) => format!("{}{}: {}", prefix, p.name, p.parameter_type),
        Declaration::TypeAlias(t) => format!("type {} = {}", t.name, t.property_type),
    }
}

struct Differ<'o> {
    options: &'o DiffOptions,
    changes: Vec<Change>,
}

impl Differ<'_> {
    fn compare_indexes(&mut self, old: &DeclIndex<'_>, new: &DeclIndex<'_>) {
        let mut names: Vec<&str> = old.names().collect();
        names.extend(
            new.names()
                .filter(|name| !self.options.dedupe_shared_names || !old.contains(name)),
        );

        for name in names {
            self.compare_entries(old.get(name), new.get(name));
        }
    }

    fn compare_entries(&mut self, old: Option<Linked<'_>>, new: Option<Linked<'_>>) {
        if let (Some(o), Some(n)) = (old, new) {
            if o.decl.kind() != n.decl.kind() {
                self.changes.push(
                    Change::changed(o.decl.name(), o.decl.kind().as_str(), n.decl.kind().as_str())
                        .with_detail(format!("{} type: ", n.decl.name())),
                );
            }
        }

        let old_kind = old.map(|l| l.decl.kind());
        let new_kind = new.map(|l| l.decl.kind());
        tracing::trace!(?old_kind, ?new_kind, "compare");

        if old_kind == Some(DeclarationKind::Enum)
            || (old_kind.is_none() && new_kind == Some(DeclarationKind::Enum))
        {
            self.compare_enums(old, new);
            return;
        }

        match new_kind.or(old_kind) {
            Some(kind) if kind.is_container() => self.compare_containers(old, new),
            Some(kind) if kind.is_leaf() => self.compare_leaves(old, new),
            // new side is an enum replacing a declaration of another kind
            Some(_) => self.compare_enums(old, new),
            None => {}
        }
    }

    fn compare_enums(&mut self, old: Option<Linked<'_>>, new: Option<Linked<'_>>) {
        let (old_name, old_values) = match old {
            Some(l) => (l.decl.name(), l.decl.enum_values()),
            None => (new.map_or("", |l| l.decl.name()), &[][..]),
        };
        let (new_name, new_values) = match new {
            Some(l) => (l.decl.name(), l.decl.enum_values()),
            None => (old_name, &[][..]),
        };
        members::compare_enum_values(old_name, old_values, new_name, new_values, &mut self.changes);
    }

    fn compare_containers(&mut self, old: Option<Linked<'_>>, new: Option<Linked<'_>>) {
        let old_members = DeclIndex::members_of(old.map(|l| l.decl));
        let new_members = DeclIndex::members_of(new.map(|l| l.decl));

        let before = self.changes.len();
        self.compare_indexes(&old_members, &new_members);
        if self.changes.len() > before {
            self.changes.push(Change::Separator);
        }
    }

    fn compare_leaves(&mut self, old: Option<Linked<'_>>, new: Option<Linked<'_>>) {
        match (old, new) {
            (Some(o), Some(n)) => {
                let before = display_text(&o);
                let after = display_text(&n);
                if before != after {
                    self.changes.push(Change::changed(n.group_name(), before, after));
                }
            }
            (None, Some(n)) => self.changes.push(Change::added(n.group_name(), display_text(&n))),
            (Some(o), None) => self.changes.push(Change::removed(o.group_name(), display_text(&o))),
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{
        mock_class, mock_enum, mock_interface, mock_method, mock_param, mock_property,
        mock_structure, mock_type_alias,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identical_structures() {
        let structure = mock_structure();
        assert!(compare_structures(&structure, &structure.clone()).is_empty());
    }

    #[test]
    fn test_diff_does_not_mutate_and_repeats() {
        let old = mock_structure();
        let mut new = mock_structure();
        new.push(mock_property("system", "System"));
        let first = compare_structures(&old, &new);
        let second = compare_structures(&old, &new);
        assert_eq!(first, second);
        assert_eq!(first, vec![Change::added("system", "system: System")]);
    }

    #[test]
    fn test_enum_rename() {
        let old = vec![mock_enum("Color", &["RED", "GREEN", "BLUE"])];
        let new = vec![mock_enum("Color", &["RED", "GREEN", "CYAN"])];
        assert_eq!(
            compare_structures(&old, &new),
            vec![
                Change::changed("Color", "Color.BLUE", "Color.CYAN"),
                Change::changed("Color", "Color.BLUE", "Color.CYAN"),
            ]
        );
    }

    #[test]
    fn test_enum_addition() {
        let old = vec![mock_enum("Color", &["RED"])];
        let new = vec![mock_enum("Color", &["RED", "GREEN"])];
        assert_eq!(
            compare_structures(&old, &new),
            vec![Change::added("Color", "Color.GREEN"), Change::added("Color", "Color.GREEN")]
        );
    }

    #[test]
    fn test_method_signature_change() {
        let old = vec![mock_class(
            "Container",
            vec![mock_method("foo", vec![mock_param("a", "string")], Some("void"))],
        )];
        let new = vec![mock_class(
            "Container",
            vec![mock_method("foo", vec![mock_param("a", "number")], Some("void"))],
        )];
        let foo = Change::changed(
            "Container",
            "Container.foo(a: string): void",
            "Container.foo(a: number): void",
        );
        // container and member are each seen once per pass
        assert_eq!(
            compare_structures(&old, &new),
            vec![
                foo.clone(),
                foo.clone(),
                Change::Separator,
                foo.clone(),
                foo,
                Change::Separator,
            ]
        );
    }

    #[test]
    fn test_members_in_name_order() {
        let old = vec![mock_interface(
            "Options",
            vec![mock_property("zoom", "number"), mock_property("alpha", "number")],
        )];
        let new = vec![mock_interface(
            "Options",
            vec![mock_property("beta", "string"), mock_property("zoom", "string")],
        )];
        let zoom = Change::changed("Options", "Options.zoom: number", "Options.zoom: string");
        let visit = vec![
            Change::removed("Options", "Options.alpha: number"),
            zoom.clone(),
            Change::added("Options", "Options.beta: string"),
            zoom,
            Change::Separator,
        ];
        assert_eq!(compare_structures(&old, &new), [visit.clone(), visit].concat());

        let options = DiffOptions::default().with_dedupe_shared_names(true);
        assert_eq!(
            compare_structures_with(&old, &new, &options),
            vec![
                Change::removed("Options", "Options.alpha: number"),
                Change::changed("Options", "Options.zoom: number", "Options.zoom: string"),
                Change::added("Options", "Options.beta: string"),
                Change::Separator,
            ]
        );
    }

    #[test]
    fn test_shared_names_visited_twice() {
        let old = vec![mock_property("world", "World")];
        let new = vec![mock_property("world", "World | undefined")];
        let change = Change::changed("world", "world: World", "world: World | undefined");
        assert_eq!(
            compare_structures(&old, &new),
            vec![change.clone(), change.clone()]
        );

        let old = vec![mock_class("C", vec![mock_property("x", "string")])];
        let new = vec![mock_class("C", vec![mock_property("x", "number")])];
        assert_eq!(compare_structures(&old, &new).len(), 6);

        let options = DiffOptions::default().with_dedupe_shared_names(true);
        assert_eq!(
            compare_structures_with(&old, &new, &options),
            vec![Change::changed("C", "C.x: string", "C.x: number"), Change::Separator]
        );
    }

    #[test]
    fn test_top_level_leaves() {
        let old = vec![
            mock_type_alias("Vector2", "{ x: number, y: number }"),
            mock_method("clearRun", vec![mock_param("runId", "number")], None),
        ];
        let new = vec![mock_type_alias("Vector2", "[number, number]")];
        let alias = Change::changed(
            "Vector2",
            "type Vector2 = { x: number, y: number }",
            "type Vector2 = [number, number]",
        );
        assert_eq!(
            compare_structures(&old, &new),
            vec![
                alias.clone(),
                Change::removed("clearRun", "clearRun(runId: number)"),
                alias,
            ]
        );
    }

    #[test]
    fn test_removed_class_reports_members() {
        let old = vec![mock_class("Entity", vec![mock_property("id", "string")])];
        assert_eq!(
            compare_structures(&old, &[]),
            vec![
                Change::removed("Entity", "Entity.id: string"),
                Change::Separator,
            ]
        );
    }

    #[test]
    fn test_kind_change() {
        let old = vec![mock_class("Entity", vec![mock_property("id", "string")])];
        let new = vec![mock_interface("Entity", vec![mock_property("id", "string")])];
        assert_eq!(
            compare_structures(&old, &new),
            vec![
                Change::changed("Entity", "class", "interface").with_detail("Entity type: "),
                Change::changed("Entity", "class", "interface").with_detail("Entity type: "),
            ]
        );
    }

    #[test]
    fn test_empty_container_change_has_no_separator() {
        let old = vec![mock_class("Empty", vec![])];
        let new = vec![mock_class("Empty", vec![])];
        assert!(compare_structures(&old, &new).is_empty());
    }
}
