//! Enum member list comparison
//!
//! Member lists are sorted, diffed with an LCS alignment and then read as
//! runs of removed and added values. A removed run directly followed by an
//! added run is treated as a rename block and paired position by position.

use super::change::Change;
use similar::{capture_diff_slices, Algorithm, DiffOp};

/// A maximal run of one edit kind in the alignment
#[derive(Debug, PartialEq, Eq)]
enum Run<'a> {
    Kept,
    Removed(Vec<&'a str>),
    Added(Vec<&'a str>),
}

/// Compare the values of two enums, named `old_name` and `new_name`
pub fn compare_enum_values(
    old_name: &str,
    old_values: &[String],
    new_name: &str,
    new_values: &[String],
    changes: &mut Vec<Change>,
) {
    let mut old_sorted: Vec<&str> = old_values.iter().map(String::as_str).collect();
    let mut new_sorted: Vec<&str> = new_values.iter().map(String::as_str).collect();
    old_sorted.sort_unstable();
    new_sorted.sort_unstable();

    let runs = runs(&old_sorted, &new_sorted);
    let old_value = |v: &str| format!("{}.{}", old_name, v);
    let new_value = |v: &str| format!("{}.{}", new_name, v);

    let mut i = 0;
    while i < runs.len() {
        match (&runs[i], runs.get(i + 1)) {
            (Run::Removed(removed), Some(Run::Added(added))) => {
                for (before, after) in removed.iter().zip(added.iter()) {
                    changes.push(Change::changed(old_name, old_value(before), new_value(after)));
                }
                for before in removed.iter().skip(added.len()) {
                    changes.push(Change::removed(old_name, old_value(before)));
                }
                for after in added.iter().skip(removed.len()) {
                    changes.push(Change::added(new_name, new_value(after)));
                }
                i += 2;
                continue;
            }
            (Run::Removed(removed), _) => {
                for before in removed {
                    changes.push(Change::removed(old_name, old_value(before)));
                }
            }
            (Run::Added(added), _) => {
                for after in added {
                    changes.push(Change::added(new_name, new_value(after)));
                }
            }
            (Run::Kept, _) => {}
        }
        i += 1;
    }
}

/// Flatten the alignment into runs, merging adjacent edits of one kind
fn runs<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<Run<'a>> {
    let mut runs: Vec<Run<'a>> = Vec::new();

    for op in capture_diff_slices(Algorithm::Lcs, old, new) {
        match op {
            DiffOp::Equal { .. } => push_kept(&mut runs),
            DiffOp::Delete {
                old_index, old_len, ..
            } => push_removed(&mut runs, &old[old_index..old_index + old_len]),
            DiffOp::Insert {
                new_index, new_len, ..
            } => push_added(&mut runs, &new[new_index..new_index + new_len]),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                push_removed(&mut runs, &old[old_index..old_index + old_len]);
                push_added(&mut runs, &new[new_index..new_index + new_len]);
            }
        }
    }

    runs
}

fn push_kept(runs: &mut Vec<Run<'_>>) {
    if runs.last() != Some(&Run::Kept) {
        runs.push(Run::Kept);
    }
}

fn push_removed<'a>(runs: &mut Vec<Run<'a>>, values: &[&'a str]) {
    match runs.last_mut() {
        Some(Run::Removed(existing)) => existing.extend_from_slice(values),
        _ => runs.push(Run::Removed(values.to_vec())),
    }
}

fn push_added<'a>(runs: &mut Vec<Run<'a>>, values: &[&'a str]) {
    match runs.last_mut() {
        Some(Run::Added(existing)) => existing.extend_from_slice(values),
        _ => runs.push(Run::Added(values.to_vec())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn compare(old: &[&str], new: &[&str]) -> Vec<Change> {
        let mut changes = Vec::new();
        compare_enum_values("Color", &values(old), "Color", &values(new), &mut changes);
        changes
    }

    #[test]
    fn test_rename_is_one_change() {
        assert_eq!(
            compare(&["RED", "GREEN", "BLUE"], &["RED", "GREEN", "CYAN"]),
            vec![Change::changed("Color", "Color.BLUE", "Color.CYAN")]
        );
    }

    #[test]
    fn test_pure_addition() {
        assert_eq!(
            compare(&["RED"], &["RED", "GREEN"]),
            vec![Change::added("Color", "Color.GREEN")]
        );
    }

    #[test]
    fn test_pure_removal() {
        assert_eq!(
            compare(&["RED", "GREEN"], &["RED"]),
            vec![Change::removed("Color", "Color.GREEN")]
        );
    }

    #[test]
    fn test_identical_and_reordered() {
        assert!(compare(&["A", "B"], &["B", "A"]).is_empty());
    }

    #[test]
    fn test_uneven_rename_block() {
        assert_eq!(
            compare(&["A", "B", "Z"], &["C", "Z"]),
            vec![
                Change::changed("Color", "Color.A", "Color.C"),
                Change::removed("Color", "Color.B"),
            ]
        );
    }

    #[test]
    fn test_from_empty_side() {
        let mut changes = Vec::new();
        compare_enum_values("Mode", &[], "Mode", &values(&["a", "b"]), &mut changes);
        assert_eq!(
            changes,
            vec![Change::added("Mode", "Mode.a"), Change::added("Mode", "Mode.b")]
        );
    }

    #[test]
    fn test_runs_merge_adjacent_edits() {
        let runs = runs(&["A", "B", "Z"], &["C", "Z"]);
        assert_eq!(
            runs,
            vec![Run::Removed(vec!["A", "B"]), Run::Added(vec!["C"]), Run::Kept]
        );
    }
}
