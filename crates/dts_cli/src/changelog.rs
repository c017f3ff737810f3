//! `dts-etch changelog`
//!
//! Walks a directory of stored structures named `<version>.json`, orders
//! them by package version and writes one report per consecutive pair,
//! named `<newer version>.changes.<ext>`.

use crate::diff::{file_stem, load_structure};
use crate::report::{self, ReportOptions};
use anyhow::{anyhow, bail, Context, Result};
use dts_etch::{
    compare_structures_with, compare_versions, Declaration, Diagnostic, DiagnosticsCollector,
    EtchConfig, ReportFormat,
};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Infix of report file names; such files are never read as versions
pub const REPORT_INFIX: &str = "changes";

/// Run the changelog command with the given arguments
pub fn run(args: &[String], config: &EtchConfig) -> Result<()> {
    let cmd = ChangelogCommand::parse(args, config)?;
    let outcome = generate(&cmd)?;

    outcome.diagnostics.print();
    outcome.diagnostics.print_summary();
    tracing::info!(
        "Wrote {} report(s) to {}",
        outcome.written.len(),
        cmd.output.display()
    );

    Ok(())
}

/// Result of a changelog run
#[derive(Debug, Default)]
pub struct ChangelogOutcome {
    /// Reports written, in version order
    pub written: Vec<PathBuf>,
    /// Documents or reports that were skipped
    pub diagnostics: DiagnosticsCollector,
}

/// Report file name for a version
pub fn report_file_name(version: &str, format: ReportFormat) -> String {
    format!("{}.{}.{}", version, REPORT_INFIX, format.extension())
}

/// Collect `<version>.json` files directly inside `dir`, oldest first
///
/// Reports written by an earlier run into the same directory are skipped.
pub fn collect_versions(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let report_suffix = format!(".{}", REPORT_INFIX);
    let mut versions = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("reading {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            let version = file_stem(path);
            if !version.ends_with(&report_suffix) {
                versions.push((version, path.to_path_buf()));
            }
        }
    }
    versions.sort_by(|(a, _), (b, _)| compare_versions(a, b));
    Ok(versions)
}

/// Compare each readable version against the previous readable one
///
/// A document that fails to load is reported and skipped; the next
/// version is compared against the last one that loaded.
fn generate(cmd: &ChangelogCommand) -> Result<ChangelogOutcome> {
    let versions = collect_versions(&cmd.input)?;
    let mut outcome = ChangelogOutcome::default();
    if versions.len() < 2 {
        let message = format!("need at least two <version>.json files, found {}", versions.len());
        tracing::warn!("{}: {}", cmd.input.display(), message);
        outcome
            .diagnostics
            .add(Diagnostic::warning(message).in_file(&cmd.input));
    }

    fs::create_dir_all(&cmd.output)
        .with_context(|| format!("creating {}", cmd.output.display()))?;

    let mut previous: Option<(String, Vec<Declaration>)> = None;

    for (version, path) in versions {
        let structure = match load_structure(&path) {
            Ok(structure) => structure,
            Err(err) => {
                tracing::warn!("Skipping {}: {:#}", path.display(), err);
                outcome
                    .diagnostics
                    .add(Diagnostic::error(format!("{:#}", err)).in_file(&path));
                continue;
            }
        };

        if let Some((old_version, old)) = &previous {
            let target = cmd
                .output
                .join(report_file_name(&version, cmd.report.format));
            match write_report(cmd, old_version, old, &version, &structure, &target) {
                Ok(()) => {
                    tracing::debug!("{} -> {}: {}", old_version, version, target.display());
                    outcome.written.push(target);
                }
                Err(err) => {
                    tracing::warn!("Skipping {}: {:#}", target.display(), err);
                    outcome
                        .diagnostics
                        .add(Diagnostic::error(format!("{:#}", err)).in_file(&target));
                }
            }
        }

        previous = Some((version, structure));
    }

    Ok(outcome)
}

fn write_report(
    cmd: &ChangelogCommand,
    old_version: &str,
    old: &[Declaration],
    new_version: &str,
    new: &[Declaration],
    target: &Path,
) -> Result<()> {
    let changes = compare_structures_with(old, new, &cmd.report.diff);
    let title = format!("Changes from {} to {}", old_version, new_version);
    let rendered = report::render(
        &changes,
        cmd.report.format,
        &title,
        Some((old_version, new_version)),
    )?;
    fs::write(target, rendered).with_context(|| format!("writing {}", target.display()))
}

/// Changelog command configuration
#[derive(Debug)]
struct ChangelogCommand {
    /// Directory holding `<version>.json` documents
    input: PathBuf,
    /// Directory receiving the reports
    output: PathBuf,
    report: ReportOptions,
}

impl ChangelogCommand {
    fn parse(args: &[String], config: &EtchConfig) -> Result<Self> {
        let mut report = ReportOptions::from_config(config);
        let mut input = None;
        let mut output = None;

        let mut i = 0;
        while i < args.len() {
            let consumed = report.apply_flag(args, i)?;
            if consumed > 0 {
                i += consumed;
                continue;
            }
            match args[i].as_str() {
                "--output" | "-o" => {
                    if i + 1 < args.len() {
                        output = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    } else {
                        bail!("--output requires a value");
                    }
                }
                arg if !arg.starts_with('-') && input.is_none() => {
                    input = Some(PathBuf::from(arg));
                    i += 1;
                }
                _ => bail!("Unknown argument: {}", args[i]),
            }
        }

        let input =
            input.ok_or_else(|| anyhow!("Usage: dts-etch changelog <dir> [-o out-dir]"))?;
        let output = output.unwrap_or_else(|| config.output.directory.clone());

        Ok(ChangelogCommand {
            input,
            output,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dts_etch::test::{mock_enum, mock_structure};
    use dts_etch::Change;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn store(dir: &Path, version: &str, structure: &[Declaration]) {
        fs::write(
            dir.join(format!("{}.json", version)),
            serde_json::to_string(structure).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn test_parse_defaults_from_config() {
        let mut config = EtchConfig::default();
        config.output.directory = PathBuf::from("reports");
        let cmd = ChangelogCommand::parse(&args(&["docs", "-f", "json"]), &config).unwrap();
        assert_eq!(cmd.input, PathBuf::from("docs"));
        assert_eq!(cmd.output, PathBuf::from("reports"));
        assert_eq!(cmd.report.format, ReportFormat::Json);

        let cmd = ChangelogCommand::parse(&args(&["docs", "-o", "out"]), &config).unwrap();
        assert_eq!(cmd.output, PathBuf::from("out"));

        assert!(ChangelogCommand::parse(&[], &config).is_err());
        assert!(ChangelogCommand::parse(&args(&["docs", "-o"]), &config).is_err());
    }

    #[test]
    fn test_collect_versions_in_package_order() {
        let dir = tempfile::tempdir().unwrap();
        for version in ["1.10.0", "1.2.0", "1.2.0-beta.1.20.0-preview.1", "notes"] {
            fs::write(dir.path().join(format!("{}.json", version)), "[]").unwrap();
        }
        fs::write(dir.path().join("1.3.0.changes.json"), "[]").unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("0.1.0.json"), "[]").unwrap();

        let names: Vec<_> = collect_versions(dir.path())
            .unwrap()
            .into_iter()
            .map(|(version, _)| version)
            .collect();
        assert_eq!(
            names,
            vec!["notes", "1.2.0-beta.1.20.0-preview.1", "1.2.0", "1.10.0"]
        );
    }

    #[test]
    fn test_generate_skips_bad_documents() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        store(input.path(), "1.0.0", &[mock_enum("Color", &["RED"])]);
        fs::write(input.path().join("1.1.0.json"), "not json").unwrap();
        store(input.path(), "1.2.0", &[mock_enum("Color", &["RED", "BLUE"])]);
        store(input.path(), "1.3.0", &mock_structure());

        let cmd = ChangelogCommand {
            input: input.path().to_path_buf(),
            output: output.path().to_path_buf(),
            report: ReportOptions {
                format: ReportFormat::Json,
                ..ReportOptions::from_config(&EtchConfig::default())
            },
        };
        let outcome = generate(&cmd).unwrap();

        assert_eq!(
            outcome.written,
            vec![
                output.path().join("1.2.0.changes.json"),
                output.path().join("1.3.0.changes.json"),
            ]
        );
        assert_eq!(outcome.diagnostics.error_count(), 1);
        assert_eq!(
            outcome.diagnostics.diagnostics()[0].file.as_deref(),
            Some(input.path().join("1.1.0.json").as_path())
        );

        let first = fs::read_to_string(output.path().join("1.2.0.changes.json")).unwrap();
        let first: Vec<Change> = serde_json::from_str(&first).unwrap();
        assert_eq!(
            first,
            vec![Change::added("Color", "Color.BLUE"), Change::added("Color", "Color.BLUE")]
        );
    }

    #[test]
    fn test_single_version_warns() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        store(input.path(), "1.0.0", &mock_structure());

        let cmd = ChangelogCommand {
            input: input.path().to_path_buf(),
            output: output.path().to_path_buf(),
            report: ReportOptions::from_config(&EtchConfig::default()),
        };
        let outcome = generate(&cmd).unwrap();
        assert!(outcome.written.is_empty());
        assert_eq!(outcome.diagnostics.warning_count(), 1);
        assert!(!outcome.diagnostics.has_errors());
    }

    #[test]
    fn test_reports_beside_documents_keep_documents() {
        let dir = tempfile::tempdir().unwrap();
        let old = vec![mock_enum("Color", &["RED"])];
        let new = vec![mock_enum("Color", &["RED", "BLUE"])];
        store(dir.path(), "1.0.0", &old);
        store(dir.path(), "1.1.0", &new);

        let cmd = ChangelogCommand {
            input: dir.path().to_path_buf(),
            output: dir.path().to_path_buf(),
            report: ReportOptions {
                format: ReportFormat::Json,
                ..ReportOptions::from_config(&EtchConfig::default())
            },
        };
        let outcome = generate(&cmd).unwrap();
        assert_eq!(outcome.written, vec![dir.path().join("1.1.0.changes.json")]);
        assert_eq!(load_structure(&dir.path().join("1.0.0.json")).unwrap(), old);
        assert_eq!(load_structure(&dir.path().join("1.1.0.json")).unwrap(), new);

        // a second run ignores the report it wrote the first time
        let rerun = generate(&cmd).unwrap();
        assert_eq!(rerun.written, outcome.written);
        assert_eq!(rerun.diagnostics.error_count(), 0);
    }
}
