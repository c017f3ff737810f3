//! `dts-etch diff`
//!
//! Compares two stored structure documents and prints the change report.

use crate::report::{self, ReportOptions};
use anyhow::{anyhow, bail, Context, Result};
use dts_etch::{compare_structures_with, ChangePrinter, Declaration, EtchConfig, ReportFormat};
use std::fs;
use std::path::{Path, PathBuf};

/// Run the diff command with the given arguments
pub fn run(args: &[String], config: &EtchConfig) -> Result<()> {
    let cmd = DiffCommand::parse(args, config)?;

    let old = load_structure(&cmd.old)?;
    let new = load_structure(&cmd.new)?;
    let changes = compare_structures_with(&old, &new, &cmd.report.diff);

    match cmd.report.format {
        ReportFormat::Text => ChangePrinter::new(&changes, cmd.report.color).print_to_stdout()?,
        format => {
            let old_name = file_stem(&cmd.old);
            let new_name = file_stem(&cmd.new);
            let title = format!("Changes from {} to {}", old_name, new_name);
            print!(
                "{}",
                report::render(&changes, format, &title, Some((&old_name, &new_name)))?
            );
        }
    }

    Ok(())
}

/// Read a structure document written by `extract`
pub fn load_structure(path: &Path) -> Result<Vec<Declaration>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("decoding {}", path.display()))
}

/// File name without extension, used as a version label
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Diff command configuration
#[derive(Debug)]
struct DiffCommand {
    old: PathBuf,
    new: PathBuf,
    report: ReportOptions,
}

impl DiffCommand {
    fn parse(args: &[String], config: &EtchConfig) -> Result<Self> {
        let mut report = ReportOptions::from_config(config);
        let mut paths = Vec::new();

        let mut i = 0;
        while i < args.len() {
            let consumed = report.apply_flag(args, i)?;
            if consumed > 0 {
                i += consumed;
                continue;
            }
            match args[i].as_str() {
                arg if !arg.starts_with('-') => {
                    paths.push(PathBuf::from(arg));
                    i += 1;
                }
                _ => bail!("Unknown flag: {}", args[i]),
            }
        }

        let usage = || anyhow!("Usage: dts-etch diff <old.json> <new.json> [-f text|json|html]");
        if paths.len() > 2 {
            return Err(usage());
        }
        let mut paths = paths.into_iter();
        let old = paths.next().ok_or_else(usage)?;
        let new = paths.next().ok_or_else(usage)?;

        Ok(DiffCommand { old, new, report })
    }
}
