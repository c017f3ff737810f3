//! Shared report options and rendering for `diff` and `changelog`

use anyhow::{bail, Result};
use dts_etch::{
    Change, ChangePrinter, ChangeSummary, DiffOptions, EtchConfig, HtmlReport, ReportFormat,
};

/// Options common to every command that produces change reports
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub format: ReportFormat,
    pub color: bool,
    pub diff: DiffOptions,
}

impl ReportOptions {
    /// Start from the config file values
    pub fn from_config(config: &EtchConfig) -> Self {
        Self {
            format: config.diff.format,
            color: config.diff.color,
            diff: config.diff_options(),
        }
    }

    /// Apply a report flag at `args[i]`
    ///
    /// Returns how many arguments were consumed, `0` when the flag is not
    /// a report flag.
    pub fn apply_flag(&mut self, args: &[String], i: usize) -> Result<usize> {
        match args[i].as_str() {
            "--format" | "-f" => match args.get(i + 1) {
                Some(value) => {
                    self.format = value.parse()?;
                    Ok(2)
                }
                None => bail!("--format requires a value (text, json, or html)"),
            },
            "--no-color" => {
                self.color = false;
                Ok(1)
            }
            "--dedupe" => {
                self.diff.dedupe_shared_names = true;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

/// Render a change list in a file format
///
/// `versions` names the compared pair for the report heading.
pub fn render(
    changes: &[Change],
    format: ReportFormat,
    title: &str,
    versions: Option<(&str, &str)>,
) -> Result<String> {
    let rendered = match format {
        ReportFormat::Text => {
            let mut text = ChangePrinter::new(changes, false).to_string();
            text.push_str(&ChangeSummary::from_changes(changes).to_string());
            text.push('\n');
            text
        }
        ReportFormat::Json => serde_json::to_string_pretty(changes)? + "\n",
        ReportFormat::Html => {
            let mut report = HtmlReport::new(title)?;
            if let Some((old, new)) = versions {
                report = report.with_versions(old, new);
            }
            report.render(changes)?
        }
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_flags() {
        let args: Vec<String> = ["-f", "json", "--no-color", "--dedupe", "x"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut options = ReportOptions::from_config(&EtchConfig::default());
        assert_eq!(options.apply_flag(&args, 0).unwrap(), 2);
        assert_eq!(options.apply_flag(&args, 2).unwrap(), 1);
        assert_eq!(options.apply_flag(&args, 3).unwrap(), 1);
        assert_eq!(options.apply_flag(&args, 4).unwrap(), 0);
        assert_eq!(options.format, ReportFormat::Json);
        assert!(!options.color);
        assert!(options.diff.dedupe_shared_names);
    }

    #[test]
    fn test_bad_format() {
        let args = vec!["--format".to_string(), "pdf".to_string()];
        let mut options = ReportOptions::from_config(&EtchConfig::default());
        assert!(options.apply_flag(&args, 0).is_err());
    }

    #[test]
    fn test_render_text() {
        let changes = vec![Change::added("World", "World.getDay(): number"), Change::Separator];
        let text = render(&changes, ReportFormat::Text, "t", None).unwrap();
        assert_eq!(text, "+ World.getDay(): number\n\n1 added, 0 removed, 0 changed\n");
    }
}
