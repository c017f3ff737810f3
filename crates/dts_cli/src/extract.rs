//! `dts-etch extract`
//!
//! Writes the structure of one declaration file as pretty JSON, to a file
//! or to stdout.

use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::path::PathBuf;

/// Run the extract command with the given arguments
pub fn run(args: &[String]) -> Result<()> {
    let cmd = ExtractCommand::parse(args)?;

    let structure = dts_etch::extract_structure_file(&cmd.input)
        .with_context(|| format!("extracting {}", cmd.input.display()))?;
    let json = serde_json::to_string_pretty(&structure)?;

    match &cmd.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json + "\n")
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(
                "Extracted {} declarations to {}",
                structure.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Extract command configuration
#[derive(Debug, PartialEq)]
struct ExtractCommand {
    /// Declaration file to read
    input: PathBuf,
    /// JSON file to write; stdout when absent
    output: Option<PathBuf>,
}

impl ExtractCommand {
    fn parse(args: &[String]) -> Result<Self> {
        let mut input = None;
        let mut output = None;

        let mut i = 0;
        while i < args.len() {
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
            input.ok_or_else(|| anyhow!("Usage: dts-etch extract <file.d.ts> [-o out.json]"))?;
        Ok(ExtractCommand { input, output })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse() {
        let cmd = ExtractCommand::parse(&args(&["index.d.ts", "-o", "out/1.0.0.json"])).unwrap();
        assert_eq!(
            cmd,
            ExtractCommand {
                input: PathBuf::from("index.d.ts"),
                output: Some(PathBuf::from("out/1.0.0.json")),
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(ExtractCommand::parse(&[]).is_err());
        assert!(ExtractCommand::parse(&args(&["a.d.ts", "-o"])).is_err());
        assert!(ExtractCommand::parse(&args(&["a.d.ts", "b.d.ts"])).is_err());
        assert!(ExtractCommand::parse(&args(&["a.d.ts", "--bogus"])).is_err());
    }

    #[test]
    fn test_run_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("index.d.ts");
        let output = dir.path().join("docs").join("1.0.0.json");
        fs::write(&input, "export declare const world: World;\n").unwrap();

        run(&args(&[
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]))
        .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!([{ "type": "property", "name": "world", "propertyType": "World" }])
        );
    }
}
