//! Terminal change printer
//!
//! Prints a change list in the `+ / - / !` text form, with colored
//! output when writing to a terminal.
//!
//! # Example
//!
//! ```no_run
//! use dts_etch::diff::Change;
//! use dts_etch::printer::ChangePrinter;
//!
//! let changes = vec![Change::added("World", "World.getDay(): number")];
//! let printer = ChangePrinter::new(&changes, true);
//! println!("{}", printer);
//! ```

use crate::diff::{Change, ChangeSummary};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Terminal change printer
pub struct ChangePrinter<'a> {
    /// Changes to print
    changes: &'a [Change],
    /// Whether to use colored output
    use_color: bool,
}

impl<'a> ChangePrinter<'a> {
    /// Create a new printer
    ///
    /// # Arguments
    /// * `changes` - Change list to print
    /// * `use_color` - Whether to use ANSI colors
    pub fn new(changes: &'a [Change], use_color: bool) -> Self {
        Self { changes, use_color }
    }

    /// Print to stdout, colored when enabled and supported
    pub fn print_to_stdout(&self) -> io::Result<()> {
        let choice = if self.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write_colored(&mut stdout)
    }

    /// Write every change, one per line, followed by a summary
    pub fn write_colored<W: WriteColor>(&self, w: &mut W) -> io::Result<()> {
        for change in self.changes {
            match change {
                Change::Separator => writeln!(w)?,
                _ => {
                    w.set_color(ColorSpec::new().set_fg(Some(sigil_color(change))))?;
                    write!(w, "{}", change)?;
                    w.reset()?;
                    writeln!(w)?;
                }
            }
        }

        let summary = ChangeSummary::from_changes(self.changes);
        w.set_color(ColorSpec::new().set_bold(true))?;
        write!(w, "{}", summary)?;
        w.reset()?;
        writeln!(w)
    }
}

fn sigil_color(change: &Change) -> Color {
    match change {
        Change::Added { .. } => Color::Green,
        Change::Removed { .. } => Color::Red,
        Change::Changed { .. } => Color::Yellow,
        Change::Separator => Color::White,
    }
}

impl Display for ChangePrinter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for change in self.changes {
            writeln!(f, "{}", change)?;
        }
        Ok(())
    }
}
