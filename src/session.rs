//! Interactive session loop.
//!
//! The session is the only stateful part of the program and the only state it
//! keeps is the round counter. Each round builds a fresh [`Roster`], hands it
//! to the engines and drops it. Reading from any prompt at end of input ends
//! the session cleanly.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::analyzers::aggregate::analyze_roster;
use crate::analyzers::classify::DEFAULT_PASS_MARK;
use crate::error::ValidationError;
use crate::loader::load_roster;
use crate::output::{export_csv, render_summary, render_table};
use crate::parser::{NormalizeOptions, parse_manual_score, parse_student_count, resolve_name};
use crate::roster::Roster;

const DEFAULT_EXPORT_FILE: &str = "results.csv";

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub pass_mark: f64,
    pub normalize: NormalizeOptions,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            pass_mark: DEFAULT_PASS_MARK,
            normalize: NormalizeOptions::default(),
        }
    }
}

/// Menu-driven session over any line-oriented input and output.
pub struct Session<R, W> {
    input: R,
    output: W,
    options: SessionOptions,
    round: usize,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, options: SessionOptions) -> Self {
        Self {
            input,
            output,
            options,
            round: 0,
        }
    }

    /// Runs menu rounds until the user exits or input runs out.
    ///
    /// # Errors
    ///
    /// Only console I/O failures are returned. Load and export problems are
    /// reported to the user and the session continues.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("enter 1, 2 or 3: ")? else {
                return Ok(());
            };

            let roster = match choice.as_str() {
                "1" => match self.manual_entry()? {
                    Some(roster) => roster,
                    None => return Ok(()),
                },
                "2" => match self.bulk_entry()? {
                    Some(roster) => roster,
                    None => return Ok(()),
                },
                "3" => {
                    writeln!(self.output, "bye")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "please enter 1 2 or 3")?;
                    continue;
                }
            };

            self.round += 1;
            debug!(round = self.round, students = roster.len(), "Analysis round");
            self.show_analysis(&roster)?;

            let again = self.prompt("analyze again? (y to continue): ")?;
            if again.map(|a| a.to_lowercase()).as_deref() != Some("y") {
                writeln!(self.output, "good luck. submit on time.")?;
                return Ok(());
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "welcome to gradebook analyzer")?;
        writeln!(self.output, "choose input method:")?;
        writeln!(self.output, "1 - manual entry (type names and marks)")?;
        writeln!(self.output, "2 - load from csv file (name,marks columns)")?;
        writeln!(self.output, "3 - exit")?;
        writeln!(self.output)?;
        Ok(())
    }

    /// Writes `message` and reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("cannot read from input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn manual_entry(&mut self) -> Result<Option<Roster>> {
        let count = loop {
            let Some(line) = self.prompt("how many students? ")? else {
                return Ok(None);
            };
            match parse_student_count(&line) {
                Ok(count) => break count,
                Err(ValidationError::NotPositive(_)) => {
                    writeln!(self.output, "enter a positive whole number")?;
                }
                Err(_) => writeln!(self.output, "please enter a whole number like 5")?,
            }
        };

        let mut roster = Roster::new();
        for position in 1..=count {
            let Some(raw_name) = self.prompt(&format!("student {position} name: "))? else {
                return Ok(None);
            };
            let name = resolve_name(&raw_name, position);

            let score = loop {
                let Some(line) = self.prompt(&format!("{name} marks (0-100): "))? else {
                    return Ok(None);
                };
                match parse_manual_score(&line) {
                    Ok(score) => break score,
                    Err(ValidationError::OutOfRange(_)) => {
                        writeln!(self.output, "marks should be between 0 and 100")?;
                    }
                    Err(_) => writeln!(self.output, "enter a number like 78 or 92.5")?,
                }
            };
            roster.insert(name, score);
        }
        Ok(Some(roster))
    }

    fn bulk_entry(&mut self) -> Result<Option<Roster>> {
        let Some(path) = self.prompt("enter csv path like students.csv: ")? else {
            return Ok(None);
        };

        let roster = match load_roster(Path::new(&path), self.options.normalize) {
            Ok(load) => {
                for rejected in &load.rejected {
                    writeln!(self.output, "{rejected}")?;
                }
                load.roster
            }
            Err(e) => {
                writeln!(self.output, "error reading csv: {e}")?;
                Roster::new()
            }
        };

        if roster.is_empty() {
            writeln!(self.output, "no valid data loaded from csv")?;
        }
        Ok(Some(roster))
    }

    fn show_analysis(&mut self, roster: &Roster) -> Result<()> {
        if roster.is_empty() {
            writeln!(self.output, "no student data available")?;
            return Ok(());
        }

        let analysis = analyze_roster(roster, self.options.pass_mark);
        writeln!(self.output)?;
        write!(self.output, "{}", render_summary(&analysis))?;
        writeln!(self.output)?;
        write!(self.output, "{}", render_table(&analysis.grades))?;
        writeln!(self.output)?;

        self.offer_export(roster)
    }

    fn offer_export(&mut self, roster: &Roster) -> Result<()> {
        loop {
            let Some(answer) = self.prompt("do you want to export results to CSV? (y/n): ")?
            else {
                return Ok(());
            };
            match answer.to_lowercase().as_str() {
                "y" => break,
                "n" | "" => return Ok(()),
                _ => writeln!(self.output, "enter y or n")?,
            }
        }

        let Some(file_name) = self.prompt("enter file name (e.g. results.csv): ")? else {
            return Ok(());
        };
        let file_name = if file_name.is_empty() {
            DEFAULT_EXPORT_FILE.to_string()
        } else {
            file_name
        };

        match export_csv(Path::new(&file_name), roster) {
            Ok(()) => writeln!(self.output, "exported results to {file_name}")?,
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(())
    }
}
