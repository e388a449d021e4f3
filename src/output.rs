//! Report rendering and persistence for an analysis.
//!
//! Supports the plain-text summary and results table, JSON serialization,
//! and CSV export.

use std::fmt;
use std::path::Path;

use anyhow::Result;
use csv::WriterBuilder;
use tracing::{info, warn};

use crate::analyzers::grade::assign_grade;
use crate::analyzers::types::{Analysis, ExportRow, GradedEntry};
use crate::error::ExportError;
use crate::roster::Roster;

const EXPORT_HEADER: [&str; 3] = ["Name", "Marks", "Grade"];
const TABLE_RULE_WIDTH: usize = 46;

/// Statistics, grade distribution and pass/fail lists as console text.
pub struct Summary<'a>(pub &'a Analysis);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let analysis = self.0;
        let stats = &analysis.stats;

        writeln!(f, "analysis summary")?;
        writeln!(f, "----------------")?;
        writeln!(f, "total students: {}", stats.count)?;
        writeln!(f, "average marks: {}", fmt_measure(stats.mean))?;
        writeln!(f, "median marks: {}", fmt_measure(stats.median))?;
        for (label, entry) in [("highest", &stats.max), ("lowest", &stats.min)] {
            match entry {
                Some(e) => writeln!(f, "{label}: {} with {:?}", e.name, e.score)?,
                None => writeln!(f, "{label}: n/a")?,
            }
        }

        writeln!(f)?;
        writeln!(f, "grade distribution")?;
        for (grade, count) in analysis.distribution.iter() {
            writeln!(f, "{grade}: {count}")?;
        }

        let classification = &analysis.classification;
        writeln!(f)?;
        writeln!(f, "pass / fail summary (pass mark {})", analysis.pass_mark)?;
        writeln!(f, "passed count: {}", classification.passed.len())?;
        writeln!(f, "passed names: {}", join_names(&classification.passed))?;
        writeln!(f, "failed count: {}", classification.failed.len())?;
        writeln!(f, "failed names: {}", join_names(&classification.failed))
    }
}

/// Name / marks / grade table, marks rounded to one decimal place.
pub struct ResultsTable<'a>(pub &'a [GradedEntry]);

impl fmt::Display for ResultsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(TABLE_RULE_WIDTH);

        writeln!(f, "{:30} {:>6} {:>6}", "Name", "Marks", "Grade")?;
        writeln!(f, "{rule}")?;
        for entry in self.0 {
            writeln!(
                f,
                "{:30} {:6.1} {:6}",
                entry.name,
                entry.score,
                entry.grade.as_str()
            )?;
        }
        writeln!(f, "{rule}")
    }
}

pub fn render_summary(analysis: &Analysis) -> String {
    Summary(analysis).to_string()
}

pub fn render_table(grades: &[GradedEntry]) -> String {
    ResultsTable(grades).to_string()
}

/// The whole analysis as pretty-printed JSON.
pub fn render_json(analysis: &Analysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

/// Writes `Name,Marks,Grade` followed by one row per roster entry, in roster order.
///
/// Any existing file at `path` is replaced.
#[tracing::instrument(skip_all, fields(path = %path.display(), rows = roster.len()))]
pub fn export_csv(path: &Path, roster: &Roster) -> Result<(), ExportError> {
    let result = write_export(path, roster).map_err(|source| ExportError {
        path: path.to_path_buf(),
        source,
    });
    match &result {
        Ok(()) => info!("Results exported"),
        Err(e) => warn!(error = %e, "Export failed"),
    }
    result
}

fn write_export(path: &Path, roster: &Roster) -> Result<(), csv::Error> {
    // the header comes from `ExportRow` on the first row
    let mut writer = WriterBuilder::new().from_path(path)?;
    if roster.is_empty() {
        writer.write_record(EXPORT_HEADER)?;
    }
    for (name, score) in roster.iter() {
        writer.serialize(ExportRow {
            name,
            marks: score,
            grade: assign_grade(score),
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn fmt_measure(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

fn join_names(names: &[String]) -> String {
    if names.is_empty() {
        "None".to_string()
    } else {
        names.join(", ")
    }
}
