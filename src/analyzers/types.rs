//! Data types produced by the analysis pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzers::classify::Classification;
use crate::analyzers::grade::{Grade, GradeDistribution};
use crate::stats::RosterStats;

/// One roster entry with its derived grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedEntry {
    pub name: String,
    pub score: f64,
    pub grade: Grade,
}

/// A single row of the exported results file.
#[derive(Debug, Serialize)]
pub struct ExportRow<'a> {
    #[serde(rename = "Name")]
    pub(crate) name: &'a str,
    #[serde(rename = "Marks")]
    pub(crate) marks: f64,
    #[serde(rename = "Grade")]
    pub(crate) grade: Grade,
}

/// Everything derived from one roster, rendered by the reporter or dumped as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub generated_at: DateTime<Utc>,
    pub pass_mark: f64,
    pub stats: RosterStats,
    pub grades: Vec<GradedEntry>,
    pub distribution: GradeDistribution,
    pub classification: Classification,
}
