use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::roster::Roster;

/// Letter grade derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Every grade, best first.
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts a score into a letter grade.
///
/// | Range       | Grade |
/// |-------------|-------|
/// | >= 90       | A     |
/// | >= 80       | B     |
/// | >= 70       | C     |
/// | >= 60       | D     |
/// | < 60        | F     |
///
/// The arms cover every `f64`, `NaN` included (it lands on `F`).
pub fn assign_grade(score: f64) -> Grade {
    match score {
        s if s >= 90.0 => Grade::A,
        s if s >= 80.0 => Grade::B,
        s if s >= 70.0 => Grade::C,
        s if s >= 60.0 => Grade::D,
        _ => Grade::F,
    }
}

/// Count of roster entries per grade. All five grades are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GradeDistribution {
    counts: BTreeMap<Grade, usize>,
}

impl Default for GradeDistribution {
    fn default() -> Self {
        Self {
            counts: Grade::ALL.iter().map(|&g| (g, 0)).collect(),
        }
    }
}

impl GradeDistribution {
    pub fn from_roster(roster: &Roster) -> Self {
        let mut distribution = Self::default();
        for score in roster.scores() {
            distribution.record(assign_grade(score));
        }
        distribution
    }

    pub fn record(&mut self, grade: Grade) {
        *self.counts.entry(grade).or_default() += 1;
    }

    pub fn count(&self, grade: Grade) -> usize {
        self.counts.get(&grade).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// `(grade, count)` pairs from A to F.
    pub fn iter(&self) -> impl Iterator<Item = (Grade, usize)> + '_ {
        self.counts.iter().map(|(&g, &n)| (g, n))
    }
}
