use serde::Serialize;

use crate::analyzers::utility::{mean, median};
use crate::roster::Roster;

/// A student paired with their score, as reported for the extremes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: f64,
}

/// Descriptive statistics over one roster snapshot.
///
/// Every measure except `count` is `None` on an empty roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RosterStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub max: Option<ScoreEntry>,
    pub min: Option<ScoreEntry>,
}

impl RosterStats {
    pub fn from_roster(roster: &Roster) -> Self {
        let scores: Vec<f64> = roster.scores().collect();
        RosterStats {
            count: roster.len(),
            mean: mean(&scores),
            median: median(&scores),
            max: find_max_score(roster),
            min: find_min_score(roster),
        }
    }
}

/// Highest score. On ties the first name in roster order wins.
pub fn find_max_score(roster: &Roster) -> Option<ScoreEntry> {
    find_extreme(roster, |candidate, best| candidate > best)
}

/// Lowest score. On ties the first name in roster order wins.
pub fn find_min_score(roster: &Roster) -> Option<ScoreEntry> {
    find_extreme(roster, |candidate, best| candidate < best)
}

// Replacing only on a strict improvement keeps the earliest name on ties.
fn find_extreme(roster: &Roster, beats: impl Fn(f64, f64) -> bool) -> Option<ScoreEntry> {
    let mut entries = roster.iter();
    let (mut best_name, mut best_score) = entries.next()?;
    for (name, score) in entries {
        if beats(score, best_score) {
            best_name = name;
            best_score = score;
        }
    }
    Some(ScoreEntry {
        name: best_name.to_string(),
        score: best_score,
    })
}
