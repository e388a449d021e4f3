use serde::Serialize;

use crate::roster::Roster;

/// Pass mark used when the caller does not pick one.
pub const DEFAULT_PASS_MARK: f64 = 40.0;

/// Roster names split by pass mark, each list in roster order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Classification {
    pub passed: Vec<String>,
    pub failed: Vec<String>,
}

/// Splits the roster at `pass_mark`: `score >= pass_mark` passes, everything
/// else fails. Every name lands in exactly one list.
pub fn classify(roster: &Roster, pass_mark: f64) -> Classification {
    let (passed, failed): (Vec<_>, Vec<_>) = roster
        .iter()
        .partition(|&(_, score)| score >= pass_mark);

    Classification {
        passed: passed.into_iter().map(|(name, _)| name.to_string()).collect(),
        failed: failed.into_iter().map(|(name, _)| name.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Roster {
        [("Amy", 85.0), ("Ben", 39.9), ("Cal", 40.0), ("Dee", 12.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_default_pass_mark_is_inclusive() {
        let c = classify(&sample(), DEFAULT_PASS_MARK);
        assert_eq!(c.passed, vec!["Amy", "Cal"]);
        assert_eq!(c.failed, vec!["Ben", "Dee"]);
    }

    #[test]
    fn test_partition_covers_roster() {
        let roster = sample();
        for pass_mark in [0.0, 40.0, 60.0, 100.0] {
            let c = classify(&roster, pass_mark);
            assert_eq!(c.passed.len() + c.failed.len(), roster.len());
            assert!(c.passed.iter().all(|name| !c.failed.contains(name)));
        }
    }

    #[test]
    fn test_custom_pass_mark() {
        let c = classify(&sample(), 90.0);
        assert!(c.passed.is_empty());
        assert_eq!(c.failed.len(), 4);
    }

    #[test]
    fn test_empty_roster() {
        assert_eq!(
            classify(&Roster::new(), DEFAULT_PASS_MARK),
            Classification::default()
        );
    }
}
