use chrono::Utc;

use crate::analyzers::classify::classify;
use crate::analyzers::grade::{GradeDistribution, assign_grade};
use crate::analyzers::types::{Analysis, GradedEntry};
use crate::roster::Roster;
use crate::stats::RosterStats;

/// Per-student grades in roster order.
pub fn grade_roster(roster: &Roster) -> Vec<GradedEntry> {
    roster
        .iter()
        .map(|(name, score)| GradedEntry {
            name: name.to_string(),
            score,
            grade: assign_grade(score),
        })
        .collect()
}

/// Runs statistics, grading and classification over one roster snapshot.
///
/// An empty roster is a valid input and yields empty or `None` measures.
pub fn analyze_roster(roster: &Roster, pass_mark: f64) -> Analysis {
    Analysis {
        generated_at: Utc::now(),
        pass_mark,
        stats: RosterStats::from_roster(roster),
        grades: grade_roster(roster),
        distribution: GradeDistribution::from_roster(roster),
        classification: classify(roster, pass_mark),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::classify::DEFAULT_PASS_MARK;
    use crate::analyzers::grade::Grade;

    #[test]
    fn test_analyze_empty_roster() {
        let analysis = analyze_roster(&Roster::new(), DEFAULT_PASS_MARK);

        assert_eq!(analysis.stats.count, 0);
        assert_eq!(analysis.stats.mean, None);
        assert!(analysis.grades.is_empty());
        assert_eq!(analysis.distribution.total(), 0);
        assert!(analysis.classification.passed.is_empty());
        assert!(analysis.classification.failed.is_empty());
    }

    #[test]
    fn test_analyze_roster_is_consistent() {
        let roster: Roster = [("Amy", 85.0), ("Ben", 72.0), ("Cal", 30.0)]
            .into_iter()
            .collect();
        let analysis = analyze_roster(&roster, DEFAULT_PASS_MARK);

        let grades: Vec<_> = analysis.grades.iter().map(|g| g.grade).collect();
        assert_eq!(grades, vec![Grade::B, Grade::C, Grade::F]);
        assert_eq!(analysis.distribution.total(), roster.len());
        assert_eq!(analysis.classification.failed, vec!["Cal"]);
        assert_eq!(analysis.pass_mark, 40.0);
    }

    #[test]
    fn test_analysis_serializes_to_json() {
        let roster: Roster = [("Amy", 95.0)].into_iter().collect();
        let json = serde_json::to_value(analyze_roster(&roster, 50.0)).unwrap();

        assert_eq!(json["stats"]["count"], 1);
        assert_eq!(json["stats"]["max"]["name"], "Amy");
        assert_eq!(json["grades"][0]["grade"], "A");
        assert_eq!(json["distribution"]["A"], 1);
        assert_eq!(json["distribution"]["F"], 0);
        assert_eq!(json["classification"]["passed"][0], "Amy");
    }
}
