//! Record normalizer: raw student input into validated `(name, score)` pairs.
//!
//! Two modes share the name fallback rule but not score validation:
//!
//! - manual entry rejects anything that is not a number in `0..=100`, and
//!   the caller asks again;
//! - bulk text takes the first numeric field after the name and, unless
//!   [`NormalizeOptions::enforce_range`] is set, accepts any finite value.
//!
//! A bulk row with no numeric field is dropped and reported as a
//! [`RejectedRow`]. It never aborts the load.

use std::fmt;
use std::ops::RangeInclusive;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::roster::Roster;

/// Valid marks for manual entry, and for bulk rows when range checking is on.
pub const SCORE_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Name given to a record whose name field is blank.
pub fn placeholder_name(position: usize) -> String {
    format!("Student_{position}")
}

/// Trims `raw`, falling back to [`placeholder_name`] when nothing is left.
pub fn resolve_name(raw: &str, position: usize) -> String {
    let name = raw.trim();
    if name.is_empty() {
        placeholder_name(position)
    } else {
        name.to_string()
    }
}

/// Validates the number of students requested for manual entry.
pub fn parse_student_count(input: &str) -> Result<usize, ValidationError> {
    let input = input.trim();
    let count: i64 = input
        .parse()
        .map_err(|_| ValidationError::NotAWholeNumber(input.to_string()))?;
    if count <= 0 {
        return Err(ValidationError::NotPositive(count));
    }
    usize::try_from(count).map_err(|_| ValidationError::NotAWholeNumber(input.to_string()))
}

/// Validates one manually entered score.
pub fn parse_manual_score(input: &str) -> Result<f64, ValidationError> {
    let score =
        parse_number(input).ok_or_else(|| ValidationError::NotANumber(input.trim().to_string()))?;
    if !SCORE_RANGE.contains(&score) {
        return Err(ValidationError::OutOfRange(score));
    }
    Ok(score)
}

/// Parses a single field as a finite real number. `nan` and `inf` do not count.
pub fn parse_number(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Returns the first field, left to right, that parses as a number.
pub fn scan_score<'a>(fields: impl IntoIterator<Item = &'a str>) -> Option<f64> {
    fields.into_iter().find_map(parse_number)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Reject bulk rows whose score falls outside [`SCORE_RANGE`].
    pub enforce_range: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    NoNumericField,
    OutOfRange(f64),
}

/// A bulk row that contributed nothing to the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 1-based line in the source text.
    pub line: u64,
    pub fields: Vec<String>,
    pub reason: RejectReason,
}

impl fmt::Display for RejectedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields.join(",");
        match self.reason {
            RejectReason::NoNumericField => {
                write!(f, "skipping row, cannot parse marks: {fields}")
            }
            RejectReason::OutOfRange(score) => {
                write!(f, "skipping row, marks {score} outside 0-100: {fields}")
            }
        }
    }
}

/// Normalizes one bulk row.
///
/// `accepted` is the number of distinct names already in the roster; a blank
/// name becomes `Student_<accepted + 1>`.
pub fn normalize_row(
    fields: &[&str],
    accepted: usize,
    options: NormalizeOptions,
) -> Result<(String, f64), RejectReason> {
    let (raw_name, rest) = fields.split_first().ok_or(RejectReason::NoNumericField)?;
    let score = scan_score(rest.iter().copied()).ok_or(RejectReason::NoNumericField)?;
    if options.enforce_range && !SCORE_RANGE.contains(&score) {
        return Err(RejectReason::OutOfRange(score));
    }
    Ok((resolve_name(raw_name, accepted + 1), score))
}

/// Result of a bulk parse: the roster plus every row that was dropped.
#[derive(Debug, Default)]
pub struct BulkLoad {
    pub roster: Roster,
    pub rejected: Vec<RejectedRow>,
}

/// Parses comma-separated rows into a [`BulkLoad`].
///
/// No header is assumed. A header line is simply a row without a number and
/// ends up in `rejected`.
///
/// # Errors
///
/// Returns the CSV error if the text cannot be tokenized at all. Rows already
/// accepted are discarded with it.
pub fn parse_roster(text: &str, options: NormalizeOptions) -> Result<BulkLoad, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut load = BulkLoad::default();

    for result in reader.records() {
        // the reader skips blank lines itself
        let record = result?;
        let fields: Vec<&str> = record.iter().collect();
        match normalize_row(&fields, load.roster.len(), options) {
            Ok((name, score)) => {
                load.roster.insert(name, score);
            }
            Err(reason) => {
                let rejected = RejectedRow {
                    line: record.position().map_or(0, |p| p.line()),
                    fields: fields.iter().map(|f| f.to_string()).collect(),
                    reason,
                };
                debug!(line = rejected.line, reason = ?rejected.reason, "Row rejected");
                load.rejected.push(rejected);
            }
        }
    }

    info!(
        accepted = load.roster.len(),
        rejected = load.rejected.len(),
        "Bulk text parsed"
    );
    Ok(load)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_name_blank_uses_position() {
        assert_eq!(resolve_name("   ", 4), "Student_4");
        assert_eq!(resolve_name("", 1), "Student_1");
        assert_eq!(resolve_name("  Amy ", 1), "Amy");
    }

    #[test]
    fn test_student_count_must_be_positive_integer() {
        assert_eq!(parse_student_count(" 5 "), Ok(5));
        assert_eq!(
            parse_student_count("0"),
            Err(ValidationError::NotPositive(0))
        );
        assert_eq!(
            parse_student_count("-3"),
            Err(ValidationError::NotPositive(-3))
        );
        assert_eq!(
            parse_student_count("2.5"),
            Err(ValidationError::NotAWholeNumber("2.5".into()))
        );
        assert_eq!(
            parse_student_count("five"),
            Err(ValidationError::NotAWholeNumber("five".into()))
        );
    }

    #[test]
    fn test_manual_score_bounds_are_inclusive() {
        assert_eq!(parse_manual_score("0"), Ok(0.0));
        assert_eq!(parse_manual_score("100"), Ok(100.0));
        assert_eq!(parse_manual_score(" 92.5 "), Ok(92.5));
        assert_eq!(
            parse_manual_score("100.01"),
            Err(ValidationError::OutOfRange(100.01))
        );
        assert_eq!(
            parse_manual_score("-1"),
            Err(ValidationError::OutOfRange(-1.0))
        );
        assert_eq!(
            parse_manual_score("abc"),
            Err(ValidationError::NotANumber("abc".into()))
        );
    }

    #[test]
    fn test_non_finite_is_not_a_number() {
        assert_eq!(parse_number("nan"), None);
        assert_eq!(parse_number("inf"), None);
        assert!(matches!(
            parse_manual_score("NaN"),
            Err(ValidationError::NotANumber(_))
        ));
    }

    #[test]
    fn test_scan_score_first_numeric_wins() {
        assert_eq!(scan_score(["seventy", "72", "80"]), Some(72.0));
        assert_eq!(scan_score(["x", "y"]), None);
        assert_eq!(scan_score(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_normalize_row_without_second_field() {
        let options = NormalizeOptions::default();
        assert_eq!(
            normalize_row(&["Amy"], 0, options),
            Err(RejectReason::NoNumericField)
        );
        assert_eq!(
            normalize_row(&[], 0, options),
            Err(RejectReason::NoNumericField)
        );
    }

    #[test]
    fn test_parse_roster_mixed_rows() {
        let text = "Amy,85\nBen,seventy,72\n,90\nBadRow,notanumber\n";
        let load = parse_roster(text, NormalizeOptions::default()).unwrap();

        let pairs: Vec<_> = load.roster.iter().collect();
        assert_eq!(
            pairs,
            vec![("Amy", 85.0), ("Ben", 72.0), ("Student_3", 90.0)]
        );
        assert_eq!(load.rejected.len(), 1);
        assert_eq!(load.rejected[0].line, 4);
        assert_eq!(load.rejected[0].fields, vec!["BadRow", "notanumber"]);
        assert_eq!(load.rejected[0].reason, RejectReason::NoNumericField);
    }

    #[test]
    fn test_parse_roster_accepts_out_of_range_by_default() {
        let load = parse_roster("Amy,-5\nBen,140", NormalizeOptions::default()).unwrap();
        assert_eq!(load.roster.get("Amy"), Some(-5.0));
        assert_eq!(load.roster.get("Ben"), Some(140.0));
        assert!(load.rejected.is_empty());
    }

    #[test]
    fn test_parse_roster_enforce_range_rejects() {
        let options = NormalizeOptions {
            enforce_range: true,
        };
        let load = parse_roster("Amy,-5\nBen,100\nCal,140", options).unwrap();
        assert_eq!(load.roster.len(), 1);
        assert_eq!(load.roster.get("Ben"), Some(100.0));
        assert_eq!(load.rejected.len(), 2);
        assert_eq!(load.rejected[1].reason, RejectReason::OutOfRange(140.0));
    }

    #[test]
    fn test_parse_roster_header_row_is_rejected() {
        let load = parse_roster("Name,Marks\nAmy,85\n", NormalizeOptions::default()).unwrap();
        assert_eq!(load.roster.len(), 1);
        assert_eq!(load.rejected.len(), 1);
        assert_eq!(
            load.rejected[0].to_string(),
            "skipping row, cannot parse marks: Name,Marks"
        );
    }

    #[test]
    fn test_parse_roster_placeholder_counts_distinct_names() {
        // Amy is overwritten, so the roster holds one name when the blank row arrives
        let load = parse_roster("Amy,50\nAmy,60\n,70\n", NormalizeOptions::default()).unwrap();
        let pairs: Vec<_> = load.roster.iter().collect();
        assert_eq!(pairs, vec![("Amy", 60.0), ("Student_2", 70.0)]);
    }

    #[test]
    fn test_parse_roster_reports_whitespace_and_quoted_empty_rows() {
        let load = parse_roster("Amy,85\n   \n\"\"\n", NormalizeOptions::default()).unwrap();

        assert_eq!(load.roster.len(), 1);
        assert_eq!(load.rejected.len(), 2);
        assert_eq!(load.rejected[0].line, 2);
        assert_eq!(load.rejected[1].line, 3);
        assert!(
            load.rejected
                .iter()
                .all(|r| r.reason == RejectReason::NoNumericField)
        );
        assert_eq!(
            load.rejected[0].to_string(),
            "skipping row, cannot parse marks: "
        );
    }

    #[test]
    fn test_parse_roster_skips_blank_lines_and_trims() {
        let load =
            parse_roster("\n  Amy , 85 \n\n\"Lee, Jo\",77\n", NormalizeOptions::default()).unwrap();
        let pairs: Vec<_> = load.roster.iter().collect();
        assert_eq!(pairs, vec![("Amy", 85.0), ("Lee, Jo", 77.0)]);
        assert!(load.rejected.is_empty());
    }
}
