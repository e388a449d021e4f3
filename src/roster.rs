//! The in-memory dataset every engine reads.
//!
//! A [`Roster`] maps a unique student name to a score. Iteration follows
//! insertion order; re-inserting an existing name replaces its score but
//! keeps the slot it was first inserted into.

use indexmap::IndexMap;

/// Ordered, last-write-wins mapping from student name to score.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: IndexMap<String, f64>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites `name`. Returns the previous score, if any.
    pub fn insert(&mut self, name: impl Into<String>, score: f64) -> Option<f64> {
        self.entries.insert(name.into(), score)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.values().copied()
    }

    /// Iterates `(name, score)` pairs in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, &score)| (name.as_str(), score))
    }
}

// Two rosters are equal only if they hold the same pairs in the same order.
impl PartialEq for Roster {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<N: Into<String>> FromIterator<(N, f64)> for Roster {
    fn from_iter<I: IntoIterator<Item = (N, f64)>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for (name, score) in iter {
            roster.insert(name, score);
        }
        roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_iteration_order() {
        let roster: Roster = [("Zoe", 50.0), ("Amy", 70.0), ("Max", 60.0)]
            .into_iter()
            .collect();

        let names: Vec<_> = roster.names().collect();
        assert_eq!(names, vec!["Zoe", "Amy", "Max"]);
    }

    #[test]
    fn test_duplicate_name_last_write_wins() {
        let mut roster = Roster::new();
        assert_eq!(roster.insert("Amy", 40.0), None);
        roster.insert("Ben", 55.0);
        assert_eq!(roster.insert("Amy", 90.0), Some(40.0));

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("Amy"), Some(90.0));
        // first-insertion slot is kept
        let pairs: Vec<_> = roster.iter().collect();
        assert_eq!(pairs, vec![("Amy", 90.0), ("Ben", 55.0)]);
    }

    #[test]
    fn test_equality_respects_order() {
        let ab: Roster = [("A", 1.0), ("B", 2.0)].into_iter().collect();
        let ba: Roster = [("B", 2.0), ("A", 1.0)].into_iter().collect();

        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn test_empty_roster() {
        let roster = Roster::new();
        assert!(roster.is_empty());
        assert_eq!(roster.len(), 0);
        assert_eq!(roster.get("anyone"), None);
    }
}
