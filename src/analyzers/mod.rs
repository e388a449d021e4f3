//! Grading, classification and the combined per-roster analysis.
//!
//! Every function here is a pure function of a [`Roster`](crate::roster::Roster)
//! snapshot. Nothing is written back into the roster.

pub mod aggregate;
pub mod classify;
pub mod grade;
pub mod types;
pub mod utility;
