//! Fuzzy grading of speech-recognition transcripts against expected Spanish
//! vocabulary words. Pure string logic: no I/O, no shared state, safe to call
//! from any number of sessions concurrently.

pub mod grader;
pub mod normalize;

pub use grader::{edit_distance, grade, is_match, tolerance_for, MatchReport, MatchRule};
pub use normalize::{fold_accents, normalize, strip_leading_article};
