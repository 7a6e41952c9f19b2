//! In-memory grade book library.
//! Tracks students, courses and enrollments; derives GPAs, rankings and transcripts.

pub mod core;
pub mod logger;

pub use crate::core::{config, get_version, GradeBook, GradingMode, RankEntry, Transcript};
