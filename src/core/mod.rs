//! Core grade book functionality shared by the library and the CLI

pub mod config;
pub mod gradebook;
pub mod models;
pub mod session;
pub mod transcript;

pub use gradebook::{GradeBook, GradingMode, RankEntry};
pub use transcript::{Transcript, TranscriptCourse};

/// Returns the current version of the `gradebook` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
