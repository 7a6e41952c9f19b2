//! Course model

use serde::{Deserialize, Serialize};

/// Represents a course offering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course name, used as the lookup key (e.g., "Algebra")
    pub name: String,

    /// Trimester the course is offered in (e.g., "T1 2024")
    pub trimester: String,

    /// Credit weight (can be fractional)
    pub credits: f64,

    /// Most recently assigned grade for this course
    pub grade: f64,
}

impl Course {
    /// Create a new course with no grade assigned yet
    ///
    /// # Arguments
    /// * `name` - Course name
    /// * `trimester` - Trimester label
    /// * `credits` - Credit weight
    #[must_use]
    pub const fn new(name: String, trimester: String, credits: f64) -> Self {
        Self {
            name,
            trimester,
            credits,
            grade: 0.0,
        }
    }
}
