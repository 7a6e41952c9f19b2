//! Enrollment model

use super::Course;
use serde::{Deserialize, Serialize};

/// One student's registration in one course, carrying that pair's grade.
///
/// The course is referenced by name, never by a shared mutable object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Name of the course this enrollment refers to
    pub course: String,

    /// Credit weight of the course at registration time
    pub credits: f64,

    /// Grade earned in this enrollment
    pub grade: f64,
}

impl Enrollment {
    /// Create an enrollment in `course` with the given grade
    #[must_use]
    pub fn new(course: &Course, grade: f64) -> Self {
        Self {
            course: course.name.clone(),
            credits: course.credits,
            grade,
        }
    }

    /// Grade points contributed to the GPA (grade weighted by credits)
    #[must_use]
    pub fn grade_points(&self) -> f64 {
        self.grade * self.credits
    }
}
