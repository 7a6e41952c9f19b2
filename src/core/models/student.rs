//! Student model

use super::Enrollment;
use serde::{Deserialize, Serialize};

/// Represents a student and their enrollments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Email address, used as the lookup key
    pub email: String,

    /// Full name(s)
    pub names: String,

    /// Gender as entered
    pub gender: String,

    /// Date of birth (free-form, e.g., "2001-04-12")
    pub date_of_birth: String,

    /// Home location
    pub location: String,

    /// Credit score
    pub credit_score: i64,

    /// Enrollments in registration order (duplicates allowed)
    enrollments: Vec<Enrollment>,

    /// Credit-weighted GPA over `enrollments`
    gpa: f64,
}

impl Student {
    /// Create a new student with no enrollments
    #[must_use]
    pub const fn new(
        email: String,
        names: String,
        gender: String,
        date_of_birth: String,
        location: String,
        credit_score: i64,
    ) -> Self {
        Self {
            email,
            names,
            gender,
            date_of_birth,
            location,
            credit_score,
            enrollments: Vec::new(),
            gpa: 0.0,
        }
    }

    /// Append an enrollment. Does not recompute the GPA.
    pub fn register_for_course(&mut self, enrollment: Enrollment) {
        self.enrollments.push(enrollment);
    }

    /// Recompute the GPA as `Σ(grade × credits) / Σ(credits)`.
    ///
    /// Falls back to `0.0` when there are no enrollments or the credits sum to zero.
    pub fn calculate_gpa(&mut self) {
        let total_credits: f64 = self.enrollments.iter().map(|e| e.credits).sum();
        self.gpa = if total_credits > 0.0 {
            self.enrollments.iter().map(Enrollment::grade_points).sum::<f64>() / total_credits
        } else {
            0.0
        };
    }

    /// Overwrite the grade of every enrollment in `course`.
    ///
    /// # Returns
    /// `true` if at least one enrollment was changed
    pub(crate) fn regrade_course(&mut self, course: &str, grade: f64) -> bool {
        let mut touched = false;
        for enrollment in self.enrollments.iter_mut().filter(|e| e.course == course) {
            enrollment.grade = grade;
            touched = true;
        }
        touched
    }

    /// Current GPA
    #[must_use]
    pub const fn gpa(&self) -> f64 {
        self.gpa
    }

    /// Enrollments in registration order
    #[must_use]
    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    /// Whether any enrollment in `course` has a grade of at least `min_grade`
    #[must_use]
    pub fn has_grade_at_least(&self, course: &str, min_grade: f64) -> bool {
        self.enrollments
            .iter()
            .any(|e| e.course == course && e.grade >= min_grade)
    }
}
