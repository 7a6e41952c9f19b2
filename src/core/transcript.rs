//! Transcript snapshot of a student

use crate::core::models::Student;
use serde::Serialize;
use std::fmt::Write;

/// Largest number of decimals a GPA is printed with
pub const MAX_GPA_PRECISION: usize = 15;

/// One course line on a transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptCourse {
    /// Course name
    pub name: String,
    /// Grade earned
    pub grade: f64,
    /// Credit weight
    pub credits: f64,
}

/// Read-only snapshot of a student's identity, enrollments and GPA
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    /// Student names
    pub name: String,
    /// Student email
    pub email: String,
    /// Date of birth
    pub date_of_birth: String,
    /// Location
    pub location: String,
    /// Credit score
    pub credit_score: i64,
    /// Gender
    pub gender: String,
    /// Courses in registration order
    pub courses: Vec<TranscriptCourse>,
    /// GPA at snapshot time
    pub gpa: f64,
}

impl Transcript {
    /// Snapshot a student
    #[must_use]
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.names.clone(),
            email: student.email.clone(),
            date_of_birth: student.date_of_birth.clone(),
            location: student.location.clone(),
            credit_score: student.credit_score,
            gender: student.gender.clone(),
            courses: student
                .enrollments()
                .iter()
                .map(|e| TranscriptCourse {
                    name: e.course.clone(),
                    grade: e.grade,
                    credits: e.credits,
                })
                .collect(),
            gpa: student.gpa(),
        }
    }

    /// Render as plain text, printing the GPA with `precision` decimals
    /// (at most [`MAX_GPA_PRECISION`])
    #[must_use]
    pub fn render(&self, precision: usize) -> String {
        let precision = precision.min(MAX_GPA_PRECISION);
        let mut out = String::new();
        let _ = writeln!(out, "Transcript for {}:", self.name);
        let _ = writeln!(out, "Date of Birth: {}", self.date_of_birth);
        let _ = writeln!(out, "Location: {}", self.location);
        let _ = writeln!(out, "Credit Score: {}", self.credit_score);
        let _ = writeln!(out, "Gender: {}", self.gender);
        for course in &self.courses {
            let _ = writeln!(
                out,
                "{}: {} (Credits: {})",
                course.name, course.grade, course.credits
            );
        }
        let _ = writeln!(out, "GPA: {:.precision$}", self.gpa);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Course, Enrollment};

    fn sample() -> Transcript {
        let mut student = Student::new(
            "a@x.com".to_string(),
            "Ada".to_string(),
            "Female".to_string(),
            "2001-04-12".to_string(),
            "Nairobi".to_string(),
            650,
        );
        let algebra = Course::new("Algebra".to_string(), "T1".to_string(), 3.0);
        let history = Course::new("History".to_string(), "T1".to_string(), 2.0);
        student.register_for_course(Enrollment::new(&algebra, 3.5));
        student.register_for_course(Enrollment::new(&history, 2.0));
        student.calculate_gpa();
        Transcript::from_student(&student)
    }

    #[test]
    fn test_from_student_preserves_order() {
        let t = sample();
        let names: Vec<&str> = t.courses.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["Algebra", "History"]);
        assert_eq!(t.email, "a@x.com");
        assert_eq!(t.credit_score, 650);
        assert!((t.gpa - 2.9).abs() < 1e-9);
    }

    #[test]
    fn test_render_layout() {
        let text = sample().render(2);

        assert_eq!(
            text,
            "Transcript for Ada:\n\
             Date of Birth: 2001-04-12\n\
             Location: Nairobi\n\
             Credit Score: 650\n\
             Gender: Female\n\
             Algebra: 3.5 (Credits: 3)\n\
             History: 2 (Credits: 2)\n\
             GPA: 2.90\n"
        );
    }

    #[test]
    fn test_render_precision() {
        assert!(sample().render(3).ends_with("GPA: 2.900\n"));
    }

    #[test]
    fn test_render_caps_precision() {
        let capped = sample().render(70_000);
        assert_eq!(capped, sample().render(MAX_GPA_PRECISION));
        assert!(capped.contains("GPA: 2.9"));
    }
}
