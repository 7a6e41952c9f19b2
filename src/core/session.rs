//! Interactive menu session driving a [`GradeBook`] over line-oriented I/O.
//!
//! Generic over the reader and writer so the CLI can hand it stdin/stdout and
//! tests can hand it in-memory buffers.

use crate::core::gradebook::GradeBook;
use crate::core::transcript::MAX_GPA_PRECISION;
use crate::{debug, info};
use std::error::Error;
use std::fmt;
use std::io::{self, BufRead, Write};

/// Errors raised while reading a field from the user
#[derive(Debug)]
pub enum InputError {
    /// A field that must be an integer was not one
    InvalidInteger {
        /// Field being read
        field: &'static str,
        /// Raw text entered
        value: String,
    },
    /// A field that must be a finite number was not one
    InvalidNumber {
        /// Field being read
        field: &'static str,
        /// Raw text entered
        value: String,
    },
    /// Input ended before the field was read
    Closed,
    /// Underlying I/O failure
    Io(io::Error),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInteger { field, value } => {
                write!(f, "Invalid {field}: '{value}' is not a whole number")
            }
            Self::InvalidNumber { field, value } => {
                write!(f, "Invalid {field}: '{value}' is not a number")
            }
            Self::Closed => write!(f, "Input closed"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for InputError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Parse an integer field, reporting the field name on failure
///
/// # Errors
/// Returns [`InputError::InvalidInteger`] if `value` is not an integer.
pub fn parse_integer(field: &'static str, value: &str) -> Result<i64, InputError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| InputError::InvalidInteger {
            field,
            value: value.to_string(),
        })
}

/// Parse a finite floating-point field, reporting the field name on failure
///
/// # Errors
/// Returns [`InputError::InvalidNumber`] if `value` is not a finite number.
pub fn parse_number(field: &'static str, value: &str) -> Result<f64, InputError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| InputError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Entries of the main menu
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    /// 1. Add student
    AddStudent,
    /// 2. Add course
    AddCourse,
    /// 3. Register student for a course
    Register,
    /// 4. Calculate ranking
    Ranking,
    /// 5. Search by grade
    SearchByGrade,
    /// 6. Generate transcript
    Transcript,
    /// 7. Exit
    Exit,
}

impl MenuChoice {
    /// Map a menu selection ("1".."7") to a choice
    #[must_use]
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::AddStudent),
            "2" => Some(Self::AddCourse),
            "3" => Some(Self::Register),
            "4" => Some(Self::Ranking),
            "5" => Some(Self::SearchByGrade),
            "6" => Some(Self::Transcript),
            "7" => Some(Self::Exit),
            _ => None,
        }
    }
}

const MENU: &str = "\nGrade Book Application
1. Add student
2. Add course
3. Register student for a course
4. Calculate ranking
5. Search by grade
6. Generate transcript
7. Exit";

/// A running menu session
pub struct Session<R, W> {
    book: GradeBook,
    input: R,
    output: W,
    gpa_precision: usize,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session over `book`, printing GPAs with `gpa_precision` decimals
    /// (capped at [`MAX_GPA_PRECISION`])
    pub fn new(book: GradeBook, input: R, output: W, gpa_precision: usize) -> Self {
        Self {
            book,
            input,
            output,
            gpa_precision: gpa_precision.min(MAX_GPA_PRECISION),
        }
    }

    /// The grade book being edited
    pub const fn gradebook(&self) -> &GradeBook {
        &self.book
    }

    /// Finish the session and hand back the grade book
    pub fn into_gradebook(self) -> GradeBook {
        self.book
    }

    /// Run the menu loop until the user exits or input ends.
    ///
    /// Bad field input is reported and the menu is shown again.
    ///
    /// # Errors
    /// Returns an error only if reading or writing fails.
    pub fn run(&mut self) -> io::Result<()> {
        info!("Session started ({} grading)", self.book.mode());
        loop {
            writeln!(self.output, "{MENU}")?;
            let line = match self.prompt("Choose an action: ") {
                Ok(line) => line,
                Err(InputError::Io(e)) => return Err(e),
                Err(_) => break,
            };

            let Some(choice) = MenuChoice::from_input(&line) else {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                continue;
            };
            if choice == MenuChoice::Exit {
                writeln!(self.output, "Exiting...")?;
                break;
            }

            match self.dispatch(choice) {
                Ok(()) => {}
                Err(InputError::Io(e)) => return Err(e),
                Err(InputError::Closed) => break,
                Err(e) => {
                    debug!("Rejected input: {e}");
                    writeln!(self.output, "✗ {e}")?;
                }
            }
        }
        info!(
            "Session ended with {} students and {} courses",
            self.book.students().len(),
            self.book.courses().len()
        );
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<(), InputError> {
        match choice {
            MenuChoice::AddStudent => self.add_student(),
            MenuChoice::AddCourse => self.add_course(),
            MenuChoice::Register => self.register(),
            MenuChoice::Ranking => self.ranking(),
            MenuChoice::SearchByGrade => self.search_by_grade(),
            MenuChoice::Transcript => self.transcript(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn add_student(&mut self) -> Result<(), InputError> {
        let email = self.prompt("Enter student email: ")?;
        let names = self.prompt("Enter student names: ")?;
        let gender = self.prompt("Enter student gender (Male/Female): ")?;
        let date_of_birth = self.prompt("Enter student date of birth (YYYY-MM-DD): ")?;
        let location = self.prompt("Enter student location: ")?;
        let credit_score = self.prompt("Enter student credit score: ")?;
        let credit_score = parse_integer("credit score", &credit_score)?;

        self.book
            .add_student(&email, &names, &gender, &date_of_birth, &location, credit_score);
        Ok(())
    }

    fn add_course(&mut self) -> Result<(), InputError> {
        let name = self.prompt("Enter course name: ")?;
        let trimester = self.prompt("Enter course trimester: ")?;
        let credits = self.prompt("Enter course credits: ")?;
        let credits = parse_number("credits", &credits)?;

        self.book.add_course(&name, &trimester, credits);
        Ok(())
    }

    fn register(&mut self) -> Result<(), InputError> {
        let email = self.prompt("Enter student email: ")?;
        let course = self.prompt("Enter course name: ")?;
        let grade = self.prompt("Enter grade: ")?;
        let grade = parse_number("grade", &grade)?;

        if !self.book.register_student_for_course(&email, &course, grade) {
            writeln!(
                self.output,
                "Student '{email}' or course '{course}' not found; nothing registered."
            )?;
        }
        Ok(())
    }

    fn ranking(&mut self) -> Result<(), InputError> {
        let precision = self.gpa_precision;
        for (i, entry) in self.book.calculate_ranking().iter().enumerate() {
            writeln!(
                self.output,
                "{}. {} - GPA: {:.precision$}",
                i + 1,
                entry.names,
                entry.gpa
            )?;
        }
        Ok(())
    }

    fn search_by_grade(&mut self) -> Result<(), InputError> {
        let course = self.prompt("Enter course name: ")?;
        let min_grade = self.prompt("Enter minimum grade: ")?;
        let min_grade = parse_number("minimum grade", &min_grade)?;

        let matches = self.book.search_by_grade(&course, min_grade);
        if matches.is_empty() {
            writeln!(self.output, "No students found.")?;
        }
        for student in matches {
            writeln!(self.output, "{} - Email: {}", student.names, student.email)?;
        }
        Ok(())
    }

    fn transcript(&mut self) -> Result<(), InputError> {
        let email = self.prompt("Enter student email: ")?;
        match self.book.generate_transcript(&email) {
            Some(transcript) => write!(self.output, "{}", transcript.render(self.gpa_precision))?,
            None => writeln!(self.output, "Student not found.")?,
        }
        Ok(())
    }

    /// Print `label` and read one line without its line terminator.
    ///
    /// Text fields keep surrounding whitespace; numeric parsers trim on their own.
    fn prompt(&mut self, label: &str) -> Result<String, InputError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::Closed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
