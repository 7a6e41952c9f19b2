//! Session command handler

use gradebook::config::Config;
use gradebook::core::session::Session;
use gradebook::{error, GradeBook};
use std::io;

/// Run an interactive session on stdin/stdout using `config` for display and grading.
pub fn run(config: &Config) {
    let book = GradeBook::with_mode(config.grading_mode());
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        book,
        stdin.lock(),
        stdout.lock(),
        config.display.gpa_precision,
    );

    if let Err(e) = session.run() {
        error!("Session aborted: {e}");
        eprintln!("✗ Session aborted: {e}");
        std::process::exit(1);
    }
}
