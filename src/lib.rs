//! # rexam
//!
//! A terminal-based multiple-choice exam runner.
//!
//! Exams are plain text files in a marker-prefixed format: `~Q` opens a
//! question, `~A` adds an option, `~C` adds the correct option. The exam
//! runs as a line-based prompt loop over stdin/stdout and finishes with a
//! score summary and a review of every missed question.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rexam::{Exam, ExamError, LoadOptions, RefreshMode, Theme};
//!
//! fn main() -> Result<(), ExamError> {
//!     // Load questions from a marker-format text file
//!     let exam = Exam::from_file("exam.txt", &LoadOptions::default())?;
//!
//!     // Run the exam in the terminal
//!     exam.run(&RefreshMode::Full, &Theme::plain())?;
//!
//!     Ok(())
//! }
//! ```

mod data;
mod models;
mod session;
pub mod terminal;
mod ui;

use std::io::{self, BufRead, Write};
use std::path::Path;

use thiserror::Error;

pub use data::{
    load_questions_from_path, parse, LoadError, LoadOptions, ParseError, Parsed, Strictness,
    Warning,
};
pub use models::{Answer, Question};
pub use session::{Missed, Outcome, Report, Session};
pub use terminal::{DisplayRefresh, RefreshMode, Theme};

/// Error type for exam operations.
#[derive(Debug, Error)]
pub enum ExamError {
    /// The exam file could not be read, decoded, or parsed.
    #[error("failed to load exam: {0}")]
    Load(#[from] LoadError),
    /// IO error during the interactive session.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl ExamError {
    /// Stable process exit code per error kind (sysexits values), so
    /// wrappers can tell format, missing-file, decode, and configuration
    /// failures apart.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExamError::Load(LoadError::Format { .. }) => 65,
            ExamError::Load(LoadError::NotFound { .. }) => 66,
            ExamError::Load(LoadError::Io { .. }) => 74,
            ExamError::Load(LoadError::Decode { .. }) => 74,
            ExamError::Load(LoadError::UnknownEncoding { .. }) => 78,
            ExamError::Io(_) => 74,
        }
    }
}

/// Words that end the session immediately from any prompt.
const EXIT_KEYWORDS: [&str; 2] = ["quit", "exit"];

/// An exam ready to run in the terminal.
pub struct Exam {
    session: Session,
}

impl Exam {
    /// Create an exam from an already-parsed question bank.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            session: Session::new(questions),
        }
    }

    /// Load an exam from a marker-format text file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use rexam::{Exam, LoadOptions};
    ///
    /// let exam = Exam::from_file("exam.txt", &LoadOptions::default()).expect("load exam");
    /// ```
    pub fn from_file(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, ExamError> {
        let parsed = load_questions_from_path(path, options)?;
        Ok(Self::new(parsed.questions))
    }

    /// Run the exam over stdin/stdout.
    pub fn run(self, refresh: &dyn DisplayRefresh, theme: &Theme) -> Result<Outcome, ExamError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_session(&mut stdin.lock(), &mut stdout.lock(), refresh, theme)
    }

    /// Run the exam over arbitrary input/output, for embedders and tests.
    ///
    /// Questions are presented one at a time; invalid input re-prompts
    /// without advancing. A quit keyword or end of input returns
    /// [`Outcome::Aborted`] with nothing further written. Otherwise the
    /// results report is rendered and [`Outcome::Completed`] carries it
    /// back to the caller.
    pub fn run_session<R: BufRead, W: Write>(
        mut self,
        input: &mut R,
        output: &mut W,
        refresh: &dyn DisplayRefresh,
        theme: &Theme,
    ) -> Result<Outcome, ExamError> {
        let total = self.session.total_questions();

        for index in 0..total {
            let question = self.session.question(index);
            ui::render_question(output, theme, question, index + 1, total)?;
            let num_options = question.options.len();

            let choice = match read_choice(input, output, theme, num_options)? {
                Choice::Picked(choice) => choice,
                Choice::Abort => return Ok(Outcome::Aborted),
            };

            self.session.record_answer(index, choice);
            refresh.refresh(output)?;
        }

        let report = self.session.report();
        ui::render_results(output, theme, &report)?;
        Ok(Outcome::Completed(report))
    }

    /// The underlying session state, for custom handling.
    pub fn session(&self) -> &Session {
        &self.session
    }
}

enum Choice {
    Picked(usize),
    Abort,
}

/// Prompt until the user picks a valid 1-based option, quits, or input
/// ends. Interrupted reads print a blank line and re-prompt.
fn read_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    theme: &Theme,
    num_options: usize,
) -> io::Result<Choice> {
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => return Ok(Choice::Abort),
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                writeln!(output)?;
                continue;
            }
            Err(err) => return Err(err),
        }

        let entry = line.trim();
        if EXIT_KEYWORDS.contains(&entry) {
            return Ok(Choice::Abort);
        }

        match entry.parse::<usize>() {
            Ok(choice) if (1..=num_options).contains(&choice) => {
                return Ok(Choice::Picked(choice));
            }
            _ => writeln!(output, "{}", theme.hint(&format!("Pick 1-{num_options}")))?,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io::{BufRead, Cursor, Read};

    use pretty_assertions::assert_eq;

    use super::*;

    fn bank() -> Vec<Question> {
        parse("~Q 2+2?\n~A 3\n~C 4\n~A 5\n", Strictness::Strict)
            .unwrap()
            .questions
    }

    fn two_question_bank() -> Vec<Question> {
        parse(
            "~Q 2+2?\n~A 3\n~C 4\n~Q capital of France?\n~C Paris\n~A Lyon\n",
            Strictness::Strict,
        )
        .unwrap()
        .questions
    }

    fn run(questions: Vec<Question>, keys: &str) -> (Outcome, String) {
        run_with_refresh(questions, keys, &RefreshMode::None)
    }

    fn run_with_refresh(
        questions: Vec<Question>,
        keys: &str,
        refresh: &dyn DisplayRefresh,
    ) -> (Outcome, String) {
        let mut input = Cursor::new(keys.as_bytes().to_vec());
        let mut output = Vec::new();
        let outcome = Exam::new(questions)
            .run_session(&mut input, &mut output, refresh, &Theme::plain())
            .unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    struct CountingRefresh(Cell<usize>);

    impl DisplayRefresh for CountingRefresh {
        fn refresh(&self, _out: &mut dyn io::Write) -> io::Result<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    /// Errors with `Interrupted` on the first read, then behaves like a
    /// plain cursor.
    struct InterruptingInput {
        inner: Cursor<Vec<u8>>,
        fired: bool,
    }

    impl Read for InterruptingInput {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl BufRead for InterruptingInput {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            self.inner.fill_buf()
        }

        fn consume(&mut self, amt: usize) {
            self.inner.consume(amt);
        }

        fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
            if !self.fired {
                self.fired = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.inner.read_line(buf)
        }
    }

    #[test]
    fn correct_answer_scores_one() {
        let (outcome, output) = run(bank(), "2\n");
        match outcome {
            Outcome::Completed(report) => {
                assert_eq!(report.correct, 1);
                assert_eq!(report.total, 1);
                assert!(report.missed.is_empty());
            }
            Outcome::Aborted => panic!("session aborted"),
        }
        assert!(output.contains("Correct: 1/1"));
        assert!(!output.contains("You guessed"));
    }

    #[test]
    fn wrong_answer_is_reviewed() {
        let (outcome, output) = run(bank(), "1\n");
        let Outcome::Completed(report) = outcome else {
            panic!("session aborted");
        };
        assert_eq!(report.correct, 0);
        assert!(output.contains("Correct: 0/1"));
        assert!(output.contains("You guessed: 3"));
        assert!(output.contains("Correct answer: 4"));
    }

    #[test]
    fn invalid_input_reprompts_without_advancing() {
        let (outcome, output) = run(bank(), "seven\n0\n9\n2\n");
        assert!(matches!(outcome, Outcome::Completed(_)));
        assert_eq!(output.matches("Pick 1-3").count(), 3);
        assert_eq!(output.matches("Question 1/1").count(), 1);
        assert!(output.contains("Correct: 1/1"));
    }

    #[test]
    fn quit_aborts_without_results() {
        for keyword in ["quit", "exit"] {
            let (outcome, output) = run(two_question_bank(), &format!("{keyword}\n"));
            assert_eq!(outcome, Outcome::Aborted);
            assert!(!output.contains("Results"));
        }
    }

    #[test]
    fn quit_is_matched_after_trimming() {
        let (outcome, _) = run(bank(), "  quit  \n");
        assert_eq!(outcome, Outcome::Aborted);
    }

    #[test]
    fn end_of_input_aborts_mid_session() {
        let (outcome, output) = run(two_question_bank(), "2\n");
        assert_eq!(outcome, Outcome::Aborted);
        assert!(output.contains("Question 2/2"));
        assert!(!output.contains("Results"));
    }

    #[test]
    fn interrupted_read_prints_blank_line_and_reprompts() {
        let mut input = InterruptingInput {
            inner: Cursor::new(b"2\n".to_vec()),
            fired: false,
        };
        let mut output = Vec::new();
        let outcome = Exam::new(bank())
            .run_session(&mut input, &mut output, &RefreshMode::None, &Theme::plain())
            .unwrap();
        assert!(matches!(outcome, Outcome::Completed(_)));
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("> \n> "));
    }

    #[test]
    fn refresh_runs_once_per_scored_question() {
        let counter = CountingRefresh(Cell::new(0));
        let (outcome, _) = run_with_refresh(two_question_bank(), "1\nbogus\n2\n", &counter);
        assert!(matches!(outcome, Outcome::Completed(_)));
        assert_eq!(counter.0.get(), 2);
    }

    #[test]
    fn answerless_question_is_tolerated() {
        let questions = parse("~Q trailing\n~A a\n~A b\n", Strictness::Lenient)
            .unwrap()
            .questions;
        let (outcome, output) = run(questions, "1\n");
        let Outcome::Completed(report) = outcome else {
            panic!("session aborted");
        };
        assert_eq!(report.correct, 0);
        assert_eq!(report.missed.len(), 1);
        assert!(output.contains("Correct answer: (not marked in the exam file)"));
    }

    #[test]
    fn empty_bank_completes_immediately() {
        let (outcome, output) = run(Vec::new(), "");
        let Outcome::Completed(report) = outcome else {
            panic!("session aborted");
        };
        assert_eq!(report.total, 0);
        assert!(output.contains("Correct: 0/0"));
    }
}
