//! Line-oriented parser for the marker-prefixed exam format.
//!
//! # Format
//! ```text
//! ~Q What is the capital of France?
//! ~A Lyon
//! ~C Paris
//! ~A Marseille
//! ```
//!
//! A line's first two characters decide what it is: `~Q` opens a new
//! question, `~A` adds an option, `~C` adds an option and records it as
//! the correct answer. Every other line is ignored.

use thiserror::Error;

use crate::models::Question;

/// Fatal format errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("question closed without a correct answer (line {line}); mark one option with ~C")]
    MissingAnswer { line: usize },
}

/// Non-fatal diagnostics collected while parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Warning {
    #[error("extra correct-answer marker (line {line}); keeping the last answer given")]
    MultipleAnswers { line: usize },
}

/// How to treat a question block that reaches end of input without a
/// `~C` line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Emit the final question even if no answer was recorded. A trailing
    /// block with no options at all is dropped.
    #[default]
    Lenient,
    /// Reject the file.
    Strict,
}

/// Parser output: the question bank plus any diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub questions: Vec<Question>,
    pub warnings: Vec<Warning>,
}

/// Parse exam text into questions, in source order.
pub fn parse(source: &str, strictness: Strictness) -> Result<Parsed, ParseError> {
    let mut parser = Parser::new(strictness);
    let mut line_count = 0;

    for (idx, line) in source.lines().enumerate() {
        line_count = idx + 1;
        parser.process_line(line, line_count)?;
    }

    parser.finalize(line_count + 1)
}

enum LineType<'a> {
    Prompt(&'a str),
    Choice(&'a str),
    Answer(&'a str),
    Other,
}

fn classify(line: &str) -> LineType<'_> {
    if let Some(rest) = line.strip_prefix("~Q") {
        LineType::Prompt(rest.trim())
    } else if let Some(rest) = line.strip_prefix("~A") {
        LineType::Choice(rest.trim())
    } else if let Some(rest) = line.strip_prefix("~C") {
        LineType::Answer(rest.trim())
    } else {
        LineType::Other
    }
}

struct QuestionBuilder {
    prompt: String,
    options: Vec<String>,
    answer: Option<String>,
}

impl QuestionBuilder {
    fn new(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: Vec::new(),
            answer: None,
        }
    }

    fn build(self) -> Question {
        Question {
            prompt: self.prompt,
            options: self.options,
            answer: self.answer,
        }
    }
}

struct Parser {
    strictness: Strictness,
    current: Option<QuestionBuilder>,
    questions: Vec<Question>,
    warnings: Vec<Warning>,
}

impl Parser {
    fn new(strictness: Strictness) -> Self {
        Self {
            strictness,
            current: None,
            questions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<(), ParseError> {
        match classify(line) {
            LineType::Prompt(text) => self.open_question(text, line_num)?,
            LineType::Choice(text) => {
                // Options outside a question block are skippable noise.
                if let Some(open) = &mut self.current {
                    open.options.push(text.to_string());
                }
            }
            LineType::Answer(text) => self.record_answer(text, line_num),
            LineType::Other => {}
        }
        Ok(())
    }

    fn open_question(&mut self, prompt: &str, line_num: usize) -> Result<(), ParseError> {
        if let Some(open) = self.current.take() {
            if open.answer.is_none() {
                return Err(ParseError::MissingAnswer { line: line_num });
            }
            self.questions.push(open.build());
        }
        self.current = Some(QuestionBuilder::new(prompt));
        Ok(())
    }

    fn record_answer(&mut self, text: &str, line_num: usize) {
        let Some(open) = &mut self.current else {
            return;
        };
        if open.answer.is_some() {
            self.warnings.push(Warning::MultipleAnswers { line: line_num });
        }
        if text.is_empty() {
            return;
        }
        // The answer is pushed onto the options in the same step it is
        // recorded, so it is a member of the options by construction.
        open.options.push(text.to_string());
        open.answer = Some(text.to_string());
    }

    fn finalize(mut self, eof_line: usize) -> Result<Parsed, ParseError> {
        if let Some(open) = self.current.take() {
            if open.answer.is_none() {
                if self.strictness == Strictness::Strict {
                    return Err(ParseError::MissingAnswer { line: eof_line });
                }
                // A trailing block with no options has nothing to present.
                if !open.options.is_empty() {
                    self.questions.push(open.build());
                }
            } else {
                self.questions.push(open.build());
            }
        }

        Ok(Parsed {
            questions: self.questions,
            warnings: self.warnings,
        })
    }
}
