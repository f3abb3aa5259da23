use std::io::{self, Write};

use crate::models::Question;
use crate::terminal::Theme;

/// Write one question: position in the bank, prompt, and options
/// enumerated from 1.
pub fn render_question(
    out: &mut dyn Write,
    theme: &Theme,
    question: &Question,
    number: usize,
    total: usize,
) -> io::Result<()> {
    writeln!(out, "{}", theme.hint(&format!("Question {number}/{total}")))?;
    writeln!(out, "{}", theme.heading(&question.prompt))?;
    render_options(out, &question.options)
}

pub(crate) fn render_options(out: &mut dyn Write, options: &[String]) -> io::Result<()> {
    for (index, option) in options.iter().enumerate() {
        writeln!(out, "{}: {}", index + 1, option)?;
    }
    Ok(())
}
