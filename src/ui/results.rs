use std::io::{self, Write};

use crate::session::Report;
use crate::terminal::Theme;

/// Write the final score, then review every missed question in bank
/// order: its prompt and options, what the user picked, and what the
/// correct answer was.
pub fn render_results(out: &mut dyn Write, theme: &Theme, report: &Report) -> io::Result<()> {
    writeln!(out, "{}", theme.heading("Results"))?;

    let score = format!("Correct: {}/{}", report.correct, report.total);
    writeln!(out, "{}\n", theme.grade(&score, percentage(report)))?;

    for missed in &report.missed {
        writeln!(out, "{}", missed.question.prompt)?;
        super::render_options(out, &missed.question.options)?;
        writeln!(out, "You guessed: {}", theme.bad(&missed.answer.selected))?;
        match &missed.question.answer {
            Some(answer) => writeln!(out, "Correct answer: {}", theme.good(answer))?,
            None => writeln!(out, "Correct answer: (not marked in the exam file)")?,
        }
        writeln!(out)?;
    }

    Ok(())
}

fn percentage(report: &Report) -> f64 {
    if report.total > 0 {
        (report.correct as f64 / report.total as f64) * 100.0
    } else {
        0.0
    }
}
