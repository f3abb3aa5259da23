use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use rexam::{Exam, ExamError, LoadOptions, RefreshMode, Strictness, Theme};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Exam file in the ~Q/~A/~C marker format
    exam: PathBuf,

    /// How to refresh the screen between questions
    #[arg(long, value_enum, default_value = "full")]
    clear: ClearMode,

    /// Blank lines printed by the spacer refresh mode
    #[arg(long, default_value_t = 24)]
    lines: u16,

    /// Style output with terminal colors
    #[arg(long)]
    color: bool,

    /// Text encoding of the exam file (WHATWG label, default utf-8)
    #[arg(long)]
    encoding: Option<String>,

    /// Reject an exam whose final question has no ~C line
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ClearMode {
    /// Home the cursor and clear the visible screen
    CtrlL,
    /// Clear the screen and the scrollback buffer
    Full,
    /// Leave previous questions on screen
    None,
    /// Print blank lines between questions
    Spacer,
}

impl ClearMode {
    fn into_refresh(self, lines: u16) -> RefreshMode {
        match self {
            ClearMode::CtrlL => RefreshMode::CtrlL,
            ClearMode::Full => RefreshMode::Full,
            ClearMode::None => RefreshMode::None,
            ClearMode::Spacer => RefreshMode::Spacer(lines),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let options = LoadOptions {
        encoding: args.encoding,
        strictness: if args.strict {
            Strictness::Strict
        } else {
            Strictness::Lenient
        },
    };

    let exam = match Exam::from_file(&args.exam, &options) {
        Ok(exam) => exam,
        Err(err) => fail(err),
    };

    let refresh = args.clear.into_refresh(args.lines);
    let theme = Theme::new(args.color);

    // Quit keywords and end of input are clean exits, not errors.
    if let Err(err) = exam.run(&refresh, &theme) {
        fail(err);
    }
}

fn fail(err: ExamError) -> ! {
    eprintln!("rexam: {err}");
    process::exit(err.exit_code());
}
