//! Command-line arguments for the `refcheck` binary.

use std::path::PathBuf;

use clap::Parser;

/// Check an answer against reference knowledge and flag possible hallucinations.
#[derive(Parser, Debug)]
#[command(name = "refcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Question to resolve a reference for (single-shot mode)
    #[arg(short, long)]
    pub question: Option<String>,

    /// Answer to check against the reference (single-shot mode)
    #[arg(short, long)]
    pub answer: Option<String>,

    /// Prompt for question/answer pairs until `exit`, `quit`, or end of input
    #[arg(short, long, conflicts_with_all = ["question", "answer"])]
    pub interactive: bool,

    /// Reload the override file as soon as it changes on disk
    #[arg(long)]
    pub watch: bool,

    /// Override file path (takes precedence over $REFCHECK_OVERRIDES_PATH)
    #[arg(long, value_name = "PATH")]
    pub overrides: Option<PathBuf>,
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Single { question: String, answer: String },
    Interactive,
}

impl Cli {
    /// Selected mode, or `None` when only usage should be shown.
    pub fn mode(&self) -> Option<Mode> {
        if self.interactive {
            return Some(Mode::Interactive);
        }
        match (&self.question, &self.answer) {
            (Some(question), Some(answer)) => Some(Mode::Single {
                question: question.clone(),
                answer: answer.clone(),
            }),
            _ => None,
        }
    }
}
