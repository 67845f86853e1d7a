//! Question/answer checking sessions.
//!
//! [`FactChecker`] runs one cycle (resolve the reference, score the answer) and returns a
//! [`CheckReport`]. [`run_interactive`] drives repeated cycles over any async line source,
//! which is how the binary's interactive mode and its tests share one loop.

pub mod checker;
pub mod interactive;


pub use checker::{CheckReport, FactChecker};
pub use interactive::{ANSWER_PROMPT, QUESTION_PROMPT, is_exit_command, run_interactive};
