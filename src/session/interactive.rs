use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::checker::FactChecker;

pub const QUESTION_PROMPT: &str = "Question: ";
pub const ANSWER_PROMPT: &str = "Answer: ";

/// `exit` or `quit`, in any case.
pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}

/// Prompts for question/answer pairs until `exit`/`quit` or end of input.
///
/// A blank question re-prompts. Returns the number of completed checks.
pub async fn run_interactive<R, W>(
    checker: &FactChecker,
    input: R,
    output: &mut W,
) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut checked = 0;

    loop {
        output.write_all(QUESTION_PROMPT.as_bytes()).await?;
        output.flush().await?;
        let Some(question) = lines.next_line().await? else {
            break;
        };
        let question = question.trim();
        if is_exit_command(question) {
            break;
        }
        if question.is_empty() {
            continue;
        }

        output.write_all(ANSWER_PROMPT.as_bytes()).await?;
        output.flush().await?;
        // Only the question prompt honours exit/quit; any answer text is checked.
        let Some(answer) = lines.next_line().await? else {
            break;
        };

        let report = checker.check(question, &answer).await;
        output
            .write_all(format!("\n{report}\n\n").as_bytes())
            .await?;
        output.flush().await?;
        checked += 1;
    }

    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(checked)
}
