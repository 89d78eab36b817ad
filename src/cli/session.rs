//! Command handlers for `chat`, `ask` and `profile`.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::agent::Transcript;
use crate::orchestrator::Orchestrator;
use crate::profile::ProfileContext;

/// Exit code for a turn that was answered.
pub const EXIT_REPLY: i32 = 0;
/// Exit code for a blocked or failed turn.
pub const EXIT_BLOCKED: i32 = 2;

/// Handle `tripguard ask`. Returns the process exit code.
pub async fn handle_ask(
    orchestrator: &Orchestrator,
    message: &str,
    out: &mut impl Write,
) -> std::io::Result<i32> {
    let turn = orchestrator.ask(message).await;
    writeln!(out, "{}", turn.outcome.notice())?;
    Ok(if turn.outcome.is_reply() {
        EXIT_REPLY
    } else {
        EXIT_BLOCKED
    })
}

/// Handle `tripguard profile`.
pub fn handle_profile(profile: &ProfileContext, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", profile.to_prompt_block())
}

/// Handle `tripguard chat`: read lines until EOF or `/quit`.
pub async fn handle_chat<R>(
    orchestrator: &Orchestrator,
    input: R,
    out: &mut impl Write,
) -> std::io::Result<Transcript>
where
    R: AsyncBufRead + Unpin,
{
    let mut transcript = Transcript::new();
    let mut lines = input.lines();

    writeln!(out, "Chat with your travel agent. Commands: /profile, /reset, /quit")?;
    loop {
        write!(out, "You: ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/profile" => handle_profile(orchestrator.profile(), out)?,
            "/reset" => {
                transcript.clear();
                writeln!(out, "Conversation cleared.")?;
            }
            message => {
                let turn = orchestrator.run_turn(message, &transcript).await;
                writeln!(out, "Agent: {}", turn.outcome.notice())?;
                transcript.record(&turn);
            }
        }
    }
    Ok(transcript)
}
