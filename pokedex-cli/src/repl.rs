//! Read-eval-print loop.

use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use pokedex_core::error::Result;

use crate::commands::{CommandRegistry, Flow, Output};
use crate::session::Session;

pub const PROMPT: &str = "Pokedex > ";

/// Lowercases `text` and splits it into words.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

pub struct Repl {
    registry: CommandRegistry,
    session: Session,
}

impl Repl {
    pub fn new(session: Session) -> Self {
        Self {
            registry: CommandRegistry::builtin(),
            session,
        }
    }

    /// Reads commands from `input` until `exit` or end of input.
    ///
    /// Command errors are printed and the loop carries on.
    pub async fn run<R>(&mut self, input: R, out: Output<'_>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };

            if self.eval(&line, &mut *out).await? == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Runs one input line.
    pub async fn eval(&mut self, line: &str, out: Output<'_>) -> Result<Flow> {
        let words = clean_input(line);
        let Some((name, args)) = words.split_first() else {
            return Ok(Flow::Continue);
        };

        let Some(command) = self.registry.get(name) else {
            writeln!(out, "{} {name}", "Unknown command:".red())?;
            return Ok(Flow::Continue);
        };

        debug!(command = name.as_str(), ?args, "Dispatching");
        match command.run(&mut self.session, args, &mut *out).await {
            Ok(flow) => Ok(flow),
            Err(e) if e.is_user_error() => {
                writeln!(out, "{e}")?;
                Ok(Flow::Continue)
            }
            Err(e) => {
                warn!(command = name.as_str(), error = %e, "Command failed");
                writeln!(out, "{}", e.to_string().red())?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}
