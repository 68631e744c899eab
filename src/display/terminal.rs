//! [`UserPrompt`] backed by the terminal.

use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;

use crate::prompt::{Notice, NoticeLevel, UserPrompt};

/// Asks on stderr and reads the answer from stdin
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    fn read_answer() -> io::Result<String> {
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer)
    }
}

/// Whether `answer` means yes ("s", "sim", "y", "yes")
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}

/// Colored single-line rendering of a notice
pub fn format_notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Info => notice.message.cyan().to_string(),
        NoticeLevel::Success => format!("{} {}", "✓".green(), notice.message.green()),
        NoticeLevel::Error => format!("{} {}", "✗".red(), notice.message.red()),
    }
}

impl UserPrompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{message} [s/N] ");
        let _ = io::stderr().flush();

        let read = || match Self::read_answer() {
            Ok(answer) => is_affirmative(&answer),
            Err(e) => {
                tracing::warn!("failed to read confirmation: {e}");
                false
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == tokio::runtime::RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(read)
            }
            _ => read(),
        }
    }

    fn notify(&self, notice: &Notice) {
        eprintln!("{}", format_notice(notice));
    }
}
