use std::io::{self, BufRead, Write};

use products_hr::Confirm;
use tracing::warn;

/// Asks `message [y/N]` on a terminal-like pair of streams.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl PromptConfirm<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr so listings on stdout stay pipeable.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, message: &str) -> io::Result<bool> {
        write!(self.output, "{message} [y/N] ")?;
        self.output.flush()?;
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        self.ask(message).unwrap_or_else(|err| {
            warn!(error = %err, "confirmation prompt failed, treating as no");
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(input: &str) -> (bool, String) {
        let mut output = Vec::new();
        let accepted = PromptConfirm::new(input.as_bytes(), &mut output).confirm("Delete?");
        (accepted, String::from_utf8(output).unwrap())
    }

    #[test]
    fn yes_answers_accept() {
        assert_eq!(answer("y\n"), (true, "Delete? [y/N] ".to_string()));
        assert!(answer("YES\n").0);
    }

    #[test]
    fn anything_else_declines() {
        assert!(!answer("\n").0);
        assert!(!answer("nope\n").0);
        assert!(!answer("").0);
    }
}
