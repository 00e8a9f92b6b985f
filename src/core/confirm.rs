//! Interactive confirmation before downloading

use crate::error::VgetError;
use std::io::{BufRead, Write};
use tracing::debug;

const QUESTION: &str = "Do you want to continue with the download? (y/n): ";
const REPROMPT: &str = "Please enter 'y' for yes or 'n' for no.";

/// Source of a yes/no decision
pub trait Confirm {
    /// `Ok(true)` to proceed, `Ok(false)` to abort
    fn confirm(&mut self) -> Result<bool, VgetError>;
}

/// Line-based yes/no prompt
pub struct ConfirmationGate<R, W> {
    input: R,
    output: W,
    auto_confirm: bool,
}

impl<R: BufRead, W: Write> ConfirmationGate<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            auto_confirm: false,
        }
    }

    /// Answer yes without reading input
    pub fn with_auto_confirm(mut self, auto_confirm: bool) -> Self {
        self.auto_confirm = auto_confirm;
        self
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.output
    }
}

impl ConfirmationGate<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompt on the terminal
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for ConfirmationGate<R, W> {
    fn confirm(&mut self) -> Result<bool, VgetError> {
        if self.auto_confirm {
            debug!("Auto-confirm enabled, skipping prompt");
            return Ok(true);
        }

        loop {
            write!(self.output, "\n{}", QUESTION)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                // EOF: nobody is there to agree
                writeln!(self.output)?;
                return Ok(false);
            }

            match line.trim().to_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => writeln!(self.output, "{}", REPROMPT)?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str) -> (bool, String) {
        let mut gate = ConfirmationGate::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let answer = gate.confirm().unwrap();
        let output = String::from_utf8(gate.into_output()).unwrap();
        (answer, output)
    }

    #[test]
    fn test_yes_proceeds() {
        let (answer, output) = ask("y\n");
        assert!(answer);
        assert_eq!(output.matches(QUESTION).count(), 1);
    }

    #[test]
    fn test_no_aborts() {
        let (answer, _) = ask("N\n");
        assert!(!answer);
    }

    #[test]
    fn test_other_input_reprompts() {
        let (answer, output) = ask("maybe\n\nyes\n y \n");
        assert!(answer);
        assert_eq!(output.matches(QUESTION).count(), 4);
        assert_eq!(output.matches(REPROMPT).count(), 3);
    }

    #[test]
    fn test_eof_aborts() {
        let (answer, output) = ask("what\n");
        assert!(!answer);
        assert_eq!(output.matches(REPROMPT).count(), 1);
    }

    #[test]
    fn test_auto_confirm_skips_prompt() {
        let mut gate = ConfirmationGate::new(Cursor::new(Vec::new()), Vec::new())
            .with_auto_confirm(true);
        assert!(gate.confirm().unwrap());
        assert!(gate.into_output().is_empty());
    }
}
