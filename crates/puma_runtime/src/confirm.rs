//! Interactive yes/no confirmation.

use std::io::{self, BufRead, Write};

use puma_engine::Confirm;

/// Asks on standard output and reads the answer from standard input.
///
/// Anything but an explicit yes declines, including end of input.
#[derive(Clone, Copy, Debug, Default)]
pub struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [s/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_yes(&answer),
        }
    }
}

/// Returns true for the accepted spellings of yes.
#[must_use]
pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}
