use std::io::{self, BufRead, Write};

/// Confirmation and notification capability used by the file manager.
pub trait Dialog: Send + Sync {
    fn confirm(&self, msg: &str) -> bool;

    fn notify(&self, msg: &str);
}

/// Prompts on stdin, reports on stdout.
#[derive(Debug, Default, Clone)]
pub struct TerminalDialog {
    assume_yes: bool,
}

impl TerminalDialog {
    pub fn new(assume_yes: bool) -> TerminalDialog {
        TerminalDialog { assume_yes }
    }
}

impl Dialog for TerminalDialog {
    fn confirm(&self, msg: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let mut stdout = io::stdout();
        if write!(stdout, "{} (y/N): ", msg).and_then(|_| stdout.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::error!("failed to read confirmation: {}", e);
                false
            }
        }
    }

    fn notify(&self, msg: &str) {
        println!("{}", msg);
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn assume_yes_skips_prompt() {
        assert!(TerminalDialog::new(true).confirm("Delete \"a.txt\"?"));
    }
}
