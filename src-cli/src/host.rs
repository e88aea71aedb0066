//! Terminal front end
//!
//! Lines come from stdin, fetch results from the remote loader. Both end up
//! as an [`Outcome`] handled in one place.

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;

use taab_core::{current_clock, Outcome, RemoteConfigLoader, SettingsStore, SharedTaab};

use crate::opener::Opener;

/// Re-runs the last entered command
const RECALL: &str = "!!";

pub struct Host<S: SettingsStore> {
    taab: SharedTaab<S>,
    loader: RemoteConfigLoader,
    opener: Opener,
    outcomes_tx: mpsc::UnboundedSender<Outcome>,
    outcomes_rx: mpsc::UnboundedReceiver<Outcome>,
    lines: Lines<BufReader<Stdin>>,
    /// The next line answers a y/n question
    confirming: bool,
    /// A fetch was started and has not reported back
    fetching: bool,
}

impl<S: SettingsStore + Send + 'static> Host<S> {
    pub fn new(taab: SharedTaab<S>, loader: RemoteConfigLoader, opener: Opener) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            taab,
            loader,
            opener,
            outcomes_tx,
            outcomes_rx,
            lines: BufReader::new(tokio::io::stdin()).lines(),
            confirming: false,
            fetching: false,
        }
    }

    /// Prompt loop until stdin closes.
    pub async fn run(&mut self) -> Result<()> {
        self.prompt()?;
        loop {
            tokio::select! {
                line = self.lines.next_line() => {
                    let Some(line) = line? else { break };
                    let outcome = self.read(&line);
                    self.handle(outcome);
                }
                Some(outcome) = self.outcomes_rx.recv() => {
                    // the fetch already applied itself, just report it
                    println!();
                    self.fetching = false;
                    self.handle(outcome);
                }
            }
            self.prompt()?;
        }

        self.loader.slot().cancel();
        Ok(())
    }

    /// Dispatch one line, answering a confirmation or waiting for a fetch
    /// if it asks for one.
    pub async fn run_once(&mut self, line: &str) -> Result<()> {
        let outcome = self.read(line);
        self.handle(outcome);

        if self.confirming {
            self.prompt()?;
            if let Some(answer) = self.lines.next_line().await? {
                let outcome = self.read(&answer);
                self.handle(outcome);
            }
        }

        if self.fetching {
            if let Some(outcome) = self.outcomes_rx.recv().await {
                self.handle(outcome);
            }
        }
        Ok(())
    }

    fn read(&mut self, line: &str) -> Outcome {
        if self.confirming {
            self.confirming = false;
            return self.taab.lock().confirm(is_yes(line));
        }

        if line.trim() == RECALL {
            let last = self.taab.lock().last_command().map(str::to_string);
            return match last {
                Some(last) => {
                    println!("{last}");
                    self.taab.lock().dispatch(&last)
                }
                None => Outcome::message("No previous command", 3000),
            };
        }

        self.taab.lock().dispatch(line)
    }

    fn handle(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Nothing => {}
            Outcome::Navigate(navigation) => {
                if let Err(e) = self.opener.open(&navigation) {
                    tracing::error!(error = %e, "Failed to open");
                    eprintln!("{e:#}");
                }
            }
            Outcome::Message(message) => println!("{message}"),
            Outcome::Confirm(confirmation) => {
                self.confirming = true;
                println!("{}", confirmation.prompt);
            }
            Outcome::Fetch { gist_id, message } => {
                println!("{message}");
                self.fetching = true;
                self.loader
                    .start(gist_id, self.taab.clone(), self.outcomes_tx.clone());
            }
        }
    }

    fn prompt(&self) -> Result<()> {
        let prompt = if self.confirming {
            "[y/N] ".to_string()
        } else {
            match current_clock(self.taab.lock().settings()) {
                Some(clock) => format!("{clock} > "),
                None => "> ".to_string(),
            }
        };

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }
}
