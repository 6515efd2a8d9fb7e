//! Terminal implementations of the device seams.

use async_trait::async_trait;
use scanlog_app::{LinkOpener, Notification, UserFeedback};
use scanlog_core::{is_url, ScanError, ScanResult};
use std::io::{BufRead, Write};

/// Alerts and notifications on stderr; confirmations read from stdin.
pub struct TerminalFeedback {
    assume_yes: bool,
}

impl TerminalFeedback {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait]
impl UserFeedback for TerminalFeedback {
    fn alert(&self, title: &str, message: &str) {
        eprintln!("[{}] {}", title, message);
    }

    async fn confirm(&self, title: &str, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let prompt = format!("{}: {} [y/N] ", title, message);
        let answer = tokio::task::spawn_blocking(move || {
            let mut stderr = std::io::stderr();
            let _ = write!(stderr, "{}", prompt);
            let _ = stderr.flush();
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line).map(|_| line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }

    fn notify(&self, notification: Notification) {
        eprintln!("* {}", notification.message);
    }
}

/// "Opens" a link by printing it; only URL-like payloads are accepted.
pub struct PrintLinks;

#[async_trait]
impl LinkOpener for PrintLinks {
    async fn can_open(&self, url: &str) -> ScanResult<bool> {
        Ok(is_url(url))
    }

    async fn open(&self, url: &str) -> ScanResult<()> {
        let mut stdout = std::io::stdout();
        writeln!(stdout, "{}", url).map_err(|e| ScanError::Device(e.to_string()))
    }
}
