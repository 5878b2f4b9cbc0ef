//! Article text extraction through an external process (`lynx -dump` by default).

use std::process::Stdio;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use super::error::FetchError;

pub const DEFAULT_EXTRACTOR: &str = "lynx";
pub const DEFAULT_EXTRACTOR_ARGS: &[&str] = &["-dump"];

#[derive(Debug, Clone)]
pub struct ContentExtractor {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXTRACTOR,
            DEFAULT_EXTRACTOR_ARGS.iter().map(|a| a.to_string()).collect(),
            Duration::from_secs(30),
        )
    }
}

impl ContentExtractor {
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    /// Runs the extractor with `url` as its last argument and returns its stdout.
    pub async fn extract(&self, url: &str) -> Result<String, FetchError> {
        match tokio::time::timeout(self.timeout, self.run(url)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("{} timed out after {:?} on {}", self.command, self.timeout, url);
                Err(FetchError::Transport(format!(
                    "{} timed out after {}s",
                    self.command,
                    self.timeout.as_secs()
                )))
            }
        }
    }

    async fn run(&self, url: &str) -> Result<String, FetchError> {
        debug!("Spawning {} {:?} {}", self.command, self.args, url);

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| FetchError::Transport(format!("could not start {}: {}", self.command, e)))?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| FetchError::Io(format!("{} has no stdout", self.command)))?;

        let mut bytes = Vec::new();
        stdout
            .read_to_end(&mut bytes)
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;

        let status = child
            .wait()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        if !status.success() {
            return Err(FetchError::Transport(format!(
                "{} exited with {}",
                self.command, status
            )));
        }

        info!("Extracted {} bytes from {}", bytes.len(), url);
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
