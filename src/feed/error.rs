use std::fmt;

/// Errors that can occur while retrieving feed data.
///
/// The controller never branches on the variant; it only shows the message.
/// Display therefore renders the bare message without a kind prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network or process could not be reached, started, or answered badly.
    Transport(String),
    /// Payload did not match the expected shape.
    Decode(String),
    /// An output stream could not be read.
    Io(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Decode(_) => "decode",
            FetchError::Io(_) => "io",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FetchError::Transport(msg) | FetchError::Decode(msg) | FetchError::Io(msg) => msg,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}
