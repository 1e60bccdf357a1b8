use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing password")]
    MissingPassword,
    #[error("clock unavailable: {0}")]
    ClockUnavailable(String),
    #[error("invalid date tag: {0}")]
    InvalidDateTag(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// The HKDF expansion limit was reached before a full nonce could be read.
    #[error("nonce stream exhausted: requested {requested} bytes, {remaining} remaining")]
    ExhaustedStream { requested: usize, remaining: usize },
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Whether the caller may keep producing nonces after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Io { .. })
    }
}
