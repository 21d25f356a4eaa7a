// kcard/src/error.rs

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("operation timed out")]
    Timeout,

    /// A response carried fewer than the two mandatory status-word bytes.
    /// This is a transport fault, not a protocol fault.
    #[error("truncated response: got {actual} bytes, need at least 2")]
    TruncatedResponse { actual: usize },

    #[error("no known card scheme matched")]
    NoSchemeMatched,
}

pub type Result<T> = std::result::Result<T, Error>;
