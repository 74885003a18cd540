use thiserror::Error;

/// Things that can be wrong with an incoming request. None of these are ever
/// reported to the client; each one is logged and then papered over (missing
/// values become empty, a bad or short body becomes whatever we managed to
/// read).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("{0} is not set")]
    MissingVariable(&'static str),
    #[error("CONTENT_LENGTH is not a decimal byte count: {0:?}")]
    MalformedContentLength(String),
    #[error("request body ended after {received} of {expected} bytes")]
    ShortRead { expected: u64, received: u64 },
}
