use thiserror::Error;

#[derive(Error, Debug)]
pub enum AocError {
    /// Transport failure: DNS, TLS, connection reset, timeout
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered, but not with 2xx
    #[error(
        "Could not get {url}: {}: {}",
        .status.as_u16(),
        .status.canonical_reason().unwrap_or("Unknown")
    )]
    InvalidStatus {
        url: reqwest::Url,
        status: reqwest::StatusCode,
    },

    #[error("Puzzle input is not valid UTF-8")]
    Encoding,

    /// Bad base URL, unusable session value, or TLS backend setup failure
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}
