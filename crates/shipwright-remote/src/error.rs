use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("{endpoint} reported an error: {message}")]
    Api {
        endpoint: &'static str,
        message: String,
    },

    #[error("completion response contained no choices")]
    EmptyCompletion,
}
