//! `shipwright-remote`: HTTP clients for the three external collaborators.
//!
//! - [`CompletionClient`]: the text-generation backend (chat-completions
//!   wire format), implementing [`shipwright_core::generate::TextGenerator`].
//! - [`ForgeClient`]: the repository hosting API, implementing
//!   [`shipwright_core::host::RepoHost`].
//! - [`BoardClient`]: the posting board, implementing
//!   [`shipwright_core::announce::Announcer`].
//!
//! Each client sends exactly one request per operation and never retries;
//! retry policy, if any, belongs to the caller. Every client carries an
//! explicit request timeout so a hung remote cannot stall the cycle forever.

pub mod board;
pub mod completion;
pub mod error;
pub mod forge;

pub use board::BoardClient;
pub use completion::CompletionClient;
pub use error::RemoteError;
pub use forge::ForgeClient;

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, RemoteError>;

use std::time::Duration;

/// Per-request ceiling applied to every remote call.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub(crate) fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("shipwright/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(RemoteError::Transport)
}
