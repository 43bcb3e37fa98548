use pgp_keygen::{types::RpcError, PgpKeygenError};
use thiserror::Error;
use tokio::task::JoinError;

pub type Result<T> = std::result::Result<T, PgpKeygenClientError>;

#[derive(Debug, Error)]
pub enum PgpKeygenClientError {
    #[error("Daemon returned failure: {0}")]
    Rpc(RpcError),
    #[error("Daemon finished the call without generating a key")]
    NoKeyGenerated,
    #[error("Cancellation watcher failed: {0}")]
    WatcherFailed(JoinError),
    #[error("Channel buffer size must be at least 1")]
    InvalidBufferSize,

    // Wrapped errors
    #[error(transparent)]
    PgpKeygen(#[from] PgpKeygenError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl PgpKeygenClientError {
    /// Status reported by the daemon, if this error came from the daemon.
    pub fn rpc_error(&self) -> Option<&RpcError> {
        match self {
            Self::Rpc(error) => Some(error),
            _ => None,
        }
    }
}
