use thiserror::Error;
use tokio::sync::mpsc::error::SendError;

#[derive(Debug, Error)]
pub enum PgpKeygenError {
    // Channel errors
    #[error("Invalid message")]
    InvalidMessage,
    #[error("No message received")]
    NoMessageReceived,
    #[error("Channel closed: {}", .0)]
    ChannelClosed(String),
}

impl<T> From<SendError<T>> for PgpKeygenError {
    fn from(error: SendError<T>) -> Self {
        Self::ChannelClosed(error.to_string())
    }
}
