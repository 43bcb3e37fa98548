//! Message channel connecting a client to the daemon for the duration of one
//! key generation call.

pub mod client;
pub mod daemon;

pub use client::{ClientChannel, IntoReply, PendingResponse};
pub use daemon::DaemonChannel;

use tokio::sync::mpsc;

use crate::types::{ClientMessage, ServerMessage};

/// Create a connected pair of channel ends. Each direction buffers at most
/// `buffer_size` messages.
pub fn pair(buffer_size: usize) -> (ClientChannel, DaemonChannel) {
    let (client_tx, daemon_rx) = mpsc::channel::<ClientMessage>(buffer_size);
    let (daemon_tx, client_rx) = mpsc::channel::<ServerMessage>(buffer_size);

    (
        ClientChannel::new(client_tx, client_rx),
        DaemonChannel::new(daemon_tx, daemon_rx),
    )
}
