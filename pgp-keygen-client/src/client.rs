//! Client object used to start key generation calls.

use pgp_keygen::infrastructure::channel::{self, ClientChannel, DaemonChannel};

use crate::config::Config;

/// A `PgpKeygenClient` wraps the configuration needed to talk to the key
/// generation daemon. It holds no per-call state; every call gets its own
/// channel, cancellation flag and user signals.
#[derive(Clone, Debug, Default)]
pub struct PgpKeygenClient {
    config: Config,
}

impl PgpKeygenClient {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create the channel for one call. The [`DaemonChannel`] end is handed to
    /// whatever transport carries messages to the daemon.
    pub fn create_channel(&self) -> (ClientChannel, DaemonChannel) {
        channel::pair(self.config.buffer_size)
    }
}
