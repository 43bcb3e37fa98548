//! Various testing utilities

use std::time::Duration;

use pgp_keygen::{
    infrastructure::channel::{ClientChannel, DaemonChannel},
    types::{ClientMessage, GenerationRequest, PgpPublicKey},
};
use pgp_keygen_client::{
    error::Result,
    events::{user_signals, ProfileEvent, UserControls, UserSignals},
    Config, GenerateOutcome, PgpKeygenClient,
};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing_subscriber::EnvFilter;

/// How long to wait before concluding the client is not going to send
/// anything.
pub const QUIET_PERIOD: Duration = Duration::from_millis(50);

/// Install a log subscriber for the test binary. Safe to call from every test.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Give every other ready task on the runtime a chance to run.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

pub fn armored_key(name: &str) -> PgpPublicKey {
    PgpPublicKey {
        key: format!("-----BEGIN PGP PUBLIC KEY BLOCK-----\n{name}\n-----END PGP PUBLIC KEY BLOCK-----"),
        key_id: Some(format!("{name}-id")),
        fingerprint: None,
    }
}

pub fn request_for(name: &str) -> GenerationRequest {
    let email = format!("{name}@example.com");
    GenerationRequest::new([Some(email.as_str()), None, None], Some(name))
}

/// One key generation call with both of its counterparts exposed to the test:
/// the daemon end of the channel and the user's controls.
pub struct TestHarness {
    pub client: PgpKeygenClient,
    pub daemon: DaemonChannel,
    pub controls: UserControls,
    pub events: UnboundedReceiver<ProfileEvent>,
    channel: Option<ClientChannel>,
    signals: Option<UserSignals>,
    sink: UnboundedSender<ProfileEvent>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let client = PgpKeygenClient::new(config);
        let (channel, daemon) = client.create_channel();
        let (controls, signals) = user_signals();
        let (sink, events) = mpsc::unbounded_channel();

        Self {
            client,
            daemon,
            controls,
            events,
            channel: Some(channel),
            signals: Some(signals),
            sink,
        }
    }

    /// Run [`PgpKeygenClient::generate_pgp`] in the background.
    ///
    /// # Panics
    /// If called twice on the same harness.
    pub fn start(&mut self, request: GenerationRequest) -> JoinHandle<Result<GenerateOutcome>> {
        let (client, channel, sink, signals) = self.take_parts();
        tokio::spawn(async move { client.generate_pgp(request, channel, &sink, signals).await })
    }

    /// Run [`PgpKeygenClient::generate_pgp_from_profile`] in the background.
    ///
    /// # Panics
    /// If called twice on the same harness.
    pub fn start_from_profile(
        &mut self,
        emails: [Option<&'static str>; 3],
        full_name: Option<&'static str>,
    ) -> JoinHandle<Result<GenerateOutcome>> {
        let (client, channel, sink, signals) = self.take_parts();
        tokio::spawn(async move {
            client
                .generate_pgp_from_profile(emails, full_name, channel, &sink, signals)
                .await
        })
    }

    fn take_parts(
        &mut self,
    ) -> (
        PgpKeygenClient,
        ClientChannel,
        UnboundedSender<ProfileEvent>,
        UserSignals,
    ) {
        let channel = self.channel.take().expect("harness already started");
        let signals = self.signals.take().expect("harness already started");
        (self.client.clone(), channel, self.sink.clone(), signals)
    }

    /// Events the client has emitted so far.
    pub fn drain_events(&mut self) -> Vec<ProfileEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    /// Wait briefly for a client message. `None` means the client stayed quiet.
    pub async fn next_client_message(&mut self) -> Option<ClientMessage> {
        tokio::time::timeout(QUIET_PERIOD, self.daemon.receive())
            .await
            .ok()
            .and_then(|message| message.ok())
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
