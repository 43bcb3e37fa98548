use pgp_keygen::{
    constants::descriptions,
    infrastructure::{
        channel::{ClientChannel, PendingResponse},
        logging::record_field,
    },
    types::{
        ClientMessage, CreateUids, GenerationRequest, IncomingCall, PgpPublicKey, RpcError,
        RpcMethod, ServerMessage, StatusCode,
    },
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::cancel::{CancelFlag, CancelWatcher};
use crate::{
    error::Result,
    events::{EventSink, ProfileEvent, UserSignals},
    PgpKeygenClient, PgpKeygenClientError,
};

/// How a key generation call ended, when it did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The daemon generated a key and the client accepted it.
    Generated {
        public_key: PgpPublicKey,
        /// The user's answer to the store-on-server prompt, if the daemon
        /// asked.
        push_private: Option<bool>,
    },
    /// The user canceled. The daemon was told with
    /// [`StatusCode::InputCanceled`].
    Canceled,
}

/// What the client has learned so far during one call.
#[derive(Debug, Default)]
struct CallState {
    public_key: Option<PgpPublicKey>,
    push_private: Option<bool>,
}

impl CallState {
    fn into_outcome(
        self,
        result: std::result::Result<(), RpcError>,
        canceled: bool,
    ) -> Result<GenerateOutcome> {
        match result {
            Ok(()) => match self.public_key {
                Some(public_key) => Ok(GenerateOutcome::Generated {
                    public_key,
                    push_private: self.push_private,
                }),
                None if canceled => Ok(GenerateOutcome::Canceled),
                None => Err(PgpKeygenClientError::NoKeyGenerated),
            },
            Err(error) if error.is_input_canceled() => {
                info!("Key generation canceled");
                Ok(GenerateOutcome::Canceled)
            }
            Err(error) => Err(PgpKeygenClientError::Rpc(error)),
        }
    }
}

impl PgpKeygenClient {
    /// Ask the daemon to generate a PGP key for `request`.
    ///
    /// While the call is open the user may cancel through the
    /// [`UserControls`](crate::events::UserControls) matching `signals`. A key
    /// reported after cancellation is refused with
    /// [`StatusCode::InputCanceled`] and never forwarded to `sink`.
    ///
    /// The call ends in [`GenerateOutcome::Canceled`] when the daemon fails
    /// with `InputCanceled`, or when it succeeds after a cancellation without
    /// having had a key accepted. Every other daemon failure is returned as
    /// [`PgpKeygenClientError::Rpc`].
    #[instrument(skip_all, err(Debug), fields(request_id))]
    pub async fn generate_pgp(
        &self,
        request: GenerationRequest,
        mut channel: ClientChannel,
        sink: &impl EventSink,
        signals: UserSignals,
    ) -> Result<GenerateOutcome> {
        let request_id = Uuid::new_v4();
        record_field("request_id", &request_id);
        if request.is_empty() {
            info!("Starting PGP key generation with no identities");
        } else {
            info!(
                "Starting PGP key generation for {} identities",
                request.ids.len()
            );
        }

        sink.emit(ProfileEvent::ShowGenerating);

        let UserSignals {
            canceled,
            cancel,
            mut decisions,
        } = signals;
        let watcher = CancelWatcher::spawn(cancel, canceled.clone());

        let result = Self::run_key_gen(
            request_id,
            request,
            &mut channel,
            sink,
            &mut decisions,
            &canceled,
        )
        .await;

        // The call has settled either way; the watcher must not outlive it.
        let shutdown = watcher.shutdown().await;
        let outcome = result?;
        shutdown?;

        info!("PGP key generation finished: {outcome:?}");
        Ok(outcome)
    }

    async fn run_key_gen(
        request_id: Uuid,
        request: GenerationRequest,
        channel: &mut ClientChannel,
        sink: &impl EventSink,
        decisions: &mut UnboundedReceiver<bool>,
        canceled: &CancelFlag,
    ) -> Result<GenerateOutcome> {
        debug!("Calling {}", RpcMethod::KeyGenDefault);
        channel
            .send(ClientMessage::KeyGenDefault {
                request_id,
                create_uids: CreateUids {
                    use_default: request.use_default,
                    ids: request.ids,
                },
            })
            .await?;

        let mut state = CallState::default();
        loop {
            match channel.receive().await? {
                ServerMessage::Call { seq, call } => {
                    debug!("Received {} (call {seq})", call.method());
                    match call {
                        IncomingCall::KeyGenerated { key } => {
                            handle_key_generated(
                                channel.responder(seq),
                                key,
                                canceled,
                                &mut state,
                                sink,
                            )
                            .await?
                        }
                        IncomingCall::ShouldPushPrivate { prompt } => {
                            handle_should_push_private(
                                channel.responder(seq),
                                prompt,
                                decisions,
                                &mut state,
                                sink,
                            )
                            .await?
                        }
                        IncomingCall::Finished => channel.responder::<()>(seq).respond(()).await?,
                    }
                }
                ServerMessage::Response { result } => {
                    return state.into_outcome(result, canceled.is_set());
                }
            }
        }
    }
}

/// The daemon has key material ready. Whether to accept it is decided by the
/// cancel flag as it stands now.
async fn handle_key_generated(
    response: PendingResponse<()>,
    key: PgpPublicKey,
    canceled: &CancelFlag,
    state: &mut CallState,
    sink: &impl EventSink,
) -> Result<()> {
    if canceled.is_set() {
        info!("Refusing generated key (call {}): user canceled", response.seq());
        response.reject(RpcError::input_canceled()).await?;
        return Ok(());
    }

    if state.public_key.is_some() {
        warn!(
            "Daemon reported a second key for the same call (call {})",
            response.seq()
        );
        response
            .reject(RpcError::new(
                StatusCode::InputError,
                descriptions::KEY_ALREADY_GENERATED,
            ))
            .await?;
        return Ok(());
    }

    response.respond(()).await?;
    state.public_key = Some(key.clone());
    sink.emit(ProfileEvent::UpdatePgpPublicKey(key));
    Ok(())
}

/// The daemon wants to know whether to push the private key to the server.
/// The call stays open until the user decides. Decisions made before the
/// prompt was shown don't answer it.
async fn handle_should_push_private(
    response: PendingResponse<bool>,
    prompt: bool,
    decisions: &mut UnboundedReceiver<bool>,
    state: &mut CallState,
    sink: &impl EventSink,
) -> Result<()> {
    let mut stale = 0;
    while decisions.try_recv().is_ok() {
        stale += 1;
    }
    if stale > 0 {
        debug!("Discarded {stale} decisions made before the prompt");
    }

    sink.emit(ProfileEvent::ShowFinished);
    sink.emit(ProfileEvent::UpdatePromptShouldStoreKeyOnServer(prompt));

    match decisions.recv().await {
        Some(push_private) => {
            debug!(
                "User decided push_private = {push_private} (call {})",
                response.seq()
            );
            state.push_private = Some(push_private);
            response.respond(push_private).await?;
        }
        None => {
            info!("User controls dropped before deciding; canceling prompt");
            response.reject(RpcError::input_canceled()).await?;
        }
    }
    Ok(())
}
