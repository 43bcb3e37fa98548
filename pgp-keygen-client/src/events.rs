//! Seams between the key generation flow and the application around it.
//!
//! The flow never touches application state directly. It reports progress
//! through an [`EventSink`] and listens for the user through [`UserSignals`].
//! The interface layer keeps the matching [`UserControls`].

use pgp_keygen::types::PgpPublicKey;
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::cancel::CancelFlag;

/// Events the key generation flow reports to the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileEvent {
    /// Show the "generating" step.
    ShowGenerating,
    /// Show the "finished" step, where the user picks whether to store the
    /// private key on the server.
    ShowFinished,
    UpdatePgpPublicKey(PgpPublicKey),
    UpdatePromptShouldStoreKeyOnServer(bool),
}

/// Receives [`ProfileEvent`]s from the key generation flow.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ProfileEvent);
}

impl EventSink for mpsc::UnboundedSender<ProfileEvent> {
    fn emit(&self, event: ProfileEvent) {
        if let Err(e) = self.send(event) {
            debug!("Dropping {:?}: application is no longer listening", e.0);
        }
    }
}

/// Create the two halves of the user's input for one key generation call.
pub fn user_signals() -> (UserControls, UserSignals) {
    let canceled = CancelFlag::default();
    let (cancel_tx, cancel_rx) = mpsc::channel(1);
    let (decision_tx, decision_rx) = mpsc::unbounded_channel();

    (
        UserControls {
            canceled: canceled.clone(),
            cancel: cancel_tx,
            decisions: decision_tx,
        },
        UserSignals {
            canceled,
            cancel: cancel_rx,
            decisions: decision_rx,
        },
    )
}

/// Held by the interface layer to cancel the call or answer the daemon's
/// store-on-server prompt.
#[derive(Debug)]
pub struct UserControls {
    canceled: CancelFlag,
    cancel: mpsc::Sender<()>,
    decisions: mpsc::UnboundedSender<bool>,
}

impl UserControls {
    /// Signal cancellation. The flow sees it as soon as this returns. Only the
    /// first call sends anything; it returns `false` if cancellation was
    /// already sent or nobody is listening.
    pub fn cancel(&self) -> bool {
        if self.cancel.is_closed() || !self.canceled.set() {
            return false;
        }
        self.cancel.try_send(()).is_ok()
    }

    /// Answer the store-on-server prompt. Only decisions made while the
    /// prompt is open count. Returns `false` if the flow has already ended.
    pub fn decide(&self, push_private: bool) -> bool {
        self.decisions.send(push_private).is_ok()
    }

    /// Whether something is still waiting for a cancellation. Stays `true`
    /// until the flow's cancellation watcher is gone, even after
    /// [`UserControls::cancel`].
    pub fn is_listening_for_cancel(&self) -> bool {
        !self.cancel.is_closed()
    }
}

/// Consumed by the key generation flow.
#[derive(Debug)]
pub struct UserSignals {
    pub(crate) canceled: CancelFlag,
    pub(crate) cancel: mpsc::Receiver<()>,
    pub(crate) decisions: mpsc::UnboundedReceiver<bool>,
}
