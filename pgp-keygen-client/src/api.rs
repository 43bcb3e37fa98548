//! Public API of the key generation client.
//!
//! The interface layer builds a request from the profile form, creates a
//! channel with [`PgpKeygenClient::create_channel`], and runs the call with
//! [`PgpKeygenClient::generate_pgp`] while keeping the
//! [`UserControls`](crate::events::UserControls) to cancel or answer prompts.

pub(crate) mod cancel;
mod generate_pgp;

pub use generate_pgp::GenerateOutcome;

use crate::{
    error::Result,
    events::{EventSink, UserSignals},
    PgpKeygenClient,
};
use pgp_keygen::{
    infrastructure::channel::ClientChannel,
    types::{identity::MAX_EMAILS, GenerationRequest},
};

impl PgpKeygenClient {
    /// Generate a key for the identities entered in the profile form.
    ///
    /// Blank emails are dropped before the request is sent. See
    /// [`PgpKeygenClient::generate_pgp`] for the rest of the flow.
    pub async fn generate_pgp_from_profile(
        &self,
        emails: [Option<&str>; MAX_EMAILS],
        full_name: Option<&str>,
        channel: ClientChannel,
        sink: &impl EventSink,
        signals: UserSignals,
    ) -> Result<GenerateOutcome> {
        let request =
            GenerationRequest::new(emails, full_name).with_use_default(self.config().use_default);

        self.generate_pgp(request, channel, sink, signals).await
    }
}
