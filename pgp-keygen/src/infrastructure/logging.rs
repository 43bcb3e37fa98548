//! Helpers for attaching call context to `tracing` spans.

use std::fmt::Debug;
use tracing::{warn, Span};

/// Record `field_value` under `field_name` on the current span so every event
/// emitted inside it carries the value, e.g.
/// ```text
///   INFO pgp_keygen_client::api::generate_pgp: Daemon accepted key generation request
///     in pgp_keygen_client::api::generate_pgp::generate_pgp with request_id: "1c0f3f4e-..."
/// ```
/// The field must be declared on the span (`#[instrument(fields(request_id))]`).
/// Debug builds warn when it is not.
pub fn record_field(field_name: &str, field_value: &dyn Debug) {
    let span = Span::current();
    if cfg!(debug_assertions) && !span.is_disabled() && !span.has_field(field_name) {
        warn!("Field {} not defined in current span!", field_name);
    }

    // Recording on a span without the field is a no-op.
    let _ = span.record(field_name, &format!("{field_value:?}"));
}
