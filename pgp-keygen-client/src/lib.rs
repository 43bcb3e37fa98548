//! Client side of PGP key generation: drives a key generation call against the
//! daemon while the user can back out at any point.
#![warn(unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]
#![forbid(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod events;

pub use api::GenerateOutcome;
pub use client::PgpKeygenClient;
pub use config::Config;
pub use error::PgpKeygenClientError;
