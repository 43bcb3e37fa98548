//! Protocol types and channel infrastructure shared by the PGP key generation
//! client and anything that plays the daemon side of a key generation call.
//!
//! ⚠️ __Usage__: Applications should depend on `pgp-keygen-client`. This crate
//! is a dependency for the client and for test doubles of the daemon.
#![warn(unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]
#![forbid(rustdoc::broken_intra_doc_links)]

pub mod constants;
pub mod error;
pub mod infrastructure;
pub mod types;

pub use error::PgpKeygenError;
