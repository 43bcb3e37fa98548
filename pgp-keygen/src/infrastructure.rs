//! Plumbing shared by both ends of a key generation call.

pub mod channel;
pub mod logging;
