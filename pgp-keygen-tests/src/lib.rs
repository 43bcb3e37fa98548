//! Test support for the key generation client: a harness that runs the client
//! flow in the background while the test plays the daemon and the user.

pub mod utils;

pub use utils::{init_logging, settle, TestHarness};
