//! Constants that are shared between other crates in this workspace.
//! Crate-specific constants should go in their respective crates.

/// Capacity of each direction of a [`crate::infrastructure::channel::ClientChannel`]
/// when no config overrides it.
pub const DEFAULT_BUFFER_SIZE: usize = 2;

pub mod descriptions {
    pub const INPUT_CANCELED: &str = "Input canceled";
    pub const KEY_ALREADY_GENERATED: &str = "Key already generated";
}
