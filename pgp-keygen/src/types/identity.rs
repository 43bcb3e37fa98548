use serde::{Deserialize, Serialize};

/// Number of email addresses a user can attach to a generated key.
pub const MAX_EMAILS: usize = 3;

/// A single user id to bake into the generated key.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PgpIdentity {
    pub comment: String,
    pub email: String,
    pub username: String,
}

/// Identity material submitted to the daemon when asking for a new key.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct GenerationRequest {
    pub ids: Vec<PgpIdentity>,
    /// Whether the daemon may fall back to its own default identity.
    pub use_default: bool,
}

impl GenerationRequest {
    /// Build a request from the profile form: up to [`MAX_EMAILS`] optional
    /// email addresses and the user's display name.
    ///
    /// Missing and blank emails are dropped. Every remaining email keeps its
    /// position relative to the others and is paired with `full_name` and an
    /// empty comment.
    pub fn new(emails: [Option<&str>; MAX_EMAILS], full_name: Option<&str>) -> Self {
        let username = full_name.unwrap_or_default();
        let ids = emails
            .into_iter()
            .flatten()
            .filter(|email| !email.trim().is_empty())
            .map(|email| PgpIdentity {
                comment: String::new(),
                email: email.to_string(),
                username: username.to_string(),
            })
            .collect();

        Self {
            ids,
            use_default: false,
        }
    }

    pub fn with_use_default(mut self, use_default: bool) -> Self {
        self.use_default = use_default;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
