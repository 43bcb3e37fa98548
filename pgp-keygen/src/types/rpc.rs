//! Messages exchanged over a key generation call.
//!
//! A call is opened by the client with [`ClientMessage::KeyGenDefault`]. The
//! daemon may then issue any number of [`ServerMessage::Call`]s, each of which
//! the client answers with a [`ClientMessage::Reply`] carrying the same `seq`.
//! The call ends with exactly one [`ServerMessage::Response`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::types::{identity::PgpIdentity, status::RpcError};

/// Sequence number the daemon assigns to each callback it issues.
pub type SeqId = u64;

/// Public half of a freshly generated key, as reported by the daemon.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PgpPublicKey {
    /// ASCII-armored key block.
    pub key: String,
    pub key_id: Option<String>,
    pub fingerprint: Option<String>,
}

impl PgpPublicKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            key_id: None,
            fingerprint: None,
        }
    }
}

/// Wire names of the methods involved in a key generation call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum RpcMethod {
    #[strum(serialize = "keybase.1.pgp.pgpKeyGenDefault")]
    KeyGenDefault,
    #[strum(serialize = "keybase.1.pgpUi.keyGenerated")]
    KeyGenerated,
    #[strum(serialize = "keybase.1.pgpUi.shouldPushPrivate")]
    ShouldPushPrivate,
    #[strum(serialize = "keybase.1.pgpUi.finished")]
    Finished,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CreateUids {
    pub use_default: bool,
    pub ids: Vec<PgpIdentity>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ReplyPayload {
    Ack,
    Decision(bool),
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ClientMessage {
    KeyGenDefault {
        request_id: Uuid,
        create_uids: CreateUids,
    },
    Reply {
        seq: SeqId,
        result: Result<ReplyPayload, RpcError>,
    },
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum IncomingCall {
    KeyGenerated { key: PgpPublicKey },
    ShouldPushPrivate { prompt: bool },
    Finished,
}

impl IncomingCall {
    pub fn method(&self) -> RpcMethod {
        match self {
            IncomingCall::KeyGenerated { .. } => RpcMethod::KeyGenerated,
            IncomingCall::ShouldPushPrivate { .. } => RpcMethod::ShouldPushPrivate,
            IncomingCall::Finished => RpcMethod::Finished,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ServerMessage {
    Call { seq: SeqId, call: IncomingCall },
    Response { result: Result<(), RpcError> },
}
