//! Types exchanged between the client and the key generation daemon.

pub mod identity;
pub mod rpc;
pub mod status;

pub use identity::{GenerationRequest, PgpIdentity};
pub use rpc::{
    ClientMessage, CreateUids, IncomingCall, PgpPublicKey, ReplyPayload, RpcMethod, SeqId,
    ServerMessage,
};
pub use status::{RpcError, StatusCode};
