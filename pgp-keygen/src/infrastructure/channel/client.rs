use std::marker::PhantomData;

use tokio::sync::mpsc::{Receiver, Sender};
use tracing::{error, warn};

use crate::{
    types::{ClientMessage, ReplyPayload, RpcError, SeqId, ServerMessage},
    PgpKeygenError,
};

/// Client end of a key generation call.
#[derive(Debug)]
pub struct ClientChannel {
    sender: Sender<ClientMessage>,
    receiver: Receiver<ServerMessage>,
}

impl ClientChannel {
    pub fn new(sender: Sender<ClientMessage>, receiver: Receiver<ServerMessage>) -> Self {
        Self { sender, receiver }
    }

    pub async fn send(&self, message: ClientMessage) -> Result<(), PgpKeygenError> {
        self.sender.send(message).await.map_err(|e| {
            error!("Failed to send message to daemon: {e}");
            PgpKeygenError::from(e)
        })
    }

    /// Wait for the next message from the daemon. Returns
    /// [`PgpKeygenError::NoMessageReceived`] once the daemon end is gone.
    pub async fn receive(&mut self) -> Result<ServerMessage, PgpKeygenError> {
        self.receiver
            .recv()
            .await
            .ok_or(PgpKeygenError::NoMessageReceived)
    }

    /// Take the right to answer daemon callback `seq`. The returned handle can
    /// be held across await points and answers the callback at most once.
    pub fn responder<T: IntoReply>(&self, seq: SeqId) -> PendingResponse<T> {
        PendingResponse {
            seq,
            sender: Some(self.sender.clone()),
            _reply: PhantomData,
        }
    }
}

/// Values that can answer a daemon callback.
pub trait IntoReply {
    fn into_reply(self) -> ReplyPayload;
}

impl IntoReply for () {
    fn into_reply(self) -> ReplyPayload {
        ReplyPayload::Ack
    }
}

impl IntoReply for bool {
    fn into_reply(self) -> ReplyPayload {
        ReplyPayload::Decision(self)
    }
}

/// The outstanding answer to one daemon callback.
///
/// Answering consumes the handle. Dropping it unanswered sends nothing and
/// leaves the daemon waiting, so it is logged.
#[derive(Debug)]
pub struct PendingResponse<T: IntoReply> {
    seq: SeqId,
    sender: Option<Sender<ClientMessage>>,
    _reply: PhantomData<fn(T)>,
}

impl<T: IntoReply> PendingResponse<T> {
    pub fn seq(&self) -> SeqId {
        self.seq
    }

    /// Answer the callback successfully.
    pub async fn respond(self, value: T) -> Result<(), PgpKeygenError> {
        self.send(Ok(value.into_reply())).await
    }

    /// Answer the callback with an error status.
    pub async fn reject(self, error: RpcError) -> Result<(), PgpKeygenError> {
        self.send(Err(error)).await
    }

    async fn send(mut self, result: Result<ReplyPayload, RpcError>) -> Result<(), PgpKeygenError> {
        let sender = self.sender.take().ok_or(PgpKeygenError::InvalidMessage)?;
        sender
            .send(ClientMessage::Reply {
                seq: self.seq,
                result,
            })
            .await?;
        Ok(())
    }
}

impl<T: IntoReply> Drop for PendingResponse<T> {
    fn drop(&mut self) {
        if self.sender.is_some() {
            warn!("Response to daemon call {} dropped without an answer", self.seq);
        }
    }
}
