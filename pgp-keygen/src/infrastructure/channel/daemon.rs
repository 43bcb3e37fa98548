use tokio::sync::mpsc::{Receiver, Sender};
use tracing::{debug, error};
use uuid::Uuid;

use crate::{
    types::{
        ClientMessage, CreateUids, IncomingCall, ReplyPayload, RpcError, SeqId, ServerMessage,
    },
    PgpKeygenError,
};

/// Daemon end of a key generation call.
///
/// Daemon implementations (and test doubles of the daemon) use this to read
/// the opening request, issue callbacks and finish the call.
#[derive(Debug)]
pub struct DaemonChannel {
    sender: Sender<ServerMessage>,
    receiver: Receiver<ClientMessage>,
    next_seq: SeqId,
}

impl DaemonChannel {
    pub fn new(sender: Sender<ServerMessage>, receiver: Receiver<ClientMessage>) -> Self {
        Self {
            sender,
            receiver,
            next_seq: 0,
        }
    }

    pub async fn send(&self, message: ServerMessage) -> Result<(), PgpKeygenError> {
        self.sender.send(message).await.map_err(|e| {
            error!("Failed to send message to client: {e}");
            PgpKeygenError::from(e)
        })
    }

    pub async fn receive(&mut self) -> Result<ClientMessage, PgpKeygenError> {
        self.receiver
            .recv()
            .await
            .ok_or(PgpKeygenError::NoMessageReceived)
    }

    /// Read the message that opens the call.
    pub async fn receive_request(&mut self) -> Result<(Uuid, CreateUids), PgpKeygenError> {
        match self.receive().await? {
            ClientMessage::KeyGenDefault {
                request_id,
                create_uids,
            } => Ok((request_id, create_uids)),
            ClientMessage::Reply { .. } => Err(PgpKeygenError::InvalidMessage),
        }
    }

    /// Issue a callback to the client without waiting for the answer.
    pub async fn start_call(&mut self, call: IncomingCall) -> Result<SeqId, PgpKeygenError> {
        let seq = self.next_seq;
        self.next_seq += 1;
        debug!("Issuing {} as call {seq}", call.method());

        self.send(ServerMessage::Call { seq, call }).await?;
        Ok(seq)
    }

    /// Wait for the client's answer to callback `seq`.
    pub async fn receive_reply(
        &mut self,
        seq: SeqId,
    ) -> Result<Result<ReplyPayload, RpcError>, PgpKeygenError> {
        match self.receive().await? {
            ClientMessage::Reply {
                seq: reply_seq,
                result,
            } if reply_seq == seq => Ok(result),
            _ => Err(PgpKeygenError::InvalidMessage),
        }
    }

    /// Issue a callback and wait for its answer.
    pub async fn call(
        &mut self,
        call: IncomingCall,
    ) -> Result<Result<ReplyPayload, RpcError>, PgpKeygenError> {
        let seq = self.start_call(call).await?;
        self.receive_reply(seq).await
    }

    /// Finish the call with its terminal response.
    pub async fn finish(&self, result: Result<(), RpcError>) -> Result<(), PgpKeygenError> {
        self.send(ServerMessage::Response { result }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{infrastructure::channel::pair, types::PgpPublicKey};

    #[tokio::test]
    async fn callbacks_are_numbered_in_order() {
        let (mut client, mut daemon) = pair(4);

        let first = daemon.start_call(IncomingCall::Finished).await.unwrap();
        let second = daemon
            .start_call(IncomingCall::KeyGenerated {
                key: PgpPublicKey::new("key"),
            })
            .await
            .unwrap();
        assert_eq!((first, second), (0, 1));

        match client.receive().await.unwrap() {
            ServerMessage::Call { seq: 0, call } => assert_eq!(call, IncomingCall::Finished),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn reply_for_wrong_call_is_invalid() {
        let (client, mut daemon) = pair(4);

        client.responder::<()>(5).respond(()).await.unwrap();

        assert!(matches!(
            daemon.receive_reply(0).await,
            Err(PgpKeygenError::InvalidMessage)
        ));
    }

    #[tokio::test]
    async fn request_must_open_the_call() {
        let (client, mut daemon) = pair(4);

        client.responder::<()>(0).respond(()).await.unwrap();

        assert!(matches!(
            daemon.receive_request().await,
            Err(PgpKeygenError::InvalidMessage)
        ));
    }
}
