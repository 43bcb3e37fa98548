use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info};
use tracing_futures::Instrument;

use crate::{error::Result, PgpKeygenClientError};

/// Set once the user asks to cancel. Never cleared.
#[derive(Clone, Debug, Default)]
pub(crate) struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Returns `true` if this call is the one that set the flag.
    pub(crate) fn set(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    pub(crate) fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Background task that listens for the user's cancellation for as long as a
/// call is open and makes sure the [`CancelFlag`] is set when it arrives.
///
/// [`UserControls::cancel`](crate::events::UserControls::cancel) already sets
/// the flag before signalling, so the flow never depends on this task having
/// been scheduled.
#[derive(Debug)]
pub(crate) struct CancelWatcher {
    handle: JoinHandle<()>,
}

impl CancelWatcher {
    pub(crate) fn spawn(mut cancel: mpsc::Receiver<()>, flag: CancelFlag) -> Self {
        let handle = tokio::spawn(
            async move {
                while cancel.recv().await.is_some() {
                    info!("User canceled key generation");
                    let _ = flag.set();
                }
                debug!("Cancel handle dropped");
            }
            .in_current_span(),
        );

        Self { handle }
    }

    /// Stop the watcher and wait until it is gone. Consuming `self` means this
    /// happens once per call. The cancel receiver is dropped by the time this
    /// returns.
    pub(crate) async fn shutdown(self) -> Result<()> {
        self.handle.abort();
        match self.handle.await {
            Ok(()) => Ok(()),
            Err(e) if e.is_cancelled() => {
                debug!("Cancellation watcher stopped");
                Ok(())
            }
            Err(e) => Err(PgpKeygenClientError::WatcherFailed(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancellation_sets_flag() {
        let (cancel_tx, cancel_rx) = mpsc::channel(1);
        let flag = CancelFlag::default();
        let watcher = CancelWatcher::spawn(cancel_rx, flag.clone());

        cancel_tx.send(()).await.unwrap();
        while !flag.is_set() {
            tokio::task::yield_now().await;
        }

        // Still listening until shut down.
        assert!(!cancel_tx.is_closed());
        watcher.shutdown().await.unwrap();
        assert!(cancel_tx.is_closed());
    }

    #[tokio::test]
    async fn shutdown_drops_the_receiver() {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>(1);
        let flag = CancelFlag::default();
        let watcher = CancelWatcher::spawn(cancel_rx, flag.clone());

        watcher.shutdown().await.unwrap();

        assert!(cancel_tx.is_closed());
        assert!(!flag.is_set());
    }

    #[tokio::test]
    async fn dropped_cancel_handle_leaves_flag_clear() {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>(1);
        let flag = CancelFlag::default();
        let watcher = CancelWatcher::spawn(cancel_rx, flag.clone());

        drop(cancel_tx);
        watcher.shutdown().await.unwrap();

        assert!(!flag.is_set());
    }

    #[test]
    fn flag_reports_first_setter() {
        let flag = CancelFlag::default();

        assert!(flag.set());
        assert!(!flag.set());
        assert!(flag.clone().is_set());
    }
}
