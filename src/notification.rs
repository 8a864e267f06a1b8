//! Notification port used to tell account holders about transfers.
//!
//! Delivery is best-effort: nothing here can fail or hold up a transfer.
//! The engine talks to a [`ChannelNotifier`], which only enqueues; a worker
//! task drains the queue and hands each message to the real delivery
//! [`Notifier`].

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

use crate::Account;

pub const DEFAULT_BUFFER_SIZE: usize = 1024;

pub trait Notifier: Send + Sync {
    fn notify_about_transfer(&self, account: &Account, message: &str);
}

/// Delivers notifications by writing them to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn notify_about_transfer(&self, account: &Account, message: &str) {
        tracing::info!(
            account_id = %account.id,
            "Sending notification to owner of {}: {}",
            account.id,
            message
        );
    }
}

#[derive(Debug)]
struct Notification {
    account: Account,
    message: String,
}

/// Non-blocking notifier that queues messages for a background worker.
#[derive(Clone)]
pub struct ChannelNotifier {
    tx: mpsc::Sender<Notification>,
}

impl Notifier for ChannelNotifier {
    fn notify_about_transfer(&self, account: &Account, message: &str) {
        let notification = Notification {
            account: account.clone(),
            message: message.to_string(),
        };
        match self.tx.try_send(notification) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                tracing::warn!(
                    account_id = %dropped.account.id,
                    "notification queue full, dropping notification"
                );
            }
            Err(TrySendError::Closed(dropped)) => {
                tracing::warn!(
                    account_id = %dropped.account.id,
                    "notification worker stopped, dropping notification"
                );
            }
        }
    }
}

/// Spawns the worker that forwards queued notifications to `delivery`.
///
/// Must be called from within a tokio runtime. The worker exits once every
/// [`ChannelNotifier`] clone has been dropped and the queue is drained.
pub fn spawn_notification_worker(
    delivery: Arc<dyn Notifier>,
    buffer: usize,
) -> (ChannelNotifier, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(buffer.max(1));
    let handle = tokio::spawn(deliver_notifications(rx, delivery));
    (ChannelNotifier { tx }, handle)
}

async fn deliver_notifications(
    mut rx: mpsc::Receiver<Notification>,
    delivery: Arc<dyn Notifier>,
) {
    while let Some(notification) = rx.recv().await {
        delivery.notify_about_transfer(&notification.account, &notification.message);
    }
    tracing::debug!("notification worker finished");
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// Captures every notification for later assertions.
    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        pub(crate) sent: Mutex<Vec<(Account, String)>>,
    }

    impl RecordingNotifier {
        pub(crate) fn sent(&self) -> Vec<(Account, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify_about_transfer(&self, account: &Account, message: &str) {
            self.sent
                .lock()
                .unwrap()
                .push((account.clone(), message.to_string()));
        }
    }

    #[tokio::test]
    async fn test_worker_forwards_in_order() {
        let recorder = Arc::new(RecordingNotifier::default());
        let (notifier, handle) = spawn_notification_worker(recorder.clone(), 8);

        let account = Account::with_balance("002", dec!(300.0));
        notifier.notify_about_transfer(&account, "first");
        notifier.notify_about_transfer(&account, "second");
        drop(notifier);
        handle.await.unwrap();

        let sent = recorder.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], (account.clone(), "first".to_string()));
        assert_eq!(sent[1].1, "second");
    }

    #[tokio::test]
    async fn test_full_queue_drops_without_blocking() {
        let (tx, mut rx) = mpsc::channel(1);
        let notifier = ChannelNotifier { tx };
        let account = Account::new("002");

        notifier.notify_about_transfer(&account, "kept");
        // Queue is full now; this must return immediately
        notifier.notify_about_transfer(&account, "dropped");

        assert_eq!(rx.recv().await.unwrap().message, "kept");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_closed_worker_does_not_panic() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let notifier = ChannelNotifier { tx };
        notifier.notify_about_transfer(&Account::new("002"), "lost");
    }
}
