//! Embedded third-party player and its asynchronous readiness.
//!
//! The embedded player only exists after an external script finishes
//! loading. Readiness is a one-shot hand-off from whoever builds the player
//! to whoever owns the [`super::PlaybackSource`], cancellable when the owner
//! goes away first.

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Minimal control surface of an embedded player.
pub trait EmbeddedPlayer: Send {
    /// Playback position in seconds.
    fn current_time(&self) -> f64;

    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool);

    /// Swap the loaded video without rebuilding the player.
    fn load_video_by_id(&mut self, video_id: &str);

    fn destroy(&mut self);
}

/// Sending half: fired once when the player is constructed.
#[derive(Debug)]
pub struct ReadyNotifier<P> {
    tx: oneshot::Sender<P>,
    cancel: CancellationToken,
}

impl<P> ReadyNotifier<P> {
    /// Deliver the ready player. Hands it back if the waiter is gone.
    pub fn notify(self, player: P) -> Result<(), P> {
        if self.cancel.is_cancelled() {
            return Err(player);
        }
        self.tx.send(player)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Receiving half: resolves once the player is ready.
#[derive(Debug)]
pub struct PendingPlayer<P> {
    rx: oneshot::Receiver<P>,
    cancel: CancellationToken,
}

impl<P> PendingPlayer<P> {
    /// Token that abandons the wait when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// `Some(player)` once notified; `None` if cancelled or the notifier was dropped.
    pub async fn wait(self) -> Option<P> {
        let cancel = self.cancel;
        let player = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.rx => result.ok(),
        };
        // Cancellation may land between delivery and resumption.
        let player = player.filter(|_| !cancel.is_cancelled());
        if player.is_none() {
            debug!("Player readiness abandoned");
        }
        player
    }
}

/// Create a linked notifier/waiter pair.
pub fn player_readiness<P>() -> (ReadyNotifier<P>, PendingPlayer<P>) {
    let (tx, rx) = oneshot::channel();
    let cancel = CancellationToken::new();
    (
        ReadyNotifier {
            tx,
            cancel: cancel.clone(),
        },
        PendingPlayer { rx, cancel },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready_player_is_delivered() {
        let (notifier, pending) = player_readiness::<u32>();
        let waiter = tokio::spawn(pending.wait());
        notifier.notify(7).unwrap();
        assert_eq!(waiter.await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn test_cancel_before_ready() {
        let (notifier, pending) = player_readiness::<u32>();
        let token = pending.cancel_token();
        let waiter = tokio::spawn(pending.wait());
        token.cancel();
        assert_eq!(waiter.await.unwrap(), None);
        assert!(notifier.is_cancelled());
        assert_eq!(notifier.notify(3), Err(3));
    }

    #[tokio::test]
    async fn test_cancel_after_delivery_discards_player() {
        let (notifier, pending) = player_readiness::<u32>();
        notifier.notify(9).unwrap();
        pending.cancel();
        assert_eq!(pending.wait().await, None);
    }

    #[tokio::test]
    async fn test_dropped_notifier_resolves_none() {
        let (notifier, pending) = player_readiness::<u32>();
        drop(notifier);
        assert_eq!(pending.wait().await, None);
    }
}
