//! Refresh requests: asking the host to re-poll a provider.

use glance_core::ProviderId;
use tokio::sync::mpsc;
use tracing::debug;

/// Fire-and-forget request to re-poll all active instances of a provider.
pub trait RefreshRequester: Send + Sync {
    /// Ask the host to refresh every instance of `provider` now.
    fn request_refresh_all(&self, provider: ProviderId);
}

/// Forwards refresh requests to a host loop over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelRefreshRequester {
    tx: mpsc::UnboundedSender<ProviderId>,
}

impl ChannelRefreshRequester {
    /// Create a requester and the receiver the host drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProviderId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl RefreshRequester for ChannelRefreshRequester {
    fn request_refresh_all(&self, provider: ProviderId) {
        if self.tx.send(provider).is_err() {
            debug!(%provider, "refresh dropped, host not listening");
        } else {
            debug!(%provider, "refresh requested");
        }
    }
}

/// Ignores refresh requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRefreshRequester;

impl RefreshRequester for NoopRefreshRequester {
    fn request_refresh_all(&self, _provider: ProviderId) {}
}
