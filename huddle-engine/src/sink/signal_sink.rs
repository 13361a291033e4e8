use async_trait::async_trait;
use huddle_core::ClientSignal;

/// Outbound half of the signaling channel, toward the coordinator.
/// Fire-and-forget: no acknowledgment is expected and delivery relies
/// on the channel's own guarantees.
#[async_trait]
pub trait SignalSink: Send + Sync {
    async fn send(&self, signal: ClientSignal);
}
