use async_trait::async_trait;
use huddle_core::{PeerId, ServerSignal};

/// Delivery side of the relay: whatever owns the per-peer channels
/// implements this so the relay actor can push signals out. Delivery
/// is best-effort; a missing or dead channel is not an error.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn send(&self, peer_id: PeerId, signal: ServerSignal);
}
