use crate::error::TransportError;
use crate::transport::TransportEvent;
use async_trait::async_trait;
use huddle_core::{CandidateInit, PeerId, SessionDescription};
use tokio::sync::mpsc;

/// Signaling states of the underlying connection that the engine
/// reads to decide whether an inbound description should be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalingState {
    Stable,
    HaveLocalOffer,
    HaveRemoteOffer,
    Closed,
}

/// Narrow view of the platform connection object: enough to drive one
/// negotiation, nothing else. Concrete transports are pluggable
/// adapters behind this trait (see [`WebRtcTransport`] and the test
/// doubles in the test suite).
///
/// [`WebRtcTransport`]: crate::transport::WebRtcTransport
#[async_trait]
pub trait PeerTransport: Send {
    fn signaling_state(&self) -> SignalingState;

    /// The remote description last applied to this connection, if any.
    /// Candidates may only be added once this returns `Some`.
    fn remote_description(&self) -> Option<SessionDescription>;

    /// Register the local media tracks with the connection.
    async fn add_local_tracks(&self) -> Result<(), TransportError>;

    async fn create_offer(&self) -> Result<SessionDescription, TransportError>;

    async fn create_answer(&self) -> Result<SessionDescription, TransportError>;

    async fn set_local_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), TransportError>;

    async fn set_remote_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), TransportError>;

    async fn add_ice_candidate(&self, candidate: CandidateInit) -> Result<(), TransportError>;

    async fn close(&self) -> Result<(), TransportError>;
}

/// Creates the per-peer connection object. The session hands every new
/// transport the shared event sender so candidate, track and
/// disconnect events all feed the one session loop.
#[async_trait]
pub trait TransportFactory: Send {
    async fn create(
        &self,
        peer_id: PeerId,
        event_tx: mpsc::Sender<TransportEvent>,
    ) -> Result<Box<dyn PeerTransport>, TransportError>;
}
