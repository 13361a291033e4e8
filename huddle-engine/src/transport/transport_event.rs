use huddle_core::{CandidateInit, PeerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
    Unknown,
}

/// Inbound media surfaced by a transport, as handed to the rendering
/// layer. The session deduplicates per peer before forwarding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTrack {
    pub id: String,
    pub stream_id: String,
    pub kind: MediaKind,
}

/// Events the per-peer transports push into the session loop.
#[derive(Debug)]
pub enum TransportEvent {
    /// A local network-path candidate was generated; relay it now.
    LocalCandidate(PeerId, CandidateInit),

    /// The connection surfaced an inbound media track.
    TrackAdded(PeerId, RemoteTrack),

    /// The connection with this peer is gone.
    Disconnected(PeerId),
}
