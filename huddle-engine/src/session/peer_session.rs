use crate::transport::PeerTransport;
use huddle_core::CandidateInit;
use std::collections::VecDeque;

/// Cap on candidates buffered while the remote description is still
/// missing. A stalled negotiation otherwise grows this queue for the
/// whole session lifetime.
pub const MAX_PENDING_CANDIDATES: usize = 256;

/// Per-remote-peer negotiation state: the connection handle plus the
/// queue of candidates that arrived before the remote description.
/// The queue is drained FIFO exactly once, when that description is
/// applied; it is never shared between peers.
pub(crate) struct PeerSession {
    pub transport: Box<dyn PeerTransport>,
    pub pending_candidates: VecDeque<CandidateInit>,
}

impl PeerSession {
    pub fn new(transport: Box<dyn PeerTransport>) -> Self {
        Self {
            transport,
            pending_candidates: VecDeque::new(),
        }
    }

    /// Returns false when the queue is full and the candidate dropped.
    pub fn enqueue_candidate(&mut self, candidate: CandidateInit) -> bool {
        if self.pending_candidates.len() >= MAX_PENDING_CANDIDATES {
            return false;
        }
        self.pending_candidates.push_back(candidate);
        true
    }
}
