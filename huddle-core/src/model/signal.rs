use crate::model::{CandidateInit, PeerId, RoomId, SessionDescription};
use serde::{Deserialize, Serialize};

/// Messages a client sends to the coordinator. The sender's channel
/// identifier is implicit: the coordinator knows which channel each
/// message arrived on, so payloads never carry it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ClientSignal {
    Join { room: RoomId },
    Offer { description: SessionDescription },
    Answer { description: SessionDescription },
    Candidate { candidate: CandidateInit },
    Chat { text: String },
}

/// Messages the coordinator fans out to clients. Negotiation payloads
/// carry the sender's channel identifier so recipients can key their
/// per-peer state; chat does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ServerSignal {
    NewPeer {
        peer_id: PeerId,
    },
    Offer {
        description: SessionDescription,
        sender: PeerId,
    },
    Answer {
        description: SessionDescription,
        sender: PeerId,
    },
    Candidate {
        candidate: CandidateInit,
        sender: PeerId,
    },
    Chat {
        text: String,
    },
}
