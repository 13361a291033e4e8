use thiserror::Error;

/// Failures surfaced by the underlying connection primitive. None of
/// these crash a session; negotiation for the affected peer stalls
/// until a fresh inbound offer restarts it.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid session description: {0}")]
    InvalidDescription(String),

    #[error("candidate rejected: {0}")]
    CandidateRejected(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
