mod peer_session;
mod session_context;

pub use peer_session::MAX_PENDING_CANDIDATES;
pub use session_context::*;

pub(crate) use peer_session::PeerSession;
