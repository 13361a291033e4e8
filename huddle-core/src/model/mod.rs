mod candidate;
mod description;
mod peer;
mod room;
mod signal;

pub use candidate::CandidateInit;
pub use description::{SdpType, SessionDescription};
pub use peer::PeerId;
pub use room::RoomId;
pub use signal::{ClientSignal, ServerSignal};
