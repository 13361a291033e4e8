
pub use mock_signaling::*;
