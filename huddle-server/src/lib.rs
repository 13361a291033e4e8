mod relay;
mod signaling;

pub use relay::*;
pub use signaling::*;
