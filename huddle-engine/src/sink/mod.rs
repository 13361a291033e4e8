mod media_sink;
mod signal_sink;

pub use media_sink::*;
pub use signal_sink::*;
