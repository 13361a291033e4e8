mod relay;
mod relay_command;

pub use relay::*;
pub use relay_command::*;
