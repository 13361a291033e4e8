mod error;
mod session;
mod sink;
mod transport;

pub use error::*;
pub use session::*;
pub use sink::*;
pub use transport::*;
