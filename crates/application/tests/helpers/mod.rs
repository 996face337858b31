mod messages;
mod mock_sinks;

pub use messages::*;
pub use mock_sinks::*;
