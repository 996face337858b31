mod channel_sink;
mod influx_server_mock;
mod messages;

pub use channel_sink::*;
pub use influx_server_mock::*;
pub use messages::*;
