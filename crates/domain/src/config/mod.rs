pub mod collectors;
pub mod errors;
pub mod loggers;
pub mod logging;
pub mod root;
pub mod subprocessors;

pub use collectors::{CollectorsConfig, TcpCollectorConfig, UdpCollectorConfig};
pub use errors::ConfigError;
pub use loggers::{InfluxDbConfig, LogFileConfig, LoggersConfig, OutputMode, StdoutConfig};
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config, GlobalConfig, QueueConfig};
pub use subprocessors::{FilteringConfig, SubprocessorsConfig};
