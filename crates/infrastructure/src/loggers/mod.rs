pub mod format;
pub mod influxdb;
pub mod logfile;
pub mod stdout;

pub use influxdb::InfluxDbSink;
pub use logfile::LogFileSink;
pub use stdout::StdoutSink;
