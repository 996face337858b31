use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LoggersConfig {
    #[serde(default)]
    pub stdout: StdoutConfig,

    #[serde(default)]
    pub logfile: LogFileConfig,

    #[serde(default)]
    pub influxdb: InfluxDbConfig,
}

impl LoggersConfig {
    pub fn any_enabled(&self) -> bool {
        self.stdout.enable || self.logfile.enable || self.influxdb.enable
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StdoutConfig {
    #[serde(default = "default_true")]
    pub enable: bool,

    #[serde(default)]
    pub mode: OutputMode,
}

impl Default for StdoutConfig {
    fn default() -> Self {
        Self {
            enable: true,
            mode: OutputMode::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogFileConfig {
    #[serde(default)]
    pub enable: bool,

    #[serde(default = "default_log_file_path")]
    pub file_path: String,

    #[serde(default)]
    pub mode: OutputMode,

    /// Buffered bytes are written out at least this often.
    #[serde(default = "default_flush_interval")]
    pub flush_interval: u64,
}

impl Default for LogFileConfig {
    fn default() -> Self {
        Self {
            enable: false,
            file_path: default_log_file_path(),
            mode: OutputMode::default(),
            flush_interval: default_flush_interval(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InfluxDbConfig {
    #[serde(default)]
    pub enable: bool,

    #[serde(default = "default_influx_url")]
    pub server_url: String,

    #[serde(default)]
    pub auth_token: String,

    #[serde(default)]
    pub tls_support: bool,

    #[serde(default)]
    pub tls_insecure: bool,

    #[serde(default = "default_bucket")]
    pub bucket: String,

    #[serde(default = "default_organization")]
    pub organization: String,

    /// Points buffered before a write request is sent.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_flush_interval")]
    pub flush_interval: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Default for InfluxDbConfig {
    fn default() -> Self {
        Self {
            enable: false,
            server_url: default_influx_url(),
            auth_token: String::new(),
            tls_support: false,
            tls_insecure: false,
            bucket: default_bucket(),
            organization: default_organization(),
            batch_size: default_batch_size(),
            flush_interval: default_flush_interval(),
            request_timeout: default_request_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_file_path() -> String {
    "/var/log/ferrous-collector/dns.log".to_string()
}

fn default_influx_url() -> String {
    "http://localhost:8086".to_string()
}

fn default_bucket() -> String {
    "db_dns".to_string()
}

fn default_organization() -> String {
    "dnscollector".to_string()
}

fn default_batch_size() -> usize {
    5_000
}

fn default_flush_interval() -> u64 {
    1
}

fn default_request_timeout() -> u64 {
    5
}
