use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CollectorsConfig {
    #[serde(default)]
    pub udp: UdpCollectorConfig,

    #[serde(default)]
    pub tcp: TcpCollectorConfig,
}

impl CollectorsConfig {
    pub fn any_enabled(&self) -> bool {
        self.udp.enable || self.tcp.enable
    }
}

/// Receives one raw DNS message per datagram.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UdpCollectorConfig {
    #[serde(default = "default_true")]
    pub enable: bool,

    #[serde(default = "default_listen_ip")]
    pub listen_ip: String,

    #[serde(default = "default_udp_port")]
    pub listen_port: u16,

    #[serde(default = "default_recv_buffer")]
    pub recv_buffer_size: usize,
}

impl Default for UdpCollectorConfig {
    fn default() -> Self {
        Self {
            enable: true,
            listen_ip: default_listen_ip(),
            listen_port: default_udp_port(),
            recv_buffer_size: default_recv_buffer(),
        }
    }
}

/// Receives DNS messages framed with a 2-byte length prefix.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TcpCollectorConfig {
    #[serde(default)]
    pub enable: bool,

    #[serde(default = "default_listen_ip")]
    pub listen_ip: String,

    #[serde(default = "default_tcp_port")]
    pub listen_port: u16,
}

impl Default for TcpCollectorConfig {
    fn default() -> Self {
        Self {
            enable: false,
            listen_ip: default_listen_ip(),
            listen_port: default_tcp_port(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_listen_ip() -> String {
    "0.0.0.0".to_string()
}

fn default_udp_port() -> u16 {
    6000
}

fn default_tcp_port() -> u16 {
    6001
}

fn default_recv_buffer() -> usize {
    65_535
}
