pub mod tcp;
pub mod udp;

pub use tcp::TcpCollector;
pub use udp::UdpCollector;
