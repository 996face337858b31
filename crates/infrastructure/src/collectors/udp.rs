use bytes::Bytes;
use ferrous_collector_application::use_cases::ProcessDnsPayloadUseCase;
use ferrous_collector_domain::config::UdpCollectorConfig;
use ferrous_collector_domain::{DomainError, NetworkInfo, RawDnsFrame, Transport};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Receives one DNS message per datagram.
///
/// The sender of a datagram is recorded as the query side and the
/// collector's own address as the response side.
pub struct UdpCollector {
    socket: UdpSocket,
    local_addr: SocketAddr,
    identity: Arc<str>,
    recv_buffer_size: usize,
    use_case: Arc<ProcessDnsPayloadUseCase>,
    shutdown: CancellationToken,
}

impl UdpCollector {
    pub async fn bind(
        config: &UdpCollectorConfig,
        identity: Arc<str>,
        use_case: Arc<ProcessDnsPayloadUseCase>,
    ) -> Result<Self, DomainError> {
        let bind_addr = format!("{}:{}", config.listen_ip, config.listen_port);
        let socket = UdpSocket::bind(&bind_addr).await.map_err(|e| {
            DomainError::IoError(format!("Failed to bind UDP collector on {}: {}", bind_addr, e))
        })?;
        let local_addr = socket.local_addr()?;

        Ok(Self {
            socket,
            local_addr,
            identity,
            recv_buffer_size: config.recv_buffer_size.max(512),
            use_case,
            shutdown: CancellationToken::new(),
        })
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Runs until the cancellation token fires.
    pub async fn run(self) {
        info!(listen = %self.local_addr, "UDP collector listening");

        let mut buf = vec![0u8; self.recv_buffer_size];
        let mut received = 0u64;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!(received, "UdpCollector: shutting down");
                    break;
                }
                result = self.socket.recv_from(&mut buf) => {
                    match result {
                        Ok((len, peer)) => {
                            received += 1;
                            let frame = RawDnsFrame::received_now(
                                Bytes::copy_from_slice(&buf[..len]),
                                NetworkInfo::new(Transport::Udp, peer, self.local_addr),
                                Arc::clone(&self.identity),
                            );
                            let outcome = self.use_case.execute(frame).await;
                            debug!(peer = %peer, len, ?outcome, "UDP payload processed");
                        }
                        Err(e) => {
                            warn!(error = %e, "UDP collector receive error");
                        }
                    }
                }
            }
        }
    }
}
