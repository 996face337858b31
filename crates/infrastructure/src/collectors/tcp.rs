use bytes::Bytes;
use ferrous_collector_application::use_cases::ProcessDnsPayloadUseCase;
use ferrous_collector_domain::config::TcpCollectorConfig;
use ferrous_collector_domain::{DomainError, NetworkInfo, RawDnsFrame, Transport};
use futures::StreamExt;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;
use tokio_util::codec::{FramedRead, LengthDelimitedCodec};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const MAX_DNS_TCP_MESSAGE: usize = 65535;

/// Two-byte big-endian length prefix before every message (RFC 1035 §4.2.2).
pub fn dns_stream_codec() -> LengthDelimitedCodec {
    LengthDelimitedCodec::builder()
        .length_field_length(2)
        .max_frame_length(MAX_DNS_TCP_MESSAGE)
        .new_codec()
}

/// Accepts stream connections carrying length-prefixed DNS messages.
pub struct TcpCollector {
    listener: TcpListener,
    local_addr: SocketAddr,
    identity: Arc<str>,
    use_case: Arc<ProcessDnsPayloadUseCase>,
    shutdown: CancellationToken,
}

impl TcpCollector {
    pub async fn bind(
        config: &TcpCollectorConfig,
        identity: Arc<str>,
        use_case: Arc<ProcessDnsPayloadUseCase>,
    ) -> Result<Self, DomainError> {
        let bind_addr = format!("{}:{}", config.listen_ip, config.listen_port);
        let listener = TcpListener::bind(&bind_addr).await.map_err(|e| {
            DomainError::IoError(format!("Failed to bind TCP collector on {}: {}", bind_addr, e))
        })?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            listener,
            local_addr,
            identity,
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

    /// Runs until the cancellation token fires, then waits for every open
    /// connection to stop.
    pub async fn run(self) {
        info!(listen = %self.local_addr, "TCP collector listening");

        let mut connections: JoinSet<()> = JoinSet::new();

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!(open = connections.len(), "TcpCollector: shutting down");
                    break;
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            let connection = Connection {
                                peer,
                                local_addr: self.local_addr,
                                identity: Arc::clone(&self.identity),
                                use_case: Arc::clone(&self.use_case),
                                shutdown: self.shutdown.clone(),
                            };
                            connections.spawn(connection.serve(stream));
                        }
                        Err(e) => {
                            warn!(error = %e, "TCP collector accept error");
                        }
                    }
                }
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
            }
        }

        while connections.join_next().await.is_some() {}
    }
}

struct Connection {
    peer: SocketAddr,
    local_addr: SocketAddr,
    identity: Arc<str>,
    use_case: Arc<ProcessDnsPayloadUseCase>,
    shutdown: CancellationToken,
}

impl Connection {
    async fn serve(self, stream: TcpStream) {
        debug!(peer = %self.peer, "TCP collector connection opened");

        let mut frames = FramedRead::new(stream, dns_stream_codec());
        let network = NetworkInfo::new(Transport::Tcp, self.peer, self.local_addr);
        let mut messages = 0u64;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                next = frames.next() => {
                    match next {
                        Some(Ok(frame)) => {
                            messages += 1;
                            let frame = RawDnsFrame::received_now(
                                Bytes::from(frame),
                                network.clone(),
                                Arc::clone(&self.identity),
                            );
                            self.use_case.execute(frame).await;
                        }
                        Some(Err(e)) => {
                            warn!(peer = %self.peer, error = %e, "TCP collector framing error, closing connection");
                            break;
                        }
                        None => break,
                    }
                }
            }
        }

        debug!(peer = %self.peer, messages, "TCP collector connection closed");
    }
}
