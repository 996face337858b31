use ferrous_collector_application::use_cases::ProcessDnsPayloadUseCase;
use ferrous_collector_domain::Config;
use ferrous_collector_infrastructure::collectors::{TcpCollector, UdpCollector};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Running collector tasks sharing one cancellation token.
pub struct Collectors {
    shutdown: CancellationToken,
    tasks: JoinSet<()>,
}

impl Collectors {
    /// Binds every enabled collector, then starts them.
    pub async fn start(
        config: &Config,
        use_case: Arc<ProcessDnsPayloadUseCase>,
    ) -> anyhow::Result<Self> {
        let shutdown = CancellationToken::new();
        let identity: Arc<str> = Arc::from(config.global.identity.as_str());

        let udp = if config.collectors.udp.enable {
            let collector =
                UdpCollector::bind(&config.collectors.udp, Arc::clone(&identity), Arc::clone(&use_case))
                    .await?
                    .with_cancellation(shutdown.clone());
            Some(collector)
        } else {
            None
        };

        let tcp = if config.collectors.tcp.enable {
            let collector =
                TcpCollector::bind(&config.collectors.tcp, Arc::clone(&identity), Arc::clone(&use_case))
                    .await?
                    .with_cancellation(shutdown.clone());
            Some(collector)
        } else {
            None
        };

        let mut tasks = JoinSet::new();
        if let Some(collector) = udp {
            info!(listen = %collector.local_addr(), "Starting UDP collector");
            tasks.spawn(collector.run());
        }
        if let Some(collector) = tcp {
            info!(listen = %collector.local_addr(), "Starting TCP collector");
            tasks.spawn(collector.run());
        }

        Ok(Self { shutdown, tasks })
    }

    /// Cancels every collector and waits until all of them returned.
    pub async fn stop(mut self) {
        self.shutdown.cancel();
        while let Some(result) = self.tasks.join_next().await {
            if let Err(e) = result {
                warn!(error = %e, "Collector task terminated abnormally");
            }
        }
        info!("Collectors stopped");
    }
}
