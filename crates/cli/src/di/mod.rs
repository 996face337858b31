use ferrous_collector_application::ports::MessageSink;
use ferrous_collector_application::services::{
    FilteringProcessor, OutputDispatcher, PipelineStats, SinkWorker,
};
use ferrous_collector_application::use_cases::ProcessDnsPayloadUseCase;
use ferrous_collector_domain::config::LoggersConfig;
use ferrous_collector_domain::Config;
use ferrous_collector_infrastructure::loggers::{InfluxDbSink, LogFileSink, StdoutSink};
use std::sync::Arc;
use tracing::info;

pub struct Pipeline {
    pub use_case: Arc<ProcessDnsPayloadUseCase>,
    pub dispatcher: Arc<OutputDispatcher>,
    pub stats: Arc<PipelineStats>,
}

impl Pipeline {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let sinks = build_sinks(&config.loggers).await?;
        let capacity = config.queue.channel_buffer_size;

        let workers: Vec<SinkWorker> = sinks
            .into_iter()
            .map(|sink| SinkWorker::spawn(sink, capacity))
            .collect();
        info!(sinks = workers.len(), capacity, "Delivery workers started");

        let dispatcher = Arc::new(OutputDispatcher::new(workers));
        let stats = Arc::new(PipelineStats::new());
        let filter = Arc::new(FilteringProcessor::new(&config.subprocessors.filtering));

        let use_case = Arc::new(ProcessDnsPayloadUseCase::new(
            filter,
            Arc::clone(&dispatcher),
            Arc::clone(&stats),
        ));

        Ok(Self {
            use_case,
            dispatcher,
            stats,
        })
    }
}

async fn build_sinks(loggers: &LoggersConfig) -> anyhow::Result<Vec<Box<dyn MessageSink>>> {
    let mut sinks: Vec<Box<dyn MessageSink>> = Vec::new();

    if loggers.stdout.enable {
        sinks.push(Box::new(StdoutSink::new(&loggers.stdout)));
    }

    if loggers.logfile.enable {
        sinks.push(Box::new(LogFileSink::open(&loggers.logfile).await?));
    }

    if loggers.influxdb.enable {
        let sink = InfluxDbSink::new(&loggers.influxdb)?;
        info!(endpoint = %sink.write_endpoint(), "InfluxDB logger enabled");
        sinks.push(Box::new(sink));
    }

    Ok(sinks)
}
