pub mod delivery;
pub mod filtering;
pub mod pipeline_stats;

pub use delivery::{OutputDispatcher, SinkReport, SinkWorker};
pub use filtering::FilteringProcessor;
pub use pipeline_stats::{PipelineStats, PipelineStatsSnapshot};
