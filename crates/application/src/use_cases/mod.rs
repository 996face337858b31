pub mod process_dns_payload;

pub use process_dns_payload::{ProcessDnsPayloadUseCase, ProcessOutcome};
