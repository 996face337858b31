//! Ferrous Collector Domain Layer
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod errors;
pub mod wire;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_message::{
    CaptureInfo, DnsFlags, DnsInfo, DnsMessage, IpFamily, MessageKind, NetworkInfo, RawDnsFrame,
    Transport,
};
pub use dns_record::{rcode_name, record_type_name, RecordType};
pub use errors::DomainError;
pub use wire::{
    decode_answers, decode_header, decode_message, decode_question, parse_labels, DecodeError,
    DecodedMessage, DnsAnswer, DnsHeader, DnsQuestion,
};
