use chrono::{DateTime, SecondsFormat};
use ferrous_collector_domain::config::OutputMode;
use ferrous_collector_domain::{DnsMessage, DomainError};
use std::borrow::Cow;
use std::fmt::Write;

const EMPTY_FIELD: &str = "-";

/// Renders one message as a single line, without the trailing newline.
pub fn render(mode: OutputMode, message: &DnsMessage) -> Result<String, DomainError> {
    match mode {
        OutputMode::Text => Ok(text_line(message)),
        OutputMode::Json => json_line(message),
    }
}

/// `<time> <identity> <operation> <query_ip> <protocol> <length>b <qname> <qtype> <rcode>`
pub fn text_line(message: &DnsMessage) -> String {
    let qname = if message.dns.qname.is_empty() {
        Cow::Borrowed(EMPTY_FIELD)
    } else {
        printable(&message.dns.qname)
    };

    let mut line = String::with_capacity(128);
    let _ = write!(
        line,
        "{} {} {} {} {} {}b {} {} {}",
        capture_time(message),
        message.capture.identity,
        message.capture.operation,
        message.network.query_ip,
        message.network.protocol.as_str(),
        message.dns.length,
        qname,
        message.dns.qtype,
        message.dns.rcode,
    );
    line
}

/// Replaces control characters and whitespace with `?` so a qname taken off
/// the wire stays one field of one line.
pub fn printable(name: &str) -> Cow<'_, str> {
    if name.chars().any(is_unprintable) {
        Cow::Owned(
            name.chars()
                .map(|c| if is_unprintable(c) { '?' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(name)
    }
}

fn is_unprintable(c: char) -> bool {
    c.is_control() || c.is_whitespace()
}

pub fn json_line(message: &DnsMessage) -> Result<String, DomainError> {
    serde_json::to_string(message).map_err(|e| DomainError::SinkWrite {
        sink: "json".to_string(),
        reason: e.to_string(),
    })
}

/// Capture timestamp as RFC 3339 UTC with nanoseconds.
pub fn capture_time(message: &DnsMessage) -> String {
    i64::try_from(message.capture.time_sec)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, message.capture.time_nsec))
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Nanos, true))
        .unwrap_or_else(|| EMPTY_FIELD.to_string())
}
