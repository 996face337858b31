use async_trait::async_trait;
use ferrous_collector_application::ports::MessageSink;
use ferrous_collector_domain::config::InfluxDbConfig;
use ferrous_collector_domain::{DnsMessage, DomainError};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use std::fmt::Write;
use std::time::Duration;
use tracing::{debug, warn};

const SINK_NAME: &str = "influxdb";
const MEASUREMENT: &str = "dns";
const LINE_PROTOCOL_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Batches messages as InfluxDB line protocol and writes them through the
/// v2 HTTP API.
pub struct InfluxDbSink {
    client: reqwest::Client,
    write_url: Url,
    authorization: String,
    batch: String,
    pending: usize,
    batch_size: usize,
    flush_interval: Option<Duration>,
}

impl InfluxDbSink {
    pub fn new(config: &InfluxDbConfig) -> Result<Self, DomainError> {
        let write_url = write_url(config)?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("ferrous-collector/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout.max(1)))
            .https_only(config.tls_support)
            .danger_accept_invalid_certs(config.tls_insecure)
            .build()
            .map_err(|e| DomainError::ConfigError(format!("InfluxDB client: {}", e)))?;

        Ok(Self {
            client,
            write_url,
            authorization: format!("Token {}", config.auth_token),
            batch: String::new(),
            pending: 0,
            batch_size: config.batch_size.max(1),
            flush_interval: (config.flush_interval > 0)
                .then(|| Duration::from_secs(config.flush_interval)),
        })
    }

    pub fn write_endpoint(&self) -> &Url {
        &self.write_url
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    async fn send_batch(&mut self) -> Result<(), DomainError> {
        if self.pending == 0 {
            return Ok(());
        }

        let points = std::mem::take(&mut self.pending);
        let body = std::mem::take(&mut self.batch);

        let response = self
            .client
            .post(self.write_url.clone())
            .header(AUTHORIZATION, &self.authorization)
            .header(CONTENT_TYPE, LINE_PROTOCOL_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| DomainError::SinkWrite {
                sink: SINK_NAME.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), points, "InfluxDB rejected batch, points dropped");
            return Err(DomainError::SinkRejected {
                sink: SINK_NAME.to_string(),
                status: status.as_u16(),
            });
        }

        debug!(points, "InfluxDB batch written");
        Ok(())
    }
}

#[async_trait]
impl MessageSink for InfluxDbSink {
    fn name(&self) -> &str {
        SINK_NAME
    }

    async fn write(&mut self, message: &DnsMessage) -> Result<(), DomainError> {
        push_point(&mut self.batch, message);
        self.batch.push('\n');
        self.pending += 1;

        if self.pending >= self.batch_size {
            self.send_batch().await?;
        }
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), DomainError> {
        self.send_batch().await
    }

    async fn close(&mut self) -> Result<(), DomainError> {
        self.send_batch().await
    }

    fn flush_interval(&self) -> Option<Duration> {
        self.flush_interval
    }
}

fn write_url(config: &InfluxDbConfig) -> Result<Url, DomainError> {
    let endpoint = format!("{}/api/v2/write", config.server_url.trim_end_matches('/'));
    Url::parse_with_params(
        &endpoint,
        &[
            ("org", config.organization.as_str()),
            ("bucket", config.bucket.as_str()),
            ("precision", "ns"),
        ],
    )
    .map_err(|e| DomainError::ConfigError(format!("Invalid InfluxDB server_url {}: {}", endpoint, e)))
}

/// One point in line protocol, without the trailing newline.
///
/// Tags: identity, query_ip, qname (omitted when empty). Fields: operation,
/// family, protocol, qtype, rcode. Timestamp in nanoseconds.
pub fn line_protocol(message: &DnsMessage) -> String {
    let mut line = String::with_capacity(160);
    push_point(&mut line, message);
    line
}

fn push_point(out: &mut String, message: &DnsMessage) {
    out.push_str(MEASUREMENT);

    push_tag(out, "identity", &message.capture.identity);
    push_tag(out, "query_ip", &message.network.query_ip.to_string());
    push_tag(out, "qname", &message.dns.qname);

    out.push(' ');
    push_field(out, "operation", &message.capture.operation, true);
    push_field(out, "family", message.network.family.as_str(), false);
    push_field(out, "protocol", message.network.protocol.as_str(), false);
    push_field(out, "qtype", message.dns.qtype, false);
    push_field(out, "rcode", message.dns.rcode, false);

    let timestamp =
        u128::from(message.capture.time_sec) * 1_000_000_000 + u128::from(message.capture.time_nsec);
    let _ = write!(out, " {}", timestamp);
}

fn push_tag(out: &mut String, key: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    out.push(',');
    out.push_str(key);
    out.push('=');
    for c in value.chars() {
        if matches!(c, ',' | '=' | ' ' | '\\') {
            out.push('\\');
        }
        push_escaped_char(out, c);
    }
}

fn push_field(out: &mut String, key: &str, value: &str, first: bool) {
    if !first {
        out.push(',');
    }
    out.push_str(key);
    out.push_str("=\"");
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        push_escaped_char(out, c);
    }
    out.push('"');
}

/// Control characters are written as escapes so a point stays on one line.
fn push_escaped_char(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c.is_control() => out.push('?'),
        c => out.push(c),
    }
}
