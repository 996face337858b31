use bytes::Bytes;
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::dns_record::{rcode_name, record_type_name};
use crate::wire::{DecodedMessage, DnsAnswer, DnsHeader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageKind {
    Query,
    Reply,
}

impl MessageKind {
    pub fn from_qr(qr: bool) -> Self {
        if qr {
            MessageKind::Reply
        } else {
            MessageKind::Query
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Query => "QUERY",
            MessageKind::Reply => "REPLY",
        }
    }

    /// dnstap-style operation used when the collector does not supply one.
    pub fn default_operation(&self) -> &'static str {
        match self {
            MessageKind::Query => "CLIENT_QUERY",
            MessageKind::Reply => "CLIENT_RESPONSE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Transport {
    #[serde(rename = "UDP")]
    Udp,
    #[serde(rename = "TCP")]
    Tcp,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Udp => "UDP",
            Transport::Tcp => "TCP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IpFamily {
    #[serde(rename = "INET")]
    Inet,
    #[serde(rename = "INET6")]
    Inet6,
}

impl IpFamily {
    pub fn of(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => IpFamily::Inet,
            IpAddr::V6(_) => IpFamily::Inet6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IpFamily::Inet => "INET",
            IpFamily::Inet6 => "INET6",
        }
    }
}

/// Transport-level identity of a captured message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    pub family: IpFamily,
    pub protocol: Transport,
    pub query_ip: IpAddr,
    pub query_port: u16,
    pub response_ip: IpAddr,
    pub response_port: u16,
}

impl NetworkInfo {
    pub fn new(protocol: Transport, query: SocketAddr, response: SocketAddr) -> Self {
        Self {
            family: IpFamily::of(&query.ip()),
            protocol,
            query_ip: query.ip(),
            query_port: query.port(),
            response_ip: response.ip(),
            response_port: response.port(),
        }
    }
}

/// Capture metadata attached by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureInfo {
    pub identity: Arc<str>,
    pub operation: String,
    pub time_sec: u64,
    pub time_nsec: u32,
}

/// One undecoded DNS message as handed over by a collector.
#[derive(Debug, Clone)]
pub struct RawDnsFrame {
    pub payload: Bytes,
    pub network: NetworkInfo,
    pub identity: Arc<str>,
    /// Set by collectors that know the dnstap operation; derived from QR otherwise.
    pub operation: Option<String>,
    pub time_sec: u64,
    pub time_nsec: u32,
}

impl RawDnsFrame {
    /// Frame stamped with the current wall-clock time.
    pub fn received_now(payload: Bytes, network: NetworkInfo, identity: Arc<str>) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            payload,
            network,
            identity,
            operation: None,
            time_sec: now.as_secs(),
            time_nsec: now.subsec_nanos(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DnsFlags {
    pub qr: bool,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub ad: bool,
    pub cd: bool,
}

impl From<&DnsHeader> for DnsFlags {
    fn from(header: &DnsHeader) -> Self {
        Self {
            qr: header.qr,
            aa: header.aa,
            tc: header.tc,
            rd: header.rd,
            ra: header.ra,
            ad: header.ad,
            cd: header.cd,
        }
    }
}

/// DNS-level fields of a decoded message, with codes rendered symbolically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsInfo {
    pub id: u16,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub opcode: u8,
    pub rcode: &'static str,
    pub qname: String,
    pub qtype: &'static str,
    pub qclass: u16,
    pub length: usize,
    pub flags: DnsFlags,
    #[serde(rename = "resource-records")]
    pub answers: Vec<DnsAnswer>,
}

/// Unit handed to the filtering stage and the output sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsMessage {
    #[serde(rename = "dnstap")]
    pub capture: CaptureInfo,
    pub network: NetworkInfo,
    pub dns: DnsInfo,
}

impl DnsMessage {
    /// Combines a successful decode with the frame's capture metadata.
    pub fn from_decoded(frame: &RawDnsFrame, decoded: DecodedMessage) -> Self {
        let header = decoded.header;
        let kind = MessageKind::from_qr(header.qr);
        let (qname, qtype, qclass) = match decoded.question {
            Some(q) => (q.name, record_type_name(q.qtype), q.qclass),
            None => (String::new(), "-", 0),
        };

        let operation = frame
            .operation
            .clone()
            .unwrap_or_else(|| kind.default_operation().to_string());

        Self {
            capture: CaptureInfo {
                identity: Arc::clone(&frame.identity),
                operation,
                time_sec: frame.time_sec,
                time_nsec: frame.time_nsec,
            },
            network: frame.network.clone(),
            dns: DnsInfo {
                id: header.id,
                kind,
                opcode: header.opcode,
                rcode: rcode_name(header.rcode as u16),
                qname,
                qtype,
                qclass,
                length: frame.payload.len(),
                flags: DnsFlags::from(&header),
                answers: decoded.answers,
            },
        }
    }

    pub fn kind(&self) -> MessageKind {
        self.dns.kind
    }
}
