#![allow(dead_code)]
use ferrous_collector_domain::{NetworkInfo, RawDnsFrame, Transport};
use std::net::SocketAddr;
use std::sync::Arc;

pub const TYPE_A: u16 = 1;
pub const TYPE_NS: u16 = 2;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_SOA: u16 = 6;
pub const TYPE_PTR: u16 = 12;
pub const TYPE_MX: u16 = 15;
pub const TYPE_TXT: u16 = 16;
pub const TYPE_AAAA: u16 = 28;
pub const TYPE_SRV: u16 = 33;
pub const TYPE_OPT: u16 = 41;
pub const CLASS_IN: u16 = 1;

/// Wire encoding of a dotted name, uncompressed.
pub fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

/// Two-byte compression pointer to `offset`.
pub fn pointer(offset: u16) -> [u8; 2] {
    (0xC000 | offset).to_be_bytes()
}

/// Builds DNS messages byte by byte; section counts follow the
/// questions and records appended.
pub struct PacketBuilder {
    buf: Vec<u8>,
}

impl PacketBuilder {
    pub fn new(id: u16, flags: u16) -> Self {
        let mut buf = Vec::with_capacity(512);
        buf.extend_from_slice(&id.to_be_bytes());
        buf.extend_from_slice(&flags.to_be_bytes());
        buf.extend_from_slice(&[0u8; 8]);
        Self { buf }
    }

    pub fn query() -> Self {
        Self::new(0x1234, 0x0100)
    }

    pub fn response() -> Self {
        Self::new(0x1234, 0x8180)
    }

    fn bump(&mut self, at: usize) {
        let count = u16::from_be_bytes([self.buf[at], self.buf[at + 1]]) + 1;
        self.buf[at..at + 2].copy_from_slice(&count.to_be_bytes());
    }

    pub fn question(mut self, name: &str, qtype: u16, qclass: u16) -> Self {
        self.buf.extend_from_slice(&encode_name(name));
        self.buf.extend_from_slice(&qtype.to_be_bytes());
        self.buf.extend_from_slice(&qclass.to_be_bytes());
        self.bump(4);
        self
    }

    /// Appends an answer whose owner name is given in raw wire form.
    pub fn record_raw_name(
        mut self,
        name: &[u8],
        rtype: u16,
        class: u16,
        ttl: u32,
        rdata: &[u8],
    ) -> Self {
        self.buf.extend_from_slice(name);
        self.buf.extend_from_slice(&rtype.to_be_bytes());
        self.buf.extend_from_slice(&class.to_be_bytes());
        self.buf.extend_from_slice(&ttl.to_be_bytes());
        self.buf.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        self.buf.extend_from_slice(rdata);
        self.bump(6);
        self
    }

    pub fn record(self, name: &str, rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        let name = encode_name(name);
        self.record_raw_name(&name, rtype, CLASS_IN, ttl, rdata)
    }

    /// Appends bytes without touching the counts.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn set_ancount(mut self, count: u16) -> Self {
        self.buf[6..8].copy_from_slice(&count.to_be_bytes());
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

/// Header (12 zero bytes) followed by `body`, for label-level tests.
pub fn with_header(body: &[u8]) -> Vec<u8> {
    let mut buf = vec![0u8; 12];
    buf.extend_from_slice(body);
    buf
}

/// Query for `example.com` A IN answered with `93.184.216.34`, TTL 3600.
pub fn example_com_response() -> Vec<u8> {
    vec![
        0xab, 0xcd, 0x81, 0x80, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, //
        0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00, //
        0x00, 0x01, 0x00, 0x01, //
        0xc0, 0x0c, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x0e, 0x10, 0x00, 0x04, //
        93, 184, 216, 34,
    ]
}

pub fn frame(payload: Vec<u8>) -> RawDnsFrame {
    let query: SocketAddr = "192.0.2.10:53000".parse().unwrap();
    let response: SocketAddr = "198.51.100.53:53".parse().unwrap();
    RawDnsFrame {
        payload: payload.into(),
        network: NetworkInfo::new(Transport::Udp, query, response),
        identity: Arc::from("test-collector"),
        operation: None,
        time_sec: 1_700_000_000,
        time_nsec: 42,
    }
}
