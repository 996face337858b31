#![allow(dead_code)]
use ferrous_collector_domain::{decode_message, DnsMessage, NetworkInfo, RawDnsFrame, Transport};
use std::net::SocketAddr;
use std::sync::Arc;

pub const IDENTITY: &str = "infra-tests";
pub const CAPTURE_SECS: u64 = 1_700_000_000;
pub const CAPTURE_NSECS: u32 = 42;

fn encode_name(out: &mut Vec<u8>, name: &str) {
    for label in name.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
}

/// Query for `qname` A IN, or the matching reply with one A answer.
pub fn dns_payload(qname: &str, reply: bool) -> Vec<u8> {
    let flags: u16 = if reply { 0x8180 } else { 0x0100 };
    let mut buf = Vec::with_capacity(64);
    buf.extend_from_slice(&0x5151u16.to_be_bytes());
    buf.extend_from_slice(&flags.to_be_bytes());
    buf.extend_from_slice(&[0x00, 0x01]);
    buf.extend_from_slice(&(reply as u16).to_be_bytes());
    buf.extend_from_slice(&[0, 0, 0, 0]);
    encode_name(&mut buf, qname);
    buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    if reply {
        buf.extend_from_slice(&[0xc0, 0x0c, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x3c]);
        buf.extend_from_slice(&[0x00, 0x04, 203, 0, 113, 7]);
    }
    buf
}

pub fn message_with(payload: Vec<u8>, identity: &str) -> DnsMessage {
    let query: SocketAddr = "192.0.2.10:40000".parse().unwrap();
    let response: SocketAddr = "198.51.100.53:53".parse().unwrap();
    let frame = RawDnsFrame {
        payload: payload.into(),
        network: NetworkInfo::new(Transport::Udp, query, response),
        identity: Arc::from(identity),
        operation: None,
        time_sec: CAPTURE_SECS,
        time_nsec: CAPTURE_NSECS,
    };
    let decoded = decode_message(&frame.payload).unwrap();
    DnsMessage::from_decoded(&frame, decoded)
}

pub fn reply(qname: &str) -> DnsMessage {
    message_with(dns_payload(qname, true), IDENTITY)
}

pub fn query(qname: &str) -> DnsMessage {
    message_with(dns_payload(qname, false), IDENTITY)
}
