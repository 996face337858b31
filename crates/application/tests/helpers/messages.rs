#![allow(dead_code)]
use ferrous_collector_domain::{decode_message, DnsMessage, NetworkInfo, RawDnsFrame, Transport};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

pub const FLAGS_QUERY: u16 = 0x0100;
pub const FLAGS_REPLY: u16 = 0x8180;

fn encode_name(out: &mut Vec<u8>, name: &str) {
    for label in name.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
}

/// One question for `qname` (A, IN); replies carry one A answer.
pub fn payload(qname: &str, flags: u16) -> Vec<u8> {
    let is_reply = flags & 0x8000 != 0;
    let mut buf = Vec::with_capacity(64);
    buf.extend_from_slice(&0x2a2au16.to_be_bytes());
    buf.extend_from_slice(&flags.to_be_bytes());
    buf.extend_from_slice(&1u16.to_be_bytes());
    buf.extend_from_slice(&(is_reply as u16).to_be_bytes());
    buf.extend_from_slice(&[0, 0, 0, 0]);
    encode_name(&mut buf, qname);
    buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    if is_reply {
        buf.extend_from_slice(&[0xc0, 0x0c, 0x00, 0x01, 0x00, 0x01]);
        buf.extend_from_slice(&300u32.to_be_bytes());
        buf.extend_from_slice(&[0x00, 0x04, 192, 0, 2, 80]);
    }
    buf
}

pub fn query_payload(qname: &str) -> Vec<u8> {
    payload(qname, FLAGS_QUERY)
}

pub fn reply_payload(qname: &str) -> Vec<u8> {
    payload(qname, FLAGS_REPLY)
}

pub fn frame_from(payload: Vec<u8>, query_ip: &str) -> RawDnsFrame {
    let query_ip: IpAddr = query_ip.parse().unwrap();
    let resolver: SocketAddr = "198.51.100.53:53".parse().unwrap();
    RawDnsFrame {
        payload: payload.into(),
        network: NetworkInfo::new(Transport::Udp, SocketAddr::new(query_ip, 40000), resolver),
        identity: Arc::from("app-tests"),
        operation: None,
        time_sec: 1_700_000_000,
        time_nsec: 0,
    }
}

pub fn message_from(payload: Vec<u8>, query_ip: &str) -> DnsMessage {
    let frame = frame_from(payload, query_ip);
    let decoded = decode_message(&frame.payload).unwrap();
    DnsMessage::from_decoded(&frame, decoded)
}

pub fn query(qname: &str) -> DnsMessage {
    message_from(query_payload(qname), "192.0.2.10")
}

pub fn reply(qname: &str) -> DnsMessage {
    message_from(reply_payload(qname), "192.0.2.10")
}
