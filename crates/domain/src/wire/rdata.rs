use std::fmt::Write;
use std::net::Ipv4Addr;

use super::labels::parse_labels;
use super::{read_u16, read_u32, DecodeError};
use crate::dns_record::RecordType;

/// Rendering used for record types without a payload parser.
pub const UNSUPPORTED_RDATA: &str = "-";

const IPV4_LEN: usize = 4;
const IPV6_LEN: usize = 16;
const MX_PREFERENCE_LEN: usize = 2;
const SRV_FIXED_LEN: usize = 6;
const SOA_FIXED_LEN: usize = 20;

/// Renders the rdata of one record as text.
///
/// `rdata_offset..rdata_offset + rdlength` must lie inside `payload`; the
/// answer decoder checks that before calling. Name-bearing types are decoded
/// against the whole payload because compression pointers are absolute.
pub fn parse_rdata(
    record_type: Option<RecordType>,
    rdata_offset: usize,
    rdlength: usize,
    payload: &[u8],
) -> Result<String, DecodeError> {
    let rdata = &payload[rdata_offset..rdata_offset + rdlength];

    match record_type {
        Some(RecordType::A) => parse_a(rdata, rdata_offset),
        Some(RecordType::AAAA) => parse_aaaa(rdata, rdata_offset),
        Some(RecordType::CNAME) | Some(RecordType::NS) | Some(RecordType::PTR) => {
            parse_name(rdata_offset, payload)
        }
        Some(RecordType::MX) => parse_mx(rdata, rdata_offset, payload),
        Some(RecordType::SRV) => parse_srv(rdata, rdata_offset, payload),
        Some(RecordType::TXT) => parse_txt(rdata, rdata_offset),
        Some(RecordType::SOA) => parse_soa(rdata_offset, rdlength, payload),
        Some(RecordType::OPT) | None => Ok(UNSUPPORTED_RDATA.to_string()),
    }
}

fn require(rdata: &[u8], rdata_offset: usize, expected: usize) -> Result<(), DecodeError> {
    if rdata.len() < expected {
        return Err(DecodeError::AnswerRdataTooShort {
            offset: rdata_offset,
            expected,
            available: rdata.len(),
        });
    }
    Ok(())
}

/// Address records carry a fixed-size payload; any other length is malformed.
fn require_exact(rdata: &[u8], rdata_offset: usize, expected: usize) -> Result<(), DecodeError> {
    if rdata.len() != expected {
        return Err(DecodeError::AnswerRdataTooShort {
            offset: rdata_offset,
            expected,
            available: rdata.len(),
        });
    }
    Ok(())
}

fn parse_a(rdata: &[u8], rdata_offset: usize) -> Result<String, DecodeError> {
    require_exact(rdata, rdata_offset, IPV4_LEN)?;
    Ok(Ipv4Addr::new(rdata[0], rdata[1], rdata[2], rdata[3]).to_string())
}

/// Eight colon-joined hexadecimal groups, without zero compression.
fn parse_aaaa(rdata: &[u8], rdata_offset: usize) -> Result<String, DecodeError> {
    require_exact(rdata, rdata_offset, IPV6_LEN)?;
    let mut out = String::with_capacity(39);
    for (i, group) in rdata.chunks_exact(2).enumerate() {
        if i > 0 {
            out.push(':');
        }
        let _ = write!(out, "{:x}", u16::from_be_bytes([group[0], group[1]]));
    }
    Ok(out)
}

fn parse_name(rdata_offset: usize, payload: &[u8]) -> Result<String, DecodeError> {
    parse_labels(rdata_offset, payload).map(|(name, _)| name)
}

fn parse_mx(rdata: &[u8], rdata_offset: usize, payload: &[u8]) -> Result<String, DecodeError> {
    require(rdata, rdata_offset, MX_PREFERENCE_LEN)?;
    let preference = read_u16(rdata, 0);
    let (exchange, _) = parse_labels(rdata_offset + MX_PREFERENCE_LEN, payload)?;
    Ok(format!("{} {}", preference, exchange))
}

fn parse_srv(rdata: &[u8], rdata_offset: usize, payload: &[u8]) -> Result<String, DecodeError> {
    require(rdata, rdata_offset, SRV_FIXED_LEN)?;
    let priority = read_u16(rdata, 0);
    let weight = read_u16(rdata, 2);
    let port = read_u16(rdata, 4);
    let (target, _) = parse_labels(rdata_offset + SRV_FIXED_LEN, payload)?;
    Ok(format!("{} {} {} {}", priority, weight, port, target))
}

/// Only the first character-string is rendered; trailing bytes are ignored.
fn parse_txt(rdata: &[u8], rdata_offset: usize) -> Result<String, DecodeError> {
    require(rdata, rdata_offset, 1)?;
    let length = rdata[0] as usize;
    require(rdata, rdata_offset, length + 1)?;
    Ok(String::from_utf8_lossy(&rdata[1..length + 1]).into_owned())
}

fn parse_soa(rdata_offset: usize, rdlength: usize, payload: &[u8]) -> Result<String, DecodeError> {
    let (mname, offset) = parse_labels(rdata_offset, payload)?;
    let (rname, offset) = parse_labels(offset, payload)?;

    let rdata_end = rdata_offset + rdlength;
    let available = rdata_end.saturating_sub(offset);
    if available < SOA_FIXED_LEN {
        return Err(DecodeError::AnswerRdataTooShort {
            offset,
            expected: SOA_FIXED_LEN,
            available,
        });
    }

    let serial = read_u32(payload, offset);
    let refresh = read_u32(payload, offset + 4) as i32;
    let retry = read_u32(payload, offset + 8) as i32;
    let expire = read_u32(payload, offset + 12) as i32;
    let minimum = read_u32(payload, offset + 16);

    Ok(format!(
        "{} {} {} {} {} {} {}",
        mname, rname, serial, refresh, retry, expire, minimum
    ))
}
