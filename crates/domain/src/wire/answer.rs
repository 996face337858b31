use serde::Serialize;

use super::labels::parse_labels;
use super::rdata::parse_rdata;
use super::{read_u16, read_u32, DecodeError};
use crate::dns_record::{record_type_name, RecordType};

/// TYPE(2) + CLASS(2) + TTL(4) + RDLENGTH(2).
const RR_FIXED_LEN: usize = 10;

/// Smallest possible record: root owner name plus the fixed fields.
const RR_MIN_LEN: usize = RR_FIXED_LEN + 1;

/// One decoded resource record.
///
/// TTL is kept as the unsigned 32-bit wire value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsAnswer {
    pub name: String,
    #[serde(rename = "rdatatype")]
    pub record_type: &'static str,
    pub class: u16,
    pub ttl: u32,
    pub rdata: String,
}

/// Decodes `count` consecutive resource records starting at `start_offset`.
///
/// Returns the records in wire order along with the offset right after the
/// last one. OPT records are consumed but left out of the result. The first
/// malformed record aborts the whole section.
pub fn decode_answers(
    count: u16,
    start_offset: usize,
    payload: &[u8],
) -> Result<(Vec<DnsAnswer>, usize), DecodeError> {
    let capacity = (count as usize).min(payload.len().saturating_sub(start_offset) / RR_MIN_LEN);
    let mut answers = Vec::with_capacity(capacity);
    let mut offset = start_offset;

    for _ in 0..count {
        let (name, name_end) = parse_labels(offset, payload)?;

        if payload.len() - name_end < RR_FIXED_LEN {
            return Err(DecodeError::AnswerTooShort { offset: name_end });
        }

        let rtype = read_u16(payload, name_end);
        let class = read_u16(payload, name_end + 2);
        let ttl = read_u32(payload, name_end + 4);
        let rdlength = read_u16(payload, name_end + 8) as usize;

        let rdata_offset = name_end + RR_FIXED_LEN;
        let available = payload.len() - rdata_offset;
        if available < rdlength {
            return Err(DecodeError::AnswerRdataTooShort {
                offset: rdata_offset,
                expected: rdlength,
                available,
            });
        }
        let next = rdata_offset + rdlength;

        let record_type = RecordType::from_u16(rtype);
        if record_type == Some(RecordType::OPT) {
            offset = next;
            continue;
        }

        let rdata = parse_rdata(record_type, rdata_offset, rdlength, payload)?;
        answers.push(DnsAnswer {
            name,
            record_type: record_type.map_or_else(|| record_type_name(rtype), |t| t.as_str()),
            class,
            ttl,
            rdata,
        });

        offset = next;
    }

    Ok((answers, offset))
}
