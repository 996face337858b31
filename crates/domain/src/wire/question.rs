use serde::Serialize;

use super::labels::parse_labels;
use super::{read_u16, DecodeError, DNS_HEADER_LEN};

const QTYPE_QCLASS_LEN: usize = 4;

/// The first entry of the question section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsQuestion {
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
    /// Offset of the first byte after QCLASS.
    pub end_offset: usize,
}

/// Decodes the question that immediately follows the header.
pub fn decode_question(payload: &[u8]) -> Result<DnsQuestion, DecodeError> {
    let (name, offset) = parse_labels(DNS_HEADER_LEN, payload)?;

    if payload.len() - offset < QTYPE_QCLASS_LEN {
        return Err(DecodeError::QuestionQtypeTooShort { offset });
    }

    Ok(DnsQuestion {
        name,
        qtype: read_u16(payload, offset),
        qclass: read_u16(payload, offset + 2),
        end_offset: offset + QTYPE_QCLASS_LEN,
    })
}
