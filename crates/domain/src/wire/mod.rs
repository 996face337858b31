//! DNS wire-format decoder.
//!
//! Every read is bounds-checked against the input buffer; malformed
//! packets fail with a [`DecodeError`] and never panic or loop.

mod answer;
mod error;
mod header;
mod labels;
mod question;
mod rdata;

pub use answer::{decode_answers, DnsAnswer};
pub use error::DecodeError;
pub use header::{decode_header, DnsHeader};
pub use labels::parse_labels;
pub use question::{decode_question, DnsQuestion};
pub use rdata::{parse_rdata, UNSUPPORTED_RDATA};

use serde::Serialize;

pub const DNS_HEADER_LEN: usize = 12;

/// Header, first question and answer section of one DNS message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedMessage {
    pub header: DnsHeader,
    /// `None` when QDCOUNT is zero.
    pub question: Option<DnsQuestion>,
    pub answers: Vec<DnsAnswer>,
    /// Offset right after the answer section.
    pub answers_end: usize,
}

/// Decodes header, question and answer section of `payload`.
///
/// Only the first question is decoded; the answer section starts right after it.
pub fn decode_message(payload: &[u8]) -> Result<DecodedMessage, DecodeError> {
    let header = decode_header(payload)?;

    let (question, offset) = if header.qdcount > 0 {
        let question = decode_question(payload)?;
        let end = question.end_offset;
        (Some(question), end)
    } else {
        (None, DNS_HEADER_LEN)
    };

    let (answers, answers_end) = decode_answers(header.ancount, offset, payload)?;

    Ok(DecodedMessage {
        header,
        question,
        answers,
        answers_end,
    })
}

#[inline]
pub(crate) fn read_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([buf[at], buf[at + 1]])
}

#[inline]
pub(crate) fn read_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}
