use serde::Serialize;

use super::{read_u16, DecodeError, DNS_HEADER_LEN};

/*
                                    1  1  1  1  1  1
      0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                      ID                       |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |QR|   Opcode  |AA|TC|RD|RA| Z|AD|CD|   RCODE   |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                    QDCOUNT                    |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                    ANCOUNT                    |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                    NSCOUNT                    |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                    ARCOUNT                    |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
*/

const QR_BIT: u16 = 0x8000;
const OPCODE_SHIFT: u16 = 11;
const AA_BIT: u16 = 0x0400;
const TC_BIT: u16 = 0x0200;
const RD_BIT: u16 = 0x0100;
const RA_BIT: u16 = 0x0080;
const Z_BIT: u16 = 0x0040;
const AD_BIT: u16 = 0x0020;
const CD_BIT: u16 = 0x0010;
const NIBBLE: u16 = 0x000F;

/// Fixed 12-byte DNS message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DnsHeader {
    pub id: u16,
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: bool,
    pub ad: bool,
    pub cd: bool,
    pub rcode: u8,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

/// Decodes the header from the first [`DNS_HEADER_LEN`] bytes of `payload`.
pub fn decode_header(payload: &[u8]) -> Result<DnsHeader, DecodeError> {
    if payload.len() < DNS_HEADER_LEN {
        return Err(DecodeError::HeaderTooShort {
            len: payload.len(),
        });
    }

    let flags = read_u16(payload, 2);

    Ok(DnsHeader {
        id: read_u16(payload, 0),
        qr: flags & QR_BIT != 0,
        opcode: ((flags >> OPCODE_SHIFT) & NIBBLE) as u8,
        aa: flags & AA_BIT != 0,
        tc: flags & TC_BIT != 0,
        rd: flags & RD_BIT != 0,
        ra: flags & RA_BIT != 0,
        z: flags & Z_BIT != 0,
        ad: flags & AD_BIT != 0,
        cd: flags & CD_BIT != 0,
        rcode: (flags & NIBBLE) as u8,
        qdcount: read_u16(payload, 4),
        ancount: read_u16(payload, 6),
        nscount: read_u16(payload, 8),
        arcount: read_u16(payload, 10),
    })
}
