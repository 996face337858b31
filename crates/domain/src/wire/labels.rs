use super::DecodeError;

const POINTER_TAG: u8 = 0xC0;
const POINTER_OFFSET_MASK: u16 = 0x3FFF;

/// Pointer targets already followed while resolving one name.
///
/// Targets are 14-bit offsets, so one bit per possible target fits on the stack.
struct VisitedTargets([u64; 256]);

impl VisitedTargets {
    fn new() -> Self {
        Self([0; 256])
    }

    /// Marks `target`, returns `false` if it was already marked.
    fn insert(&mut self, target: usize) -> bool {
        let (word, bit) = (target / 64, 1u64 << (target % 64));
        let fresh = self.0[word] & bit == 0;
        self.0[word] |= bit;
        fresh
    }
}

/// Decodes the domain name starting at `offset` in `payload`.
///
/// Returns the dotted name (empty for the root) and the offset of the first
/// byte after the name as encoded at `offset`. Compression pointers are
/// followed through the whole packet; each pointer target may be visited once
/// per call, a second visit fails with [`DecodeError::LabelInfiniteLoop`].
///
/// A pointer always terminates the encoded name, so after the first pointer
/// the returned offset is fixed and the remaining hops only contribute labels.
pub fn parse_labels(offset: usize, payload: &[u8]) -> Result<(String, usize), DecodeError> {
    let mut visited = VisitedTargets::new();
    let mut name = String::new();
    let mut cursor = offset;
    let mut end: Option<usize> = None;

    loop {
        let Some(&length) = payload.get(cursor) else {
            return Err(DecodeError::LabelInvalidOffset { offset: cursor });
        };

        if length == 0 {
            return Ok((name, end.unwrap_or(cursor + 1)));
        }

        if length & POINTER_TAG == POINTER_TAG {
            let Some(&low) = payload.get(cursor + 1) else {
                return Err(DecodeError::LabelInvalidOffset { offset: cursor + 1 });
            };
            let target = (u16::from_be_bytes([length, low]) & POINTER_OFFSET_MASK) as usize;
            if !visited.insert(target) {
                return Err(DecodeError::LabelInfiniteLoop { offset: target });
            }
            end.get_or_insert(cursor + 2);
            cursor = target;
            continue;
        }

        // The label must be followed by at least one more octet (terminator or pointer).
        let length = length as usize;
        if cursor + length + 1 >= payload.len() {
            return Err(DecodeError::LabelTooShort {
                offset: cursor,
                length,
            });
        }

        if !name.is_empty() {
            name.push('.');
        }
        name.push_str(&String::from_utf8_lossy(
            &payload[cursor + 1..cursor + 1 + length],
        ));
        cursor += length + 1;
    }
}
