use thiserror::Error;

/// Malformed-input conditions raised by the wire decoder.
///
/// Every variant maps to exactly one failed bounds check, so callers can
/// count drops per failure class with [`DecodeError::kind`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed pkt, dns payload of {len} bytes too short to decode header")]
    HeaderTooShort { len: usize },

    #[error("malformed pkt, invalid offset {offset} to decode label")]
    LabelInvalidOffset { offset: usize },

    #[error("malformed pkt, invalid offset to decode label, pointer to {offset} creates an infinite loop")]
    LabelInfiniteLoop { offset: usize },

    #[error("malformed pkt, label of {length} bytes at offset {offset} overruns the payload")]
    LabelTooShort { offset: usize, length: usize },

    #[error("malformed pkt, not enough data at offset {offset} to decode qtype")]
    QuestionQtypeTooShort { offset: usize },

    #[error("malformed pkt, not enough data at offset {offset} to decode answer")]
    AnswerTooShort { offset: usize },

    #[error(
        "malformed pkt, rdata at offset {offset} needs {expected} bytes but holds {available}"
    )]
    AnswerRdataTooShort {
        offset: usize,
        expected: usize,
        available: usize,
    },
}

impl DecodeError {
    pub const KINDS: [&'static str; 7] = [
        "header-too-short",
        "label-invalid-offset",
        "label-invalid-offset-infinite-loop",
        "label-too-short",
        "question-qtype-too-short",
        "answer-too-short",
        "answer-rdata-too-short",
    ];

    /// Stable label for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::HeaderTooShort { .. } => Self::KINDS[0],
            DecodeError::LabelInvalidOffset { .. } => Self::KINDS[1],
            DecodeError::LabelInfiniteLoop { .. } => Self::KINDS[2],
            DecodeError::LabelTooShort { .. } => Self::KINDS[3],
            DecodeError::QuestionQtypeTooShort { .. } => Self::KINDS[4],
            DecodeError::AnswerTooShort { .. } => Self::KINDS[5],
            DecodeError::AnswerRdataTooShort { .. } => Self::KINDS[6],
        }
    }

    /// Byte offset at which decoding stopped.
    pub fn offset(&self) -> usize {
        match *self {
            DecodeError::HeaderTooShort { .. } => 0,
            DecodeError::LabelInvalidOffset { offset }
            | DecodeError::LabelInfiniteLoop { offset }
            | DecodeError::LabelTooShort { offset, .. }
            | DecodeError::QuestionQtypeTooShort { offset }
            | DecodeError::AnswerTooShort { offset }
            | DecodeError::AnswerRdataTooShort { offset, .. } => offset,
        }
    }
}
