use super::ascii;

/// The encodation schemes a Data Matrix symbol can carry data in.
///
/// Each scheme trades generality for density: ASCII handles everything,
/// C40/Text/X12 pack three character set values into two codewords,
/// EDIFACT packs four 6-bit values into three codewords, and Base 256
/// stores raw bytes behind a length header.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Scheme {
    Ascii,
    C40,
    Text,
    X12,
    Edifact,
    Base256,
}

impl Scheme {
    /// The three triplet schemes share one packing engine.
    pub(super) fn is_ctx(&self) -> bool {
        matches!(self, Self::C40 | Self::Text | Self::X12)
    }

    /// The ASCII codeword that latches the decoder into this scheme;
    /// ASCII itself is entered by unlatching, not by a codeword.
    pub(super) fn latch_from_ascii(&self) -> Option<u8> {
        match self {
            Self::Ascii => None,
            Self::C40 => Some(ascii::LATCH_C40),
            Self::Text => Some(ascii::LATCH_TEXT),
            Self::X12 => Some(ascii::LATCH_X12),
            Self::Edifact => Some(ascii::LATCH_EDIFACT),
            Self::Base256 => Some(ascii::LATCH_BASE256),
        }
    }
}
