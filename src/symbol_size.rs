use core::iter::Cloned;
use core::slice::Iter;

/// The symbol sizes defined for Data Matrix (ECC 200).
///
/// The numbers in a variant name give the symbol's module count, e.g.
/// [Square10](Self::Square10) is 10 modules wide and tall. The `Min*`
/// variants are size requests rather than sizes: they make the encoder
/// pick the smallest symbol (of the given shape class) that fits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SymbolSize {
    Square10,
    Square12,
    Square14,
    Square16,
    Square18,
    Square20,
    Square22,
    Square24,
    Square26,
    Square32,
    Square36,
    Square40,
    Square44,
    Square48,
    Square52,
    Square64,
    Square72,
    Square80,
    Square88,
    Square96,
    Square104,
    Square120,
    Square132,
    Square144,
    Rect8x18,
    Rect8x32,
    Rect12x26,
    Rect12x36,
    Rect16x36,
    Rect16x48,
    /// Smallest symbol, square or rectangular, that fits the data.
    Min,
    /// Smallest rectangular symbol that fits the data.
    MinRect,
    /// Smallest square symbol that fits the data.
    MinSquare,
}

// Ordered by data codeword capacity, squares and rectangles interleaved.
#[rustfmt::skip]
const SYMBOL_SIZES: [SymbolSize; 30] = [
    SymbolSize::Square10, SymbolSize::Square12, SymbolSize::Rect8x18,
    SymbolSize::Square14, SymbolSize::Rect8x32, SymbolSize::Square16,
    SymbolSize::Rect12x26, SymbolSize::Square18, SymbolSize::Square20,
    SymbolSize::Rect12x36, SymbolSize::Square22, SymbolSize::Rect16x36,
    SymbolSize::Square24, SymbolSize::Square26, SymbolSize::Rect16x48,
    SymbolSize::Square32, SymbolSize::Square36, SymbolSize::Square40,
    SymbolSize::Square44, SymbolSize::Square48, SymbolSize::Square52,
    SymbolSize::Square64, SymbolSize::Square72, SymbolSize::Square80,
    SymbolSize::Square88, SymbolSize::Square96, SymbolSize::Square104,
    SymbolSize::Square120, SymbolSize::Square132, SymbolSize::Square144,
];

#[rustfmt::skip]
const SYMBOL_SIZES_SQUARE: [SymbolSize; 24] = [
    SymbolSize::Square10, SymbolSize::Square12, SymbolSize::Square14,
    SymbolSize::Square16, SymbolSize::Square18, SymbolSize::Square20,
    SymbolSize::Square22, SymbolSize::Square24, SymbolSize::Square26,
    SymbolSize::Square32, SymbolSize::Square36, SymbolSize::Square40,
    SymbolSize::Square44, SymbolSize::Square48, SymbolSize::Square52,
    SymbolSize::Square64, SymbolSize::Square72, SymbolSize::Square80,
    SymbolSize::Square88, SymbolSize::Square96, SymbolSize::Square104,
    SymbolSize::Square120, SymbolSize::Square132, SymbolSize::Square144,
];

#[rustfmt::skip]
const SYMBOL_SIZES_RECT: [SymbolSize; 6] = [
    SymbolSize::Rect8x18, SymbolSize::Rect8x32, SymbolSize::Rect12x26,
    SymbolSize::Rect12x36, SymbolSize::Rect16x36, SymbolSize::Rect16x48,
];

impl SymbolSize {
    /// Number of data codewords the symbol holds, `None` for the
    /// automatic `Min*` variants.
    pub fn num_data_codewords(&self) -> Option<usize> {
        match self {
            Self::Square10 => Some(3),
            Self::Square12 => Some(5),
            Self::Square14 => Some(8),
            Self::Square16 => Some(12),
            Self::Square18 => Some(18),
            Self::Square20 => Some(22),
            Self::Square22 => Some(30),
            Self::Square24 => Some(36),
            Self::Square26 => Some(44),
            Self::Square32 => Some(62),
            Self::Square36 => Some(86),
            Self::Square40 => Some(114),
            Self::Square44 => Some(144),
            Self::Square48 => Some(174),
            Self::Square52 => Some(204),
            Self::Square64 => Some(280),
            Self::Square72 => Some(368),
            Self::Square80 => Some(456),
            Self::Square88 => Some(576),
            Self::Square96 => Some(696),
            Self::Square104 => Some(816),
            Self::Square120 => Some(1050),
            Self::Square132 => Some(1304),
            Self::Square144 => Some(1558),
            Self::Rect8x18 => Some(5),
            Self::Rect8x32 => Some(10),
            Self::Rect12x26 => Some(16),
            Self::Rect12x36 => Some(22),
            Self::Rect16x36 => Some(32),
            Self::Rect16x48 => Some(49),
            Self::Min | Self::MinRect | Self::MinSquare => None,
        }
    }

    fn is_auto(&self) -> bool {
        matches!(self, Self::Min | Self::MinSquare | Self::MinRect)
    }

    fn candidates(&self) -> Cloned<Iter<'static, Self>> {
        match self {
            Self::Min => SYMBOL_SIZES.as_ref(),
            Self::MinSquare => SYMBOL_SIZES_SQUARE.as_ref(),
            Self::MinRect => SYMBOL_SIZES_RECT.as_ref(),
            _ => {
                // a fixed size is its own only candidate
                let index = SYMBOL_SIZES
                    .iter()
                    .position(|size| size == self)
                    .expect("every non-auto size is listed");
                &SYMBOL_SIZES[index..index + 1]
            }
        }
        .iter()
        .cloned()
    }
}

/// Find the smallest symbol admitted by `hint` that holds `data_words`
/// codewords. Returns the symbol and its data codeword capacity.
pub(crate) fn find_symbol_size(data_words: usize, hint: SymbolSize) -> Option<(SymbolSize, usize)> {
    hint.candidates().find_map(|size| {
        let capacity = size.num_data_codewords()?;
        (capacity >= data_words).then_some((size, capacity))
    })
}
