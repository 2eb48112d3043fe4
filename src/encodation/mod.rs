//! Data codeword generation for a single encodation scheme.
//!
//! One mutable [EncodeStream] threads the whole encode. The dispatcher
//! loop latches into the requested scheme and repeatedly encodes one
//! "chunk" (the smallest group of values the scheme emits atomically),
//! then lets the scheme check for its end-of-symbol conditions. Every
//! scheme change passes through ASCII; latch codewords live in the ASCII
//! stream, unlatches in the scheme being left.
use alloc::vec::Vec;

use crate::symbol_size::{find_symbol_size, SymbolSize};

pub(crate) mod ascii;
mod base256;
mod c40;
mod edifact;
mod scheme;
mod text;
mod x12;

#[cfg(test)]
mod tests;

pub use scheme::Scheme;

pub(crate) const UNLATCH: u8 = 254;

/// Error when encoding the data part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataEncodingError {
    /// The data does not fit any symbol admitted by the size request.
    TooMuchData,
    /// An input byte can not be represented in the requested scheme.
    UnsupportedCharacter,
    /// A C40/Text/X12 unlatch was requested off a triplet boundary.
    UnlatchOutsideTriplet,
    /// An internal invariant was violated; this is a bug in the encoder.
    Internal(&'static str),
}

impl DataEncodingError {
    /// `true` for errors caused by the input data, `false` for encoder bugs.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

/// Whether leaving a scheme writes its unlatch sequence, or the decoder is
/// expected to infer the switch from the symbol capacity.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Unlatch {
    Explicit,
    Implicit,
}

/// Mutable state of one encode run.
///
/// `chain_words` counts output bytes since the most recent latch, Base 256
/// header bytes included; `chain_values` counts scheme values, header bytes
/// excluded. The difference is the current header length.
pub(crate) struct EncodeStream<'a> {
    input: &'a [u8],
    input_next: usize,
    output: Vec<u8>,
    scheme: Scheme,
    chain_words: usize,
    chain_values: usize,
    size: Option<SymbolSize>,
}

impl<'a> EncodeStream<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            input_next: 0,
            output: Vec::new(),
            scheme: Scheme::Ascii,
            chain_words: 0,
            chain_values: 0,
            size: None,
        }
    }

    fn has_more(&self) -> bool {
        self.input_next < self.input.len()
    }

    fn rest(&self) -> &'a [u8] {
        &self.input[self.input_next..]
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.input.get(self.input_next).copied()?;
        self.input_next += 1;
        Some(ch)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.input_next).copied()
    }

    /// Roll the input cursor back, un-consuming `steps` bytes.
    fn backup(&mut self, steps: usize) {
        self.input_next -= steps;
    }

    /// Mark the rest of the input consumed; used when a completion path
    /// has already written the tail outside the normal chunk loop.
    fn skip_to_end(&mut self) {
        self.input_next = self.input.len();
    }

    fn push(&mut self, word: u8) {
        self.output.push(word);
        self.chain_words += 1;
    }

    fn remove_last(&mut self) -> Result<u8, DataEncodingError> {
        let word = self
            .output
            .pop()
            .ok_or(DataEncodingError::Internal("remove from empty output"))?;
        self.chain_words -= 1;
        Ok(word)
    }

    fn set_at(&mut self, index: usize, word: u8) {
        self.output[index] = word;
    }

    /// Insert a byte inside the current chain, shifting its tail up.
    fn insert_at(&mut self, index: usize, word: u8) {
        self.output.insert(index, word);
        self.chain_words += 1;
    }

    /// Drop a byte from the current chain, shifting its tail down.
    fn remove_at(&mut self, index: usize) {
        self.output.remove(index);
        self.chain_words -= 1;
    }

    fn mark_complete(&mut self, size: SymbolSize) {
        self.size = Some(size);
    }

    fn is_complete(&self) -> bool {
        self.size.is_some()
    }

    /// Smallest admissible symbol for the current output length, with its
    /// data codeword capacity.
    fn symbol_for_output(
        &self,
        hint: SymbolSize,
    ) -> Result<(SymbolSize, usize), DataEncodingError> {
        find_symbol_size(self.output.len(), hint).ok_or(DataEncodingError::TooMuchData)
    }
}

/// Encode `data` with the single encodation scheme `scheme`.
///
/// `size` is either a fixed symbol size or one of the `Min*` requests. On
/// success the returned codewords fill the resolved symbol's data region
/// exactly, padding included.
pub fn encode_data(
    data: &[u8],
    scheme: Scheme,
    size: SymbolSize,
) -> Result<(Vec<u8>, SymbolSize), DataEncodingError> {
    let mut stream = EncodeStream::new(data);
    while !stream.is_complete() {
        encode_next_chunk(&mut stream, scheme, size)?;
    }
    if stream.has_more() {
        return Err(DataEncodingError::Internal("completed with input left"));
    }
    match stream.size {
        Some(symbol) => Ok((stream.output, symbol)),
        None => Err(DataEncodingError::Internal("completed without a size")),
    }
}

/// Encode the next chunk in `target`, re-latching first if the stream sits
/// in a different scheme.
fn encode_next_chunk(
    stream: &mut EncodeStream,
    target: Scheme,
    hint: SymbolSize,
) -> Result<(), DataEncodingError> {
    if stream.scheme != target {
        change_scheme(stream, target, Unlatch::Explicit)?;
        if stream.scheme != target {
            return Err(DataEncodingError::Internal("scheme change missed target"));
        }
    }
    match stream.scheme {
        Scheme::Ascii => {
            ascii::encode_next_chunk(stream)?;
            if stream.is_complete() {
                return Ok(());
            }
            ascii::complete_if_done(stream, hint)
        }
        Scheme::C40 | Scheme::Text | Scheme::X12 => {
            c40::encode_next_chunk(stream, hint)?;
            if stream.is_complete() {
                return Ok(());
            }
            c40::complete_if_done(stream, hint)
        }
        Scheme::Edifact => {
            edifact::encode_next_chunk(stream)?;
            if stream.is_complete() {
                return Ok(());
            }
            edifact::complete_if_done(stream, hint)
        }
        Scheme::Base256 => {
            base256::encode_next_chunk(stream)?;
            if stream.is_complete() {
                return Ok(());
            }
            base256::complete_if_done(stream, hint)
        }
    }
}

/// Switch the stream to `target`, always routing through ASCII: unlatch the
/// current scheme (unless implicit), emit the latch codeword, reset the
/// chain counters, and reserve the Base 256 header when latching there.
fn change_scheme(
    stream: &mut EncodeStream,
    target: Scheme,
    unlatch: Unlatch,
) -> Result<(), DataEncodingError> {
    if stream.scheme == target {
        return Ok(());
    }

    match stream.scheme {
        Scheme::C40 | Scheme::Text | Scheme::X12 => {
            if unlatch == Unlatch::Explicit {
                c40::unlatch(stream)?;
            }
        }
        Scheme::Edifact => {
            if unlatch == Unlatch::Explicit {
                edifact::append_value(stream, edifact::UNLATCH)?;
            }
        }
        // ASCII and Base 256 have no exit sequence
        Scheme::Ascii | Scheme::Base256 => {}
    }
    stream.scheme = Scheme::Ascii;

    if target != Scheme::Ascii {
        let latch = target
            .latch_from_ascii()
            .ok_or(DataEncodingError::Internal("latch into ascii"))?;
        ascii::append_value(stream, latch)?;
        stream.scheme = target;
    }

    // the chain is the run of codewords since this latch
    stream.chain_words = 0;
    stream.chain_values = 0;

    if target == Scheme::Base256 {
        base256::update_chain_header(stream, None)?;
    }
    Ok(())
}
