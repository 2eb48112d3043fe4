use arrayvec::ArrayVec;

use super::{DataEncodingError, EncodeStream, Scheme};
use crate::symbol_size::SymbolSize;

pub(super) const LATCH_C40: u8 = 230;
pub(super) const LATCH_BASE256: u8 = 231;
pub(super) const LATCH_X12: u8 = 238;
pub(super) const LATCH_TEXT: u8 = 239;
pub(super) const LATCH_EDIFACT: u8 = 240;
pub(super) const PAD: u8 = 129;

const UPPER_SHIFT: u8 = 235;

/// Append one codeword while latched in ASCII.
pub(super) fn append_value(stream: &mut EncodeStream, value: u8) -> Result<(), DataEncodingError> {
    if stream.scheme != Scheme::Ascii {
        return Err(DataEncodingError::Internal("ascii value outside ascii"));
    }
    stream.push(value);
    stream.chain_values += 1;
    Ok(())
}

/// Encode one chunk: two adjacent digits into a single codeword, otherwise
/// one byte, with extended ASCII split into upper shift plus remainder.
pub(super) fn encode_next_chunk(stream: &mut EncodeStream) -> Result<(), DataEncodingError> {
    let v0 = match stream.advance() {
        Some(v0) => v0,
        None => return Ok(()),
    };
    match stream.peek() {
        Some(v1) if v0.is_ascii_digit() && v1.is_ascii_digit() => {
            // make the peeked digit's progress official
            let _ = stream.advance();
            append_value(stream, (v0 - b'0') * 10 + (v1 - b'0') + 130)
        }
        _ if v0 < 128 => append_value(stream, v0 + 1),
        _ => {
            append_value(stream, UPPER_SHIFT)?;
            append_value(stream, v0 - 127)
        }
    }
}

/// With the input exhausted, resolve the symbol, pad it out and finish.
pub(super) fn complete_if_done(
    stream: &mut EncodeStream,
    hint: SymbolSize,
) -> Result<(), DataEncodingError> {
    if stream.has_more() {
        return Ok(());
    }
    let (size, capacity) = stream.symbol_for_output(hint)?;
    pad_remaining(stream, capacity)?;
    stream.mark_complete(size);
    Ok(())
}

/// Fill the data region up to `capacity` with pad codewords. The first pad
/// is the literal pad value, the rest are 253-state randomized.
pub(super) fn pad_remaining(
    stream: &mut EncodeStream,
    capacity: usize,
) -> Result<(), DataEncodingError> {
    if stream.scheme != Scheme::Ascii {
        return Err(DataEncodingError::Internal("padding outside ascii"));
    }
    let mut remaining = capacity
        .checked_sub(stream.output.len())
        .ok_or(DataEncodingError::Internal("output past symbol end"))?;
    if remaining > 0 {
        append_value(stream, PAD)?;
        remaining -= 1;
    }
    while remaining > 0 {
        let pad = randomize_253_state(PAD, stream.output.len() + 1);
        append_value(stream, pad)?;
        remaining -= 1;
    }
    Ok(())
}

/// 253-state randomization for pad codewords; `position` is 1-based within
/// the full codeword vector.
pub(super) fn randomize_253_state(value: u8, position: usize) -> u8 {
    let pseudo_random = ((149 * position) % 253) + 1;
    let tmp = value as usize + pseudo_random;
    if tmp <= 254 {
        tmp as u8
    } else {
        (tmp - 254) as u8
    }
}

/// Re-encode the remaining input as ASCII into a scratch stream holding at
/// most three codewords, without touching the real stream.
///
/// `None` means three codewords were not enough. A result shorter than
/// three always covers the whole remaining input.
pub(super) fn encode_tmp_remaining(stream: &EncodeStream) -> Option<ArrayVec<u8, 3>> {
    let mut tmp = EncodeStream::new(stream.rest());
    while tmp.has_more() && tmp.output.len() < 3 {
        encode_next_chunk(&mut tmp).ok()?;
    }
    let mut words = ArrayVec::new();
    words.try_extend_from_slice(&tmp.output).ok()?;
    Some(words)
}
