//! Shared engine for the three triplet schemes (C40, Text, X12) plus the
//! C40 character table. Three values of 0..=39 pack into two codewords.
use arrayvec::ArrayVec;

use super::{ascii, text, x12, DataEncodingError, EncodeStream, Scheme, Unlatch, UNLATCH};
use crate::symbol_size::SymbolSize;

pub(super) const SHIFT1: u8 = 0;
pub(super) const SHIFT2: u8 = 1;
pub(super) const SHIFT3: u8 = 2;
pub(super) const UPPER_SHIFT: u8 = 30;

/// Value buffer between input bytes and emitted triplets. One byte expands
/// to at most four values (Shift2, upper shift, shift, value), and up to
/// two values can be left over from the previous byte.
pub(super) type ValueBuf = ArrayVec<u8, 6>;

/// Expand one C40 input byte; extended ASCII goes through upper shift.
pub(super) fn push_values(buf: &mut ValueBuf, ch: u8) {
    match ch {
        ch @ 128..=255 => {
            buf.push(SHIFT2);
            buf.push(UPPER_SHIFT);
            push_low_ascii(buf, ch - 128);
        }
        ch => push_low_ascii(buf, ch),
    }
}

const fn entry(set: u8, value: u8) -> u8 {
    set << 6 | value
}

/// Packed C40 table for 7-bit input, built at compile time: bits 6..7
/// pick the character set (0 basic, 1..=3 the shift sets), bits 0..5 the
/// value within it.
const C40_MAP: [u8; 128] = {
    let mut map = [0u8; 128];
    let mut i = 0;
    while i < 128 {
        let ch = i as u8;
        map[i] = if ch == b' ' {
            entry(0, 3)
        } else if b'0' <= ch && ch <= b'9' {
            entry(0, ch - 44)
        } else if b'A' <= ch && ch <= b'Z' {
            entry(0, ch - 51)
        } else if ch < 32 {
            // control characters keep their code points in set 1
            entry(1, ch)
        } else if ch < 48 {
            entry(2, ch - 33)
        } else if ch < 65 {
            entry(2, ch - 43)
        } else if ch < 96 {
            entry(2, ch - 69)
        } else {
            entry(3, ch - 96)
        };
        i += 1;
    }
    map
};

/// Expand a 7-bit character; a shift set entry becomes the shift value
/// followed by the character value.
pub(super) fn push_low_ascii(buf: &mut ValueBuf, ch: u8) {
    let packed = C40_MAP[usize::from(ch)];
    match packed >> 6 {
        0 => {}
        1 => buf.push(SHIFT1),
        2 => buf.push(SHIFT2),
        _ => buf.push(SHIFT3),
    }
    buf.push(packed & 0b11_1111);
}

fn expand_value(
    buf: &mut ValueBuf,
    ch: u8,
    scheme: Scheme,
) -> Result<usize, DataEncodingError> {
    let before = buf.len();
    match scheme {
        Scheme::C40 => push_values(buf, ch),
        Scheme::Text => text::push_values(buf, ch),
        Scheme::X12 => x12::push_value(buf, ch)?,
        _ => {
            return Err(DataEncodingError::Internal(
                "triplet value outside C40/Text/X12",
            ))
        }
    }
    Ok(buf.len() - before)
}

/// Pack three scheme values into two codewords.
pub(super) fn append_triplet(
    stream: &mut EncodeStream,
    values: [u8; 3],
) -> Result<(), DataEncodingError> {
    if !stream.scheme.is_ctx() {
        return Err(DataEncodingError::Internal(
            "triplet outside C40/Text/X12",
        ));
    }
    let packed =
        1600 * values[0] as u16 + 40 * values[1] as u16 + values[2] as u16 + 1;
    stream.push((packed >> 8) as u8);
    stream.push((packed & 0xFF) as u8);
    stream.chain_values += 3;
    Ok(())
}

/// Leave the triplet scheme; only legal on a triplet boundary.
pub(super) fn unlatch(stream: &mut EncodeStream) -> Result<(), DataEncodingError> {
    if !stream.scheme.is_ctx() {
        return Err(DataEncodingError::Internal(
            "unlatch outside C40/Text/X12",
        ));
    }
    if stream.chain_values % 3 != 0 {
        return Err(DataEncodingError::UnlatchOutsideTriplet);
    }
    stream.push(UNLATCH);
    stream.chain_values += 1;
    Ok(())
}

/// Consume input until the value buffer drains on a triplet boundary. When
/// the input runs out with values still buffered, the published
/// end-of-symbol rules take over.
pub(super) fn encode_next_chunk(
    stream: &mut EncodeStream,
    hint: SymbolSize,
) -> Result<(), DataEncodingError> {
    let mut buf = ValueBuf::new();
    let mut vals_last_byte = 0;
    while let Some(ch) = stream.advance() {
        vals_last_byte = expand_value(&mut buf, ch, stream.scheme)?;
        while buf.len() >= 3 {
            let triplet = [buf[0], buf[1], buf[2]];
            append_triplet(stream, triplet)?;
            buf.drain(0..3);
        }
        if buf.is_empty() {
            break;
        }
    }
    if !stream.has_more() && !buf.is_empty() {
        complete_partial(stream, &buf, vals_last_byte, hint)?;
    }
    Ok(())
}

/// Input exhausted with one or two values left in the buffer.
///
/// A two value leftover exactly two codewords before the symbol end is
/// emitted as a Shift1-padded triplet (the decoder drops the trailing
/// shift). Every other case re-encodes the final input byte(s) in ASCII:
/// roll the cursor back, then either slot a single ASCII codeword into the
/// last remaining position without an unlatch, or unlatch explicitly and
/// finish the symbol in ASCII.
fn complete_partial(
    stream: &mut EncodeStream,
    buf: &ValueBuf,
    vals_last_byte: usize,
    hint: SymbolSize,
) -> Result<(), DataEncodingError> {
    if !stream.scheme.is_ctx() {
        return Err(DataEncodingError::Internal(
            "partial completion outside C40/Text/X12",
        ));
    }
    if !(buf.len() == 1 || buf.len() == 2) {
        return Err(DataEncodingError::Internal(
            "partial completion needs 1 or 2 values",
        ));
    }
    let (size, capacity) = stream.symbol_for_output(hint)?;
    let remaining = capacity - stream.output.len();

    if buf.len() == 2 && remaining == 2 {
        append_triplet(stream, [buf[0], buf[1], SHIFT1])?;
        stream.mark_complete(size);
        return Ok(());
    }

    // Two leftover data values come from two input bytes; a shift plus its
    // value from one. A shift already merged into an emitted triplet stays
    // behind, the decoder ignores it at the end of data.
    let steps = if buf.len() == 2 && vals_last_byte == 1 {
        2
    } else {
        1
    };
    stream.backup(steps);

    if remaining == 1 {
        if let Some(words) = ascii::encode_tmp_remaining(stream) {
            if words.len() == 1 {
                super::change_scheme(stream, Scheme::Ascii, Unlatch::Implicit)?;
                ascii::append_value(stream, words[0])?;
                stream.skip_to_end();
                stream.mark_complete(size);
                return Ok(());
            }
        }
    }

    super::change_scheme(stream, Scheme::Ascii, Unlatch::Explicit)?;
    while stream.has_more() {
        ascii::encode_next_chunk(stream)?;
    }
    let (size, capacity) = stream.symbol_for_output(hint)?;
    ascii::pad_remaining(stream, capacity)?;
    stream.mark_complete(size);
    Ok(())
}

/// End-of-chunk check on a triplet boundary: a perfect fit completes as is,
/// otherwise unlatch and pad out in ASCII.
pub(super) fn complete_if_done(
    stream: &mut EncodeStream,
    hint: SymbolSize,
) -> Result<(), DataEncodingError> {
    let (size, capacity) = stream.symbol_for_output(hint)?;
    if stream.has_more() {
        return Ok(());
    }
    if capacity == stream.output.len() {
        stream.mark_complete(size);
        return Ok(());
    }
    super::change_scheme(stream, Scheme::Ascii, Unlatch::Explicit)?;
    let (size, capacity) = stream.symbol_for_output(hint)?;
    ascii::pad_remaining(stream, capacity)?;
    stream.mark_complete(size);
    Ok(())
}
