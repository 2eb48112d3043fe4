//! EDIFACT packs four 6-bit values into three codewords; values straddle
//! codeword boundaries, so the write phase follows the chain value count.
use super::{ascii, DataEncodingError, EncodeStream, Scheme, Unlatch};
use crate::symbol_size::SymbolSize;

pub(super) const UNLATCH: u8 = 0b01_1111;

/// Append one value in 31..=94 (the unlatch value travels through here
/// like any other). An unlatch that ends mid-codeword leaves the remaining
/// bits zero.
pub(super) fn append_value(stream: &mut EncodeStream, value: u8) -> Result<(), DataEncodingError> {
    if stream.scheme != Scheme::Edifact {
        return Err(DataEncodingError::Internal("edifact value outside edifact"));
    }
    if !(31..=94).contains(&value) {
        return Err(DataEncodingError::UnsupportedCharacter);
    }

    let bits = (value & 0b11_1111) << 2;
    match stream.chain_values % 4 {
        0 => stream.push(bits),
        1 => {
            let prev = stream.remove_last()?;
            stream.push(prev | (bits >> 6));
            stream.push(bits << 2);
        }
        2 => {
            let prev = stream.remove_last()?;
            stream.push(prev | (bits >> 4));
            stream.push(bits << 4);
        }
        _ => {
            let prev = stream.remove_last()?;
            stream.push(prev | (bits >> 2));
        }
    }
    stream.chain_values += 1;
    Ok(())
}

pub(super) fn encode_next_chunk(stream: &mut EncodeStream) -> Result<(), DataEncodingError> {
    if let Some(value) = stream.advance() {
        append_value(stream, value)?;
    }
    Ok(())
}

/// End-of-symbol handling.
///
/// With the input exhausted, a clean boundary on a full symbol completes
/// without any tail; everything else unlatches explicitly and pads in
/// ASCII. With input left, a clean boundary whose rest re-encodes to one
/// or two ASCII codewords that fit the remaining capacity skips the
/// unlatch entirely: the decoder infers the switch from the capacity.
pub(super) fn complete_if_done(
    stream: &mut EncodeStream,
    hint: SymbolSize,
) -> Result<(), DataEncodingError> {
    let clean_boundary = stream.chain_values % 4 == 0;
    let (size, capacity) = stream.symbol_for_output(hint)?;
    let remaining = capacity - stream.output.len();

    if !stream.has_more() {
        if !clean_boundary || remaining > 0 {
            super::change_scheme(stream, Scheme::Ascii, Unlatch::Explicit)?;
            let (size, capacity) = stream.symbol_for_output(hint)?;
            ascii::pad_remaining(stream, capacity)?;
            stream.mark_complete(size);
        } else {
            stream.mark_complete(size);
        }
        return Ok(());
    }

    let words = match ascii::encode_tmp_remaining(stream) {
        Some(words) if words.len() <= remaining => words,
        _ => return Ok(()),
    };
    if clean_boundary && (words.len() == 1 || words.len() == 2) {
        super::change_scheme(stream, Scheme::Ascii, Unlatch::Implicit)?;
        for word in &words {
            ascii::append_value(stream, *word)?;
        }
        // progress was made outside the normal chunk loop
        stream.skip_to_end();
        ascii::pad_remaining(stream, capacity)?;
        stream.mark_complete(size);
    }
    Ok(())
}
