//! Base 256 writes raw bytes, each obfuscated with the 255-state
//! randomization at its final output position, behind a one or two byte
//! length header that grows and shrinks with the chain.
use super::{ascii, DataEncodingError, EncodeStream, Scheme, Unlatch};
use crate::symbol_size::{find_symbol_size, SymbolSize};

// A one byte header holds lengths up to 249; two bytes reach 1555, the
// data capacity of the largest symbol.
const MAX_SHORT_LENGTH: usize = 249;
const MAX_CHAIN_LENGTH: usize = 1555;

/// 255-state randomization; `position` is 1-based within the full
/// codeword vector.
pub(super) fn randomize_255_state(value: u8, position: usize) -> u8 {
    let pseudo_random = ((149 * position) % 255) + 1;
    let tmp = value as usize + pseudo_random;
    if tmp <= 255 {
        tmp as u8
    } else {
        (tmp - 256) as u8
    }
}

/// Inverse of [randomize_255_state].
pub(super) fn unrandomize_255_state(value: u8, position: usize) -> u8 {
    let pseudo_random = (((149 * position) % 255) + 1) as u8;
    value.wrapping_sub(pseudo_random)
}

pub(super) fn encode_next_chunk(stream: &mut EncodeStream) -> Result<(), DataEncodingError> {
    if let Some(value) = stream.advance() {
        append_value(stream, value)?;
    }
    Ok(())
}

fn append_value(stream: &mut EncodeStream, value: u8) -> Result<(), DataEncodingError> {
    if stream.scheme != Scheme::Base256 {
        return Err(DataEncodingError::Internal("base256 value outside base256"));
    }
    let randomized = randomize_255_state(value, stream.output.len() + 1);
    stream.push(randomized);
    stream.chain_values += 1;

    // the header value, and possibly its width, follow the chain length
    update_chain_header(stream, None)
}

/// Rewrite the chain's length header.
///
/// `perfect_fit` carries the data capacity of a symbol the chain fills to
/// the last codeword; the header then collapses to a single zero byte
/// meaning "runs to the end of the symbol". Growing or shrinking the
/// header shifts the payload, so every displaced byte is re-randomized at
/// its new position.
pub(super) fn update_chain_header(
    stream: &mut EncodeStream,
    perfect_fit: Option<usize>,
) -> Result<(), DataEncodingError> {
    let header_index = stream.output.len() - stream.chain_words;
    let chain_length = stream.chain_values;
    let mut header_words = stream.chain_words - stream.chain_values;

    if header_words == 0 && stream.chain_words == 0 {
        // fresh latch, reserve the single header byte
        stream.push(0);
        header_words = 1;
    } else if header_words == 1 && chain_length > MAX_SHORT_LENGTH {
        if chain_length > MAX_CHAIN_LENGTH {
            return Err(DataEncodingError::TooMuchData);
        }
        stream.insert_at(header_index, 0);
        for i in header_index + 2..stream.output.len() {
            let plain = unrandomize_255_state(stream.output[i], i);
            stream.output[i] = randomize_255_state(plain, i + 1);
        }
        header_words = 2;
    } else if header_words == 2 && perfect_fit.is_some() {
        stream.remove_at(header_index);
        for i in header_index + 1..stream.output.len() {
            let plain = unrandomize_255_state(stream.output[i], i + 2);
            stream.output[i] = randomize_255_state(plain, i + 1);
        }
        header_words = 1;
    }

    match (header_words, perfect_fit) {
        (1, Some(capacity)) => {
            if capacity != stream.output.len() {
                return Err(DataEncodingError::Internal(
                    "perfect fit length mismatch",
                ));
            }
            stream.set_at(header_index, randomize_255_state(0, header_index + 1));
        }
        (1, None) => {
            let h0 = randomize_255_state(chain_length as u8, header_index + 1);
            stream.set_at(header_index, h0);
        }
        (2, None) => {
            if chain_length > MAX_CHAIN_LENGTH {
                return Err(DataEncodingError::TooMuchData);
            }
            let h0 = (chain_length / 250 + 249) as u8;
            let h1 = (chain_length % 250) as u8;
            stream.set_at(header_index, randomize_255_state(h0, header_index + 1));
            stream.set_at(header_index + 1, randomize_255_state(h1, header_index + 2));
        }
        _ => return Err(DataEncodingError::Internal("broken base256 header")),
    }
    Ok(())
}

/// With the input exhausted, try the perfect fit shortcut (two header
/// bytes collapsing to one buys a codeword), otherwise pad out in ASCII
/// behind an implicit unlatch.
pub(super) fn complete_if_done(
    stream: &mut EncodeStream,
    hint: SymbolSize,
) -> Result<(), DataEncodingError> {
    if stream.has_more() {
        return Ok(());
    }
    let header_words = stream.chain_words - stream.chain_values;
    if header_words != 1 && header_words != 2 {
        return Err(DataEncodingError::Internal("broken base256 header"));
    }

    if header_words == 2 {
        // would the chain fill a symbol exactly with one header byte less?
        let shortened = stream.output.len() - 1;
        if let Some((size, capacity)) = find_symbol_size(shortened, hint) {
            if capacity == shortened {
                update_chain_header(stream, Some(capacity))?;
                stream.mark_complete(size);
                return Ok(());
            }
        }
    }

    let (size, capacity) = stream.symbol_for_output(hint)?;
    super::change_scheme(stream, Scheme::Ascii, Unlatch::Implicit)?;
    ascii::pad_remaining(stream, capacity)?;
    stream.mark_complete(size);
    Ok(())
}
