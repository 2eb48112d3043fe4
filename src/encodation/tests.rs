use alloc::vec;
use alloc::vec::Vec;

use pretty_assertions::assert_eq;

use super::base256::unrandomize_255_state;
use super::{encode_data, DataEncodingError, Scheme};
use crate::symbol_size::SymbolSize;

fn enc(data: &[u8], scheme: Scheme) -> Vec<u8> {
    encode_data(data, scheme, SymbolSize::Min).unwrap().0
}

#[test]
fn ascii_empty_input_pads_smallest_symbol() {
    assert_eq!(enc(b"", Scheme::Ascii), vec![129, 175, 70]);
}

#[test]
fn ascii_digit_pairs() {
    assert_eq!(enc(b"123456", Scheme::Ascii), vec![142, 164, 186]);
}

#[test]
fn ascii_odd_digit_tail() {
    assert_eq!(enc(b"123", Scheme::Ascii), vec![142, 52, 129]);
}

#[test]
fn ascii_single_char_pads() {
    assert_eq!(enc(b"A", Scheme::Ascii), vec![66, 129, 70]);
}

#[test]
fn ascii_upper_shift() {
    assert_eq!(enc(b"\x80", Scheme::Ascii), vec![235, 1, 129]);
}

#[test]
fn ascii_digits_with_upper_shift() {
    assert_eq!(
        enc(b"123456\xa3", Scheme::Ascii),
        vec![142, 164, 186, 235, 36]
    );
}

#[test]
fn ascii_mixed_digits_and_text() {
    assert_eq!(
        enc(b"30Q324343430794<OQQ", Scheme::Ascii),
        vec![160, 82, 162, 173, 173, 173, 137, 224, 61, 80, 82, 82]
    );
}

#[test]
fn ascii_fixed_size_pads_to_request() {
    let (cw, size) = encode_data(b"A", Scheme::Ascii, SymbolSize::Square12).unwrap();
    assert_eq!(size, SymbolSize::Square12);
    assert_eq!(cw, vec![66, 129, 70, 220, 115]);
}

#[test]
fn ascii_fixed_size_too_small() {
    assert_eq!(
        encode_data(b"ABCD", Scheme::Ascii, SymbolSize::Square10),
        Err(DataEncodingError::TooMuchData)
    );
}

#[test]
fn c40_perfect_fit_needs_no_unlatch() {
    assert_eq!(enc(b"AIM", Scheme::C40), vec![230, 91, 11]);
    assert_eq!(enc(b"AIMAIM", Scheme::C40), vec![230, 91, 11, 91, 11]);
}

#[test]
fn c40_unlatch_on_triplet_boundary() {
    // one codeword of space is left after the unlatch, no pad needed
    assert_eq!(
        enc(b"AIMAIMAIMAIM", Scheme::C40),
        vec![230, 91, 11, 91, 11, 91, 11, 91, 11, 254]
    );
}

#[test]
fn c40_two_values_left_with_two_words_of_space() {
    // trailing Shift1 fills the final triplet, the decoder drops it
    assert_eq!(enc(b"AB", Scheme::C40), vec![230, 89, 217]);
}

#[test]
fn c40_single_value_rolls_back_to_ascii() {
    assert_eq!(enc(b"A", Scheme::C40), vec![230, 254, 66]);
}

#[test]
fn c40_leftover_after_triplets_finishes_in_ascii() {
    assert_eq!(
        enc(b"AIMAIMA", Scheme::C40),
        vec![230, 91, 11, 91, 11, 254, 66, 129]
    );
}

#[test]
fn c40_two_data_values_roll_back_two_bytes() {
    assert_eq!(
        enc(b"AIMAB", Scheme::C40),
        vec![230, 91, 11, 254, 66, 67, 129, 56]
    );
}

#[test]
fn c40_implicit_unlatch_into_last_word() {
    // one value over three triplets, one codeword of space: no unlatch
    assert_eq!(
        enc(b"AIMAIMAIMA", Scheme::C40),
        vec![230, 91, 11, 91, 11, 91, 11, 66]
    );
}

#[test]
fn c40_upper_shift_with_dangling_shift() {
    // the triplet keeps an upper shift prefix, the rolled back byte is
    // re-encoded in ASCII behind the unlatch
    assert_eq!(
        enc(b"\x80", Scheme::C40),
        vec![230, 10, 241, 254, 235, 1, 129, 56]
    );
}

#[test]
fn c40_empty_input_still_latches() {
    assert_eq!(enc(b"", Scheme::C40), vec![230, 254, 129]);
}

#[test]
fn c40_min_square_skips_rectangles() {
    assert_eq!(
        encode_data(b"AIMAIMAIMAIM", Scheme::C40, SymbolSize::MinSquare).unwrap(),
        (
            vec![230, 91, 11, 91, 11, 91, 11, 91, 11, 254, 129, 147],
            SymbolSize::Square16
        )
    );
}

#[test]
fn text_basic() {
    assert_eq!(enc(b"aim", Scheme::Text), vec![239, 91, 11]);
}

#[test]
fn text_upper_case_shifts() {
    assert_eq!(enc(b"AIM", Scheme::Text), vec![239, 12, 171, 56, 158]);
}

#[test]
fn text_single_upper_fills_triplet() {
    // "A" is Shift3 + value, two words of space: Shift1 completes it
    assert_eq!(enc(b"A", Scheme::Text), vec![239, 12, 169]);
}

#[test]
fn x12_perfect_fit() {
    assert_eq!(enc(b"ABC123", Scheme::X12), vec![238, 89, 233, 32, 56]);
}

#[test]
fn x12_leftover_unlatches_to_ascii() {
    assert_eq!(enc(b"ABCD", Scheme::X12), vec![238, 89, 233, 254, 69]);
}

#[test]
fn x12_two_values_left_with_two_words_of_space() {
    assert_eq!(enc(b"AB", Scheme::X12), vec![238, 89, 217]);
}

#[test]
fn x12_rejects_bytes_outside_set() {
    assert_eq!(
        encode_data(b"ab", Scheme::X12, SymbolSize::Min),
        Err(DataEncodingError::UnsupportedCharacter)
    );
    assert_eq!(
        encode_data(b"\x80A", Scheme::X12, SymbolSize::Min),
        Err(DataEncodingError::UnsupportedCharacter)
    );
}

#[test]
fn edifact_single_char_unlatches_explicitly() {
    // the unlatch lands mid-codeword, trailing bits are zero
    assert_eq!(enc(b"A", Scheme::Edifact), vec![240, 5, 240]);
}

#[test]
fn edifact_two_full_groups() {
    assert_eq!(
        enc(b".A.C1.3.", Scheme::Edifact),
        vec![240, 184, 27, 131, 198, 236, 238, 124]
    );
}

#[test]
fn edifact_implicit_ascii_tail() {
    assert_eq!(
        enc(b".A.C1.3.X", Scheme::Edifact),
        vec![240, 184, 27, 131, 198, 236, 238, 89]
    );
}

#[test]
fn edifact_implicit_digit_pair_tail() {
    assert_eq!(
        enc(b".A.C12", Scheme::Edifact),
        vec![240, 184, 27, 131, 142]
    );
}

#[test]
fn edifact_implicit_two_word_tail() {
    assert_eq!(
        enc(b".A.C.A.C.A.C.A.CAB", Scheme::Edifact),
        vec![
            240, 184, 27, 131, 184, 27, 131, 184, 27, 131, 184, 27, 131, 66, 67, 129, 133,
            28
        ]
    );
}

#[test]
fn edifact_unlatch_after_three_values() {
    assert_eq!(
        enc(b".A.C1.3.X.X", Scheme::Edifact),
        vec![240, 184, 27, 131, 198, 236, 238, 98, 230, 31]
    );
}

#[test]
fn edifact_unlatch_after_two_values() {
    assert_eq!(
        enc(b".A.C1.3.X.", Scheme::Edifact),
        vec![240, 184, 27, 131, 198, 236, 238, 98, 231, 192]
    );
}

#[test]
fn edifact_empty_input_unlatches_and_pads() {
    assert_eq!(enc(b"", Scheme::Edifact), vec![240, 124, 129]);
}

#[test]
fn edifact_rejects_bytes_outside_range() {
    assert_eq!(
        encode_data(b"a", Scheme::Edifact, SymbolSize::Min),
        Err(DataEncodingError::UnsupportedCharacter)
    );
    assert_eq!(
        encode_data(b"\x1e", Scheme::Edifact, SymbolSize::Min),
        Err(DataEncodingError::UnsupportedCharacter)
    );
}

#[test]
fn base256_empty_chain() {
    assert_eq!(enc(b"", Scheme::Base256), vec![231, 44, 129]);
}

#[test]
fn base256_short_chain_perfect_length() {
    assert_eq!(
        enc(b"\x01\x02\x03", Scheme::Base256),
        vec![231, 47, 194, 89, 239]
    );
}

#[test]
fn base256_short_chain_with_padding() {
    assert_eq!(
        enc(b"\x01\x02\x03\x04", Scheme::Base256),
        vec![231, 48, 194, 89, 239, 134, 129, 56]
    );
}

#[test]
fn base256_randomizes_payload_and_header() {
    assert_eq!(
        enc(b"\xab\xe4\xf6\xfc\xe9\xbb", Scheme::Base256),
        vec![231, 50, 108, 59, 226, 126, 1, 104]
    );
}

// Reads a Base 256 chain back out of the codeword stream by undoing the
// randomization; mirrors what a decoder does with the length header.
fn read_base256_chain(cw: &[u8]) -> Vec<u8> {
    assert_eq!(cw[0], 231);
    let h0 = unrandomize_255_state(cw[1], 2);
    let (start, length) = if h0 == 0 {
        (2, cw.len() - 2)
    } else if h0 <= 249 {
        (2, h0 as usize)
    } else {
        let h1 = unrandomize_255_state(cw[2], 3);
        (3, (h0 as usize - 249) * 250 + h1 as usize)
    };
    (0..length)
        .map(|i| unrandomize_255_state(cw[start + i], start + i + 1))
        .collect()
}

#[test]
fn base256_header_grows_at_250_values() {
    let data = vec![0xAA; 249];
    let (cw, _) = encode_data(&data, Scheme::Base256, SymbolSize::Min).unwrap();
    assert_eq!(unrandomize_255_state(cw[1], 2), 249);
    assert_eq!(unrandomize_255_state(cw[2], 3), 0xAA);

    let data = vec![0xAA; 250];
    let (cw, _) = encode_data(&data, Scheme::Base256, SymbolSize::Min).unwrap();
    assert_eq!(unrandomize_255_state(cw[1], 2), 250);
    assert_eq!(unrandomize_255_state(cw[2], 3), 0);
    assert_eq!(unrandomize_255_state(cw[3], 4), 0xAA);
}

#[test]
fn base256_perfect_fit_collapses_header() {
    // 278 bytes fill Square64 (280 data words) behind a one byte header
    let data: Vec<u8> = (0..278usize).map(|i| (i * 3 % 256) as u8).collect();
    let (cw, size) = encode_data(&data, Scheme::Base256, SymbolSize::Min).unwrap();
    assert_eq!(size, SymbolSize::Square64);
    assert_eq!(cw.len(), 280);
    assert_eq!(unrandomize_255_state(cw[1], 2), 0);
    assert_eq!(read_base256_chain(&cw), data);
}

#[test]
fn base256_chain_reads_back() {
    for n in [1usize, 5, 100, 249, 250, 251, 278, 300] {
        let data: Vec<u8> = (0..n).map(|i| (i % 251) as u8).collect();
        let (cw, size) = encode_data(&data, Scheme::Base256, SymbolSize::Min).unwrap();
        assert_eq!(cw.len(), size.num_data_codewords().unwrap(), "length {}", n);
        assert_eq!(read_base256_chain(&cw), data, "length {}", n);
    }
}

#[test]
fn base256_too_long_for_any_symbol() {
    let data = vec![0u8; 1600];
    assert_eq!(
        encode_data(&data, Scheme::Base256, SymbolSize::Min),
        Err(DataEncodingError::TooMuchData)
    );
}

#[test]
fn ascii_too_long_for_any_symbol() {
    let data = vec![b'A'; 1600];
    assert_eq!(
        encode_data(&data, Scheme::Ascii, SymbolSize::Min),
        Err(DataEncodingError::TooMuchData)
    );
}

fn check_fill(data: &[u8], scheme: Scheme) {
    let (cw, size) = encode_data(data, scheme, SymbolSize::Min).unwrap();
    assert_eq!(
        cw.len(),
        size.num_data_codewords().unwrap(),
        "{:?}, {} input bytes",
        scheme,
        data.len()
    );
}

#[test]
fn output_always_fills_the_symbol() {
    for n in 0usize..40 {
        let digits: Vec<u8> = (0..n).map(|i| b'0' + (i % 10) as u8).collect();
        check_fill(&digits, Scheme::Ascii);

        let upper: Vec<u8> = (0..n).map(|i| b'A' + (i % 26) as u8).collect();
        check_fill(&upper, Scheme::C40);
        check_fill(&upper, Scheme::X12);
        check_fill(&upper, Scheme::Edifact);

        let lower: Vec<u8> = (0..n).map(|i| b'a' + (i % 26) as u8).collect();
        check_fill(&lower, Scheme::Text);

        let raw: Vec<u8> = (0..n).map(|i| (i * 7) as u8).collect();
        check_fill(&raw, Scheme::Base256);
    }
}

#[test]
fn latch_codeword_leads_every_non_ascii_chain() {
    assert_eq!(enc(b"A1", Scheme::C40)[0], 230);
    assert_eq!(enc(b"A1", Scheme::Text)[0], 239);
    assert_eq!(enc(b"A1", Scheme::X12)[0], 238);
    assert_eq!(enc(b"A1", Scheme::Edifact)[0], 240);
    assert_eq!(enc(b"A1", Scheme::Base256)[0], 231);
}

#[test]
fn error_classification() {
    assert!(DataEncodingError::TooMuchData.is_input_error());
    assert!(DataEncodingError::UnsupportedCharacter.is_input_error());
    assert!(DataEncodingError::UnlatchOutsideTriplet.is_input_error());
    assert!(!DataEncodingError::Internal("x").is_input_error());
}
