use super::c40::{self, ValueBuf};

/// Expand one Text input byte. Text is the C40 table with the upper and
/// lower case ranges swapped.
pub(super) fn push_values(buf: &mut ValueBuf, ch: u8) {
    match ch {
        ch @ 128..=255 => {
            buf.push(c40::SHIFT2);
            buf.push(c40::UPPER_SHIFT);
            push_low_ascii(buf, ch - 128);
        }
        ch => push_low_ascii(buf, ch),
    }
}

fn push_low_ascii(buf: &mut ValueBuf, ch: u8) {
    // flipping bit 5 trades the two letter ranges; everything else is C40
    let case_swapped = if ch.is_ascii_alphabetic() { ch ^ 0x20 } else { ch };
    c40::push_low_ascii(buf, case_swapped);
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    fn vals(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        for ch in data.iter().copied() {
            let mut buf = ValueBuf::new();
            push_values(&mut buf, ch);
            out.extend(buf.iter());
        }
        out
    }

    #[test]
    fn lower_case_is_the_basic_set() {
        let out: Vec<u8> = (14..=39).collect();
        assert_eq!(vals(b"abcdefghijklmnopqrstuvwxyz"), out);
    }

    #[test]
    fn upper_case_needs_shift3() {
        assert_eq!(vals(b"AZ"), [2, 1, 2, 26]);
    }

    #[test]
    fn backtick_and_high_shift3() {
        // 96 maps to shift 3 value 0, 123..=127 keep their C40 positions
        assert_eq!(vals(b"`{\x7f"), [2, 0, 2, 27, 2, 31]);
    }
}
