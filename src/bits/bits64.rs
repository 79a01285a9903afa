//! Field helpers for 64-bit words.

const WORD: u32 = u64::BITS;

/// Contiguous run of `size` one-bits starting at bit `start`.
///
/// # Panics
///
/// If `start + size` exceeds 64.
#[inline]
#[must_use]
pub fn mask(start: u32, size: u32) -> u64 {
    assert!(start <= WORD && size <= WORD - start, "mask out of range: start={start} size={size}");
    if size == WORD {
        u64::MAX
    } else {
        ((1u64 << size) - 1) << start
    }
}

/// Field of `size` bits starting at `start`, shifted down to bit 0.
#[inline]
#[must_use]
pub fn extract(bits: u64, start: u32, size: u32) -> u64 {
    (bits & mask(start, size)) >> start
}

/// Packs `(value, width)` pairs into one word, the first pair in the lowest bits.
///
/// # Panics
///
/// If a width is outside `1..64`, a value does not fit its width, or the
/// widths add up to more than 64 bits.
#[must_use]
pub fn pack(fields: &[(u64, u32)]) -> u64 {
    let mut word = 0;
    let mut shift = 0;
    for &(value, width) in fields {
        assert!((1..WORD).contains(&width), "field width {width} out of range");
        assert!(WORD - value.leading_zeros() <= width, "value {value:#x} wider than {width} bits");
        assert!(shift + width <= WORD, "fields exceed 64 bits");
        word |= value << shift;
        shift += width;
    }
    word
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mask_edges() {
        assert_eq!(mask(0, 64), u64::MAX);
        assert_eq!(mask(64, 0), 0);
        assert_eq!(mask(16, 9), 0x01ff_0000);
        assert_eq!(mask(63, 1), 1 << 63);
    }

    #[test]
    fn test_pack_two_halves() {
        assert_eq!(pack(&[(0xdead, 32), (0xbeef, 32)]), 0x0000_beef_0000_dead);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_pack_full_width_field() {
        let _ = pack(&[(1, 64)]);
    }

    proptest! {
        #[test]
        fn extract_inverts_pack(lo in any::<u32>(), hi in 0u64..(1 << 31)) {
            let word = pack(&[(u64::from(lo), 32), (hi, 31)]);
            prop_assert_eq!(extract(word, 0, 32), u64::from(lo));
            prop_assert_eq!(extract(word, 32, 31), hi);
        }

        #[test]
        fn mask_is_contiguous(start in 0u32..64, size in 1u32..=64) {
            prop_assume!(start + size <= 64);
            let m = mask(start, size);
            prop_assert_eq!(m.trailing_zeros(), start);
            prop_assert_eq!(m.count_ones(), size);
        }
    }
}
