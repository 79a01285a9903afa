//! Field helpers for 32-bit words.

const WORD: u32 = u32::BITS;

/// Contiguous run of `size` one-bits starting at bit `start`.
///
/// # Panics
///
/// If `start + size` exceeds 32.
#[inline]
#[must_use]
pub fn mask(start: u32, size: u32) -> u32 {
    assert!(start <= WORD && size <= WORD - start, "mask out of range: start={start} size={size}");
    if size == WORD {
        u32::MAX
    } else {
        ((1u32 << size) - 1) << start
    }
}

/// Field of `size` bits starting at `start`, shifted down to bit 0.
#[inline]
#[must_use]
pub fn extract(bits: u32, start: u32, size: u32) -> u32 {
    (bits & mask(start, size)) >> start
}

/// Packs `(value, width)` pairs into one word, the first pair in the lowest bits.
///
/// # Panics
///
/// If a width is outside `1..32`, a value does not fit its width, or the
/// widths add up to more than 32 bits.
#[must_use]
pub fn pack(fields: &[(u32, u32)]) -> u32 {
    let mut word = 0;
    let mut shift = 0;
    for &(value, width) in fields {
        assert!((1..WORD).contains(&width), "field width {width} out of range");
        assert!(WORD - value.leading_zeros() <= width, "value {value:#x} wider than {width} bits");
        assert!(shift + width <= WORD, "fields exceed 32 bits");
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
        assert_eq!(mask(0, 0), 0);
        assert_eq!(mask(0, 32), u32::MAX);
        assert_eq!(mask(32, 0), 0);
        assert_eq!(mask(4, 2), 0b11_0000);
        assert_eq!(mask(31, 1), 0x8000_0000);
    }

    #[test]
    #[should_panic(expected = "mask out of range")]
    fn test_mask_past_word() {
        let _ = mask(30, 3);
    }

    #[test]
    fn test_pack_card_layout() {
        // rank 5 in the low nibble, color 2 above it
        assert_eq!(pack(&[(5, 4), (2, 2)]), 0b10_0101);
    }

    #[test]
    #[should_panic(expected = "wider than")]
    fn test_pack_value_too_wide() {
        let _ = pack(&[(0b100, 2)]);
    }

    #[test]
    #[should_panic(expected = "exceed 32 bits")]
    fn test_pack_too_many_bits() {
        let _ = pack(&[(1, 20), (1, 20)]);
    }

    proptest! {
        #[test]
        fn mask_has_size_ones(start in 0u32..=32, size in 0u32..=32) {
            prop_assume!(start + size <= 32);
            prop_assert_eq!(mask(start, size).count_ones(), size);
        }

        #[test]
        fn extract_reads_back_packed_fields(a in 0u32..(1 << 6), b in 0u32..(1 << 10), c in 0u32..(1 << 15)) {
            let word = pack(&[(a, 6), (b, 10), (c, 15)]);
            prop_assert_eq!(extract(word, 0, 6), a);
            prop_assert_eq!(extract(word, 6, 10), b);
            prop_assert_eq!(extract(word, 16, 15), c);
        }
    }
}
