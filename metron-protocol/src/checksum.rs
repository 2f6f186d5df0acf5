//! Additive line checksum.
//!
//! Both directions of the link guard their payloads with the same scheme:
//! the wrapping u8 sum of every payload byte, i.e. the byte sum modulo 256.
//! It catches the dropped/garbled characters a 9600-baud hookup actually
//! produces; it is not an integrity mechanism against an adversary.

/// Wrapping u8 sum of all bytes in `data`.
pub fn line_checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |sum, &byte| sum.wrapping_add(byte))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sums_ascii_bytes_mod_256() {
        // 'T'+':'+'2'+'3'+' '+'H'+':'+'4'+'5' = 510, 510 % 256 = 254
        assert_eq!(line_checksum(b"T:23 H:45"), 254);
    }

    #[test]
    fn test_empty_input_sums_to_zero() {
        assert_eq!(line_checksum(b""), 0);
    }

    #[test]
    fn test_wraps_instead_of_overflowing() {
        assert_eq!(line_checksum(&[0xFF, 0x02]), 1);
        assert_eq!(line_checksum(&[0x80, 0x80]), 0);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let data = b"FREQ:1234";
        assert_eq!(line_checksum(data), line_checksum(data));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Matches a wide-accumulator reference reduced mod 256.
            #[test]
            fn test_matches_u32_reference(data in proptest::collection::vec(any::<u8>(), 0..256)) {
                let reference: u32 = data.iter().map(|&b| u32::from(b)).sum();
                prop_assert_eq!(line_checksum(&data), (reference % 256) as u8);
            }

            /// Sum of parts equals sum of the whole.
            #[test]
            fn test_concatenation_adds(
                a in proptest::collection::vec(any::<u8>(), 0..64),
                b in proptest::collection::vec(any::<u8>(), 0..64),
            ) {
                let mut whole = a.clone();
                whole.extend_from_slice(&b);
                prop_assert_eq!(
                    line_checksum(&whole),
                    line_checksum(&a).wrapping_add(line_checksum(&b))
                );
            }
        }
    }
}
