/*!
# Sequence encoding
Maps short {A,C,G,T} sequences onto dense decimal integer keys, one digit per symbol (A=1, C=2, G=3, T=4), most significant first.
Keys are used by `EncodedStutterTable` so the single-motif path can look windows up without building strings.

## Example usage
```rust
use rfl::encoding::{decode, encode};

let key = encode(b"CAG").unwrap();
assert_eq!(key, 213);
assert_eq!(decode(key).unwrap(), b"CAG".to_vec());
```
*/
use crate::data_types::nucleotide::Nucleotide;
use crate::errors::RflError;

/// Longest sequence we will encode; this bounds motif length to 5 since tables cover `2 * len - 1`
pub const MAX_ENCODED_LENGTH: usize = 9;

/// Encodes a sequence into its integer key.
/// # Arguments
/// * `sequence` - the ASCII sequence, at most `MAX_ENCODED_LENGTH` long; the empty sequence encodes to 0
/// # Errors
/// * if the sequence is longer than `MAX_ENCODED_LENGTH`
/// * if the sequence contains a non-ACGT byte
pub fn encode(sequence: &[u8]) -> Result<u64, RflError> {
    if sequence.len() > MAX_ENCODED_LENGTH {
        return Err(RflError::EncodingOverflow {
            length: sequence.len(),
            max_length: MAX_ENCODED_LENGTH
        });
    }

    let mut key = 0;
    for (position, &b) in sequence.iter().enumerate() {
        let digit = match Nucleotide::from_byte(b) {
            Some(n) => n.digit(),
            None => return Err(RflError::UnsupportedSymbol { symbol: b as char, position })
        };
        key = key * 10 + digit as u64;
    }
    Ok(key)
}

/// Decodes an integer key back into its sequence.
/// The key 0 decodes to the empty sequence.
/// # Errors
/// * if any decimal digit of the key is not in 1-4
pub fn decode(key: u64) -> Result<Vec<u8>, RflError> {
    let mut sequence = vec![];
    let mut remainder = key;
    while remainder > 0 {
        let digit = (remainder % 10) as u8;
        let nuc = Nucleotide::from_digit(digit).ok_or(RflError::InvalidEncodedKey { key })?;
        sequence.push(nuc.as_byte());
        remainder /= 10;
    }
    sequence.reverse();
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_encode() {
        assert_eq!(encode(b"").unwrap(), 0);
        assert_eq!(encode(b"A").unwrap(), 1);
        assert_eq!(encode(b"T").unwrap(), 4);
        assert_eq!(encode(b"ACTTG").unwrap(), 12443);
        assert_eq!(encode(b"TTTTTTTTT").unwrap(), 444_444_444);
    }

    #[test]
    fn test_encode_errors() {
        assert_eq!(
            encode(b"ACGTACGTAC").unwrap_err(),
            RflError::EncodingOverflow { length: 10, max_length: MAX_ENCODED_LENGTH }
        );
        assert_eq!(
            encode(b"ACGU").unwrap_err(),
            RflError::UnsupportedSymbol { symbol: 'U', position: 3 }
        );
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode(105).unwrap_err(), RflError::InvalidEncodedKey { key: 105 });
        assert_eq!(decode(15).unwrap_err(), RflError::InvalidEncodedKey { key: 15 });
        assert_eq!(decode(0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_bijective_short() {
        // every sequence up to length 5
        for length in 1..=5 {
            for seq in (0..length).map(|_| b"ACGT".iter().copied()).multi_cartesian_product() {
                let key = encode(&seq).unwrap();
                assert_eq!(decode(key).unwrap(), seq);
            }
        }
    }

    #[test]
    fn test_bijective_max_length() {
        for seq in [b"ACGTACGTA", b"TTTTTTTTT", b"AAAAAAAAA", b"GATTACAGC"] {
            let key = encode(seq).unwrap();
            assert_eq!(decode(key).unwrap(), seq.to_vec());
        }
    }

    #[test]
    fn test_distinct_keys() {
        // keys of different lengths never collide because 0 is never a digit
        let keys: Vec<u64> = (1..=4)
            .flat_map(|length| (0..length).map(|_| b"ACGT".iter().copied()).multi_cartesian_product())
            .map(|seq| encode(&seq).unwrap())
            .collect();
        let total = keys.len();
        assert_eq!(keys.into_iter().unique().count(), total);
    }
}
