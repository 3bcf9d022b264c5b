
use strum_macros::{Display, EnumIter, EnumString};

use crate::errors::RflError;

/// The four-letter DNA alphabet that all costs, motifs, and tables are defined over.
/// The discriminant doubles as the encoding digit and the cost matrix index (0 is reserved for the empty symbol).
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Nucleotide {
    A = 1,
    C = 2,
    G = 3,
    T = 4
}

impl Nucleotide {
    /// Converts an ASCII byte into a nucleotide, returning None for anything outside {A,C,G,T}.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'A' => Some(Nucleotide::A),
            b'C' => Some(Nucleotide::C),
            b'G' => Some(Nucleotide::G),
            b'T' => Some(Nucleotide::T),
            _ => None
        }
    }

    /// Converts an encoding digit (1-4) back into a nucleotide.
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Nucleotide::A),
            2 => Some(Nucleotide::C),
            3 => Some(Nucleotide::G),
            4 => Some(Nucleotide::T),
            _ => None
        }
    }

    pub fn as_byte(&self) -> u8 {
        match self {
            Nucleotide::A => b'A',
            Nucleotide::C => b'C',
            Nucleotide::G => b'G',
            Nucleotide::T => b'T'
        }
    }

    /// The encoding digit, also the row/column of this symbol in a cost matrix.
    pub fn digit(&self) -> u8 {
        *self as u8
    }
}

/// Verifies that every byte of a sequence is in {A,C,G,T}.
/// # Arguments
/// * `sequence` - the ASCII sequence to check
/// # Errors
/// * if any byte is outside the alphabet, reporting the first offending position
pub fn validate_sequence(sequence: &[u8]) -> Result<(), RflError> {
    match sequence.iter().position(|&b| Nucleotide::from_byte(b).is_none()) {
        Some(position) => Err(RflError::UnsupportedSymbol {
            symbol: sequence[position] as char,
            position
        }),
        None => Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_conversions() {
        for nuc in Nucleotide::iter() {
            assert_eq!(Nucleotide::from_byte(nuc.as_byte()), Some(nuc));
            assert_eq!(Nucleotide::from_digit(nuc.digit()), Some(nuc));
            assert_eq!(nuc.to_string().parse::<Nucleotide>().unwrap(), nuc);
        }
        assert_eq!(Nucleotide::from_byte(b'N'), None);
        assert_eq!(Nucleotide::from_byte(b'a'), None);
        assert_eq!(Nucleotide::from_digit(0), None);
        assert_eq!(Nucleotide::from_digit(5), None);
    }

    #[test]
    fn test_alphabet_order() {
        let alphabet: Vec<u8> = Nucleotide::iter().map(|n| n.as_byte()).collect();
        assert_eq!(alphabet, b"ACGT".to_vec());
    }

    #[test]
    fn test_validate_sequence() {
        assert!(validate_sequence(b"").is_ok());
        assert!(validate_sequence(b"CAGCAGTTA").is_ok());
        assert_eq!(
            validate_sequence(b"CAGNAG").unwrap_err(),
            RflError::UnsupportedSymbol { symbol: 'N', position: 3 }
        );
        assert_eq!(
            validate_sequence(b"cag").unwrap_err(),
            RflError::UnsupportedSymbol { symbol: 'c', position: 0 }
        );
    }
}
