
use serde::{Deserialize, Serialize};

use crate::data_types::nucleotide::validate_sequence;
use crate::errors::RflError;

/// A tandem-repeat unit and the base costs of starting a stutter event on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Motif {
    /// The repeat unit, ASCII over {A,C,G,T}
    sequence: Vec<u8>,
    /// Cost of initiating an insertion-side (expansion) stutter event
    forward_cost: f64,
    /// Cost of initiating a deletion-side (contraction) stutter event
    backward_cost: f64
}

impl Motif {
    /// Constructor
    /// # Arguments
    /// * `sequence` - the repeat unit
    /// * `forward_cost` - base cost of a forward (expansion) stutter
    /// * `backward_cost` - base cost of a backward (contraction) stutter
    /// # Errors
    /// * if the sequence is empty or contains non-ACGT symbols
    /// * if either stutter cost is negative or not finite
    pub fn new(sequence: &[u8], forward_cost: f64, backward_cost: f64) -> Result<Self, RflError> {
        if sequence.is_empty() {
            return Err(RflError::EmptyMotif);
        }
        validate_sequence(sequence)?;

        for cost in [forward_cost, backward_cost] {
            if !cost.is_finite() || cost < 0.0 {
                return Err(RflError::InvalidStutterCost {
                    motif: String::from_utf8_lossy(sequence).into_owned(),
                    cost
                });
            }
        }

        Ok(Self {
            sequence: sequence.to_vec(),
            forward_cost,
            backward_cost
        })
    }

    /// The longest window this motif's stutter table covers, `2 * len - 1`
    pub fn peek(&self) -> usize {
        2 * self.sequence.len() - 1
    }

    /// The motif as a String, mostly for labels and logging
    pub fn label(&self) -> String {
        String::from_utf8_lossy(&self.sequence).into_owned()
    }

    // getters
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn forward_cost(&self) -> f64 {
        self.forward_cost
    }

    pub fn backward_cost(&self) -> f64 {
        self.backward_cost
    }
}

/// Serialized form of a motif, as found in a motif TSV file
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MotifRecord {
    pub motif: String,
    pub forward_cost: f64,
    pub backward_cost: f64
}

impl TryFrom<MotifRecord> for Motif {
    type Error = RflError;

    fn try_from(record: MotifRecord) -> Result<Self, Self::Error> {
        Motif::new(record.motif.as_bytes(), record.forward_cost, record.backward_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let motif = Motif::new(b"CAG", 0.5, 0.25).unwrap();
        assert_eq!(motif.sequence(), b"CAG");
        assert_eq!(motif.len(), 3);
        assert_eq!(motif.peek(), 5);
        assert_eq!(motif.label(), "CAG");
        assert_eq!(motif.forward_cost(), 0.5);
        assert_eq!(motif.backward_cost(), 0.25);

        let motif = Motif::new(b"A", 0.0, 0.0).unwrap();
        assert_eq!(motif.peek(), 1);
    }

    #[test]
    fn test_invalid() {
        assert_eq!(Motif::new(b"", 0.5, 0.5).unwrap_err(), RflError::EmptyMotif);
        assert_eq!(
            Motif::new(b"CNG", 0.5, 0.5).unwrap_err(),
            RflError::UnsupportedSymbol { symbol: 'N', position: 1 }
        );
        assert_eq!(
            Motif::new(b"CAG", -0.5, 0.5).unwrap_err(),
            RflError::InvalidStutterCost { motif: "CAG".to_string(), cost: -0.5 }
        );
        assert!(Motif::new(b"CAG", 0.5, f64::INFINITY).is_err());
    }

    #[test]
    fn test_from_record() {
        let record = MotifRecord { motif: "AGAT".to_string(), forward_cost: 1.5, backward_cost: 0.5 };
        let motif: Motif = record.try_into().unwrap();
        assert_eq!(motif, Motif::new(b"AGAT", 1.5, 0.5).unwrap());
    }
}
