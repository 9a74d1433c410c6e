use super::residue::{ResidueType, UnsupportedResidueError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Sequence must contain at least one residue")]
    Empty,

    #[error(transparent)]
    UnsupportedResidue(#[from] UnsupportedResidueError),
}

/// An ordered, immutable peptide sequence over the 20 canonical residue
/// types.
///
/// Validation happens at construction: an empty input or any non-canonical
/// code fails fast, so every downstream consumer can rely on a well-formed,
/// non-empty residue list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sequence {
    residues: Vec<ResidueType>,
}

impl Sequence {
    pub fn new(residues: Vec<ResidueType>) -> Result<Self, SequenceError> {
        if residues.is_empty() {
            return Err(SequenceError::Empty);
        }
        Ok(Self { residues })
    }

    pub fn residues(&self) -> &[ResidueType] {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        // Construction rejects empty input, but the accessor keeps the
        // conventional pairing with `len`.
        self.residues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResidueType> {
        self.residues.iter()
    }
}

impl FromStr for Sequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let residues = s
            .trim()
            .chars()
            .map(ResidueType::from_one_letter)
            .collect::<Result<Vec<_>, _>>()?;
        Sequence::new(residues)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for residue in &self.residues {
            write!(f, "{}", residue.one_letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_one_letter_string() {
        let sequence: Sequence = "ACDEFG".parse().unwrap();
        assert_eq!(sequence.len(), 6);
        assert_eq!(sequence.residues()[0], ResidueType::Alanine);
        assert_eq!(sequence.residues()[5], ResidueType::Glycine);
    }

    #[test]
    fn rejects_empty_input_at_construction() {
        assert_eq!("".parse::<Sequence>().unwrap_err(), SequenceError::Empty);
        assert_eq!("   ".parse::<Sequence>().unwrap_err(), SequenceError::Empty);
        assert_eq!(
            Sequence::new(Vec::new()).unwrap_err(),
            SequenceError::Empty
        );
    }

    #[test]
    fn rejects_non_canonical_codes_with_offending_value() {
        let err = "ACXDE".parse::<Sequence>().unwrap_err();
        match err {
            SequenceError::UnsupportedResidue(inner) => assert_eq!(inner.code, "X"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn display_round_trips_the_input() {
        let input = "DAEFRHDSGYEVHHQKLVFFAEDVGSNKGAIIGLMVGGVVIA";
        let sequence: Sequence = input.parse().unwrap();
        assert_eq!(sequence.to_string(), input);
        assert_eq!(sequence.len(), 42);
    }

    #[test]
    fn lowercase_input_is_normalized() {
        let sequence: Sequence = "acdef".parse().unwrap();
        assert_eq!(sequence.to_string(), "ACDEF");
    }
}
