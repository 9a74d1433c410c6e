use phf::{Map, phf_map};
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unsupported residue code: '{code}'")]
pub struct UnsupportedResidueError {
    pub code: String,
}

impl UnsupportedResidueError {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResidueType {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // Alanine (ALA / A)
    Glycine,    // Glycine (GLY / G)
    Isoleucine, // Isoleucine (ILE / I)
    Leucine,    // Leucine (LEU / L)
    Proline,    // Proline (PRO / P)
    Valine,     // Valine (VAL / V)

    // --- Aromatic ---
    Phenylalanine, // Phenylalanine (PHE / F)
    Tryptophan,    // Tryptophan (TRP / W)
    Tyrosine,      // Tyrosine (TYR / Y)

    // --- Polar, Uncharged ---
    Asparagine, // Asparagine (ASN / N)
    Cysteine,   // Cysteine (CYS / C)
    Glutamine,  // Glutamine (GLN / Q)
    Serine,     // Serine (SER / S)
    Threonine,  // Threonine (THR / T)
    Methionine, // Methionine (MET / M)

    // --- Positively Charged (Basic) ---
    Arginine,  // Arginine (ARG / R)
    Histidine, // Histidine (HIS / H)
    Lysine,    // Lysine (LYS / K)

    // --- Negatively Charged (Acidic) ---
    AsparticAcid, // Aspartic Acid (ASP / D)
    GlutamicAcid, // Glutamic Acid (GLU / E)
}

static THREE_LETTER_CODES: Map<&'static str, ResidueType> = phf_map! {
    "ALA" => ResidueType::Alanine,
    "ARG" => ResidueType::Arginine,
    "ASN" => ResidueType::Asparagine,
    "ASP" => ResidueType::AsparticAcid,
    "CYS" => ResidueType::Cysteine,
    "GLN" => ResidueType::Glutamine,
    "GLU" => ResidueType::GlutamicAcid,
    "GLY" => ResidueType::Glycine,
    "HIS" => ResidueType::Histidine,
    "ILE" => ResidueType::Isoleucine,
    "LEU" => ResidueType::Leucine,
    "LYS" => ResidueType::Lysine,
    "MET" => ResidueType::Methionine,
    "PHE" => ResidueType::Phenylalanine,
    "PRO" => ResidueType::Proline,
    "SER" => ResidueType::Serine,
    "THR" => ResidueType::Threonine,
    "TRP" => ResidueType::Tryptophan,
    "TYR" => ResidueType::Tyrosine,
    "VAL" => ResidueType::Valine,
};

impl ResidueType {
    /// All 20 canonical residue types, in one-letter alphabetical order.
    pub const ALL: [ResidueType; 20] = [
        ResidueType::Alanine,
        ResidueType::Cysteine,
        ResidueType::AsparticAcid,
        ResidueType::GlutamicAcid,
        ResidueType::Phenylalanine,
        ResidueType::Glycine,
        ResidueType::Histidine,
        ResidueType::Isoleucine,
        ResidueType::Lysine,
        ResidueType::Leucine,
        ResidueType::Methionine,
        ResidueType::Asparagine,
        ResidueType::Proline,
        ResidueType::Glutamine,
        ResidueType::Arginine,
        ResidueType::Serine,
        ResidueType::Threonine,
        ResidueType::Valine,
        ResidueType::Tryptophan,
        ResidueType::Tyrosine,
    ];

    pub fn from_one_letter(code: char) -> Result<Self, UnsupportedResidueError> {
        match code.to_ascii_uppercase() {
            'A' => Ok(ResidueType::Alanine),
            'C' => Ok(ResidueType::Cysteine),
            'D' => Ok(ResidueType::AsparticAcid),
            'E' => Ok(ResidueType::GlutamicAcid),
            'F' => Ok(ResidueType::Phenylalanine),
            'G' => Ok(ResidueType::Glycine),
            'H' => Ok(ResidueType::Histidine),
            'I' => Ok(ResidueType::Isoleucine),
            'K' => Ok(ResidueType::Lysine),
            'L' => Ok(ResidueType::Leucine),
            'M' => Ok(ResidueType::Methionine),
            'N' => Ok(ResidueType::Asparagine),
            'P' => Ok(ResidueType::Proline),
            'Q' => Ok(ResidueType::Glutamine),
            'R' => Ok(ResidueType::Arginine),
            'S' => Ok(ResidueType::Serine),
            'T' => Ok(ResidueType::Threonine),
            'V' => Ok(ResidueType::Valine),
            'W' => Ok(ResidueType::Tryptophan),
            'Y' => Ok(ResidueType::Tyrosine),
            other => Err(UnsupportedResidueError::new(other.to_string())),
        }
    }

    pub fn one_letter(&self) -> char {
        match self {
            ResidueType::Alanine => 'A',
            ResidueType::Cysteine => 'C',
            ResidueType::AsparticAcid => 'D',
            ResidueType::GlutamicAcid => 'E',
            ResidueType::Phenylalanine => 'F',
            ResidueType::Glycine => 'G',
            ResidueType::Histidine => 'H',
            ResidueType::Isoleucine => 'I',
            ResidueType::Lysine => 'K',
            ResidueType::Leucine => 'L',
            ResidueType::Methionine => 'M',
            ResidueType::Asparagine => 'N',
            ResidueType::Proline => 'P',
            ResidueType::Glutamine => 'Q',
            ResidueType::Arginine => 'R',
            ResidueType::Serine => 'S',
            ResidueType::Threonine => 'T',
            ResidueType::Valine => 'V',
            ResidueType::Tryptophan => 'W',
            ResidueType::Tyrosine => 'Y',
        }
    }

    pub fn three_letter(&self) -> &'static str {
        match self {
            ResidueType::Alanine => "ALA",
            ResidueType::Arginine => "ARG",
            ResidueType::Asparagine => "ASN",
            ResidueType::AsparticAcid => "ASP",
            ResidueType::Cysteine => "CYS",
            ResidueType::Glutamine => "GLN",
            ResidueType::GlutamicAcid => "GLU",
            ResidueType::Glycine => "GLY",
            ResidueType::Histidine => "HIS",
            ResidueType::Isoleucine => "ILE",
            ResidueType::Leucine => "LEU",
            ResidueType::Lysine => "LYS",
            ResidueType::Methionine => "MET",
            ResidueType::Phenylalanine => "PHE",
            ResidueType::Proline => "PRO",
            ResidueType::Serine => "SER",
            ResidueType::Threonine => "THR",
            ResidueType::Tryptophan => "TRP",
            ResidueType::Tyrosine => "TYR",
            ResidueType::Valine => "VAL",
        }
    }

    /// Formal side-chain charge at physiological pH.
    pub fn charge(&self) -> i8 {
        match self {
            ResidueType::AsparticAcid | ResidueType::GlutamicAcid => -1,
            ResidueType::Arginine | ResidueType::Histidine | ResidueType::Lysine => 1,
            _ => 0,
        }
    }
}

impl FromStr for ResidueType {
    type Err = UnsupportedResidueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() == 1 {
            return Self::from_one_letter(trimmed.chars().next().unwrap());
        }
        THREE_LETTER_CODES
            .get(trimmed.to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| UnsupportedResidueError::new(trimmed))
    }
}
