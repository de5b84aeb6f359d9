//! Public protein accessions: `MGYP` followed by the decimal surrogate key.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const PROTEIN_PREFIX: &str = "MGYP";

/// Canonical digits only: no sign, no padding. Keeps decode/encode lossless.
static CANONICAL_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0|[1-9][0-9]*)$").expect("static regex"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessionError {
    #[error("accession '{0}' does not start with MGYP")]
    MissingPrefix(String),
    #[error("accession '{0}' does not end in a canonical numeric id")]
    InvalidNumber(String),
}

/// A decoded `MGYP<id>` accession. The inner value is the `protein.id` key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct ProteinAccession(i64);

impl ProteinAccession {
    pub fn id(&self) -> i64 {
        self.0
    }
}

impl FromStr for ProteinAccession {
    type Err = AccessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(PROTEIN_PREFIX)
            .ok_or_else(|| AccessionError::MissingPrefix(s.to_string()))?;
        if !CANONICAL_ID.is_match(digits) {
            return Err(AccessionError::InvalidNumber(s.to_string()));
        }
        let id: i64 = digits
            .parse()
            .map_err(|_| AccessionError::InvalidNumber(s.to_string()))?;
        Ok(ProteinAccession(id))
    }
}

impl TryFrom<String> for ProteinAccession {
    type Error = AccessionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ProteinAccession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PROTEIN_PREFIX, self.0)
    }
}
