//! Normalized genomic coordinates.
//!
//! Every location handled by the service is a zero-based, half-open interval
//! `[start, end)` on a named chromosome, whatever form the client used to
//! describe it. User-facing coordinates are 1-based:
//!
//! - a single position `p` becomes `[p - 1, p)`
//! - an inclusive range `[s, e]` becomes `[s - 1, e)`

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub chromosome: String,
    pub start: u64,
    pub end: u64,
}

impl Location {
    /// Build a zero-based half-open location, enforcing `start < end` and a
    /// non-empty chromosome name.
    pub fn new(chromosome: impl Into<String>, start: u64, end: u64) -> Result<Self> {
        let chromosome = chromosome.into();
        if chromosome.is_empty() {
            return Err(Error::validation("Invalid locations: empty chromosome"));
        }
        if start >= end {
            return Err(Error::validation(format!(
                "Invalid locations: {}:{}-{} is empty",
                chromosome, start, end
            )));
        }
        Ok(Self {
            chromosome,
            start,
            end,
        })
    }

    /// Single 1-based position.
    pub fn from_point(chromosome: &str, position: u64) -> Result<Self> {
        let start = one_based_to_zero_based(chromosome, position)?;
        Self::new(chromosome, start, position)
    }

    /// Inclusive 1-based range.
    pub fn from_range(chromosome: &str, start: u64, end: u64) -> Result<Self> {
        let zero_start = one_based_to_zero_based(chromosome, start)?;
        Self::new(chromosome, zero_start, end)
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

fn one_based_to_zero_based(chromosome: &str, position: u64) -> Result<u64> {
    position.checked_sub(1).ok_or_else(|| {
        Error::validation(format!(
            "Invalid locations: {}:{} is not a 1-based position",
            chromosome, position
        ))
    })
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chromosome, self.start, self.end)
    }
}
