//! Haplotype reconstruction from variant calls.
//!
//! Each haplotype walks the queried locations left to right. Positions
//! covered by a call take the bases of the allele that haplotype carries;
//! positions no call covers are unknown and rendered as `N`. Alternate
//! alleles are emitted whole, so indels change the haplotype length.

use crate::{
    Error, Result,
    location::Location,
    types::{Genotype, Sequence, VariantCall},
};

/// Largest total span, in bases, that may be reconstructed in one request.
pub const MAX_SEQUENCE_WINDOW: u64 = 10_000_000;

const UNKNOWN_BASE: char = 'N';
const SPANNING_DELETION: &str = "*";

/// Reject location sets too large to render as haplotype strings.
pub fn check_sequence_window(locations: &[Location]) -> Result<()> {
    let total = locations
        .iter()
        .fold(0u64, |acc, location| acc.saturating_add(location.len()));
    if total > MAX_SEQUENCE_WINDOW {
        return Err(Error::validation(format!(
            "Invalid locations: sequence window of {} bases exceeds the limit of {}",
            total, MAX_SEQUENCE_WINDOW
        )));
    }
    Ok(())
}

pub fn genotypes_to_sequence(genotypes: &[Genotype], locations: &[Location]) -> Result<Sequence> {
    check_sequence_window(locations)?;
    if genotypes.len() != locations.len() {
        return Err(Error::Store(format!(
            "{} genotypes do not align with {} locations",
            genotypes.len(),
            locations.len()
        )));
    }

    let ploidy = genotypes
        .iter()
        .flat_map(|g| &g.calls)
        .map(|c| c.alleles.len())
        .max()
        .unwrap_or(1)
        .max(1);

    let mut haplotypes = vec![String::new(); ploidy];
    for (genotype, location) in genotypes.iter().zip(locations) {
        for (index, haplotype) in haplotypes.iter_mut().enumerate() {
            render(haplotype, &genotype.calls, location, index);
        }
    }

    Ok(Sequence {
        locations: locations.to_vec(),
        haplotypes,
    })
}

fn render(out: &mut String, calls: &[VariantCall], location: &Location, haplotype: usize) {
    let mut cursor = location.start;

    for call in calls {
        if call.end <= cursor || call.start >= location.end {
            continue;
        }
        // Overlaps a call that was already rendered
        if call.start < cursor && cursor > location.start {
            continue;
        }

        let start = call.start.max(cursor);
        let end = call.end.min(location.end);
        pad(out, cursor, start);

        match carried_allele(call, haplotype) {
            Some(allele) if allele == call.reference => {
                for pos in start..end {
                    let offset = (pos - call.start) as usize;
                    let base = call.reference.as_bytes().get(offset).map(|&b| b as char);
                    out.push(base.unwrap_or(UNKNOWN_BASE));
                }
            }
            Some(SPANNING_DELETION) => {}
            Some(allele) if call.start >= location.start && is_bases(allele) => {
                out.push_str(allele);
            }
            _ => pad(out, start, end),
        }

        cursor = end;
    }

    pad(out, cursor, location.end);
}

/// Haploid calls apply their single allele to every haplotype.
fn carried_allele(call: &VariantCall, haplotype: usize) -> Option<&str> {
    call.alleles
        .get(haplotype)
        .or_else(|| call.alleles.first())
        .and_then(|a| a.as_deref())
}

fn is_bases(allele: &str) -> bool {
    !allele.is_empty()
        && allele
            .bytes()
            .all(|b| matches!(b.to_ascii_uppercase(), b'A' | b'C' | b'G' | b'T' | b'N'))
}

fn pad(out: &mut String, from: u64, to: u64) {
    for _ in from..to {
        out.push(UNKNOWN_BASE);
    }
}
