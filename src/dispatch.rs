//! Genome resolution and genotype dispatch.
//!
//! Glue between the parsed request and the [`GenomeStore`]: a genome id is
//! resolved to its record, then the query's locations are sent to the store
//! in a single lookup. Reconstruction into a sequence only happens for range
//! queries.

use crate::{
    Error, Result,
    query::Query,
    storage::{GenomeStore, check_sequence_window},
    types::{Genome, Genotype, Sequence},
};
use serde::Serialize;

/// Result of a genotype query, serialized as either a plain list of
/// genotypes or a sequence object.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GenotypesResult {
    Genotypes(Vec<Genotype>),
    Sequence(Sequence),
}

/// Parse a path identifier as a decimal integer.
pub fn parse_id(raw: &str) -> Result<u64> {
    raw.parse::<u64>().map_err(|e| Error::parse(raw, e))
}

pub async fn resolve_genome(store: &dyn GenomeStore, raw_id: &str) -> Result<Genome> {
    let id = parse_id(raw_id)?;
    store.get_genome(id).await
}

/// Look up genotypes for `query` and, when `as_sequence` is set and the
/// query is a range, reconstruct the sequence instead.
pub async fn dispatch_genotypes(
    store: &dyn GenomeStore,
    genome: &Genome,
    query: &Query,
    as_sequence: bool,
) -> Result<GenotypesResult> {
    let locations = query.locations();
    let reconstruct = as_sequence && query.is_range();
    if reconstruct {
        check_sequence_window(locations)?;
    }

    let genotypes = store
        .query_genotypes(&genome.file_path, genome.sample_index, locations)
        .await?;

    if genotypes.len() != locations.len() {
        return Err(Error::Store(format!(
            "store returned {} genotypes for {} locations",
            genotypes.len(),
            locations.len()
        )));
    }

    if reconstruct {
        let sequence = store.genotypes_to_sequence(&genotypes, locations).await?;
        return Ok(GenotypesResult::Sequence(sequence));
    }

    Ok(GenotypesResult::Genotypes(genotypes))
}
