//! Genome store abstraction.
//!
//! The query layer never touches variant files directly: ingestion, lookup
//! and sequence reconstruction all go through the [`GenomeStore`] trait, so a
//! different backend (or a test double) can be swapped in without touching
//! the request pipeline.
//!
//! # Implementations
//!
//! - [`LocalStore`] - in-memory store backed by VCF files on local disk
//!
//! # Example
//!
//! ```no_run
//! use genoquery::storage::{GenomeStore, LocalStore};
//!
//! # async fn run() -> genoquery::Result<()> {
//! let store = LocalStore::new(vec!["data/sample.vcf.gz".into()]);
//! store.init().await?;
//! let genomes = store.list_genomes().await?;
//! # Ok(())
//! # }
//! ```

mod local;
mod sequence;
mod vcf;

pub use local::LocalStore;
pub use sequence::{MAX_SEQUENCE_WINDOW, check_sequence_window, genotypes_to_sequence};

use crate::{
    Result,
    location::Location,
    types::{Genome, Genotype, Sequence},
};
use async_trait::async_trait;
use bytes::Bytes;

/// Storage backend owning genomes, variant calls and evidence records.
///
/// Implementations must be safe to call concurrently; the query layer holds
/// no locks of its own.
#[async_trait]
pub trait GenomeStore: Send + Sync {
    /// Prepare the store before the server starts accepting requests.
    async fn init(&self) -> Result<()>;

    /// Ingest a variant file, creating one genome per sample.
    async fn create_genomes(&self, file_path: &str) -> Result<Vec<Genome>>;

    async fn list_genomes(&self) -> Result<Vec<Genome>>;

    /// Look up a genome; a missing id is reported as [`crate::Error::NotFound`].
    async fn get_genome(&self, id: u64) -> Result<Genome>;

    /// Genotypes for `locations`, one per location and in the same order.
    async fn query_genotypes(
        &self,
        file_path: &str,
        sample_index: usize,
        locations: &[Location],
    ) -> Result<Vec<Genotype>>;

    /// Reconstruct haplotype sequences from genotypes aligned to `locations`.
    async fn genotypes_to_sequence(
        &self,
        genotypes: &[Genotype],
        locations: &[Location],
    ) -> Result<Sequence>;

    /// Raw evidence payload.
    async fn get_evidence(&self, id: u64) -> Result<Bytes>;
}
