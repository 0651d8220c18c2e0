use crate::location::Location;
use serde::{Deserialize, Serialize};

/// A genome is one sample column of an ingested variant file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Genome {
    pub id: u64,
    pub file_path: String,
    pub sample_index: usize,
    pub sample_name: String,
}

/// Variant calls for one queried location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Genotype {
    pub location: Location,
    pub calls: Vec<VariantCall>,
}

/// One variant record overlapping a queried location, seen from a single
/// sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantCall {
    /// Zero-based start of the record.
    pub start: u64,
    /// Exclusive end; covers the reference allele or a reference block.
    pub end: u64,
    pub reference: String,
    pub alternates: Vec<String>,
    /// Raw GT value, e.g. `0|1`.
    pub genotype: String,
    /// Allele sequence per GT entry, `None` where the call is missing.
    pub alleles: Vec<Option<String>>,
    pub phased: bool,
    pub evidence_id: u64,
}

/// Haplotype sequences reconstructed over a set of locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sequence {
    pub locations: Vec<Location>,
    pub haplotypes: Vec<String>,
}

/// Body of `POST /v1/genomes`, accepted as JSON or form data.
#[derive(Debug, Deserialize)]
pub struct CreateGenomesBody {
    #[serde(rename = "filePath", default)]
    pub file_path: String,
}

/// Query parameters of `GET /v1/genomes/{id}/genotypes`.
#[derive(Debug, Deserialize, Default)]
pub struct GenotypesParams {
    pub locations: Option<String>,
    pub range: Option<String>,
    pub fmt: Option<String>,
}

impl GenotypesParams {
    pub fn wants_sequence(&self) -> bool {
        self.fmt.as_deref() == Some("seq")
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
}
