use super::{
    GenomeStore, genotypes_to_sequence,
    vcf::{self, VariantFile, VcfRecord},
};
use crate::{
    Error, Result,
    location::Location,
    types::{Genome, Genotype, Sequence, VariantCall},
};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory genome store fed from VCF files on local disk.
///
/// Each ingested file is parsed once and kept whole; every sample column
/// becomes a genome and every data line an evidence record.
pub struct LocalStore {
    preload: Vec<PathBuf>,
    state: RwLock<StoreState>,
}

struct StoreState {
    genomes: BTreeMap<u64, Genome>,
    files: HashMap<String, Arc<VariantFile>>,
    evidence: HashMap<u64, Bytes>,
    next_genome_id: u64,
    next_evidence_id: u64,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            genomes: BTreeMap::new(),
            files: HashMap::new(),
            evidence: HashMap::new(),
            next_genome_id: 1,
            next_evidence_id: 1,
        }
    }
}

impl StoreState {
    fn genomes_for(&self, file_path: &str) -> Vec<Genome> {
        self.genomes
            .values()
            .filter(|g| g.file_path == file_path)
            .cloned()
            .collect()
    }

    fn register(&mut self, file_path: &str, mut file: VariantFile) -> Vec<Genome> {
        for record in file.records_mut() {
            record.evidence_id = self.next_evidence_id;
            self.evidence
                .insert(record.evidence_id, Bytes::from(record.line.clone()));
            self.next_evidence_id += 1;
        }

        let mut created = Vec::with_capacity(file.sample_names.len());
        for (sample_index, sample_name) in file.sample_names.iter().enumerate() {
            let genome = Genome {
                id: self.next_genome_id,
                file_path: file_path.to_string(),
                sample_index,
                sample_name: sample_name.clone(),
            };
            self.next_genome_id += 1;
            self.genomes.insert(genome.id, genome.clone());
            created.push(genome);
        }

        self.files.insert(file_path.to_string(), Arc::new(file));
        created
    }
}

impl LocalStore {
    /// `preload` files are ingested by [`GenomeStore::init`].
    pub fn new(preload: Vec<PathBuf>) -> Self {
        Self {
            preload,
            state: RwLock::new(StoreState::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|_| Error::Store("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|_| Error::Store("store lock poisoned".to_string()))
    }

    fn variant_file(&self, file_path: &str) -> Result<Arc<VariantFile>> {
        self.read()?
            .files
            .get(file_path)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("variant file {}", file_path)))
    }
}

#[async_trait]
impl GenomeStore for LocalStore {
    async fn init(&self) -> Result<()> {
        for path in &self.preload {
            let path = path.to_string_lossy();
            let genomes = self.create_genomes(&path).await?;
            tracing::info!("Preloaded {} genomes from {}", genomes.len(), path);
        }
        Ok(())
    }

    async fn create_genomes(&self, file_path: &str) -> Result<Vec<Genome>> {
        {
            let state = self.read()?;
            if state.files.contains_key(file_path) {
                tracing::debug!("{} already ingested", file_path);
                return Ok(state.genomes_for(file_path));
            }
        }

        let path = PathBuf::from(file_path);
        let file = tokio::task::spawn_blocking(move || vcf::read_path(&path))
            .await
            .map_err(|e| Error::Store(format!("ingestion task failed: {}", e)))??;

        if file.sample_names.is_empty() {
            return Err(Error::Store(format!("{} has no sample columns", file_path)));
        }

        let record_count = file.record_count();
        let mut state = self.write()?;
        // Another request may have finished ingesting the same file meanwhile
        if state.files.contains_key(file_path) {
            return Ok(state.genomes_for(file_path));
        }
        let genomes = state.register(file_path, file);

        tracing::info!(
            "Ingested {}: {} samples, {} records",
            file_path,
            genomes.len(),
            record_count
        );
        Ok(genomes)
    }

    async fn list_genomes(&self) -> Result<Vec<Genome>> {
        Ok(self.read()?.genomes.values().cloned().collect())
    }

    async fn get_genome(&self, id: u64) -> Result<Genome> {
        self.read()?
            .genomes
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("genome {}", id)))
    }

    async fn query_genotypes(
        &self,
        file_path: &str,
        sample_index: usize,
        locations: &[Location],
    ) -> Result<Vec<Genotype>> {
        let file = self.variant_file(file_path)?;
        if sample_index >= file.sample_names.len() {
            return Err(Error::Store(format!(
                "sample index {} out of range for {}",
                sample_index, file_path
            )));
        }

        let genotypes = locations
            .iter()
            .map(|location| {
                let calls = file
                    .chromosomes
                    .get(&location.chromosome)
                    .map(|records| {
                        records
                            .overlapping(location.start, location.end)
                            .map(|record| variant_call(record, sample_index))
                            .collect()
                    })
                    .unwrap_or_default();
                Genotype {
                    location: location.clone(),
                    calls,
                }
            })
            .collect();

        tracing::debug!(
            "Queried {} locations in {} (sample {})",
            locations.len(),
            file_path,
            sample_index
        );
        Ok(genotypes)
    }

    async fn genotypes_to_sequence(
        &self,
        genotypes: &[Genotype],
        locations: &[Location],
    ) -> Result<Sequence> {
        genotypes_to_sequence(genotypes, locations)
    }

    async fn get_evidence(&self, id: u64) -> Result<Bytes> {
        self.read()?
            .evidence
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("evidence {}", id)))
    }
}

fn variant_call(record: &VcfRecord, sample_index: usize) -> VariantCall {
    let genotype = record.genotypes[sample_index].clone();
    let phased = genotype.contains('|');
    let alleles = genotype
        .split(['/', '|'])
        .map(|index| match index.parse::<usize>() {
            Ok(0) => Some(record.reference.clone()),
            Ok(i) => record.alternates.get(i - 1).cloned(),
            Err(_) => None,
        })
        .collect();

    VariantCall {
        start: record.start,
        end: record.end,
        reference: record.reference.clone(),
        alternates: record.alternates.clone(),
        genotype,
        alleles,
        phased,
        evidence_id: record.evidence_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VCF: &str = "##fileformat=VCFv4.2\n\
##contig=<ID=1,length=1000>\n\
##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\tS2\n\
1\t2\t.\tA\tG\t50\tPASS\t.\tGT\t0|1\t1/1\n\
1\t4\t.\tT\tC,TA\t50\tPASS\t.\tGT\t2|.\t0/0\n";

    fn write_vcf(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn path_of(file: &NamedTempFile) -> String {
        file.path().to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_create_genomes_one_per_sample() {
        let vcf = write_vcf(VCF);
        let store = LocalStore::new(vec![]);

        let genomes = store.create_genomes(&path_of(&vcf)).await.unwrap();
        assert_eq!(genomes.len(), 2);
        assert_eq!(genomes[0].id, 1);
        assert_eq!(genomes[0].sample_name, "S1");
        assert_eq!(genomes[1].sample_index, 1);

        assert_eq!(store.list_genomes().await.unwrap(), genomes);
        assert_eq!(store.get_genome(2).await.unwrap(), genomes[1]);
    }

    #[tokio::test]
    async fn test_reingest_returns_existing_genomes() {
        let vcf = write_vcf(VCF);
        let store = LocalStore::new(vec![]);

        let first = store.create_genomes(&path_of(&vcf)).await.unwrap();
        let second = store.create_genomes(&path_of(&vcf)).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.list_genomes().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_store_failure() {
        let store = LocalStore::new(vec![]);
        let err = store
            .create_genomes("/nonexistent/test.vcf.gz")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_unknown_ids_not_found() {
        let store = LocalStore::new(vec![]);
        assert!(matches!(
            store.get_genome(999).await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            store.get_evidence(1).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_query_genotypes_aligned_to_locations() {
        let vcf = write_vcf(VCF);
        let path = path_of(&vcf);
        let store = LocalStore::new(vec![vcf.path().to_path_buf()]);
        store.init().await.unwrap();

        let locations = vec![
            Location::new("1", 3, 4).unwrap(),
            Location::new("2", 0, 1).unwrap(),
            Location::new("1", 1, 2).unwrap(),
        ];
        let genotypes = store.query_genotypes(&path, 0, &locations).await.unwrap();

        assert_eq!(genotypes.len(), 3);
        assert_eq!(genotypes[0].location, locations[0]);
        assert_eq!(genotypes[0].calls[0].alleles, [Some("TA".to_string()), None]);
        assert!(genotypes[0].calls[0].phased);
        assert!(genotypes[1].calls.is_empty());
        assert_eq!(genotypes[2].calls[0].genotype, "0|1");
        assert_eq!(
            genotypes[2].calls[0].alleles,
            [Some("A".to_string()), Some("G".to_string())]
        );
    }

    #[tokio::test]
    async fn test_evidence_is_raw_line() {
        let vcf = write_vcf(VCF);
        let path = path_of(&vcf);
        let store = LocalStore::new(vec![]);
        store.create_genomes(&path).await.unwrap();

        let locations = [Location::new("1", 0, 10).unwrap()];
        let genotypes = store.query_genotypes(&path, 1, &locations).await.unwrap();
        let call = &genotypes[0].calls[1];

        let evidence = store.get_evidence(call.evidence_id).await.unwrap();
        assert_eq!(&evidence[..], b"1\t4\t.\tT\tC,TA\t50\tPASS\t.\tGT\t2|.\t0/0");
    }

    #[tokio::test]
    async fn test_sample_index_out_of_range() {
        let vcf = write_vcf(VCF);
        let path = path_of(&vcf);
        let store = LocalStore::new(vec![]);
        store.create_genomes(&path).await.unwrap();

        let locations = [Location::new("1", 0, 1).unwrap()];
        assert!(matches!(
            store.query_genotypes(&path, 5, &locations).await,
            Err(Error::Store(_))
        ));
    }
}
