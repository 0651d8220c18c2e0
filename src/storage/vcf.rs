//! Loading of VCF files into memory.
//!
//! The header is handed to noodles for validation and sample names; data
//! lines are split by hand since only the columns needed for genotype lookup
//! are kept, along with the raw line as evidence.

use crate::{Error, Result};
use flate2::read::MultiGzDecoder;
use noodles::vcf;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const MISSING: &str = ".";

/// One data line, restricted to the fields used for lookups.
#[derive(Debug, Clone)]
pub(crate) struct VcfRecord {
    /// Zero-based start.
    pub start: u64,
    /// Exclusive end, from `INFO/END` when present.
    pub end: u64,
    pub reference: String,
    pub alternates: Vec<String>,
    /// GT value per sample, `.` when absent.
    pub genotypes: Vec<String>,
    pub line: String,
    /// Assigned by the store when the file is registered.
    pub evidence_id: u64,
}

/// Records of one chromosome, sorted by start.
#[derive(Debug, Default)]
pub(crate) struct ChromosomeRecords {
    pub records: Vec<VcfRecord>,
    /// Longest record span, bounding how far back an overlap can start.
    max_span: u64,
}

impl ChromosomeRecords {
    fn push(&mut self, record: VcfRecord) {
        self.max_span = self.max_span.max(record.end - record.start);
        self.records.push(record);
    }

    /// Records overlapping `[start, end)`, in start order.
    pub fn overlapping(&self, start: u64, end: u64) -> impl Iterator<Item = &VcfRecord> {
        let lower = self
            .records
            .partition_point(|r| r.start.saturating_add(self.max_span) <= start);
        let upper = self.records.partition_point(|r| r.start < end);
        self.records[lower..upper.max(lower)]
            .iter()
            .filter(move |r| r.end > start)
    }
}

#[derive(Debug)]
pub(crate) struct VariantFile {
    pub sample_names: Vec<String>,
    pub chromosomes: HashMap<String, ChromosomeRecords>,
}

impl VariantFile {
    pub fn record_count(&self) -> usize {
        self.chromosomes.values().map(|c| c.records.len()).sum()
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut VcfRecord> {
        self.chromosomes
            .values_mut()
            .flat_map(|c| c.records.iter_mut())
    }
}

/// Read a plain or gzip/BGZF-compressed VCF file.
pub(crate) fn read_path(path: &Path) -> Result<VariantFile> {
    let mut reader = BufReader::new(File::open(path)?);
    let compressed = reader.fill_buf()?.starts_with(&GZIP_MAGIC);

    if compressed {
        read(BufReader::new(MultiGzDecoder::new(reader)))
    } else {
        read(reader)
    }
}

pub(crate) fn read<R: BufRead>(reader: R) -> Result<VariantFile> {
    let mut header_text = String::new();
    let mut sample_names: Option<Vec<String>> = None;
    let mut chromosomes: HashMap<String, ChromosomeRecords> = HashMap::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');

        if sample_names.is_none() {
            if line.starts_with('#') {
                header_text.push_str(line);
                header_text.push('\n');
                continue;
            }
            sample_names = Some(parse_sample_names(&header_text)?);
        }

        if line.is_empty() {
            continue;
        }

        let sample_count = sample_names.as_ref().map_or(0, Vec::len);
        let (chromosome, record) = parse_record(line, sample_count)
            .map_err(|e| Error::Store(format!("line {}: {}", i + 1, e)))?;
        chromosomes.entry(chromosome).or_default().push(record);
    }

    let sample_names = match sample_names {
        Some(names) => names,
        None => parse_sample_names(&header_text)?,
    };

    for records in chromosomes.values_mut() {
        records.records.sort_by_key(|r| r.start);
    }

    Ok(VariantFile {
        sample_names,
        chromosomes,
    })
}

fn parse_sample_names(header_text: &str) -> Result<Vec<String>> {
    let header: vcf::Header = header_text
        .parse()
        .map_err(|e| Error::Store(format!("invalid VCF header: {}", e)))?;
    Ok(header.sample_names().iter().cloned().collect())
}

fn parse_record(
    line: &str,
    sample_count: usize,
) -> std::result::Result<(String, VcfRecord), String> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 8 {
        return Err(format!("expected at least 8 columns, found {}", fields.len()));
    }

    let chromosome = fields[0];
    let position: u64 = fields[1]
        .parse()
        .map_err(|_| format!("invalid POS {:?}", fields[1]))?;
    let start = position
        .checked_sub(1)
        .ok_or_else(|| "POS 0 is not supported".to_string())?;

    let reference = fields[3].to_string();
    let alternates = match fields[4] {
        MISSING => Vec::new(),
        alt => alt.split(',').map(str::to_string).collect(),
    };

    let end = match info_end(fields[7]) {
        Some(end) => end?,
        None => start + reference.len() as u64,
    };
    if end <= start {
        return Err(format!("record at {}:{} has an empty span", chromosome, position));
    }

    let format = fields.get(8).copied();
    let samples = &fields[fields.len().min(9)..];
    let genotypes = sample_genotypes(format, samples, sample_count);

    Ok((
        chromosome.to_string(),
        VcfRecord {
            start,
            end,
            reference,
            alternates,
            genotypes,
            line: line.to_string(),
            evidence_id: 0,
        },
    ))
}

/// `INFO/END` is 1-based inclusive, which equals the zero-based exclusive end.
fn info_end(info: &str) -> Option<std::result::Result<u64, String>> {
    info.split(';')
        .find_map(|entry| entry.strip_prefix("END="))
        .map(|value| value.parse().map_err(|_| format!("invalid END {:?}", value)))
}

fn sample_genotypes(format: Option<&str>, samples: &[&str], sample_count: usize) -> Vec<String> {
    let gt_index = format.and_then(|f| f.split(':').position(|key| key == "GT"));

    (0..sample_count)
        .map(|i| {
            gt_index
                .and_then(|idx| samples.get(i).and_then(|s| s.split(':').nth(idx)))
                .unwrap_or(MISSING)
                .to_string()
        })
        .collect()
}
