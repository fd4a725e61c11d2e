use anyhow::*;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

lazy_static! {
    // UniProt style headers: sp|P02769|ALBU_BOVIN Albumin ...
    static ref UNIPROT_HEADER_REGEX: Regex = Regex::new(r"^(?:sp|tr)\|([^|]+)\|").unwrap();
}

#[derive(Clone, PartialEq, Debug)]
pub struct FastaEntry {
    pub header: String,
    pub sequence: String,
}

impl FastaEntry {
    /// UniProt accession when the header follows the UniProt layout, first header word otherwise.
    pub fn accession(&self) -> &str {
        if let Some(caps) = UNIPROT_HEADER_REGEX.captures(&self.header) {
            if let Some(acc) = caps.get(1) {
                return acc.as_str();
            }
        }

        self.header.split_ascii_whitespace().next().unwrap_or("")
    }
}

pub fn for_each_fasta_entry<F>(path: impl AsRef<Path>, cb: F) -> Result<()> where F: FnMut(&FastaEntry) -> Result<()> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("can't open FASTA file '{}'", path.display()))?;

    // buffer capacity = 1MB
    read_fasta_entries(BufReader::with_capacity(1024 * 1024, file), cb)
}

pub fn read_fasta_entries<R, F>(reader: R, mut cb: F) -> Result<()> where R: BufRead, F: FnMut(&FastaEntry) -> Result<()> {

    let mut entry: Option<FastaEntry> = None;

    for line in reader.lines() {
        let l = line?;
        let l = l.trim_end();

        // When a new FASTA entry is met, emit the previous one
        if let Some(header) = l.strip_prefix('>') {
            if let Some(prev_entry) = entry.take() {
                _emit_entry(prev_entry, &mut cb)?;
            }

            entry = Some(FastaEntry {
                header: header.trim().to_string(),
                sequence: String::with_capacity(1024),
            });
        } else if !l.is_empty() {
            match entry.as_mut() {
                Some(e) => e.sequence.push_str(l),
                None => bail!("sequence data found before the first FASTA header"),
            }
        }
    }

    // Emit last entry
    if let Some(last_entry) = entry {
        _emit_entry(last_entry, &mut cb)?;
    }

    Ok(())
}

fn _emit_entry<F>(entry: FastaEntry, cb: &mut F) -> Result<()> where F: FnMut(&FastaEntry) -> Result<()> {
    if entry.sequence.is_empty() {
        bail!("FASTA entry '{}' has no sequence", entry.header);
    }

    cb(&entry)
}
