//! Resolution of oriented contig sequences, one per placement.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::core::placement::{Orientation, PlacementId};
use crate::core::sequence::{reverse_complement, SequenceError};
use crate::core::session::IngestionSession;
use crate::parsing::fasta::open_reader;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse contig FASTA: {0}")]
    Fasta(String),

    #[error("complementing contig '{contig}': {source}")]
    Complement {
        contig: String,
        source: SequenceError,
    },
}

/// Oriented contig sequences keyed by placement id.
///
/// One physical contig may serve several placements with independent
/// orientation, so sequences are stored per placement. The reverse
/// complement of a contig is computed at most once and shared across all of
/// its `-` placements.
#[derive(Debug, Default)]
pub struct SequenceStore {
    sequences: HashMap<PlacementId, Vec<u8>>,
}

impl SequenceStore {
    /// Read the contig FASTA at `path` and resolve an oriented sequence for
    /// every placement id issued during ingestion. Contigs absent from the
    /// mapping table are skipped without being buffered.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io`/`StoreError::Fasta` if the file cannot be
    /// read, or `StoreError::Complement` on a non-ACGT base in a contig that
    /// requires reverse complementation.
    pub fn resolve(path: &Path, session: &IngestionSession) -> Result<Self, StoreError> {
        let mut reader = open_reader(path)?;
        let mut sequences = HashMap::new();

        for result in reader.records() {
            let record = result.map_err(|e| StoreError::Fasta(e.to_string()))?;
            let name = String::from_utf8_lossy(record.name()).to_string();

            let Some(issued) = session.issued_for(&name) else {
                continue;
            };

            let forward: &[u8] = record.sequence().as_ref();

            let needs_reverse = issued.iter().any(|p| p.orientation.is_reverse());
            let reverse = if needs_reverse {
                Some(
                    reverse_complement(forward).map_err(|source| StoreError::Complement {
                        contig: name.clone(),
                        source,
                    })?,
                )
            } else {
                None
            };

            for placement in issued {
                let oriented = match (placement.orientation, &reverse) {
                    (Orientation::Reverse, Some(rc)) => rc.clone(),
                    _ => forward.to_vec(),
                };
                sequences.insert(placement.id.clone(), oriented);
            }

            debug!("resolved {} placement(s) for contig {}", issued.len(), name);
        }

        Ok(Self { sequences })
    }

    /// Oriented sequence for `id`, if the contig was present in the file
    pub fn get(&self, id: &PlacementId) -> Option<&[u8]> {
        self.sequences.get(id).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    #[cfg(test)]
    pub fn insert(&mut self, id: PlacementId, sequence: Vec<u8>) {
        self.sequences.insert(id, sequence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::placement::MappingRecord;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn record(contig: &str, orientation: Orientation) -> MappingRecord {
        MappingRecord {
            contig_name: contig.to_string(),
            contig_len: 5,
            contig_start: 0,
            contig_end: 5,
            orientation,
            scaffold_name: "scaf1".to_string(),
            scaffold_start: 0,
            scaffold_end: 5,
        }
    }

    fn contig_file(content: &[u8]) -> NamedTempFile {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(content).unwrap();
        temp.flush().unwrap();
        temp
    }

    #[test]
    fn test_resolve_forward_and_reverse() {
        let mut session = IngestionSession::new();
        session.ingest(record("ctg_fwd", Orientation::Forward));
        session.ingest(record("ctg_rev", Orientation::Reverse));

        let temp = contig_file(b">ctg_fwd\nAATTT\n>ctg_rev\nAATTT\n>unmapped\nCCCCC\n");
        let store = SequenceStore::resolve(temp.path(), &session).unwrap();

        assert_eq!(store.len(), 2);

        let fwd_id = &session.issued_for("ctg_fwd").unwrap()[0].id;
        let rev_id = &session.issued_for("ctg_rev").unwrap()[0].id;
        assert_eq!(store.get(fwd_id).unwrap(), b"AATTT");
        assert_eq!(store.get(rev_id).unwrap(), b"AAATT");
    }

    #[test]
    fn test_unmapped_contigs_skipped() {
        let session = IngestionSession::new();
        let temp = contig_file(b">ctg1\nACGTA\n");
        let store = SequenceStore::resolve(temp.path(), &session).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_base_is_fatal() {
        let mut session = IngestionSession::new();
        session.ingest(record("ctg1", Orientation::Reverse));

        let temp = contig_file(b">ctg1\nACGNA\n");
        let err = SequenceStore::resolve(temp.path(), &session).unwrap_err();
        assert!(matches!(err, StoreError::Complement { .. }));
    }

    #[test]
    fn test_forward_placement_tolerates_ambiguous_bases() {
        // Complementation never runs for '+' placements, so N passes through
        let mut session = IngestionSession::new();
        session.ingest(record("ctg1", Orientation::Forward));

        let temp = contig_file(b">ctg1\nACGNA\n");
        let store = SequenceStore::resolve(temp.path(), &session).unwrap();

        let id = &session.issued_for("ctg1").unwrap()[0].id;
        assert_eq!(store.get(id).unwrap(), b"ACGNA");
    }
}
