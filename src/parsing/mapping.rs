//! Parser for the whole-contig mapping table.
//!
//! Whitespace-delimited text, one record per line, PAF-style field layout:
//!
//! | Field | Content          |
//! |-------|------------------|
//! | 0     | contig name      |
//! | 1     | contig length    |
//! | 2, 3  | contig start/end |
//! | 4     | strand (+/-)     |
//! | 5     | scaffold name    |
//! | 6     | unused here      |
//! | 7, 8  | scaffold start/end |
//!
//! A record with missing fields or non-numeric coordinates is a fatal parse
//! error; a degenerate but well-formed record is merely discarded by the
//! ingestion session.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::core::placement::{MappingRecord, Orientation};
use crate::core::session::{IngestOutcome, IngestionSession};

/// Minimum number of whitespace-delimited fields per record
const MIN_FIELDS: usize = 9;

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed mapping record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
}

/// Per-outcome counts for one pass over the mapping table
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub records: usize,
    pub placed: usize,
    pub degenerate: usize,
    pub repeats: usize,
    pub known_repeats: usize,
}

/// Parse one mapping-table line. `line_num` is 1-based and only used for
/// error reporting.
///
/// # Errors
///
/// Returns `MappingError::MalformedRecord` if the line has fewer than nine
/// fields, a non-numeric coordinate, or an unknown strand symbol.
pub fn parse_record(line: &str, line_num: usize) -> Result<MappingRecord, MappingError> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    if fields.len() < MIN_FIELDS {
        return Err(MappingError::MalformedRecord {
            line: line_num,
            reason: format!(
                "expected at least {MIN_FIELDS} fields, found {}",
                fields.len()
            ),
        });
    }

    let coord = |idx: usize| -> Result<u64, MappingError> {
        fields[idx].parse().map_err(|_| MappingError::MalformedRecord {
            line: line_num,
            reason: format!("invalid coordinate in field {}: '{}'", idx, fields[idx]),
        })
    };

    let orientation =
        Orientation::parse(fields[4]).ok_or_else(|| MappingError::MalformedRecord {
            line: line_num,
            reason: format!("invalid strand: '{}'", fields[4]),
        })?;

    Ok(MappingRecord {
        contig_name: fields[0].to_string(),
        contig_len: coord(1)?,
        contig_start: coord(2)?,
        contig_end: coord(3)?,
        orientation,
        scaffold_name: fields[5].to_string(),
        scaffold_start: coord(7)?,
        scaffold_end: coord(8)?,
    })
}

/// Read every record from the mapping table at `path` into `session`,
/// in input order. Empty lines are skipped.
///
/// # Errors
///
/// Returns `MappingError::Io` if the file cannot be read, or
/// `MappingError::MalformedRecord` on the first unparsable line.
pub fn read_mapping_table(
    path: &Path,
    session: &mut IngestionSession,
) -> Result<IngestStats, MappingError> {
    let reader = BufReader::new(File::open(path)?);
    let mut stats = IngestStats::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record = parse_record(&line, i + 1)?;
        stats.records += 1;

        match session.ingest(record) {
            IngestOutcome::Placed => stats.placed += 1,
            IngestOutcome::Degenerate => stats.degenerate += 1,
            IngestOutcome::Repeat => stats.repeats += 1,
            IngestOutcome::KnownRepeat => stats.known_repeats += 1,
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_record() {
        let record = parse_record("ctg1\t100\t0\t100\t-\tscaf1\t500\t10\t110", 1).unwrap();
        assert_eq!(record.contig_name, "ctg1");
        assert_eq!(record.contig_len, 100);
        assert_eq!(record.contig_start, 0);
        assert_eq!(record.contig_end, 100);
        assert_eq!(record.orientation, Orientation::Reverse);
        assert_eq!(record.scaffold_name, "scaf1");
        // Field 6 is skipped
        assert_eq!(record.scaffold_start, 10);
        assert_eq!(record.scaffold_end, 110);
    }

    #[test]
    fn test_parse_record_space_delimited() {
        let record = parse_record("ctg1 100 0 100 + scaf1 500 10 110", 1).unwrap();
        assert_eq!(record.orientation, Orientation::Forward);
    }

    #[test]
    fn test_parse_record_too_few_fields() {
        let err = parse_record("ctg1\t100\t0\t100\t+\tscaf1", 7).unwrap_err();
        match err {
            MappingError::MalformedRecord { line, .. } => assert_eq!(line, 7),
            MappingError::Io(_) => panic!("expected MalformedRecord"),
        }
    }

    #[test]
    fn test_parse_record_bad_coordinate() {
        assert!(parse_record("ctg1\t100\tzero\t100\t+\tscaf1\t500\t10\t110", 1).is_err());
    }

    #[test]
    fn test_parse_record_bad_strand() {
        assert!(parse_record("ctg1\t100\t0\t100\t?\tscaf1\t500\t10\t110", 1).is_err());
    }

    #[test]
    fn test_read_mapping_table() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "ctg1\t100\t0\t100\t+\tscaf1\t500\t10\t110").unwrap();
        writeln!(temp).unwrap();
        writeln!(temp, "ctg2\t50\t25\t25\t+\tscaf1\t500\t200\t200").unwrap();
        temp.flush().unwrap();

        let mut session = IngestionSession::new();
        let stats = read_mapping_table(temp.path(), &mut session).unwrap();

        assert_eq!(stats.records, 2);
        assert_eq!(stats.placed, 1);
        assert_eq!(stats.degenerate, 1);
        assert_eq!(session.placement_count(), 1);
    }

    #[test]
    fn test_read_mapping_table_malformed_is_fatal() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "ctg1\t100\t0\t100\t+\tscaf1\t500\t10\t110").unwrap();
        writeln!(temp, "not a record").unwrap();
        temp.flush().unwrap();

        let mut session = IngestionSession::new();
        assert!(read_mapping_table(temp.path(), &mut session).is_err());
    }
}
