//! FASTA readers shared by the contig and scaffold inputs.
//!
//! Both inputs may be plain or gzip compressed; compression is selected by
//! extension (`.gz`, `.bgz`). Records are streamed one at a time, so only a
//! single scaffold sequence is ever held in memory.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;

/// Check if the path is a gzipped file
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a FASTA reader over `path`, transparently decoding gzip.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn open_reader(path: &Path) -> std::io::Result<fasta::io::Reader<Box<dyn BufRead>>> {
    let file = File::open(path)?;

    let inner: Box<dyn BufRead> = if is_gzipped(path) {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(fasta::io::Reader::new(inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("contigs.fa.gz")));
        assert!(is_gzipped(Path::new("contigs.fasta.bgz")));
        assert!(!is_gzipped(Path::new("contigs.fa")));
        assert!(!is_gzipped(Path::new("contigs.fasta")));
    }

    #[test]
    fn test_read_plain_fasta() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b">scaf1 draft\nACGT\nACGT\n>scaf2\nTTTT\n")
            .unwrap();
        temp.flush().unwrap();

        let mut reader = open_reader(temp.path()).unwrap();
        let records: Vec<_> = reader.records().collect::<Result<_, _>>().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name(), &b"scaf1"[..]);
        // Multi-line sequences are concatenated
        assert_eq!(records[0].sequence().as_ref(), b"ACGTACGT");
        assert_eq!(records[1].sequence().as_ref(), b"TTTT");
    }

    #[test]
    fn test_read_gzipped_fasta() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut temp = NamedTempFile::with_suffix(".fa.gz").unwrap();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b">ctg1\nACGTACGT\n").unwrap();
        temp.write_all(&encoder.finish().unwrap()).unwrap();
        temp.flush().unwrap();

        let mut reader = open_reader(temp.path()).unwrap();
        let records: Vec<_> = reader.records().collect::<Result<_, _>>().unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sequence().as_ref(), b"ACGTACGT");
    }
}
