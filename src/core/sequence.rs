//! Nucleotide complement helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("invalid base '{}' at position {position}", *base as char)]
    InvalidBase { base: u8, position: usize },
}

/// Watson-Crick complement of a single base. Only uppercase A/C/G/T are
/// defined; anything else is invalid during complementation.
fn complement(base: u8) -> Option<u8> {
    match base {
        b'A' => Some(b'T'),
        b'T' => Some(b'A'),
        b'C' => Some(b'G'),
        b'G' => Some(b'C'),
        _ => None,
    }
}

/// Reverse complement of `seq`.
///
/// # Errors
///
/// Returns `SequenceError::InvalidBase` on the first non-ACGT byte, with its
/// position in the original (forward) sequence.
pub fn reverse_complement(seq: &[u8]) -> Result<Vec<u8>, SequenceError> {
    let mut out = Vec::with_capacity(seq.len());

    for (position, &base) in seq.iter().enumerate().rev() {
        let comp = complement(base).ok_or(SequenceError::InvalidBase { base, position })?;
        out.push(comp);
    }

    Ok(out)
}
