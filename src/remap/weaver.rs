//! Splicing of oriented contig sequences into a scaffold.
//!
//! The weaver walks the original scaffold left to right with a cursor that
//! never moves backwards, alternating between copying untouched scaffold
//! spans and emitting contig sequence. When consecutive insertions overlap
//! on the scaffold, the later contig is cut from the left so no original or
//! inserted base is ever emitted twice.

use thiserror::Error;

use crate::core::placement::PlacementId;
use crate::core::store::SequenceStore;
use crate::remap::planner::PlannedInsertion;

#[derive(Error, Debug)]
pub enum WeaveError {
    /// The mapping table references a contig the sequence file never
    /// provided; continuing would silently drop the insertion.
    #[error("no sequence resolved for placement {0}")]
    MissingSequence(PlacementId),
}

/// Splice the planned insertions into `scaffold_seq` and return the final
/// sequence.
///
/// In trim mode (the default) only a contig's aligned span is inserted; in
/// extend mode the full contig is, with the scaffold span it replaces grown
/// by the unaligned contig tail.
///
/// # Errors
///
/// Returns `WeaveError::MissingSequence` if a planned placement has no
/// resolved sequence in `store`.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)] // Bounds are clamped before indexing
pub fn weave(
    scaffold_seq: &[u8],
    plan: &[PlannedInsertion],
    store: &SequenceStore,
    extend_contig: bool,
) -> Result<Vec<u8>, WeaveError> {
    let scaffold_len = scaffold_seq.len() as i64;
    let mut out = Vec::with_capacity(scaffold_seq.len());

    // Cursor into the original scaffold; monotonically non-decreasing.
    let mut pos: i64 = 0;

    for insertion in plan {
        let placement = &insertion.placement;
        let seq = store
            .get(&placement.id)
            .ok_or_else(|| WeaveError::MissingSequence(placement.id.clone()))?;

        let next_start = insertion.start_offset;

        // Copy the untouched scaffold span up to this insertion.
        let gap_end = next_start.clamp(0, scaffold_len);
        if pos < gap_end {
            out.extend_from_slice(&scaffold_seq[pos as usize..gap_end as usize]);
        }
        pos = pos.max(next_start);

        // Splice window into the oriented contig sequence. The `pos -
        // next_start` term discounts bases already emitted by a prior
        // overlapping insertion.
        let (cut, cut_end) = if extend_contig {
            (pos - next_start, placement.contig_len as i64)
        } else {
            (
                pos - next_start + placement.contig_start as i64,
                placement.contig_end as i64,
            )
        };

        let seq_len = seq.len() as i64;
        let lo = cut.clamp(0, seq_len);
        let hi = cut_end.clamp(0, seq_len);
        // An empty window is legal: the insertion was swallowed entirely by
        // its predecessor.
        if lo < hi {
            out.extend_from_slice(&seq[lo as usize..hi as usize]);
        }

        let next_end = if extend_contig {
            placement.scaffold_end as i64 + placement.contig_len as i64
                - placement.contig_end as i64
        } else {
            placement.scaffold_end as i64
        };
        pos = pos.max(next_end);
    }

    // Copy whatever scaffold remains past the last insertion.
    if pos < scaffold_len {
        out.extend_from_slice(&scaffold_seq[pos as usize..]);
    }

    Ok(out)
}
