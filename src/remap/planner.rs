//! Ordering of a scaffold's placements into a splice plan.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::warn;

use crate::core::placement::{ContigPlacement, PlacementId};

/// One insertion slot in a scaffold's splice plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedInsertion {
    /// Offset into the original scaffold where the insertion begins. Can be
    /// negative in extend mode, when the contig overhangs the scaffold start.
    pub start_offset: i64,
    pub placement: ContigPlacement,
}

/// Insertion start offset for `placement`. In extend mode the unaligned head
/// of the contig shifts the insertion point left of the aligned span.
#[allow(clippy::cast_possible_wrap)] // Coordinates are far below i64::MAX
fn start_offset(placement: &ContigPlacement, extend_contig: bool) -> i64 {
    if extend_contig {
        placement.scaffold_start as i64 - placement.contig_start as i64
    } else {
        placement.scaffold_start as i64
    }
}

/// Whether `challenger` displaces `incumbent` at a shared start offset:
/// longer scaffold span wins, ties fall to the earlier issued placement.
fn displaces(challenger: &ContigPlacement, incumbent: &ContigPlacement) -> bool {
    let c = challenger.scaffold_span();
    let i = incumbent.scaffold_span();
    c > i || (c == i && challenger.id.ordinal() < incumbent.id.ordinal())
}

/// Order `placements` ascending by insertion start offset.
///
/// Two placements of one scaffold can compute the same start offset; only one
/// can occupy it. The placement covering the longer scaffold span survives
/// (ties break toward the earlier issued placement) and the loser is dropped
/// with a warning.
pub fn plan(
    placements: &HashMap<PlacementId, ContigPlacement>,
    extend_contig: bool,
) -> Vec<PlannedInsertion> {
    let mut by_offset: HashMap<i64, &ContigPlacement> = HashMap::new();

    for placement in placements.values() {
        let offset = start_offset(placement, extend_contig);

        match by_offset.entry(offset) {
            Entry::Vacant(entry) => {
                entry.insert(placement);
            }
            Entry::Occupied(mut entry) => {
                let (dropped, kept) = if displaces(placement, entry.get()) {
                    (*entry.get(), placement)
                } else {
                    (placement, *entry.get())
                };
                warn!(
                    "placements {} and {} share start offset {} on {}; keeping {}",
                    kept.id, dropped.id, offset, kept.scaffold_name, kept.id
                );
                entry.insert(kept);
            }
        }
    }

    let mut ordered: Vec<PlannedInsertion> = by_offset
        .into_iter()
        .map(|(start_offset, placement)| PlannedInsertion {
            start_offset,
            placement: placement.clone(),
        })
        .collect();
    ordered.sort_unstable_by_key(|insertion| insertion.start_offset);

    ordered
}
