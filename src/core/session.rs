//! Shared state for the mapping-ingestion phase.
//!
//! All mapping records are ingested before any sequence is resolved: the
//! repeat status of a contig can only be known once the whole table has been
//! read, and sequence resolution needs the complete set of issued placement
//! ids. The session owns the three tables that phase mutates:
//!
//! - the placement index (scaffold name → live placements),
//! - the repeat blacklist (contig names, membership only grows),
//! - the per-contig record of issued placement ids, used later to resolve
//!   oriented sequences.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::core::placement::{ContigPlacement, MappingRecord, Orientation, PlacementId};

/// A placement id issued for a contig, tagged with the orientation its
/// sequence must be resolved in.
#[derive(Debug, Clone)]
pub struct IssuedPlacement {
    pub id: PlacementId,
    pub orientation: Orientation,
}

/// Outcome of ingesting a single mapping record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Record accepted; a new placement was indexed
    Placed,
    /// Zero map fraction; record discarded
    Degenerate,
    /// Second valid alignment for a contig: its live placement was retracted
    /// and the contig permanently blacklisted
    Repeat,
    /// Contig was already blacklisted; record discarded
    KnownRepeat,
}

/// Mutable state of one ingestion pass over the mapping table.
#[derive(Debug, Default)]
pub struct IngestionSession {
    /// Scaffold name → live placements, keyed by placement id. Scaffold
    /// entries are removed when their last placement is retracted.
    index: HashMap<String, HashMap<PlacementId, ContigPlacement>>,
    /// Contigs ruled repeats; never leaves a contig once entered.
    invalid_contigs: HashSet<String>,
    /// Every placement id issued, grouped by physical contig, in issue order.
    issued: HashMap<String, Vec<IssuedPlacement>>,
    /// Contig name → location of its live placement, if any.
    live: HashMap<String, (String, PlacementId)>,
    next_ordinal: u64,
}

impl IngestionSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one mapping record, updating the session tables.
    ///
    /// Records with a zero map fraction are discarded. A record for a contig
    /// that already holds a live placement retracts that placement and
    /// blacklists the contig; further records for it are discarded.
    pub fn ingest(&mut self, record: MappingRecord) -> IngestOutcome {
        // Every record consumes an ordinal, so ids stay unique even across
        // discarded records.
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;

        if record.map_fraction() <= 0.0 {
            debug!(
                "degenerate mapping discarded: {} ({}..{} of {})",
                record.contig_name, record.contig_start, record.contig_end, record.contig_len
            );
            return IngestOutcome::Degenerate;
        }

        if let Some((scaffold, id)) = self.live.remove(&record.contig_name) {
            if let Some(per_scaffold) = self.index.get_mut(&scaffold) {
                per_scaffold.remove(&id);
                if per_scaffold.is_empty() {
                    self.index.remove(&scaffold);
                }
            }
            self.invalid_contigs.insert(record.contig_name.clone());
            warn!("repeat contig blacklisted: {}", record.contig_name);
            return IngestOutcome::Repeat;
        }

        if self.invalid_contigs.contains(&record.contig_name) {
            return IngestOutcome::KnownRepeat;
        }

        let id = PlacementId::new(record.contig_name.clone(), ordinal);
        let placement = ContigPlacement::from_record(&record, id.clone());

        self.issued
            .entry(record.contig_name.clone())
            .or_default()
            .push(IssuedPlacement {
                id: id.clone(),
                orientation: record.orientation,
            });
        self.live.insert(
            record.contig_name.clone(),
            (record.scaffold_name.clone(), id.clone()),
        );
        self.index
            .entry(record.scaffold_name)
            .or_default()
            .insert(id, placement);

        IngestOutcome::Placed
    }

    /// Live placements for `scaffold`, if it has any
    pub fn placements_for(&self, scaffold: &str) -> Option<&HashMap<PlacementId, ContigPlacement>> {
        self.index.get(scaffold)
    }

    /// Placement ids issued for `contig`, in issue order. Entries persist
    /// even after the contig is blacklisted.
    pub fn issued_for(&self, contig: &str) -> Option<&[IssuedPlacement]> {
        self.issued.get(contig).map(Vec::as_slice)
    }

    /// Contigs ruled repeats so far
    pub fn invalid_contigs(&self) -> &HashSet<String> {
        &self.invalid_contigs
    }

    /// Number of live placements across all scaffolds
    #[must_use]
    pub fn placement_count(&self) -> usize {
        self.index.values().map(HashMap::len).sum()
    }

    /// Number of scaffolds with at least one live placement
    #[must_use]
    pub fn scaffold_count(&self) -> usize {
        self.index.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(contig: &str, scaffold: &str) -> MappingRecord {
        MappingRecord {
            contig_name: contig.to_string(),
            contig_len: 100,
            contig_start: 0,
            contig_end: 100,
            orientation: Orientation::Forward,
            scaffold_name: scaffold.to_string(),
            scaffold_start: 10,
            scaffold_end: 110,
        }
    }

    #[test]
    fn test_single_record_is_placed() {
        let mut session = IngestionSession::new();
        assert_eq!(session.ingest(record("ctg1", "scaf1")), IngestOutcome::Placed);

        let placements = session.placements_for("scaf1").unwrap();
        assert_eq!(placements.len(), 1);
        assert_eq!(session.placement_count(), 1);
        assert!(session.invalid_contigs().is_empty());
    }

    #[test]
    fn test_degenerate_record_discarded() {
        let mut session = IngestionSession::new();
        let mut degenerate = record("ctg1", "scaf1");
        degenerate.contig_end = degenerate.contig_start;

        assert_eq!(session.ingest(degenerate), IngestOutcome::Degenerate);
        assert!(session.placements_for("scaf1").is_none());
        assert!(session.issued_for("ctg1").is_none());
    }

    #[test]
    fn test_repeat_contig_blacklisted() {
        let mut session = IngestionSession::new();
        assert_eq!(session.ingest(record("ctg1", "scaf1")), IngestOutcome::Placed);
        assert_eq!(session.ingest(record("ctg1", "scaf2")), IngestOutcome::Repeat);

        // The first placement is retracted, not just the second rejected
        assert!(session.placements_for("scaf1").is_none());
        assert!(session.placements_for("scaf2").is_none());
        assert_eq!(session.placement_count(), 0);
        assert!(session.invalid_contigs().contains("ctg1"));
        assert_eq!(session.invalid_contigs().len(), 1);

        // Third record is a known repeat, blacklist unchanged
        assert_eq!(session.ingest(record("ctg1", "scaf3")), IngestOutcome::KnownRepeat);
        assert_eq!(session.invalid_contigs().len(), 1);
    }

    #[test]
    fn test_degenerate_record_does_not_trigger_repeat() {
        let mut session = IngestionSession::new();
        assert_eq!(session.ingest(record("ctg1", "scaf1")), IngestOutcome::Placed);

        let mut degenerate = record("ctg1", "scaf2");
        degenerate.contig_end = degenerate.contig_start;
        assert_eq!(session.ingest(degenerate), IngestOutcome::Degenerate);

        // The live placement survives a degenerate second record
        assert_eq!(session.placement_count(), 1);
        assert!(session.invalid_contigs().is_empty());
    }

    #[test]
    fn test_retraction_keeps_other_placements() {
        let mut session = IngestionSession::new();
        session.ingest(record("ctg1", "scaf1"));
        session.ingest(record("ctg2", "scaf1"));
        session.ingest(record("ctg1", "scaf2"));

        // ctg1 retracted, ctg2 untouched on the same scaffold
        let placements = session.placements_for("scaf1").unwrap();
        assert_eq!(placements.len(), 1);
        assert!(placements.values().all(|p| p.contig_name == "ctg2"));
    }

    #[test]
    fn test_ordinals_are_unique_across_discards() {
        let mut session = IngestionSession::new();
        let mut degenerate = record("ctg1", "scaf1");
        degenerate.contig_end = degenerate.contig_start;
        session.ingest(degenerate);
        session.ingest(record("ctg2", "scaf1"));
        session.ingest(record("ctg3", "scaf1"));

        let a = &session.issued_for("ctg2").unwrap()[0];
        let b = &session.issued_for("ctg3").unwrap()[0];
        assert_ne!(a.id.ordinal(), b.id.ordinal());
    }
}
