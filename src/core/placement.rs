use serde::{Deserialize, Serialize};

/// Strand orientation of a contig placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Forward-strand placement ('+' in the mapping table)
    Forward,
    /// Reverse-complement placement ('-' in the mapping table)
    Reverse,
}

impl Orientation {
    /// Parse the strand column of a mapping record
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Self::Forward),
            "-" => Some(Self::Reverse),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::Reverse)
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
        }
    }
}

/// Unique identifier for one placement of a contig on a scaffold.
///
/// A contig may be aligned more than once before it is ruled a repeat; the
/// ordinal keeps those alignments distinct. Ordinals are issued from a single
/// strictly increasing counter for the whole ingestion pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlacementId {
    contig: String,
    ordinal: u64,
}

impl PlacementId {
    pub fn new(contig: impl Into<String>, ordinal: u64) -> Self {
        Self {
            contig: contig.into(),
            ordinal,
        }
    }

    /// Name of the physical contig this placement belongs to
    pub fn contig(&self) -> &str {
        &self.contig
    }

    /// Position of this placement in the ingestion order
    #[must_use]
    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }
}

impl std::fmt::Display for PlacementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.contig, self.ordinal)
    }
}

/// One local alignment between a contig and a scaffold, as read from the
/// mapping table. Coordinates are 0-based; `contig_start`/`contig_end` are
/// contig-local, `scaffold_start`/`scaffold_end` index the scaffold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRecord {
    pub contig_name: String,
    pub contig_len: u64,
    pub contig_start: u64,
    pub contig_end: u64,
    pub orientation: Orientation,
    pub scaffold_name: String,
    pub scaffold_start: u64,
    pub scaffold_end: u64,
}

impl MappingRecord {
    /// Fraction of the contig covered by the alignment. Records with a zero
    /// fraction carry no usable signal and are discarded during ingestion.
    #[must_use]
    pub fn map_fraction(&self) -> f64 {
        if self.contig_len == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)] // Contig coordinates are far below 2^52
        {
            self.contig_end.abs_diff(self.contig_start) as f64 / self.contig_len as f64
        }
    }
}

/// A validated placement of a contig on its owning scaffold.
///
/// Each placement belongs to exactly one scaffold; the same physical contig
/// never holds two live placements at once (a second valid alignment ejects
/// the first and blacklists the contig).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContigPlacement {
    pub id: PlacementId,
    pub contig_name: String,
    pub scaffold_name: String,
    pub orientation: Orientation,
    pub contig_len: u64,
    pub contig_start: u64,
    pub contig_end: u64,
    pub scaffold_start: u64,
    pub scaffold_end: u64,
}

impl ContigPlacement {
    pub fn from_record(record: &MappingRecord, id: PlacementId) -> Self {
        Self {
            id,
            contig_name: record.contig_name.clone(),
            scaffold_name: record.scaffold_name.clone(),
            orientation: record.orientation,
            contig_len: record.contig_len,
            contig_start: record.contig_start,
            contig_end: record.contig_end,
            scaffold_start: record.scaffold_start,
            scaffold_end: record.scaffold_end,
        }
    }

    /// Length of the scaffold span this placement replaces
    #[must_use]
    pub fn scaffold_span(&self) -> u64 {
        self.scaffold_end.abs_diff(self.scaffold_start)
    }
}
