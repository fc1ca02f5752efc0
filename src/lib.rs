//! # scaffold-remap
//!
//! A library for splicing assembled contigs back into the draft scaffolds
//! they align onto.
//!
//! Long-read scaffolding leaves draft sequences that local assembly can
//! improve: when a contig aligns cleanly onto a scaffold, the scaffold span
//! it covers can be replaced by the contig itself. `scaffold-remap` consumes
//! a whole-contig mapping table, the draft assembly, and the contig
//! sequences, and emits a corrected assembly.
//!
//! ## Behavior
//!
//! - **Repeat exclusion**: a contig with more than one valid alignment is
//!   unreliable; all of its placements are retracted and the contig is
//!   permanently blacklisted
//! - **Strand handling**: `-` placements insert the reverse complement,
//!   computed once per physical contig
//! - **Overlap trimming**: adjacent insertions that overlap on the scaffold
//!   never emit a base twice; the later contig is cut from the left
//! - **Rescue routing**: scaffolds with zero valid placements are listed
//!   separately instead of being rewritten
//!
//! ## Example
//!
//! ```rust
//! use scaffold_remap::{IngestionSession, MappingRecord, Orientation};
//! use scaffold_remap::remap::planner;
//!
//! let mut session = IngestionSession::new();
//! session.ingest(MappingRecord {
//!     contig_name: "ctg1".to_string(),
//!     contig_len: 5,
//!     contig_start: 0,
//!     contig_end: 5,
//!     orientation: Orientation::Forward,
//!     scaffold_name: "scaf1".to_string(),
//!     scaffold_start: 5,
//!     scaffold_end: 10,
//! });
//!
//! let placements = session.placements_for("scaf1").unwrap();
//! let plan = planner::plan(placements, false);
//! assert_eq!(plan[0].start_offset, 5);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: placement records, ingestion session, sequence resolution
//! - [`parsing`]: mapping-table and FASTA readers
//! - [`remap`]: splice planning and scaffold weaving
//! - [`cli`]: command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod remap;

// Re-export commonly used types for convenience
pub use core::placement::{ContigPlacement, MappingRecord, Orientation, PlacementId};
pub use core::sequence::reverse_complement;
pub use core::session::{IngestOutcome, IngestionSession};
pub use core::store::SequenceStore;
pub use remap::planner::PlannedInsertion;
pub use remap::weaver::weave;
