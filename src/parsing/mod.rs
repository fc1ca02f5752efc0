//! Parsers for the remapping inputs.
//!
//! - **Mapping table**: whitespace-delimited whole-contig alignment records
//! - **FASTA**: shared reader for the contig and scaffold files, with
//!   transparent gzip decoding

pub mod fasta;
pub mod mapping;
