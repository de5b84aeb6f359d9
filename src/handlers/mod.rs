//! HTTP handlers for the protein, assembly and contig routes.

pub mod assemblies;
pub mod contigs;
pub mod params;
pub mod proteins;
