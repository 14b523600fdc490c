//! Core data types for structural variant comparison.
//!
//! - [`Chromosome`]: canonical chromosome identity resolved from free-text labels
//! - [`VariantRecord`]: one normalized structural variant
//! - [`SvType`]: variant kind (BND, CNV, DEL, INS, DUP, INV, UNK)
//! - [`VariantCollection`]: an input's variants partitioned by kind
//!
//! ## Chromosome Labels
//!
//! Callers spell chromosomes differently:
//!
//! | Source  | Chromosome 7 | Mitochondrial |
//! |---------|--------------|---------------|
//! | UCSC    | chr7         | chrM          |
//! | NCBI    | 7            | MT            |
//! | Other   | Chr07        | chrMT         |
//!
//! All of these resolve to the same [`Chromosome`]. Labels that resolve to nothing
//! make a variant unmatchable but are never an error.
//!
//! [`Chromosome`]: chromosome::Chromosome
//! [`VariantRecord`]: variant::VariantRecord
//! [`SvType`]: variant::SvType
//! [`VariantCollection`]: collection::VariantCollection

pub mod chromosome;
pub mod collection;
pub mod variant;
