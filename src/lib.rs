//! # sv-comparator
//!
//! A library for reconciling structural variant (SV) calls produced by two
//! orthogonal technologies, typically optical mapping (Bionano) and
//! sequencing-based calling annotated with AnnotSV.
//!
//! For every variant in the first call set, `sv-comparator` reports the nearest
//! variant of the same kind in the second call set, measured as the summed
//! distance between the two breakpoints, and computes per-kind match rates.
//!
//! ## Features
//!
//! - **Tolerant chromosome resolution**: "chr7", "7" and "Chr07" are the same chromosome
//! - **Duplicate removal**: repeated calls collapse to a single variant at load time
//! - **Gene filter**: optionally require at least one shared gene
//! - **Distance filter**: optionally cap the summed breakpoint distance
//! - **Kind filter**: compare only selected SV kinds
//!
//! ## Example
//!
//! ```rust
//! use sv_comparator::{compare, Chromosome, CompareConfig, SvType, VariantCollectionBuilder, VariantRecord};
//!
//! let chr1 = Chromosome::resolve("chr1");
//!
//! let mut source = VariantCollectionBuilder::new(true);
//! source.add(VariantRecord::new(chr1, 100, chr1, 200, 100, "A"), SvType::Del);
//!
//! let mut target = VariantCollectionBuilder::new(true);
//! target.add(VariantRecord::new(chr1, 150, chr1, 260, 110, ""), SvType::Del);
//! target.add(VariantRecord::new(chr1, 90, chr1, 210, 120, ""), SvType::Del);
//!
//! let mut table = Vec::new();
//! let summary = compare(&source.build(), &target.build(), &CompareConfig::default(), &mut table).unwrap();
//!
//! let deletions = summary.get(SvType::Del).unwrap();
//! assert_eq!((deletions.matched, deletions.total), (1, 1));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Chromosomes, variant records and kind-partitioned collections
//! - [`parsing`]: Parsers for Bionano SMAP and AnnotSV TSV files
//! - [`matching`]: Nearest-variant matching and the comparison report
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;

// Re-export commonly used types for convenience
pub use core::chromosome::Chromosome;
pub use core::collection::{CollectionStats, VariantCollection, VariantCollectionBuilder};
pub use core::variant::{SvType, VariantRecord};
pub use matching::engine::{compare, find_nearest, CompareConfig, CompareError};
pub use matching::report::{ComparisonSummary, KindStats};
pub use parsing::{ParseError, SvResultParser};
