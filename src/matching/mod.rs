//! Structural variant matching engine and comparison report.
//!
//! - [`compare`]: match every source variant against the target set and stream the table
//! - [`find_nearest`]: nearest target for a single source variant
//! - [`common_genes`]: case-insensitive gene intersection
//!
//! ## Matching Algorithm
//!
//! Kinds are processed one after another (BND, INV, DUP, DEL, INS, UNK). For each
//! distinct source variant of a kind:
//!
//! 1. **Chromosome gate**: targets must share both the source and destination chromosome
//! 2. **Distance**: `|src - src'| + |dst - dst'|`
//! 3. **Filters**: optional shared-gene requirement and maximum distance
//! 4. **Selection**: smallest distance wins; on a tie the later target wins
//!
//! Copy number variants are parsed but never compared.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sv_comparator::matching::engine::{compare, CompareConfig};
//! use sv_comparator::parsing::{annotsv::AnnotSvParser, bionano::BionanoParser, SvResultParser};
//! use std::path::Path;
//!
//! let bionano = BionanoParser::new();
//! let annotsv = AnnotSvParser::new();
//! let source = bionano.parse_file(Path::new("calls.smap"), bionano.default_delimiters()).unwrap();
//! let target = annotsv.parse_file(Path::new("calls.tsv"), annotsv.default_delimiters()).unwrap();
//!
//! let config = CompareConfig {
//!     max_distance: Some(50_000),
//!     ..CompareConfig::default()
//! };
//! let summary = compare(&source, &target, &config, std::io::stdout()).unwrap();
//! eprint!("{summary}");
//! ```
//!
//! [`compare`]: engine::compare
//! [`find_nearest`]: engine::find_nearest
//! [`common_genes`]: genes::common_genes

pub mod engine;
pub mod genes;
pub mod report;
