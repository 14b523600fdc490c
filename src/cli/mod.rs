//! Command-line interface for sv-comparator.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **compare**: Match the variants of one call set against another and write a table
//! - **stats**: Show per-kind variant counts of a single call set
//!
//! ## Usage
//!
//! ```text
//! # Compare Bionano calls against AnnotSV calls
//! sv-comparator compare exp_refineFinal1_merged.smap sample.annotsv.tsv -o result.tsv
//!
//! # Only deletions and insertions within 10 kb that share a gene
//! sv-comparator compare calls.smap calls.tsv -o result.tsv -g -d 10000 -t DEL,INS
//!
//! # JSON summary for scripting
//! sv-comparator compare calls.smap calls.tsv -o result.tsv --format json
//!
//! # Count variants in one file
//! sv-comparator stats sample.annotsv.tsv --input-format annotsv
//! ```

use clap::{Parser, Subcommand};

use crate::parsing::annotsv::AnnotSvParser;
use crate::parsing::bionano::BionanoParser;
use crate::parsing::SvResultParser;

pub mod compare;
pub mod stats;

#[derive(Parser)]
#[command(name = "sv-comparator")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Compare structural variant calls from optical mapping and sequencing")]
#[command(
    long_about = "sv-comparator reconciles two independently produced sets of structural variant calls.\n\nFor every variant in the first set it reports the nearest variant of the same kind in the second set, by summed breakpoint distance, and prints per-kind match rates.\nSupported inputs:\n- Bionano Solve SMAP files\n- AnnotSV TSV files (ONT, PacBio, 10x/TELL-Seq)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for summaries printed to stdout
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two SV call sets
    Compare(compare::CompareArgs),

    /// Show variant counts of one SV call set
    Stats(stats::StatsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Layout of an SV call file
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// Bionano Solve SMAP
    Bionano,
    /// AnnotSV TSV
    Annotsv,
}

impl InputFormat {
    /// Default label used in report column names
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Bionano => "bionano",
            Self::Annotsv => "annotsv",
        }
    }

    /// Parser for this format
    #[must_use]
    pub fn parser(self, remove_duplicates: bool) -> Box<dyn SvResultParser> {
        let mut parser: Box<dyn SvResultParser> = match self {
            Self::Bionano => Box::new(BionanoParser::new()),
            Self::Annotsv => Box::new(AnnotSvParser::new()),
        };
        parser.set_remove_duplicate_variants(remove_duplicates);
        parser
    }
}
