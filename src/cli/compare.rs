use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::cli::{InputFormat, OutputFormat};
use crate::core::collection::{CollectionStats, VariantCollection};
use crate::core::variant::SvType;
use crate::matching::engine::{compare, CompareConfig};
use crate::matching::report::ComparisonSummary;

#[derive(Args)]
pub struct CompareArgs {
    /// Source SV call file (each of its variants is looked up in the target)
    #[arg(required = true)]
    pub source: PathBuf,

    /// Target SV call file
    #[arg(required = true)]
    pub target: PathBuf,

    /// Output comparison table (TSV)
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    /// Format of the source file
    #[arg(long, value_enum, default_value = "bionano")]
    pub source_format: InputFormat,

    /// Format of the target file
    #[arg(long, value_enum, default_value = "annotsv")]
    pub target_format: InputFormat,

    /// Label for source columns (defaults to the source format name)
    #[arg(long)]
    pub source_label: Option<String>,

    /// Label for target columns (defaults to the target format name)
    #[arg(long)]
    pub target_label: Option<String>,

    /// Select only variants with common genes
    #[arg(short = 'g', long)]
    pub gene_intersection: bool,

    /// Maximum distance sum (start distance + end distance) of matched variants
    #[arg(short = 'd', long)]
    pub variant_distance: Option<u64>,

    /// Variant type filter, any combination of [BND,CNV,DEL,INS,DUP,INV,UNK], comma separated
    #[arg(short = 't', long)]
    pub variant_type: Option<String>,

    /// Keep repeated calls of the same variant instead of collapsing them
    #[arg(long)]
    pub keep_duplicates: bool,
}

impl CompareArgs {
    fn config(&self) -> CompareConfig {
        CompareConfig {
            source_label: self
                .source_label
                .clone()
                .unwrap_or_else(|| self.source_format.label().to_string()),
            target_label: self
                .target_label
                .clone()
                .unwrap_or_else(|| self.target_format.label().to_string()),
            only_common_genes: self.gene_intersection,
            max_distance: self.variant_distance,
            kinds: self.variant_type.as_deref().map(SvType::parse_filter),
        }
    }
}

/// Execute compare subcommand
///
/// # Errors
///
/// Returns an error if either input cannot be parsed or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CompareArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.config();

    if config.kinds.as_ref().is_some_and(std::collections::HashSet::is_empty) {
        tracing::warn!("Variant type filter selects no valid types; nothing will be compared");
    }

    let (source, source_stats) = load(&args.source, args.source_format, !args.keep_duplicates)?;
    let (target, target_stats) = load(&args.target, args.target_format, !args.keep_duplicates)?;

    if verbose {
        eprintln!(
            "Source: {} variants, target: {} variants",
            source.len(),
            target.len()
        );
    }

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create output file {}", args.output.display()))?;

    let summary = compare(&source, &target, &config, BufWriter::new(file))
        .with_context(|| format!("Failed to compare variants into {}", args.output.display()))?;

    match format {
        OutputFormat::Text => print_text_summary(&summary, &[source_stats, target_stats]),
        OutputFormat::Json => print_json_summary(&summary, &[source_stats, target_stats])?,
        OutputFormat::Tsv => print_tsv_summary(&summary),
    }

    Ok(())
}

fn load(
    path: &Path,
    format: InputFormat,
    remove_duplicates: bool,
) -> anyhow::Result<(VariantCollection, CollectionStats)> {
    let parser = format.parser(remove_duplicates);
    let variants = parser
        .parse_file(path, parser.default_delimiters())
        .with_context(|| format!("Failed to parse {} file {}", parser.name(), path.display()))?;
    let stats = variants.stats(parser.name());

    Ok((variants, stats))
}

fn print_text_summary(summary: &ComparisonSummary, inputs: &[CollectionStats]) {
    print!("{summary}");

    for stats in inputs {
        println!("\n{stats}");
    }
}

fn print_json_summary(
    summary: &ComparisonSummary,
    inputs: &[CollectionStats],
) -> anyhow::Result<()> {
    let kinds: Vec<serde_json::Value> = summary
        .kinds
        .iter()
        .map(|stats| {
            serde_json::json!({
                "sv_type": stats.kind,
                "matched": stats.matched,
                "total": stats.total,
                "percentage": stats.percentage(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "source_label": summary.source_label,
        "target_label": summary.target_label,
        "comparison": kinds,
        "inputs": inputs,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(summary: &ComparisonSummary) {
    println!("sv_type\tmatched\ttotal\tpercentage");
    for stats in &summary.kinds {
        println!(
            "{}\t{}\t{}\t{:.2}",
            stats.kind,
            stats.matched,
            stats.total,
            stats.percentage()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(variant_type: Option<&str>) -> CompareArgs {
        CompareArgs {
            source: PathBuf::from("a.smap"),
            target: PathBuf::from("b.tsv"),
            output: PathBuf::from("out.tsv"),
            source_format: InputFormat::Bionano,
            target_format: InputFormat::Annotsv,
            source_label: None,
            target_label: Some("ont".to_string()),
            gene_intersection: true,
            variant_distance: Some(500),
            variant_type: variant_type.map(str::to_string),
            keep_duplicates: false,
        }
    }

    #[test]
    fn test_config_from_args() {
        let config = args(Some("del,INS,bogus")).config();

        assert_eq!(config.source_label, "bionano");
        assert_eq!(config.target_label, "ont");
        assert!(config.only_common_genes);
        assert_eq!(config.max_distance, Some(500));

        let kinds = config.kinds.unwrap();
        assert_eq!(kinds.len(), 2);
        assert!(kinds.contains(&SvType::Del));
        assert!(kinds.contains(&SvType::Ins));
    }

    #[test]
    fn test_config_without_type_filter() {
        assert!(args(None).config().kinds.is_none());
    }
}
