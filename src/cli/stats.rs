use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{InputFormat, OutputFormat};

#[derive(Args)]
pub struct StatsArgs {
    /// SV call file
    #[arg(required = true)]
    pub input: PathBuf,

    /// Format of the input file
    #[arg(long, value_enum, default_value = "bionano")]
    pub input_format: InputFormat,

    /// Keep repeated calls of the same variant instead of collapsing them
    #[arg(long)]
    pub keep_duplicates: bool,
}

/// Execute stats subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be parsed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: StatsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let parser = args.input_format.parser(!args.keep_duplicates);
    let variants = parser
        .parse_file(&args.input, parser.default_delimiters())
        .with_context(|| format!("Failed to parse {} file {}", parser.name(), args.input.display()))?;

    if verbose {
        eprintln!("Parsed {} variants from {}", variants.len(), args.input.display());
    }

    let stats = variants.stats(parser.name());

    match format {
        OutputFormat::Text => println!("{stats}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Tsv => {
            println!("sv_type\tcount");
            for kind in crate::core::variant::SvType::ALL {
                println!("{kind}\t{}", variants.get(kind).len());
            }
        }
    }

    Ok(())
}
