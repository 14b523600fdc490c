//! Parsers turning caller output files into [`VariantCollection`]s.
//!
//! This module provides parsers for:
//!
//! - **Bionano SMAP files**: optical-mapping SV calls from the Bionano Solve pipeline
//! - **AnnotSV TSV files**: annotated sequencing SV calls (ONT, PacBio, 10x, ...)
//!
//! Every parser implements [`SvResultParser`], so the comparison engine never
//! depends on a particular file layout. Inputs ending in `.gz` are decompressed
//! transparently.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sv_comparator::parsing::{bionano::BionanoParser, SvResultParser};
//! use std::path::Path;
//!
//! let mut parser = BionanoParser::new();
//! parser.set_remove_duplicate_variants(true);
//!
//! let variants = parser
//!     .parse_file(Path::new("exp_refineFinal1_merged.smap"), parser.default_delimiters())
//!     .unwrap();
//! println!("{}", variants.stats(parser.name()));
//! ```

use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

use crate::core::collection::VariantCollection;

pub mod annotsv;
pub mod bionano;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported chromosome:location format on line {line}: {value}")]
    UnsupportedLocation { line: usize, value: String },
}

/// Contract shared by all SV caller parsers
pub trait SvResultParser {
    /// Human readable name of the caller, used in statistics output
    fn name(&self) -> &'static str;

    /// Field delimiters used by this caller's files
    fn default_delimiters(&self) -> &'static [char];

    /// Drop records equal to one already collected for the same kind
    fn set_remove_duplicate_variants(&mut self, value: bool);

    /// Parse the full text of a result file
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidFormat` on the first structurally invalid row.
    fn parse_text(&self, text: &str, delimiters: &[char]) -> Result<VariantCollection, ParseError>;

    /// Parse a result file, decompressing it first when it ends in `.gz`
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be read, or the errors of
    /// [`SvResultParser::parse_text`].
    fn parse_file(&self, path: &Path, delimiters: &[char]) -> Result<VariantCollection, ParseError> {
        let text = read_input(path)?;
        self.parse_text(&text, delimiters)
    }
}

/// Read a whole input file into memory, gunzipping `.gz` files
///
/// # Errors
///
/// Returns an IO error if the file cannot be opened, decompressed or is not UTF-8.
pub fn read_input(path: &Path) -> std::io::Result<String> {
    let file = std::fs::File::open(path)?;
    let mut text = String::new();

    let is_gzipped = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    if is_gzipped {
        BufReader::new(MultiGzDecoder::new(file)).read_to_string(&mut text)?;
    } else {
        BufReader::new(file).read_to_string(&mut text)?;
    }

    Ok(text)
}

/// Split a row on any of the delimiters
pub(crate) fn split_fields<'a>(line: &'a str, delimiters: &'a [char]) -> Vec<&'a str> {
    line.split(|c: char| delimiters.contains(&c)).collect()
}

/// Fetch a required column or fail with the line number
pub(crate) fn required_field<'a>(
    fields: &[&'a str],
    index: usize,
    line_num: usize,
) -> Result<&'a str, ParseError> {
    fields.get(index).copied().ok_or_else(|| {
        ParseError::InvalidFormat(format!(
            "Line {line_num} has {} fields, expected at least {}",
            fields.len(),
            index + 1
        ))
    })
}

/// Parse an integer coordinate column
pub(crate) fn parse_locus(value: &str, column: &str, line_num: usize) -> Result<i64, ParseError> {
    value.trim().parse().map_err(|_| {
        ParseError::InvalidFormat(format!("Invalid {column} on line {line_num}: '{value}'"))
    })
}
