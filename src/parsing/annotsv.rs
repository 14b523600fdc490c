//! Parser for AnnotSV TSV output.
//!
//! Only `full` annotation rows are used; `split` rows repeat the same variant
//! once per overlapping gene. Translocation partners are read from the ALT
//! column (`N]chr5:12345]`), and insertions span `start..start + length`.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::core::chromosome::Chromosome;
use crate::core::collection::{VariantCollection, VariantCollectionBuilder};
use crate::core::variant::{SvType, VariantRecord};
use crate::parsing::{parse_locus, required_field, split_fields, ParseError, SvResultParser};

const CHROM_COLUMN: usize = 1;
const START_COLUMN: usize = 2;
const END_COLUMN: usize = 3;
const LENGTH_COLUMN: usize = 4;
const TYPE_COLUMN: usize = 5;
const ALT_COLUMN: usize = 9;
const SAMPLE_COLUMN: usize = 14;
const MODE_COLUMN: usize = 15;
const GENE_COLUMN: usize = 16;

#[derive(Debug, Default)]
pub struct AnnotSvParser {
    remove_duplicates: bool,
}

impl AnnotSvParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

lazy_static! {
    static ref MATE_WITH_CHR: Regex =
        Regex::new(r"(chr\d+|MT|M|T|mt|m|t|X|Y|x|y):(\d+)").expect("valid mate location pattern");
    static ref MATE_WITHOUT_CHR: Regex =
        Regex::new(r"(\d+|MT|M|T|mt|m|t|X|Y|x|y):(\d+)").expect("valid mate location pattern");
}

/// Find the `chrom:pos` mate location inside a breakend ALT allele
fn locate_mate(alt: &str) -> Option<(&str, &str)> {
    let caps = MATE_WITH_CHR
        .captures(alt)
        .or_else(|| MATE_WITHOUT_CHR.captures(alt))?;

    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

fn classify(sv_type: &str) -> SvType {
    match sv_type {
        "bnd" => SvType::Bnd,
        "cnv" => SvType::Cnv,
        "del" => SvType::Del,
        "ins" => SvType::Ins,
        "dup" => SvType::Dup,
        "inv" => SvType::Inv,
        _ => SvType::Unk,
    }
}

/// Alternate allele frequency in percent from a `GT:AD` sample field ("0/1:12,8").
///
/// Returns `None` when read depths are missing or not numeric.
fn allele_frequency(sample: &str) -> Option<f64> {
    let depths = sample.split(':').nth(1)?;
    let mut depths = depths.split(',');

    let reference: f64 = depths.next()?.trim().parse().ok()?;
    let alternate: f64 = depths.next()?.trim().parse().ok()?;

    let frequency = alternate / (reference + alternate) * 100.0;
    frequency.is_finite().then_some(frequency)
}

fn out_of_range(column: &str, line_num: usize) -> ParseError {
    ParseError::InvalidFormat(format!("{column} out of range on line {line_num}"))
}

fn parse_line(
    fields: &[&str],
    line_num: usize,
    builder: &mut VariantCollectionBuilder,
) -> Result<(), ParseError> {
    let annotation_mode = required_field(fields, MODE_COLUMN, line_num)?.trim().to_lowercase();
    if annotation_mode != "full" {
        return Ok(());
    }

    let src_chrom_id = required_field(fields, CHROM_COLUMN, line_num)?;
    let src_loc = parse_locus(required_field(fields, START_COLUMN, line_num)?, "SV start", line_num)?;
    let mut dst_loc = parse_locus(required_field(fields, END_COLUMN, line_num)?, "SV end", line_num)?;

    let length = required_field(fields, LENGTH_COLUMN, line_num)?;
    let sv_length = if length.trim().is_empty() {
        0
    } else {
        parse_locus(length, "SV length", line_num)?
            .checked_abs()
            .ok_or_else(|| out_of_range("SV length", line_num))?
    };

    let sv_type = required_field(fields, TYPE_COLUMN, line_num)?.trim().to_lowercase();
    let frequency = allele_frequency(required_field(fields, SAMPLE_COLUMN, line_num)?);
    let gene = fields.get(GENE_COLUMN).copied().unwrap_or_default();

    let kind = classify(&sv_type);
    let mut dst_chrom_id = src_chrom_id;

    match kind {
        SvType::Bnd => {
            let alt = required_field(fields, ALT_COLUMN, line_num)?;
            let (chrom, pos) = locate_mate(alt).ok_or_else(|| ParseError::UnsupportedLocation {
                line: line_num,
                value: alt.to_string(),
            })?;

            dst_chrom_id = chrom;
            dst_loc = parse_locus(pos, "breakend position", line_num)?;
        }
        SvType::Ins => {
            dst_loc = src_loc
                .checked_add(sv_length)
                .ok_or_else(|| out_of_range("insertion end", line_num))?;
        }
        _ => {}
    }

    let record = VariantRecord::new(
        Chromosome::resolve(src_chrom_id),
        src_loc,
        Chromosome::resolve(dst_chrom_id),
        dst_loc,
        sv_length,
        gene,
    )
    .with_frequency(frequency);

    builder.add(record, kind);
    Ok(())
}

impl SvResultParser for AnnotSvParser {
    fn name(&self) -> &'static str {
        "AnnotSV"
    }

    fn default_delimiters(&self) -> &'static [char] {
        &['\t']
    }

    fn set_remove_duplicate_variants(&mut self, value: bool) {
        self.remove_duplicates = value;
    }

    fn parse_text(&self, text: &str, delimiters: &[char]) -> Result<VariantCollection, ParseError> {
        let mut builder = VariantCollectionBuilder::new(self.remove_duplicates);

        // First line is the column header
        for (i, line) in text.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }

            let fields = split_fields(line, delimiters);
            parse_line(&fields, i + 1, &mut builder)?;
        }

        let collection = builder.build();
        debug!("Parsed {} {} variants", collection.len(), self.name());

        if collection.unresolved_chromosomes() > 0 {
            warn!(
                "{} {} variants have an unrecognized chromosome and cannot be matched",
                collection.unresolved_chromosomes(),
                self.name()
            );
        }

        Ok(collection)
    }
}
