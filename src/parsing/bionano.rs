//! Parser for Bionano Solve SMAP files.
//!
//! SMAP rows carry reference coordinates of both breakpoints as decimals:
//!
//! | Column | Field |
//! |--------|-------|
//! | 2 | `RefcontigID1` |
//! | 3 | `RefcontigID2` |
//! | 6 | `RefStartPos` |
//! | 7 | `RefEndPos` |
//! | 8 | `Confidence` |
//! | 9 | `Type` |
//! | 34 | overlapping genes (annotated SMAPs only) |

use tracing::{debug, warn};

use crate::core::chromosome::Chromosome;
use crate::core::collection::{VariantCollection, VariantCollectionBuilder};
use crate::core::variant::{SvType, VariantRecord};
use crate::parsing::{required_field, split_fields, ParseError, SvResultParser};

const SRC_CHROM_COLUMN: usize = 2;
const DST_CHROM_COLUMN: usize = 3;
const SRC_POS_COLUMN: usize = 6;
const DST_POS_COLUMN: usize = 7;
const CONFIDENCE_COLUMN: usize = 8;
const TYPE_COLUMN: usize = 9;
const GENE_COLUMN: usize = 34;

#[derive(Debug, Default)]
pub struct BionanoParser {
    remove_duplicates: bool,
}

impl BionanoParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn parse_line(
        fields: &[&str],
        line_num: usize,
        builder: &mut VariantCollectionBuilder,
    ) -> Result<(), ParseError> {
        let src_chrom_id = required_field(fields, SRC_CHROM_COLUMN, line_num)?;
        let dst_chrom_id = required_field(fields, DST_CHROM_COLUMN, line_num)?;
        let src_loc = parse_position(required_field(fields, SRC_POS_COLUMN, line_num)?, line_num)?;
        let dst_loc = parse_position(required_field(fields, DST_POS_COLUMN, line_num)?, line_num)?;
        let sv_type = required_field(fields, TYPE_COLUMN, line_num)?.to_lowercase();
        let gene = fields.get(GENE_COLUMN).copied().unwrap_or_default();

        let confidence = fields
            .get(CONFIDENCE_COLUMN)
            .and_then(|value| value.trim().parse::<f64>().ok());

        let kind = classify(&sv_type);
        let size = if kind == SvType::Bnd {
            0
        } else {
            dst_loc.checked_sub(src_loc).ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "SV size out of range on line {line_num}: {src_loc}..{dst_loc}"
                ))
            })?
        };

        let record = VariantRecord::new(
            Chromosome::resolve(src_chrom_id),
            src_loc,
            Chromosome::resolve(dst_chrom_id),
            dst_loc,
            size,
            gene,
        )
        .with_confidence(confidence);

        builder.add(record, kind);
        Ok(())
    }
}

/// Map the free-text SMAP type ("deletion", "translocation_interchr", ...) to a kind
fn classify(sv_type: &str) -> SvType {
    if sv_type.contains("translocation") {
        SvType::Bnd
    } else if sv_type.contains("deletion") {
        SvType::Del
    } else if sv_type.contains("insertion") {
        SvType::Ins
    } else if sv_type.contains("inversion") {
        SvType::Inv
    } else if sv_type.contains("duplication") {
        SvType::Dup
    } else {
        SvType::Unk
    }
}

/// SMAP positions are written as decimals; the fractional part is dropped.
///
/// Values outside the `i64` range are rejected rather than clamped.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn parse_position(value: &str, line_num: usize) -> Result<i64, ParseError> {
    // 2^63 as f64; every value below it truncates into range
    const UPPER: f64 = i64::MAX as f64;

    value
        .trim()
        .parse::<f64>()
        .ok()
        .map(f64::trunc)
        .filter(|v| *v >= i64::MIN as f64 && *v < UPPER)
        .map(|v| v as i64)
        .ok_or_else(|| {
            ParseError::InvalidFormat(format!("Invalid position on line {line_num}: '{value}'"))
        })
}

impl SvResultParser for BionanoParser {
    fn name(&self) -> &'static str {
        "Bionano Genomics"
    }

    fn default_delimiters(&self) -> &'static [char] {
        &[',', '\t']
    }

    fn set_remove_duplicate_variants(&mut self, value: bool) {
        self.remove_duplicates = value;
    }

    fn parse_text(&self, text: &str, delimiters: &[char]) -> Result<VariantCollection, ParseError> {
        let mut builder = VariantCollectionBuilder::new(self.remove_duplicates);

        for (i, line) in text.lines().enumerate() {
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }

            let fields = split_fields(line, delimiters);
            Self::parse_line(&fields, i + 1, &mut builder)?;
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
