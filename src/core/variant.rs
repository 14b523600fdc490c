use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::chromosome::Chromosome;

/// Structural variant kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SvType {
    /// Translocation / breakend
    Bnd,
    /// Copy number variation
    Cnv,
    Del,
    Ins,
    Dup,
    Inv,
    /// Unresolved or unrecognized type
    Unk,
}

impl SvType {
    pub const ALL: [SvType; 7] = [
        SvType::Bnd,
        SvType::Cnv,
        SvType::Del,
        SvType::Ins,
        SvType::Dup,
        SvType::Inv,
        SvType::Unk,
    ];

    /// Parse a single type code (case-insensitive, surrounding whitespace ignored)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "BND" => Some(Self::Bnd),
            "CNV" => Some(Self::Cnv),
            "DEL" => Some(Self::Del),
            "INS" => Some(Self::Ins),
            "DUP" => Some(Self::Dup),
            "INV" => Some(Self::Inv),
            "UNK" => Some(Self::Unk),
            _ => None,
        }
    }

    /// Parse a comma separated type filter such as `"DEL,ins,BND"`.
    ///
    /// Unrecognized tokens are skipped with a warning rather than failing.
    #[must_use]
    pub fn parse_filter(list: &str) -> HashSet<Self> {
        let mut types = HashSet::new();

        for token in list.split(',') {
            match Self::parse(token) {
                Some(sv_type) => {
                    types.insert(sv_type);
                }
                None => warn!(
                    "Skipping invalid structural variant type provided: {}",
                    token.trim().to_uppercase()
                ),
            }
        }

        types
    }
}

impl std::fmt::Display for SvType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Self::Bnd => "BND",
            Self::Cnv => "CNV",
            Self::Del => "DEL",
            Self::Ins => "INS",
            Self::Dup => "DUP",
            Self::Inv => "INV",
            Self::Unk => "UNK",
        };
        write!(f, "{code}")
    }
}

/// A single structural variant normalized from any caller's output.
///
/// Identity is defined by the breakpoints, size and kind only: the same
/// breakpoint annotated with different genes, frequency or confidence is
/// considered the same variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantRecord {
    /// Chromosome of the first breakpoint
    pub src_chromosome: Option<Chromosome>,

    /// Position of the first breakpoint
    pub src_locus: i64,

    /// Chromosome of the second breakpoint
    pub dst_chromosome: Option<Chromosome>,

    /// Position of the second breakpoint
    pub dst_locus: i64,

    /// Variant length, always non-negative
    pub size: u64,

    /// Gene annotation, possibly several symbols separated by `/` or `;`
    pub gene: String,

    /// Allele frequency in percent (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,

    /// Caller specific confidence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    kind: SvType,
}

impl VariantRecord {
    pub fn new(
        src_chromosome: Option<Chromosome>,
        src_locus: i64,
        dst_chromosome: Option<Chromosome>,
        dst_locus: i64,
        size: i64,
        gene: impl Into<String>,
    ) -> Self {
        Self {
            src_chromosome,
            src_locus,
            dst_chromosome,
            dst_locus,
            size: size.unsigned_abs(),
            gene: gene.into(),
            frequency: None,
            confidence: None,
            kind: SvType::Unk,
        }
    }

    #[must_use]
    pub fn with_frequency(mut self, frequency: Option<f64>) -> Self {
        self.frequency = frequency;
        self
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: Option<f64>) -> Self {
        self.confidence = confidence;
        self
    }

    /// Kind assigned when the record was added to a collection
    #[must_use]
    pub fn kind(&self) -> SvType {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: SvType) {
        self.kind = kind;
    }

    /// Whether both breakpoints resolved to a known chromosome
    #[must_use]
    pub fn has_resolved_chromosomes(&self) -> bool {
        self.src_chromosome.is_some() && self.dst_chromosome.is_some()
    }
}

impl PartialEq for VariantRecord {
    fn eq(&self, other: &Self) -> bool {
        self.src_chromosome == other.src_chromosome
            && self.src_locus == other.src_locus
            && self.dst_chromosome == other.dst_chromosome
            && self.dst_locus == other.dst_locus
            && self.size == other.size
            && self.kind == other.kind
    }
}

impl Eq for VariantRecord {}

impl Hash for VariantRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.src_chromosome.hash(state);
        self.src_locus.hash(state);
        self.dst_chromosome.hash(state);
        self.dst_locus.hash(state);
        self.size.hash(state);
        self.kind.hash(state);
    }
}
