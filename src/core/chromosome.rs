use serde::{Deserialize, Serialize};

/// One of the 25 canonical human chromosomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Chromosome {
    Chr1,
    Chr2,
    Chr3,
    Chr4,
    Chr5,
    Chr6,
    Chr7,
    Chr8,
    Chr9,
    Chr10,
    Chr11,
    Chr12,
    Chr13,
    Chr14,
    Chr15,
    Chr16,
    Chr17,
    Chr18,
    Chr19,
    Chr20,
    Chr21,
    Chr22,
    ChrX,
    ChrY,
    ChrM,
}

/// Autosomes in the order they must be probed when resolving a label.
///
/// Two-digit numbers come first so that "12" is never read as chromosome 1 or 2.
const DESCENDING_AUTOSOMES: [(&str, Chromosome); 22] = [
    ("22", Chromosome::Chr22),
    ("21", Chromosome::Chr21),
    ("20", Chromosome::Chr20),
    ("19", Chromosome::Chr19),
    ("18", Chromosome::Chr18),
    ("17", Chromosome::Chr17),
    ("16", Chromosome::Chr16),
    ("15", Chromosome::Chr15),
    ("14", Chromosome::Chr14),
    ("13", Chromosome::Chr13),
    ("12", Chromosome::Chr12),
    ("11", Chromosome::Chr11),
    ("10", Chromosome::Chr10),
    ("9", Chromosome::Chr9),
    ("8", Chromosome::Chr8),
    ("7", Chromosome::Chr7),
    ("6", Chromosome::Chr6),
    ("5", Chromosome::Chr5),
    ("4", Chromosome::Chr4),
    ("3", Chromosome::Chr3),
    ("2", Chromosome::Chr2),
    ("1", Chromosome::Chr1),
];

impl Chromosome {
    /// Resolve a free-text chromosome label ("chr7", "7", "Chr07", "MT", ...)
    ///
    /// Matching is substring based and case-insensitive, so it tolerates the
    /// inconsistent spellings found across SV callers at the cost of exactness.
    /// Returns `None` for blank labels and labels with no recognizable chromosome.
    #[must_use]
    pub fn resolve(label: &str) -> Option<Self> {
        if label.trim().is_empty() {
            return None;
        }

        let label = label.to_lowercase();

        // "mt" is covered by "m"
        if label.contains('m') {
            return Some(Self::ChrM);
        }

        if label.contains('x') {
            return Some(Self::ChrX);
        }

        if label.contains('y') {
            return Some(Self::ChrY);
        }

        DESCENDING_AUTOSOMES
            .iter()
            .find(|(number, _)| label.contains(number))
            .map(|(_, chromosome)| *chromosome)
    }

    /// Position of this chromosome in karyotype order (1-based, X=23, Y=24, M=25)
    #[must_use]
    pub fn ordinal(self) -> u8 {
        self as u8 + 1
    }
}

impl std::fmt::Display for Chromosome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChrX => write!(f, "chrX"),
            Self::ChrY => write!(f, "chrY"),
            Self::ChrM => write!(f, "chrM"),
            autosome => write!(f, "chr{}", autosome.ordinal()),
        }
    }
}
