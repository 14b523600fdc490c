use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::core::chromosome::Chromosome;
use crate::core::collection::VariantCollection;
use crate::core::variant::{SvType, VariantRecord};
use crate::matching::engine::Candidate;
use crate::matching::genes::common_genes;

/// Which optional columns the comparison table carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLayout {
    pub source_label: String,
    pub target_label: String,
    /// Frequency pair columns, present when either input reports frequencies
    pub frequency: bool,
    /// Source confidence column, present when the source input reports confidences
    pub confidence: bool,
}

impl ReportLayout {
    #[must_use]
    pub fn for_inputs(
        source: &VariantCollection,
        source_label: &str,
        target: &VariantCollection,
        target_label: &str,
    ) -> Self {
        Self {
            source_label: source_label.to_string(),
            target_label: target_label.to_string(),
            frequency: source
                .iter()
                .chain(target.iter())
                .any(|record| record.frequency.is_some()),
            confidence: source.iter().any(|record| record.confidence.is_some()),
        }
    }

    #[must_use]
    pub fn header(&self) -> String {
        let l1 = &self.source_label;
        let l2 = &self.target_label;

        let mut columns = vec![
            "sv_type".to_string(),
            "src_chr".to_string(),
            "dst_chr".to_string(),
            format!("{l1}_src_pos"),
            format!("{l2}_src_pos"),
            format!("{l1}_dst_pos"),
            format!("{l2}_dst_pos"),
            "src_pos_dist".to_string(),
            "dst_pos_dist".to_string(),
            "dist_var".to_string(),
            format!("{l1}_sv_size"),
            format!("{l2}_sv_size"),
            format!("{l1}_gene"),
            format!("{l2}_gene"),
            "common_genes".to_string(),
        ];

        if self.frequency {
            columns.push(format!("{l1}_freq"));
            columns.push(format!("{l2}_freq"));
        }

        if self.confidence {
            columns.push(format!("{l1}_confidence"));
        }

        columns.join("\t")
    }

    /// One table row for a source variant and its nearest target
    #[must_use]
    pub fn row(&self, kind: SvType, source: &VariantRecord, nearest: &Candidate<'_>) -> String {
        let target = nearest.record;
        let genes = common_genes(&source.gene, &target.gene).join(",");

        let mut columns = vec![
            kind.to_string(),
            format_chromosome(source.src_chromosome),
            format_chromosome(source.dst_chromosome),
            source.src_locus.to_string(),
            target.src_locus.to_string(),
            source.dst_locus.to_string(),
            target.dst_locus.to_string(),
            nearest.src_distance.to_string(),
            nearest.dst_distance.to_string(),
            nearest.total_distance().to_string(),
            source.size.to_string(),
            target.size.to_string(),
            source.gene.clone(),
            target.gene.clone(),
            genes,
        ];

        if self.frequency {
            columns.push(format_decimal(source.frequency));
            columns.push(format_decimal(target.frequency));
        }

        if self.confidence {
            columns.push(format_decimal(source.confidence));
        }

        columns.join("\t")
    }
}

fn format_chromosome(chromosome: Option<Chromosome>) -> String {
    chromosome.map(|c| c.to_string()).unwrap_or_default()
}

fn format_decimal(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

/// Streams the comparison table to an output
pub struct ReportWriter<W: Write> {
    out: W,
    layout: ReportLayout,
    rows: usize,
}

impl<W: Write> ReportWriter<W> {
    /// Create a writer and emit the header line
    ///
    /// # Errors
    ///
    /// Returns an IO error if the header cannot be written.
    pub fn new(mut out: W, layout: ReportLayout) -> std::io::Result<Self> {
        writeln!(out, "{}", layout.header())?;
        Ok(Self {
            out,
            layout,
            rows: 0,
        })
    }

    /// # Errors
    ///
    /// Returns an IO error if the row cannot be written.
    pub fn write_row(
        &mut self,
        kind: SvType,
        source: &VariantRecord,
        nearest: &Candidate<'_>,
    ) -> std::io::Result<()> {
        writeln!(self.out, "{}", self.layout.row(kind, source, nearest))?;
        self.rows += 1;
        Ok(())
    }

    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Flush buffered rows and hand back the output
    ///
    /// # Errors
    ///
    /// Returns an IO error if flushing fails.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Match rate of one variant kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindStats {
    pub kind: SvType,
    /// Distinct source variants that found a target
    pub matched: usize,
    /// All source variants of this kind, repeats included
    pub total: usize,
}

impl KindStats {
    /// Matched share in percent, rounded to two decimals; 0 when there is nothing to match
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        let pct = self.matched as f64 / self.total as f64 * 100.0;
        (pct * 100.0).round() / 100.0
    }
}

/// Per-kind statistics of a whole comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub source_label: String,
    pub target_label: String,
    pub kinds: Vec<KindStats>,
}

impl ComparisonSummary {
    #[must_use]
    pub fn get(&self, kind: SvType) -> Option<&KindStats> {
        self.kinds.iter().find(|stats| stats.kind == kind)
    }

    /// Summary line for one kind, e.g. `Common SV (a with b / a) - DEL:\t1/2 (50.00%)`
    #[must_use]
    pub fn line(&self, stats: &KindStats) -> String {
        format!(
            "Common SV ({src} with {tgt} / {src}) - {}:\t{}/{} ({:.2}%)",
            stats.kind,
            stats.matched,
            stats.total,
            stats.percentage(),
            src = self.source_label,
            tgt = self.target_label,
        )
    }
}

impl std::fmt::Display for ComparisonSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stats in &self.kinds {
            writeln!(f, "{}", self.line(stats))?;
        }
        Ok(())
    }
}
