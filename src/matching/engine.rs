use std::collections::{BTreeMap, HashSet};
use std::io::Write;

use thiserror::Error;
use tracing::debug;

use crate::core::collection::VariantCollection;
use crate::core::variant::{SvType, VariantRecord};
use crate::matching::genes::common_genes;
use crate::matching::report::{ComparisonSummary, KindStats, ReportLayout, ReportWriter};

/// Kinds compared, in report order. Copy number variants are parsed but not compared.
pub const COMPARED_KINDS: [SvType; 6] = [
    SvType::Bnd,
    SvType::Inv,
    SvType::Dup,
    SvType::Del,
    SvType::Ins,
    SvType::Unk,
];

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Failed to write comparison report: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for a comparison run
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Label of the source input, used in column names
    pub source_label: String,
    /// Label of the target input, used in column names
    pub target_label: String,
    /// Only accept targets sharing at least one gene with the source
    pub only_common_genes: bool,
    /// Maximum summed breakpoint distance of an accepted target
    pub max_distance: Option<u64>,
    /// Kinds to compare; `None` compares all of them
    pub kinds: Option<HashSet<SvType>>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            source_label: "source".to_string(),
            target_label: "target".to_string(),
            only_common_genes: false,
            max_distance: None,
            kinds: None,
        }
    }
}

impl CompareConfig {
    fn includes(&self, kind: SvType) -> bool {
        self.kinds.as_ref().map_or(true, |kinds| kinds.contains(&kind))
    }
}

/// A target variant accepted for a source variant, with its breakpoint distances
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub record: &'a VariantRecord,
    pub src_distance: u64,
    pub dst_distance: u64,
}

impl<'a> Candidate<'a> {
    /// Measure `target` against `source`
    #[must_use]
    pub fn measure(source: &VariantRecord, target: &'a VariantRecord) -> Self {
        Self {
            record: target,
            src_distance: source.src_locus.abs_diff(target.src_locus),
            dst_distance: source.dst_locus.abs_diff(target.dst_locus),
        }
    }

    #[must_use]
    pub fn total_distance(&self) -> u64 {
        self.src_distance.saturating_add(self.dst_distance)
    }
}

fn same_chromosomes(source: &VariantRecord, target: &VariantRecord) -> bool {
    matches!(
        (source.src_chromosome, target.src_chromosome),
        (Some(a), Some(b)) if a == b
    ) && matches!(
        (source.dst_chromosome, target.dst_chromosome),
        (Some(a), Some(b)) if a == b
    )
}

/// Find the target closest to `source` by summed breakpoint distance.
///
/// Targets must sit on the same source and destination chromosomes. A record
/// with an unresolved chromosome on either side never matches. When two
/// targets are equally close, the one appearing later in `targets` is chosen.
#[must_use]
pub fn find_nearest<'a>(
    source: &VariantRecord,
    targets: &'a [VariantRecord],
    config: &CompareConfig,
) -> Option<Candidate<'a>> {
    let mut by_distance: BTreeMap<u64, Candidate<'a>> = BTreeMap::new();

    for target in targets {
        if !same_chromosomes(source, target) {
            continue;
        }

        let candidate = Candidate::measure(source, target);

        if config.only_common_genes && common_genes(&source.gene, &target.gene).is_empty() {
            continue;
        }

        if config
            .max_distance
            .is_some_and(|max| candidate.total_distance() > max)
        {
            continue;
        }

        by_distance.insert(candidate.total_distance(), candidate);
    }

    by_distance.into_values().next()
}

/// Match every source variant of one kind against the target variants of that kind
fn compare_kind<W: Write>(
    kind: SvType,
    sources: &[VariantRecord],
    targets: &[VariantRecord],
    config: &CompareConfig,
    report: &mut ReportWriter<W>,
) -> Result<KindStats, CompareError> {
    let mut processed: HashSet<&VariantRecord> = HashSet::new();
    let mut matched = 0;

    for source in sources {
        if !processed.insert(source) {
            continue;
        }

        let Some(nearest) = find_nearest(source, targets, config) else {
            continue;
        };

        report.write_row(kind, source, &nearest)?;
        matched += 1;
    }

    debug!(
        "{kind}: {matched} of {} source variants matched {} candidates",
        sources.len(),
        targets.len()
    );

    Ok(KindStats {
        kind,
        matched,
        total: sources.len(),
    })
}

/// Compare two variant collections and write the comparison table to `out`.
///
/// Each distinct source variant of a compared kind produces at most one row,
/// describing its nearest target. Returns the per-kind match statistics for the
/// kinds selected in `config`.
///
/// # Errors
///
/// Returns `CompareError::Io` if writing to `out` fails.
pub fn compare<W: Write>(
    source: &VariantCollection,
    target: &VariantCollection,
    config: &CompareConfig,
    out: W,
) -> Result<ComparisonSummary, CompareError> {
    let layout = ReportLayout::for_inputs(source, &config.source_label, target, &config.target_label);
    let mut report = ReportWriter::new(out, layout)?;
    let mut kinds = Vec::new();

    for kind in COMPARED_KINDS {
        if !config.includes(kind) {
            continue;
        }

        kinds.push(compare_kind(
            kind,
            source.get(kind),
            target.get(kind),
            config,
            &mut report,
        )?);
    }

    debug!("Wrote {} comparison rows", report.rows_written());
    report.finish()?;

    Ok(ComparisonSummary {
        source_label: config.source_label.clone(),
        target_label: config.target_label.clone(),
        kinds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chromosome::Chromosome;
    use crate::core::collection::VariantCollectionBuilder;

    fn variant(chrom: Chromosome, src: i64, dst: i64, gene: &str) -> VariantRecord {
        VariantRecord::new(Some(chrom), src, Some(chrom), dst, dst - src, gene)
    }

    fn collection(records: Vec<(VariantRecord, SvType)>) -> VariantCollection {
        let mut builder = VariantCollectionBuilder::new(false);
        for (record, kind) in records {
            builder.add(record, kind);
        }
        builder.build()
    }

    fn run(
        source: &VariantCollection,
        target: &VariantCollection,
        config: &CompareConfig,
    ) -> (ComparisonSummary, Vec<String>) {
        let mut out = Vec::new();
        let summary = compare(source, target, config, &mut out).unwrap();
        let lines = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        (summary, lines)
    }

    #[test]
    fn test_nearest_deletion_selected() {
        let source = collection(vec![(variant(Chromosome::Chr1, 100, 200, "A"), SvType::Del)]);
        let target = collection(vec![
            (variant(Chromosome::Chr1, 150, 260, ""), SvType::Del),
            (variant(Chromosome::Chr1, 90, 210, ""), SvType::Del),
        ]);

        let (summary, lines) = run(&source, &target, &CompareConfig::default());

        assert_eq!(lines.len(), 2);
        let fields: Vec<&str> = lines[1].split('\t').collect();
        assert_eq!(fields[0], "DEL");
        assert_eq!(fields[4], "90");
        assert_eq!(fields[6], "210");
        assert_eq!(fields[9], "20");

        let del = summary.get(SvType::Del).unwrap();
        assert_eq!((del.matched, del.total), (1, 1));
        assert!(summary.line(del).ends_with("1/1 (100.00%)"));
    }

    #[test]
    fn test_chromosome_mismatch_never_matches() {
        let source = variant(Chromosome::Chr1, 100, 200, "");
        let mut other_dst = variant(Chromosome::Chr1, 100, 200, "");
        other_dst.dst_chromosome = Some(Chromosome::Chr2);
        let targets = vec![variant(Chromosome::Chr2, 100, 200, ""), other_dst];

        assert!(find_nearest(&source, &targets, &CompareConfig::default()).is_none());
    }

    #[test]
    fn test_unresolved_chromosome_never_matches() {
        let source = VariantRecord::new(None, 100, None, 200, 100, "");
        let targets = vec![variant(Chromosome::Chr1, 100, 200, "")];

        assert!(find_nearest(&source, &targets, &CompareConfig::default()).is_none());

        // Two unresolved labels are not the same chromosome
        let unresolved = vec![VariantRecord::new(None, 100, None, 200, 100, "")];
        assert!(find_nearest(&source, &unresolved, &CompareConfig::default()).is_none());

        let mut half_resolved = variant(Chromosome::Chr1, 100, 200, "");
        half_resolved.dst_chromosome = None;
        let targets = vec![half_resolved.clone()];
        assert!(find_nearest(&half_resolved, &targets, &CompareConfig::default()).is_none());
    }

    #[test]
    fn test_unresolved_records_are_counted_but_not_reported() {
        let source = collection(vec![(VariantRecord::new(None, 100, None, 200, 100, ""), SvType::Del)]);
        let target = collection(vec![(VariantRecord::new(None, 105, None, 200, 95, ""), SvType::Del)]);

        let (summary, lines) = run(&source, &target, &CompareConfig::default());

        assert_eq!(lines.len(), 1);
        let del = summary.get(SvType::Del).unwrap();
        assert_eq!((del.matched, del.total), (0, 1));
    }

    #[test]
    fn test_total_distance_saturates() {
        let chr1 = Some(Chromosome::Chr1);
        let source = VariantRecord::new(chr1, i64::MIN, chr1, i64::MAX, 0, "");
        let target = VariantRecord::new(chr1, i64::MAX, chr1, i64::MIN, 0, "");

        assert_eq!(Candidate::measure(&source, &target).total_distance(), u64::MAX);
    }

    #[test]
    fn test_tie_prefers_later_target() {
        let source = variant(Chromosome::Chr4, 100, 200, "");
        let targets = vec![
            variant(Chromosome::Chr4, 90, 200, "FIRST"),
            variant(Chromosome::Chr4, 110, 200, "SECOND"),
        ];

        let nearest = find_nearest(&source, &targets, &CompareConfig::default()).unwrap();
        assert_eq!(nearest.record.gene, "SECOND");
        assert_eq!(nearest.total_distance(), 10);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = variant(Chromosome::Chr1, 100, 5000, "");
        let b = variant(Chromosome::Chr1, 130, 4900, "");

        assert_eq!(
            Candidate::measure(&a, &b).total_distance(),
            Candidate::measure(&b, &a).total_distance()
        );
    }

    #[test]
    fn test_max_distance_filter() {
        let source = variant(Chromosome::Chr1, 100, 200, "");
        let targets = vec![
            variant(Chromosome::Chr1, 101, 200, ""),
            variant(Chromosome::Chr1, 100, 200, ""),
        ];

        let exact_only = CompareConfig {
            max_distance: Some(0),
            ..CompareConfig::default()
        };
        let nearest = find_nearest(&source, &targets[..1], &exact_only);
        assert!(nearest.is_none());
        let nearest = find_nearest(&source, &targets, &exact_only).unwrap();
        assert_eq!(nearest.total_distance(), 0);

        let far = vec![variant(Chromosome::Chr1, 1_000_000, 9_000_000, "")];
        assert!(find_nearest(&source, &far, &CompareConfig::default()).is_some());
    }

    #[test]
    fn test_common_gene_filter() {
        let source = variant(Chromosome::Chr1, 100, 200, "TP53/BRCA1");
        let targets = vec![
            variant(Chromosome::Chr1, 100, 200, "EGFR"),
            variant(Chromosome::Chr1, 500, 700, "brca1"),
        ];
        let config = CompareConfig {
            only_common_genes: true,
            ..CompareConfig::default()
        };

        let nearest = find_nearest(&source, &targets, &config).unwrap();
        assert_eq!(nearest.record.gene, "brca1");

        let blank = variant(Chromosome::Chr1, 100, 200, "");
        assert!(find_nearest(&blank, &targets, &config).is_none());
    }

    #[test]
    fn test_repeated_source_counted_but_reported_once() {
        let source = collection(vec![
            (variant(Chromosome::Chr2, 10, 20, ""), SvType::Inv),
            (variant(Chromosome::Chr2, 10, 20, ""), SvType::Inv),
            (variant(Chromosome::Chr3, 10, 20, ""), SvType::Inv),
        ]);
        let target = collection(vec![(variant(Chromosome::Chr2, 12, 22, ""), SvType::Inv)]);

        let (summary, lines) = run(&source, &target, &CompareConfig::default());

        assert_eq!(lines.len(), 2);
        let inv = summary.get(SvType::Inv).unwrap();
        assert_eq!((inv.matched, inv.total), (1, 3));
        assert_eq!(inv.percentage(), 33.33);
    }

    #[test]
    fn test_empty_kind_reports_zero() {
        let source = collection(vec![]);
        let target = collection(vec![(variant(Chromosome::Chr1, 1, 2, ""), SvType::Dup)]);

        let (summary, lines) = run(&source, &target, &CompareConfig::default());

        assert_eq!(lines.len(), 1);
        assert_eq!(summary.kinds.len(), COMPARED_KINDS.len());
        let dup = summary.get(SvType::Dup).unwrap();
        assert!(summary.line(dup).ends_with("0/0 (0.00%)"));
    }

    #[test]
    fn test_kind_filter_and_cnv_exclusion() {
        let source = collection(vec![
            (variant(Chromosome::Chr1, 1, 2, ""), SvType::Del),
            (variant(Chromosome::Chr1, 1, 2, ""), SvType::Cnv),
            (variant(Chromosome::Chr1, 1, 2, ""), SvType::Ins),
        ]);
        let target = source.clone();

        let (summary, lines) = run(&source, &target, &CompareConfig::default());
        assert!(summary.get(SvType::Cnv).is_none());
        assert_eq!(lines.len(), 3);

        let only_ins = CompareConfig {
            kinds: Some(HashSet::from([SvType::Ins, SvType::Cnv])),
            ..CompareConfig::default()
        };
        let (summary, lines) = run(&source, &target, &only_ins);
        assert_eq!(summary.kinds.len(), 1);
        assert_eq!(summary.kinds[0].kind, SvType::Ins);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("INS\t"));
    }

    #[test]
    fn test_rows_follow_kind_order() {
        let source = collection(vec![
            (variant(Chromosome::Chr1, 1, 2, ""), SvType::Unk),
            (variant(Chromosome::Chr1, 1, 2, ""), SvType::Del),
            (variant(Chromosome::Chr1, 1, 2, ""), SvType::Bnd),
        ]);
        let target = source.clone();

        let (_, lines) = run(&source, &target, &CompareConfig::default());
        let kinds: Vec<&str> = lines[1..]
            .iter()
            .filter_map(|line| line.split('\t').next())
            .collect();
        assert_eq!(kinds, ["BND", "DEL", "UNK"]);
    }
}
