//! End-to-end tests of the sv-comparator binary
//!
//! Each test writes small SMAP / AnnotSV fixtures into a temporary directory,
//! runs the binary and checks the report file and the summary on stdout.

use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use tempfile::TempDir;

const SMAP: &str = "\
# SMAP File Version:\t0.9
#h SmapEntryID\tQryContigID\tRefcontigID1\tRefcontigID2\tQryStartPos\tQryEndPos\tRefStartPos\tRefEndPos\tConfidence\tType
1\t10\t1\t1\t1.0\t2.0\t100.0\t200.0\t0.95\tdeletion
2\t10\t1\t1\t1.0\t2.0\t100.0\t200.0\t0.95\tdeletion
3\t11\t12\t12\t1.0\t2.0\t5000.0\t9000.0\t0.50\tinversion
4\t12\t7\t12\t1.0\t2.0\t400.0\t800.0\t0.10\ttranslocation_interchr
";

/// AnnotSV row with the columns the parser reads filled in
fn annotsv_row(chrom: &str, start: u64, end: u64, sv_type: &str, alt: &str, gene: &str) -> String {
    let mut fields = vec![String::new(); 17];
    fields[0] = "id".to_string();
    fields[1] = chrom.to_string();
    fields[2] = start.to_string();
    fields[3] = end.to_string();
    fields[4] = (end - start).to_string();
    fields[5] = sv_type.to_string();
    fields[9] = alt.to_string();
    fields[14] = "0/1:30,10".to_string();
    fields[15] = "full".to_string();
    fields[16] = gene.to_string();
    fields.join("\t")
}

fn annotsv_text() -> String {
    let rows = [
        annotsv_row("1", 150, 260, "DEL", "<DEL>", "GENE_B"),
        annotsv_row("1", 90, 210, "DEL", "<DEL>", "GENE_A"),
        annotsv_row("12", 4000, 9500, "INV", "<INV>", ""),
        annotsv_row("7", 410, 411, "BND", "N]chr12:790]", ""),
    ];
    format!("AnnotSV_ID\tSV_chrom\tSV_start\tSV_end\n{}\n", rows.join("\n"))
}

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("calls.smap"), SMAP).expect("Failed to write SMAP");
        std::fs::write(dir.path().join("calls.tsv"), annotsv_text()).expect("Failed to write TSV");
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).expect("Failed to read output")
    }
}

fn sv_comparator() -> Command {
    Command::cargo_bin("sv-comparator").expect("binary should be built")
}

fn compare_cmd(fixture: &Fixture, source: &Path) -> Command {
    let mut cmd = sv_comparator();
    cmd.arg("compare")
        .arg(source)
        .arg(fixture.path("calls.tsv"))
        .arg("-o")
        .arg(fixture.path("result.tsv"));
    cmd
}

#[test]
fn test_compare_writes_report_and_summary() {
    let fixture = Fixture::new();

    compare_cmd(&fixture, &fixture.path("calls.smap"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Common SV (bionano with annotsv / bionano) - DEL:\t1/1 (100.00%)",
        ))
        .stdout(predicate::str::contains("- INV:\t1/1 (100.00%)"))
        .stdout(predicate::str::contains("- BND:\t1/1 (100.00%)"))
        .stdout(predicate::str::contains("Bionano Genomics statistics:"))
        .stdout(predicate::str::contains("AnnotSV statistics:"));

    let report = fixture.read("result.tsv");
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines.len(), 4, "header plus one row per matched kind");
    assert!(lines[0].starts_with("sv_type\tsrc_chr\tdst_chr\tbionano_src_pos\tannotsv_src_pos"));
    assert!(lines[0].ends_with("bionano_freq\tannotsv_freq\tbionano_confidence"));

    // Kind order: BND, INV, DEL
    assert!(lines[1].starts_with("BND\tchr7\tchr12\t400\t410\t800\t790\t10\t10\t20\t"));
    assert!(lines[2].starts_with("INV\tchr12\tchr12\t"));

    let deletion: Vec<&str> = lines[3].split('\t').collect();
    assert_eq!(&deletion[..10], ["DEL", "chr1", "chr1", "100", "90", "200", "210", "10", "10", "20"]);
    assert_eq!(deletion[15], "");
    assert_eq!(deletion[16], "25.00");
    assert_eq!(deletion[17], "0.95");
}

#[test]
fn test_compare_deduplicates_by_default() {
    let fixture = Fixture::new();

    compare_cmd(&fixture, &fixture.path("calls.smap"))
        .arg("--keep-duplicates")
        .assert()
        .success()
        .stdout(predicate::str::contains("- DEL:\t1/2 (50.00%)"));

    compare_cmd(&fixture, &fixture.path("calls.smap"))
        .assert()
        .success()
        .stdout(predicate::str::contains("- DEL:\t1/1 (100.00%)"));
}

#[test]
fn test_compare_with_filters() {
    let fixture = Fixture::new();

    compare_cmd(&fixture, &fixture.path("calls.smap"))
        .args(["-d", "100", "-t", "DEL,INV,bogus"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- DEL:"))
        .stdout(predicate::str::contains("- INV:\t0/1 (0.00%)"))
        .stdout(predicate::str::contains("- BND:").not())
        .stderr(predicate::str::contains("Skipping invalid structural variant type provided: BOGUS"));

    let report = fixture.read("result.tsv");
    assert_eq!(report.lines().count(), 2);
}

#[test]
fn test_compare_gene_intersection_requires_genes() {
    let fixture = Fixture::new();

    // SMAP calls carry no gene annotation, so nothing can share a gene
    compare_cmd(&fixture, &fixture.path("calls.smap"))
        .arg("-g")
        .assert()
        .success()
        .stdout(predicate::str::contains("- DEL:\t0/1 (0.00%)"));

    assert_eq!(fixture.read("result.tsv").lines().count(), 1);
}

#[test]
fn test_compare_gzipped_source() {
    let fixture = Fixture::new();
    let gz_path = fixture.path("calls.smap.gz");

    let mut encoder = GzEncoder::new(
        std::fs::File::create(&gz_path).expect("Failed to create gz"),
        Compression::default(),
    );
    encoder.write_all(SMAP.as_bytes()).expect("Failed to compress");
    encoder.finish().expect("Failed to finish gz");

    compare_cmd(&fixture, &gz_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("- DEL:\t1/1 (100.00%)"));
}

#[test]
fn test_compare_json_summary() {
    let fixture = Fixture::new();

    let output = compare_cmd(&fixture, &fixture.path("calls.smap"))
        .args(["--format", "json"])
        .output()
        .expect("Failed to run");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["source_label"], "bionano");
    assert_eq!(json["comparison"][0]["sv_type"], "BND");
    assert_eq!(json["inputs"][1]["name"], "AnnotSV");
}

#[test]
fn test_compare_custom_labels() {
    let fixture = Fixture::new();

    compare_cmd(&fixture, &fixture.path("calls.smap"))
        .args(["--source-label", "om", "--target-label", "ont"])
        .assert()
        .success();

    let report = fixture.read("result.tsv");
    assert!(report.starts_with("sv_type\tsrc_chr\tdst_chr\tom_src_pos\tont_src_pos\tom_dst_pos\tont_dst_pos"));
}

#[test]
fn test_compare_missing_input_fails() {
    let fixture = Fixture::new();

    compare_cmd(&fixture, &fixture.path("missing.smap"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse Bionano Genomics file"));
}

#[test]
fn test_compare_malformed_row_fails() {
    let fixture = Fixture::new();
    let bad = fixture.path("bad.smap");
    std::fs::write(&bad, "1\t10\t1\t1\t1.0\t2.0\tnot_a_number\t200.0\t0.9\tdeletion\n")
        .expect("Failed to write");

    compare_cmd(&fixture, &bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid position on line 1"));
}

#[test]
fn test_missing_required_arguments() {
    sv_comparator().arg("compare").assert().failure();
}

#[test]
fn test_stats_command() {
    let fixture = Fixture::new();

    sv_comparator()
        .arg("stats")
        .arg(fixture.path("calls.tsv"))
        .args(["--input-format", "annotsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AnnotSV statistics:"))
        .stdout(predicate::str::contains("Deletions (DEL):\t2"))
        .stdout(predicate::str::contains("Translocations (BND):\t1"));
}
