//! End-to-end tests: annotate a hits file, then summarize the annotated output.

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use hitannot_rs::{
    annotate_hits, summarize_hits, AccessMode, AnnotateConfig, HitAnnotError, SummarizeConfig,
    SummaryOutcome,
};

const STANDARD_ANNOTATIONS: &str = "contig_id\tstart\tstop\tstrand\tlocus_tag\tlength\tsource\tkegg_ko\tcazy\tprokka_gene\tprokka_EC_number\tprokka_product\tswissprot_gene\tswissprot_EC_number\tswissprot_product\n\
k141_1\t1\t300\t+\tL1\t300\tprodigal\tK02313\t\tdnaA\t\tChromosomal replication initiator\tDNAA_ECOLI\t\tChromosomal replication initiator protein DnaA\n\
k141_2\t10\t400\t-\tL2\t390\tprodigal\t\t\t\t\thypothetical protein\t\t\t\n\
k141_3\t5\t90\t+\tL3\t85\tprodigal\tK00001\t\tadhE\t1.1.1.1\tAlcohol dehydrogenase\t\t1.1.1.1\t\n";

const HITS: &str = "C\tseq1\t562\t300\t562\tk141_1;1;300\tMKV\tBacteria;Proteobacteria;Gammaproteobacteria;Enterobacterales;Enterobacteriaceae;Escherichia;Escherichia coli\n\
C\tseq2\t2\t390\t2,1224\tk141_2;10;400,k141_7;1;20\tMST\tBacteria;NA;NA;NA;NA;NA;NA\n\
U\tseq3\t0\t120\n\
C\tseq4\t2\t85\t2\tk141_3;5;90\tMAA\tBacteria;Proteobacteria;NA;NA;NA;NA;NA\n";

fn write_gz(path: &Path, contents: &str) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

fn read_gz(path: &Path) -> String {
    let mut out = String::new();
    MultiGzDecoder::new(File::open(path).unwrap())
        .read_to_string(&mut out)
        .unwrap();
    out
}

fn annotate_config(dir: &Path, annotations: PathBuf, hits: PathBuf) -> AnnotateConfig {
    AnnotateConfig {
        sample: "S1".to_string(),
        hits,
        annotations,
        output_dir: dir.to_path_buf(),
        mode: AccessMode::Remote,
        write_header: true,
    }
}

#[test]
fn test_annotate_then_summarize() {
    let dir = tempdir().unwrap();
    let annotations = dir.path().join("annotations.txt.gz");
    let hits = dir.path().join("hits.txt.gz");
    write_gz(&annotations, STANDARD_ANNOTATIONS);
    write_gz(&hits, HITS);

    let run = annotate_hits(&annotate_config(dir.path(), annotations, hits)).unwrap();
    assert_eq!(run.rows_written, 4);
    assert_eq!(run.classified, 3);
    assert_eq!(run.unclassified, 1);
    assert_eq!(run.custom_columns.len(), 8);
    assert_eq!(run.output_path, dir.path().join("S1_annotated.txt.gz"));

    let annotated = read_gz(&run.output_path);
    let rows: Vec<Vec<&str>> = annotated
        .lines()
        .map(|l| l.split('\t').collect())
        .collect();
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r.len() == 16), "output must be rectangular");
    assert_eq!(rows[0][7], "taxonomic_lineage");
    assert_eq!(rows[0][8], "kegg_ko");
    assert_eq!(rows[1][8], "K02313");
    assert_eq!(rows[2][12], "hypothetical protein");
    assert!(rows[3][4..].iter().all(|f| f.is_empty()));

    let summary = summarize_hits(&SummarizeConfig {
        sample: "S1".to_string(),
        hits: run.output_path.clone(),
        output_dir: dir.path().to_path_buf(),
    })
    .unwrap();

    let report = match summary {
        SummaryOutcome::Standard(report) => report,
        SummaryOutcome::CustomSchema => panic!("standard columns were present"),
    };
    assert_eq!(report.total_sequences, 4);

    let text = fs::read_to_string(dir.path().join("S1_summary.txt")).unwrap();
    let expected = "Sequences: 4\n\
Taxonomy assignments\n \
Superkingdom: 3 (75.00%)\n \
Phylum: 2 (50.00%)\n \
Class: 1 (25.00%)\n \
Order: 1 (25.00%)\n \
Family: 1 (25.00%)\n \
Genus: 1 (25.00%)\n \
Species: 1 (25.00%)\n\
Functional assignments\n \
Function: 3 (75.00%)\n \
Non-hypothetical: 2 (50.00%)\n \
EC: 1 (25.00%)\n";
    assert_eq!(text, expected);
}

#[test]
fn test_missing_annotation_fails_run() {
    let dir = tempdir().unwrap();
    let annotations = dir.path().join("annotations.txt");
    let hits = dir.path().join("hits.txt");
    fs::write(
        &annotations,
        "contig_id\tstart\tstop\ta\tb\tc\td\tpathway\nk141_1\t1\t300\t\t\t\t\tmap00010\n",
    )
    .unwrap();
    fs::write(&hits, "C\tseq1\t562\t300\t562\tk141_5;1;50\tMKV\tBacteria\n").unwrap();

    let mut config = annotate_config(dir.path(), annotations, hits);
    config.mode = AccessMode::Local;

    let err = annotate_hits(&config).unwrap_err();
    assert!(matches!(err, HitAnnotError::MissingAnnotation { ref key, .. } if key == "k141_5;1;50"));
}

#[test]
fn test_local_mode_reads_plain_files_without_header() {
    let dir = tempdir().unwrap();
    let annotations = dir.path().join("annotations.txt");
    let hits = dir.path().join("hits.txt");
    fs::write(
        &annotations,
        "contig_id\tstart\tstop\ta\tb\tc\td\tpathway\nk141_1\t1\t300\t\t\t\t\tmap00010\n",
    )
    .unwrap();
    fs::write(&hits, "C\tseq1\t562\t300\t562\tk141_1;1;300\tMKV\nU\tseq2\n").unwrap();

    let mut config = annotate_config(dir.path(), annotations, hits);
    config.mode = AccessMode::Local;
    config.write_header = false;

    let run = annotate_hits(&config).unwrap();
    let annotated = read_gz(&run.output_path);
    assert_eq!(
        annotated,
        "C\tseq1\t562\t300\t562\tk141_1;1;300\tMKV\t\tmap00010\n\
         U\tseq2\t\t\t\t\t\t\t\n"
    );
}

#[test]
fn test_remote_mode_rejects_plain_input() {
    let dir = tempdir().unwrap();
    let annotations = dir.path().join("annotations.txt");
    let hits = dir.path().join("hits.txt");
    fs::write(&annotations, STANDARD_ANNOTATIONS).unwrap();
    fs::write(&hits, HITS).unwrap();

    let err = annotate_hits(&annotate_config(dir.path(), annotations, hits)).unwrap_err();
    assert!(matches!(err, HitAnnotError::Io(_)));
}

#[test]
fn test_summary_of_custom_database() {
    let dir = tempdir().unwrap();
    let hits = dir.path().join("S2_annotated.txt");
    fs::write(
        &hits,
        "status\tsequence_id\ttaxonomy_id\tlength\ttaxonomy_ids_lca\tsequence_ids_lca\tprotein_sequence\ttaxonomic_lineage\tpathway\n\
         C\tseq1\t2\t10\t2\tk;1;2\tM\tBacteria\tmap00010\n",
    )
    .unwrap();

    let outcome = summarize_hits(&SummarizeConfig {
        sample: "S2".to_string(),
        hits,
        output_dir: dir.path().to_path_buf(),
    })
    .unwrap();
    assert_eq!(outcome, SummaryOutcome::CustomSchema);

    let text = fs::read_to_string(dir.path().join("S2_summary.txt")).unwrap();
    assert_eq!(
        text,
        "custom databases without the expected columns are not supported in the summary function\n"
    );
}

#[test]
fn test_summary_of_empty_input_fails() {
    let dir = tempdir().unwrap();
    let hits = dir.path().join("S3_annotated.txt.gz");
    write_gz(&hits, "status\ttaxonomic_lineage\tprokka_gene\tprokka_EC_number\tprokka_product\tswissprot_gene\tswissprot_EC_number\tswissprot_product\n");

    let err = summarize_hits(&SummarizeConfig {
        sample: "S3".to_string(),
        hits,
        output_dir: dir.path().to_path_buf(),
    })
    .unwrap_err();
    assert!(matches!(err, HitAnnotError::EmptyInput(_)));
    assert!(!dir.path().join("S3_summary.txt").exists());
}

#[test]
fn test_seven_column_hits_count_no_lineage() {
    let dir = tempdir().unwrap();
    let annotations = dir.path().join("annotations.txt");
    let hits = dir.path().join("hits.txt");
    fs::write(&annotations, STANDARD_ANNOTATIONS).unwrap();
    fs::write(
        &hits,
        "C\tseq1\t562\t300\t562\tk141_1;1;300\tMKV\n\
         C\tseq2\t2\t390\t2\tk141_2;10;400\tMST\n",
    )
    .unwrap();

    let mut config = annotate_config(dir.path(), annotations, hits);
    config.mode = AccessMode::Local;
    let run = annotate_hits(&config).unwrap();

    let outcome = summarize_hits(&SummarizeConfig {
        sample: "S1".to_string(),
        hits: run.output_path,
        output_dir: dir.path().to_path_buf(),
    })
    .unwrap();
    let report = match outcome {
        SummaryOutcome::Standard(report) => report,
        SummaryOutcome::CustomSchema => panic!("standard columns were present"),
    };
    assert_eq!(report.total_sequences, 2);

    let text = fs::read_to_string(dir.path().join("S1_summary.txt")).unwrap();
    assert!(text.contains(" Superkingdom: 0 (0.00%)\n"));
    assert!(text.contains(" Species: 0 (0.00%)\n"));
    assert!(text.contains(" Function: 2 (100.00%)\n"));
}
