//! End-to-end integration tests for ocr2para.
//!
//! Every test builds its fixture corpus in a temp directory, runs the real
//! entry points against it, and checks the files that land on disk. No
//! network, no external fixtures; the suite is fully hermetic.

use ocr2para::{
    clean, clean_batch, clean_file, clean_stream, clean_to_file, BoilerplateStripper,
    CleanConfig, CleanError, ParatextTable,
};
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// A corpus directory in the layout the pipeline expects:
/// `<root>/converted/` holds inputs, side files land in `<root>/paratext/`.
struct Corpus {
    _dir: TempDir,
    root: PathBuf,
}

impl Corpus {
    fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = dir.path().to_path_buf();
        std::fs::create_dir_all(root.join("converted")).expect("mkdir converted");
        Self { _dir: dir, root }
    }

    fn add(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.root.join("converted").join(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    fn table(&self, rows: &str) -> PathBuf {
        let path = self.root.join("paratext-corrected.csv");
        std::fs::write(&path, format!("Label,start,end\n{rows}")).expect("write table");
        path
    }

    fn paratext_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.root.join("paratext").join(name)).expect("read side file")
    }

    fn out_dir(&self) -> PathBuf {
        self.root.join("cleaned")
    }
}

/// Assert the cleaned text satisfies the output contract.
fn assert_cleaned_quality(text: &str, context: &str) {
    assert!(!text.contains('\r'), "[{context}] carriage return in output");
    assert!(!text.contains("\n\n"), "[{context}] blank line in output");
    for line in text.lines() {
        assert_eq!(line, line.trim(), "[{context}] line with edge whitespace: {line:?}");
        assert!(!line.contains("  "), "[{context}] double space in line: {line:?}");
        assert!(!line.is_empty(), "[{context}] empty line in output");
    }
    for ch in ['\u{00A0}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2014}', '\u{2026}', '\u{00AD}', '\u{200B}', '\u{FB01}'] {
        assert!(
            !text.contains(ch),
            "[{context}] unsimplified character U+{:04X} in output",
            ch as u32
        );
    }
}

// ── Whole-pipeline behaviour ─────────────────────────────────────────────────

#[tokio::test]
async fn messy_scan_comes_out_canonical() {
    let corpus = Corpus::new();
    let input = corpus.add(
        "novel042.txt",
        "  Het oude huis.  \r\n\r\n\u{2018}De verraders\u{2019}, riep de sjah.\r\n\r\n* * *\r\n\r\nDe ﬁlosoof zweeg\u{2026}\r\n",
    );
    let out = corpus.root.join("cleaned.txt");

    clean_to_file(&input, &out, &CleanConfig::default())
        .await
        .expect("pipeline should succeed");

    let cleaned = std::fs::read_to_string(&out).unwrap();
    assert_eq!(
        cleaned,
        "Het oude huis.\n'De verraders', riep de sjah.\nDe filosoof zweeg...\n"
    );
    assert_cleaned_quality(cleaned.trim_end_matches('\n'), "messy scan");
}

#[tokio::test]
async fn cleaning_a_cleaned_file_changes_nothing() {
    let corpus = Corpus::new();
    let input = corpus.add(
        "novel042.txt",
        "Tekst met \u{201C}aanhalingen\u{201D} \u{2014} en strepen.\n\n\nTweede\u{00A0}alinea\u{2026}\n",
    );
    let once_path = corpus.root.join("once.txt");
    let twice_path = corpus.root.join("twice.txt");
    let config = CleanConfig::default();

    clean_to_file(&input, &once_path, &config).await.unwrap();
    clean_to_file(&once_path, &twice_path, &config).await.unwrap();

    let once = std::fs::read_to_string(&once_path).unwrap();
    let twice = std::fs::read_to_string(&twice_path).unwrap();
    assert_eq!(once, twice, "the pipeline must be idempotent");
}

#[test]
fn every_line_ending_convention_normalises_identically() {
    let lf = "eerste regel\ntweede regel\n\nderde regel\n";
    let crlf = lf.replace('\n', "\r\n");
    let cr = lf.replace('\n', "\r");

    let expected = "eerste regel\ntweede regel\nderde regel";
    assert_eq!(clean(lf), expected);
    assert_eq!(clean(&crlf), expected);
    assert_eq!(clean(&cr), expected);
}

#[test]
fn separator_line_between_paragraphs_vanishes() {
    let input = "Eerste alinea.\n\n=====\n\nTweede alinea.\n";
    assert_eq!(clean(input), "Eerste alinea.\nTweede alinea.");
}

// ── Front/back matter ────────────────────────────────────────────────────────

fn ten_line_document() -> String {
    (1..=10).map(|n| format!("regel {n}\n")).collect()
}

#[tokio::test]
async fn front_and_back_matter_are_excised_and_persisted() {
    let corpus = Corpus::new();
    let input = corpus.add("novel042.txt", ten_line_document());
    let table = corpus.table("novel042,3,7\n");

    let config = CleanConfig::builder()
        .paratext(ParatextTable::load(&table).unwrap())
        .build()
        .unwrap();

    let output = clean_file(&input, &config).await.unwrap();
    assert_eq!(
        output.text,
        "regel 3\nregel 4\nregel 5\nregel 6\nregel 7"
    );
    assert!(output.stats.paratext_applied);
    assert_eq!(output.stats.front_lines, 2);
    assert_eq!(output.stats.back_lines, 3);

    assert_eq!(corpus.paratext_file("novel042_1_front.txt"), "regel 1\nregel 2\n");
    assert_eq!(
        corpus.paratext_file("novel042_2_back.txt"),
        "regel 8\nregel 9\nregel 10\n"
    );
}

#[tokio::test]
async fn document_without_a_record_passes_through_unstripped() {
    let corpus = Corpus::new();
    let input = corpus.add("other.txt", ten_line_document());
    let table = corpus.table("novel042,3,7\n");

    let config = CleanConfig::builder()
        .paratext(ParatextTable::load(&table).unwrap())
        .build()
        .unwrap();

    let output = clean_file(&input, &config).await.unwrap();
    assert!(!output.stats.paratext_applied);
    assert_eq!(output.stats.paragraphs, 10);
    assert!(!corpus.root.join("paratext").exists());
}

#[tokio::test]
async fn out_of_bounds_record_fails_that_document() {
    let corpus = Corpus::new();
    let input = corpus.add("novel042.txt", ten_line_document());
    let table = corpus.table("novel042,3,99\n");

    let config = CleanConfig::builder()
        .paratext(ParatextTable::load(&table).unwrap())
        .build()
        .unwrap();

    let err = clean_file(&input, &config).await.unwrap_err();
    assert!(matches!(err, CleanError::RangeOutOfBounds { total: 10, .. }));
}

#[test]
fn duplicate_labels_abort_before_any_document() {
    let corpus = Corpus::new();
    corpus.add("novel042.txt", ten_line_document());
    let table = corpus.table("novel042,3,7\nnovel042,1,9\n");

    let err = ParatextTable::load(&table).unwrap_err();
    assert!(matches!(err, CleanError::DuplicateLabel { .. }));
    // Validation failed at load time: nothing has touched the corpus.
    assert!(!corpus.out_dir().exists());
    assert!(!corpus.root.join("paratext").exists());
}

// ── Boilerplate stripping ────────────────────────────────────────────────────

/// A stub that replaces the whole document, for asserting exactly when the
/// stripper is and is not invoked.
struct StubStripper;

impl BoilerplateStripper for StubStripper {
    fn strip(&self, _raw: &[u8]) -> Vec<u8> {
        b"stub output\n".to_vec()
    }
}

#[tokio::test]
async fn marked_document_goes_through_the_stripper() {
    let corpus = Corpus::new();
    let input = corpus.add(
        "etext.txt",
        "The Project Gutenberg eBook of X\n\nactual text\n",
    );

    let config = CleanConfig::builder()
        .boilerplate_stripper(Arc::new(StubStripper))
        .build()
        .unwrap();

    let output = clean_file(&input, &config).await.unwrap();
    assert!(output.stats.boilerplate_stripped);
    assert_eq!(output.text, "stub output");
}

#[tokio::test]
async fn unmarked_document_skips_the_stripper() {
    let corpus = Corpus::new();
    let input = corpus.add("plain.txt", "gewone tekst zonder merkteken\n");

    let config = CleanConfig::builder()
        .boilerplate_stripper(Arc::new(StubStripper))
        .build()
        .unwrap();

    let output = clean_file(&input, &config).await.unwrap();
    assert!(!output.stats.boilerplate_stripped);
    assert_eq!(output.text, "gewone tekst zonder merkteken");
}

#[tokio::test]
async fn stripping_can_be_disabled_entirely() {
    let corpus = Corpus::new();
    let input = corpus.add(
        "etext.txt",
        "The Project Gutenberg eBook of X\n\nactual text\n",
    );

    let config = CleanConfig::builder().no_boilerplate_stripper().build().unwrap();

    let output = clean_file(&input, &config).await.unwrap();
    assert!(!output.stats.boilerplate_stripped);
    assert!(output.text.contains("actual text"));
}

#[tokio::test]
async fn builtin_gutenberg_stripper_removes_header_and_footer() {
    let corpus = Corpus::new();
    let input = corpus.add(
        "etext.txt",
        "The Project Gutenberg eBook of Max Havelaar\n\
         \n\
         *** START OF THE PROJECT GUTENBERG EBOOK MAX HAVELAAR ***\n\
         Eerste hoofdstuk.\n\
         *** END OF THE PROJECT GUTENBERG EBOOK MAX HAVELAAR ***\n\
         licence text\n",
    );

    let output = clean_file(&input, &CleanConfig::default()).await.unwrap();
    assert!(output.stats.boilerplate_stripped);
    assert_eq!(output.text, "Eerste hoofdstuk.");
}

// ── Batches ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn batch_cleans_a_corpus_with_a_shared_table() {
    let corpus = Corpus::new();
    let a = corpus.add("a.txt", ten_line_document());
    let b = corpus.add("b.txt", "enige alinea\n");
    let table = corpus.table("a,2,9\n");

    let config = CleanConfig::builder()
        .paratext(ParatextTable::load(&table).unwrap())
        .concurrency(2)
        .build()
        .unwrap();

    let outcome = clean_batch(&[a, b], &corpus.out_dir(), &config).await.unwrap();
    assert_eq!(outcome.succeeded, 2);
    assert_eq!(outcome.failed, 0);

    let a_clean = std::fs::read_to_string(corpus.out_dir().join("a.txt")).unwrap();
    assert_eq!(a_clean.lines().count(), 8, "lines 2-9 survive for a");
    assert_eq!(corpus.paratext_file("a_1_front.txt"), "regel 1\n");
    assert!(corpus.out_dir().join("b.txt").exists());
}

#[tokio::test]
async fn stream_reports_every_document() {
    let corpus = Corpus::new();
    let inputs: Vec<PathBuf> = (0..5)
        .map(|n| corpus.add(&format!("doc{n}.txt"), format!("tekst {n}\n")))
        .collect();

    let stream = clean_stream(inputs, &corpus.out_dir(), &CleanConfig::default())
        .await
        .unwrap();
    let reports: Vec<_> = stream.collect().await;

    assert_eq!(reports.len(), 5);
    assert!(reports.iter().all(|r| r.outcome.is_ok()));
    for report in &reports {
        assert!(report.output.starts_with(corpus.out_dir()));
        assert!(report.output.exists());
    }
}

// ── Output contract on assorted real-world shapes ────────────────────────────

#[tokio::test]
async fn assorted_messy_inputs_all_satisfy_the_contract() {
    let fixtures: &[(&str, &str)] = &[
        ("soft_hyphens", "woor\u{00AD}\nden en nog\u{00AD}maals woor\u{00AD}den\n"),
        ("bullets", "\u{2022} eerste punt\n\u{2022} tweede punt\n"),
        ("guillemets", "\u{00AB}Bonjour\u{00BB}, zei hij\u{2026}\n"),
        ("tabs", "kolom\t\tkolom\t\n\n\n\tkolom\n"),
        ("dash_table", "a -- b --- c\n\n----\n\nd\n"),
        ("brackets", "zie [noot 1] en [noot 2]\n"),
    ];

    for (name, contents) in fixtures {
        let corpus = Corpus::new();
        let input = corpus.add(&format!("{name}.txt"), *contents);
        let output = clean_file(&input, &CleanConfig::default()).await.unwrap();
        assert_cleaned_quality(&output.text, name);
    }
}
