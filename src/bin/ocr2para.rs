//! CLI binary for ocr2para.
//!
//! A thin shim over the library crate that maps CLI flags to `CleanConfig`
//! and prints results.

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ocr2para::{
    audit_file, clean_batch, clean_file, clean_to_file, take_tokens, write_seed_table,
    CleanConfig, CleanProgressCallback, ParatextTable, ProgressCallback,
};
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Where the line-range table lives when no `--paratext` flag is given.
const DEFAULT_PARATEXT_TABLE: &str = "output/paratext-corrected.csv";

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: renders a live progress bar and per-document
/// log lines using [indicatif]. Documents complete out-of-order in a
/// concurrent batch; the per-path start-time map keeps elapsed reporting
/// correct regardless.
struct CliProgressCallback {
    bar: ProgressBar,
    start_times: Mutex<HashMap<PathBuf, Instant>>,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    fn new(total: usize) -> Arc<Self> {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        bar.set_style(style);
        bar.set_prefix("Cleaning");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
            errors: AtomicUsize::new(0),
        })
    }
}

impl CleanProgressCallback for CliProgressCallback {
    fn on_file_start(&self, path: &Path, _total: usize) {
        self.start_times
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), Instant::now());
        self.bar
            .set_message(path.file_name().unwrap_or_default().to_string_lossy().into_owned());
    }

    fn on_file_complete(&self, path: &Path, _total: usize, paragraphs: usize) {
        let elapsed_ms = self
            .start_times
            .lock()
            .unwrap()
            .remove(path)
            .map(|t| t.elapsed().as_millis())
            .unwrap_or(0);

        self.bar.println(format!(
            "  {} {}  {:<8}  {}",
            green("✓"),
            path.display(),
            dim(&format!("{paragraphs:>5} paras")),
            dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, path: &Path, _total: usize, error: &str) {
        self.start_times.lock().unwrap().remove(path);
        self.errors.fetch_add(1, Ordering::SeqCst);

        // Truncate very long error messages to keep output tidy.
        let msg: String = if error.chars().count() > 80 {
            let head: String = error.chars().take(79).collect();
            format!("{head}\u{2026}")
        } else {
            error.to_string()
        };

        self.bar
            .println(format!("  {} {}  {}", red("✗"), path.display(), red(&msg)));
        self.bar.inc(1);
    }

    fn on_run_complete(&self, total_files: usize, success_count: usize) {
        let failed = total_files.saturating_sub(success_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} documents cleaned successfully",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} documents cleaned  ({} failed)",
                if failed == total_files {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&success_count.to_string()),
                total_files,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic cleaning (stdout)
  ocr2para converted/novel042.txt

  # Clean to file
  ocr2para converted/novel042.txt -o cleaned/novel042.txt

  # Clean a whole directory's worth concurrently
  ocr2para converted/*.txt -o cleaned/ -c 8

  # Excise front/back matter per a corrected line-range table
  ocr2para --paratext output/paratext-corrected.csv converted/*.txt -o cleaned/

  # What non-ASCII characters are in these files?
  ocr2para --audit converted/*.txt

  # Seed a line-range table covering each document in full
  ocr2para --init-table paratext-uncorrected.csv converted/*.txt

  # First 1000 tokens of a tokenised file
  ocr2para --first-tokens 1000 cleaned/novel042.tok -o sample/novel042.tok

LINE-RANGE TABLE:
  CSV with columns Label,start,end. Label is the input file name without
  its extension; start/end are 1-based, inclusive line numbers of the core
  text. Rows with an empty start are ignored. Duplicate labels or
  non-positive line numbers abort the run before any document is touched.
  When --paratext is not given, output/paratext-corrected.csv is used if it
  exists. Excised matter is written next to the input tree:
  corpus/converted/x.txt -> corpus/paratext/x_1_front.txt, x_2_back.txt.

ENVIRONMENT VARIABLES:
  OCR2PARA_OUTPUT        Default for -o/--output
  OCR2PARA_PARATEXT      Default for --paratext
  OCR2PARA_CONCURRENCY   Default for -c/--concurrency
  OCR2PARA_NO_GUTENBERG  Disable boilerplate stripping
  OCR2PARA_JSON          Emit JSON stats
  RUST_LOG               Tracing filter (e.g. ocr2para=debug)
"#;

/// Normalise OCR'd and digitised text to one paragraph per line.
#[derive(Parser, Debug)]
#[command(
    name = "ocr2para",
    version,
    about = "Normalise OCR'd and digitised text to one paragraph per line",
    long_about = "Normalise messy digitised or OCR'd source text into canonical, \
one-paragraph-per-line UTF-8 plain text: ligatures expanded, Unicode punctuation and \
space variants collapsed onto ASCII, separator lines and blank lines removed, and \
front/back matter excised per an optional line-range table.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input text file(s); UTF-8.
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output file (one input) or directory (several inputs).
    /// Omitted with one input: cleaned text goes to stdout.
    #[arg(short, long, env = "OCR2PARA_OUTPUT")]
    output: Option<PathBuf>,

    /// Line-range table (CSV: Label,start,end) for front/back-matter excision.
    #[arg(long, env = "OCR2PARA_PARATEXT")]
    paratext: Option<PathBuf>,

    /// Directory name for excised front/back matter side files.
    #[arg(long, env = "OCR2PARA_PARATEXT_DIR", default_value = "paratext")]
    paratext_dir: String,

    /// Disable publisher-boilerplate stripping for marked documents.
    #[arg(long, env = "OCR2PARA_NO_GUTENBERG")]
    no_gutenberg: bool,

    /// Number of documents cleaned concurrently.
    #[arg(short, long, env = "OCR2PARA_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Print a non-ASCII character report per input instead of cleaning.
    #[arg(long, conflicts_with_all = ["first_tokens", "init_table"])]
    audit: bool,

    /// Copy input lines until N tokens are reached instead of cleaning
    /// (one input, requires --output).
    #[arg(long, value_name = "N", conflicts_with = "init_table")]
    first_tokens: Option<usize>,

    /// Write an uncorrected line-range seed table for the inputs and exit.
    #[arg(long, value_name = "CSV")]
    init_table: Option<PathBuf>,

    /// Output stats (or the audit report) as JSON.
    #[arg(long, env = "OCR2PARA_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "OCR2PARA_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "OCR2PARA_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "OCR2PARA_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && cli.input.len() > 1;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Seed-table mode ──────────────────────────────────────────────────
    if let Some(ref table_out) = cli.init_table {
        let rows = write_seed_table(&cli.input, table_out)
            .await
            .context("Failed to write seed table")?;
        if !cli.quiet {
            eprintln!(
                "{} {} rows  →  {}",
                green("✔"),
                rows,
                bold(&table_out.display().to_string())
            );
        }
        return Ok(());
    }

    // ── Audit mode ───────────────────────────────────────────────────────
    if cli.audit {
        let mut reports = Vec::with_capacity(cli.input.len());
        for input in &cli.input {
            let report = audit_file(input)
                .await
                .with_context(|| format!("Failed to audit {}", input.display()))?;
            reports.push(report);
        }
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&reports).context("Failed to serialise reports")?
            );
        } else {
            for report in &reports {
                println!("{report}");
            }
        }
        return Ok(());
    }

    // ── Token-head mode ──────────────────────────────────────────────────
    if let Some(max_tokens) = cli.first_tokens {
        let [input] = cli.input.as_slice() else {
            bail!("--first-tokens takes exactly one input file");
        };
        let output = cli
            .output
            .as_ref()
            .context("--first-tokens requires --output")?;
        let written = take_tokens(input, output, max_tokens)
            .await
            .context("Token-bounded copy failed")?;
        if !cli.quiet {
            eprintln!(
                "{} {} tokens  →  {}",
                green("✔"),
                written,
                bold(&output.display().to_string())
            );
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new(cli.input.len()) as Arc<dyn CleanProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── Run ──────────────────────────────────────────────────────────────
    if cli.input.len() > 1 {
        clean_many(&cli, &config).await
    } else {
        clean_one(&cli, &config).await
    }
}

/// Map CLI args to `CleanConfig`, loading and validating the line-range
/// table up front so a malformed table aborts before any document is read.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<CleanConfig> {
    let mut builder = CleanConfig::builder()
        .concurrency(cli.concurrency)
        .paratext_dir_name(cli.paratext_dir.clone());

    let table_path = cli.paratext.clone().or_else(|| {
        let default = PathBuf::from(DEFAULT_PARATEXT_TABLE);
        default.exists().then_some(default)
    });
    if let Some(ref path) = table_path {
        let table = ParatextTable::load(path)
            .with_context(|| format!("Invalid line-range table {}", path.display()))?;
        tracing::info!("using line-range table {} ({} records)", path.display(), table.len());
        builder = builder.paratext(table);
    }

    if cli.no_gutenberg {
        builder = builder.no_boilerplate_stripper();
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Single-input mode: write to `--output` (file or directory) or stdout.
async fn clean_one(cli: &Cli, config: &CleanConfig) -> Result<()> {
    let input = &cli.input[0];

    let output_path = match cli.output {
        Some(ref out) if out.is_dir() => {
            Some(out.join(format!("{}.txt", ocr2para::doc_label(input))))
        }
        Some(ref out) => Some(out.clone()),
        None => None,
    };

    if let Some(ref output_path) = output_path {
        let stats = clean_to_file(input, output_path, config)
            .await
            .context("Cleaning failed")?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
            );
        } else if !cli.quiet {
            eprintln!(
                "{} {} paragraphs  {}ms  →  {}",
                green("✔"),
                stats.paragraphs,
                stats.total_duration_ms,
                bold(&output_path.display().to_string()),
            );
            if stats.paratext_applied {
                eprintln!(
                    "   {} front and {} back lines excised",
                    dim(&stats.front_lines.to_string()),
                    dim(&stats.back_lines.to_string()),
                );
            }
        }
    } else {
        let output = clean_file(input, config).await.context("Cleaning failed")?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?
            );
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(output.text.as_bytes())
                .context("Failed to write to stdout")?;
            // Ensure a trailing newline on stdout.
            if !output.text.ends_with('\n') {
                handle.write_all(b"\n").ok();
            }
            if !cli.quiet {
                eprintln!(
                    "   {} paragraphs  {}  {}ms",
                    dim(&output.stats.paragraphs.to_string()),
                    dim(&format!("{} chars", output.stats.chars_out)),
                    output.stats.total_duration_ms,
                );
            }
        }
    }

    Ok(())
}

/// Multi-input mode: clean a batch concurrently into an output directory.
async fn clean_many(cli: &Cli, config: &CleanConfig) -> Result<()> {
    let out_dir = cli
        .output
        .as_ref()
        .context("Several inputs require --output to name a directory")?;
    if out_dir.exists() && !out_dir.is_dir() {
        bail!(
            "--output must be a directory when cleaning several inputs, got {}",
            out_dir.display()
        );
    }

    let outcome = clean_batch(&cli.input, out_dir, config)
        .await
        .context("Batch cleaning failed")?;

    if cli.json {
        let rows: Vec<serde_json::Value> = outcome
            .reports
            .iter()
            .map(|r| match &r.outcome {
                Ok(stats) => serde_json::json!({
                    "input": r.input,
                    "output": r.output,
                    "stats": stats,
                }),
                Err(e) => serde_json::json!({
                    "input": r.input,
                    "error": e.to_string(),
                }),
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&rows).context("Failed to serialise reports")?
        );
    } else if !cli.quiet && config.progress_callback.is_none() {
        // The callback already printed the per-file log and summary.
        for report in &outcome.reports {
            match &report.outcome {
                Ok(stats) => eprintln!(
                    "{} {}  {} paragraphs",
                    green("✓"),
                    report.input.display(),
                    stats.paragraphs
                ),
                Err(e) => eprintln!("{} {}  {}", red("✗"), report.input.display(), e),
            }
        }
        eprintln!(
            "Cleaned {}/{} documents in {}ms",
            outcome.succeeded,
            outcome.reports.len(),
            outcome.total_duration_ms
        );
    }

    if outcome.failed > 0 {
        bail!("{} of {} documents failed", outcome.failed, outcome.reports.len());
    }
    Ok(())
}
