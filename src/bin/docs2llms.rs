//! CLI binary for docs2llms.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `GenerationConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use docs2llms::{
    convert_file, convert_to_file, generate, BuildOutcome, BuilderKind, GenerationConfig,
    GenerationProgressCallback, ProgressCallback,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

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

/// Terminal progress callback: a live bar plus one line per document.
/// Documents may complete out of order when `--concurrency` > 1.
struct CliProgressCallback {
    bar: ProgressBar,
    root: PathBuf,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    /// The bar length is set by `on_generation_start` once discovery is done.
    fn new(root: &Path) -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Scanning");
        bar.set_message(root.display().to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            root: root.to_path_buf(),
            errors: AtomicUsize::new(0),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>4}/{len} pages  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
    }

    fn relative<'a>(&self, path: &'a Path) -> std::borrow::Cow<'a, str> {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
    }
}

impl GenerationProgressCallback for CliProgressCallback {
    fn on_generation_start(&self, total_documents: usize) {
        self.activate_bar(total_documents);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Converting {total_documents} HTML pages…"))
        ));
    }

    fn on_document_start(&self, path: &Path, _index: usize, _total: usize) {
        self.bar.set_message(self.relative(path).into_owned());
    }

    fn on_document_complete(&self, path: &Path, _index: usize, _total: usize, markdown_len: usize) {
        self.bar.println(format!(
            "  {} {:<48}  {}",
            green("✓"),
            self.relative(path),
            dim(&format!("{markdown_len:>7} chars")),
        ));
        self.bar.inc(1);
    }

    fn on_document_error(&self, path: &Path, _index: usize, _total: usize, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);

        // Truncate very long error messages to keep output tidy.
        let msg = if error.chars().count() > 80 {
            let cut: String = error.chars().take(79).collect();
            format!("{cut}\u{2026}")
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} {:<48}  {}",
            red("✗"),
            self.relative(path),
            red(&msg),
        ));
        self.bar.inc(1);
    }

    fn on_generation_complete(&self, total_documents: usize, success_count: usize) {
        let failed = total_documents.saturating_sub(success_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} pages converted successfully",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} pages converted  ({} failed)",
                if failed == total_documents {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&success_count.to_string()),
                total_documents,
                red(&self.errors.load(Ordering::SeqCst).to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r##"EXAMPLES:
  # Convert a Sphinx HTML build in place and write llms.txt
  docs2llms docs/_build/html

  # Convert one page to stdout
  docs2llms docs/_build/html/index.html

  # Convert one page to a file
  docs2llms docs/_build/html/index.html -o index.md

  # Reproducible section order in llms.txt
  docs2llms --sorted docs/_build/html

  # Machine-readable report
  docs2llms --json docs/_build/html > report.json

OUTPUT:
  For every foo.html under INPUT, foo.html.md is written next to it.
  llms.txt at the root of INPUT holds every generated file, each under a
  "# foo.html.md" heading, in discovery order (filesystem order unless
  --sorted is given).

ENVIRONMENT VARIABLES:
  RUST_LOG                 Override log filtering (e.g. docs2llms=debug)
  DOCS2LLMS_SUFFIX         Same as --suffix
  DOCS2LLMS_COMBINED_NAME  Same as --combined-name
  DOCS2LLMS_CONCURRENCY    Same as --concurrency
"##;

/// Convert generated HTML documentation to Markdown and llms.txt.
#[derive(Parser, Debug)]
#[command(
    name = "docs2llms",
    version,
    about = "Convert generated HTML documentation to Markdown and llms.txt",
    long_about = "Convert a generated HTML documentation tree (Sphinx and similar) into \
Markdown: one .md file beside every page, plus a combined llms.txt for LLM tooling. \
Given a single HTML file, prints its Markdown instead.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// HTML build directory, or a single HTML file.
    input: PathBuf,

    /// Single-file mode: write Markdown to this file instead of stdout.
    #[arg(short, long, env = "DOCS2LLMS_OUTPUT")]
    output: Option<PathBuf>,

    /// Suffix appended to each HTML file name.
    #[arg(long, env = "DOCS2LLMS_SUFFIX", default_value = ".md")]
    suffix: String,

    /// Name of the combined file written at the root of INPUT.
    #[arg(long, env = "DOCS2LLMS_COMBINED_NAME", default_value = "llms.txt")]
    combined_name: String,

    /// Do not write the combined file.
    #[arg(long, env = "DOCS2LLMS_NO_COMBINED")]
    no_combined: bool,

    /// Number of pages processed at once.
    #[arg(short, long, env = "DOCS2LLMS_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Sort pages by file name instead of filesystem order.
    #[arg(long, env = "DOCS2LLMS_SORTED")]
    sorted: bool,

    /// Print the generation report as JSON.
    #[arg(long, env = "DOCS2LLMS_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "DOCS2LLMS_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DOCS2LLMS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "DOCS2LLMS_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let batch = cli.input.is_dir();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces the per-file INFO lines when it is active.
    let show_progress = batch && !cli.quiet && !cli.no_progress && !cli.json;
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

    // ── Single-file mode ─────────────────────────────────────────────────
    if !batch {
        if let Some(ref output_path) = cli.output {
            let bytes = convert_to_file(&cli.input, output_path)
                .await
                .context("Conversion failed")?;
            if !cli.quiet {
                eprintln!(
                    "{}  {} chars  →  {}",
                    green("✔"),
                    bytes,
                    bold(&output_path.display().to_string())
                );
            }
        } else {
            let markdown = convert_file(&cli.input)
                .await
                .context("Conversion failed")?;
            write_markdown(&mut io::stdout().lock(), &markdown)
                .context("Failed to write to stdout")?;
        }
        return Ok(());
    }

    if cli.output.is_some() {
        anyhow::bail!("--output only applies when INPUT is a single HTML file");
    }

    // ── Batch mode ───────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new(&cli.input) as Arc<dyn GenerationProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    let report = generate(&cli.input, &BuildOutcome::Success, &BuilderKind::Html, &config).await;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
        println!("{json}");
    } else if !cli.quiet {
        let stats = &report.stats;
        let combined = report
            .combined_path
            .as_ref()
            .map(|p| bold(&p.display().to_string()))
            .unwrap_or_else(|| dim("(no combined file)"));
        eprintln!(
            "{}  {}/{} pages  {}ms  →  {}",
            if stats.failed == 0 {
                green("✔")
            } else {
                cyan("⚠")
            },
            stats.generated,
            stats.discovered,
            stats.total_duration_ms,
            combined,
        );
        if let Some(ref err) = report.combined_error {
            eprintln!("   {}", red(err));
        }
    }

    if report.combined_error.is_some() {
        anyhow::bail!("Combined file was not written");
    }
    Ok(())
}

/// Write `markdown` followed by a newline if it lacks one.
fn write_markdown(out: &mut impl Write, markdown: &str) -> io::Result<()> {
    out.write_all(markdown.as_bytes())?;
    if !markdown.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Map CLI args to `GenerationConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<GenerationConfig> {
    let mut builder = GenerationConfig::builder()
        .markdown_suffix(&cli.suffix)
        .combined_file_name(&cli.combined_name)
        .write_combined(!cli.no_combined)
        .concurrency(cli.concurrency)
        .sort_paths(cli.sorted);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
