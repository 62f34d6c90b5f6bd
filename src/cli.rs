// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::consts::*;
use crate::config::options::{
    default_html_dir, default_output_for, Delim, ExtractOptions, FetchOptions, PipelineOptions, SourceOptions, StatusPolicy,
};
use crate::file::resolve_output_path;
use crate::progress::Progress;
use crate::scrape::{self, ExtractSummary, Failure, FetchSummary};
use crate::runner;

#[derive(Parser, Debug)]
#[command(name = "papa_scrape", version, about = "Fetch parcel pages, then extract owner records to CSV")]
pub struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// No progress bar
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download one document per identifier in the input table
    Fetch(FetchArgs),
    /// Parse stored documents into the output table
    Extract(ExtractArgs),
    /// Fetch, then extract from the same directory
    Run {
        #[command(flatten)]
        fetch: FetchArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Table with one record identifier per row (first row is a header)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Zero-based column holding the identifier
    #[arg(long, default_value_t = ID_COLUMN)]
    pub column: usize,

    #[arg(long, value_enum, default_value_t)]
    pub input_format: Delim,

    /// Document directory
    #[arg(long, default_value_os_t = default_html_dir())]
    pub html_dir: PathBuf,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    #[arg(long, env = "PAPA_BASE_URL", default_value = BASE_URL)]
    pub base_url: String,

    #[arg(long, env = "PAPA_ID_PARAM", default_value = ID_PARAM)]
    pub id_param: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Treat non-2xx responses as failures instead of storing them
    #[arg(long)]
    pub strict_status: bool,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output table; a directory gets the default file name
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    pub format: Delim,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Document directory
    #[arg(long, default_value_os_t = default_html_dir())]
    pub html_dir: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl SourceArgs {
    fn to_options(&self) -> SourceOptions {
        SourceOptions {
            base_url: self.base_url.clone(),
            id_param: self.id_param.clone(),
            timeout: Duration::from_secs(self.timeout),
            status: if self.strict_status { StatusPolicy::Strict } else { StatusPolicy::Lenient },
        }
    }
}

impl FetchArgs {
    pub fn to_options(&self) -> FetchOptions {
        FetchOptions {
            input: self.input.clone(),
            input_format: self.input_format,
            id_column: self.column,
            html_dir: self.html_dir.clone(),
            source: self.source.to_options(),
        }
    }
}

impl OutputArgs {
    fn to_options(&self, html_dir: PathBuf) -> ExtractOptions {
        let default_name = join!(DEFAULT_OUTPUT_FILE, ".", self.format.ext());
        let output = match &self.output {
            Some(p) => resolve_output_path(p, &default_name),
            None => default_output_for(self.format),
        };
        ExtractOptions { html_dir, output, format: self.format }
    }
}

impl Command {
    /// Options for `run`: both stages share the fetch html dir.
    fn pipeline_options(fetch: &FetchArgs, output: &OutputArgs) -> PipelineOptions {
        PipelineOptions {
            fetch: fetch.to_options(),
            extract: output.to_options(fetch.html_dir.clone()),
        }
    }
}

pub fn run() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose, cli.log_file.as_deref())?;

    let mut progress = ConsoleProgress::new(cli.quiet);

    match &cli.command {
        Command::Fetch(args) => {
            let summary = scrape::fetch(&args.to_options(), &mut progress)?;
            report_fetch(&summary);
        }
        Command::Extract(args) => {
            let opts = args.output.to_options(args.html_dir.clone());
            let summary = scrape::extract(&opts, &mut progress)?;
            report_extract(&summary);
        }
        Command::Run { fetch, output } => {
            let opts = Command::pipeline_options(fetch, output);
            let summary = runner::run(&opts, &mut progress)?;
            report_fetch(&summary.fetch);
            report_extract(&summary.extract);
        }
    }
    Ok(())
}

/* ---------------- Reporting ---------------- */

fn report_fetch(s: &FetchSummary) {
    let dir = s.html_dir.as_ref().map(|d| d.display().to_string()).unwrap_or_default();
    println!("Fetched {} document(s) into {} ({} failed)", s.stored.len(), dir, s.failed.len());
    report_failures(&s.failed);
}

fn report_extract(s: &ExtractSummary) {
    println!(
        "Wrote {} row(s) from {} document(s) to {} ({} failed)",
        s.rows_written,
        s.documents,
        s.output.display(),
        s.failed.len()
    );
    report_failures(&s.failed);
}

fn report_failures(failed: &[Failure]) {
    for f in failed {
        println!("  {}: {}", f.id, f.reason);
    }
}

/* ---------------- Console progress ---------------- */

struct ConsoleProgress {
    quiet: bool,
    bar: Option<ProgressBar>,
}

impl ConsoleProgress {
    fn new(quiet: bool) -> Self {
        Self { quiet, bar: None }
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: Option<usize>) {
        if self.quiet { return; }
        let (bar, template) = match total {
            Some(n) => (ProgressBar::new(n as u64), "[{elapsed_precise}] {bar:40} {pos}/{len} {msg}"),
            None => (ProgressBar::new_spinner(), "{spinner} [{elapsed_precise}] {pos} {msg}"),
        };
        if let Ok(style) = ProgressStyle::with_template(template) {
            bar.set_style(style.progress_chars("=> "));
        }
        self.bar = Some(bar);
    }

    fn log(&mut self, msg: &str) {
        match &self.bar {
            Some(bar) => bar.println(msg),
            None if !self.quiet => eprintln!("{msg}"),
            None => {}
        }
    }

    fn item_done(&mut self, id: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(s!(id));
            bar.inc(1);
        }
    }

    fn item_failed(&mut self, id: &str, _reason: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("{id} failed"));
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
