use std::io::Write;
use std::path::PathBuf;

use alt_scanner::{FsSourceConfig, ScanConfig, output, scan_fs};
use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Find markdown files and report image references missing alt text.
#[derive(Debug, Parser)]
#[command(name = "check-files", version)]
pub struct Cli {
    /// Path to the directory to search for markdown files
    #[arg(long)]
    pub path: PathBuf,

    /// Glob pattern to exclude (matched against the full path or the file name)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Do not report images that point at http(s) URLs
    #[arg(long)]
    pub skip_remote: bool,

    /// Do not check image syntax inside fenced code blocks
    #[arg(long)]
    pub skip_code_blocks: bool,

    /// Files larger than this many bytes are reported as unreadable
    #[arg(long, value_name = "BYTES", default_value_t = 10_485_760)]
    pub max_file_size: u64,

    /// Follow symbolic links while walking
    #[arg(long)]
    pub follow_links: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Verbosity level (-v info, -vv debug); logs go to stderr
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    fn fs_config(&self) -> FsSourceConfig {
        let mut config = FsSourceConfig::new(&self.path);
        config.exclude.clone_from(&self.exclude);
        config.max_file_size = self.max_file_size;
        config.follow_links = self.follow_links;
        config
    }

    fn scan_config(&self) -> ScanConfig {
        let mut config = ScanConfig::default();
        config.skip_remote = self.skip_remote;
        config.skip_code_blocks = self.skip_code_blocks;
        config
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("alt_scanner=info"),
        _ => EnvFilter::new("alt_scanner=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Scan and write the report. The report is only written once the scan has
/// completed, so a fatal error never leaves a partial report behind.
pub fn execute(cli: &Cli, writer: &mut dyn Write) -> Result<()> {
    let report = scan_fs(&cli.fs_config(), &cli.scan_config())?;
    match cli.format {
        OutputFormat::Human => output::write_human(&report, writer)?,
        OutputFormat::Json => output::write_json(&report, writer)?,
    }
    writer.flush()?;
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!(?cli, "check-files starting");

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    execute(&cli, &mut handle)
}
