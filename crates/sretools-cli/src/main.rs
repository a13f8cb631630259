use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sretools_cidr::{find_all_containing, find_containing_range, IpRangeEntry};
use sretools_client::{IpRangesDocument, ToolsClient};
use sretools_core::{parse_address, Config, ToolRegistry};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Exit status when any input failed validation
const EXIT_INVALID_INPUT: u8 = 2;

mod batch;
mod output;

use batch::{read_inputs, BatchProcessor};
use output::{AwsLookupResult, OutputFormat, SubnetResult};

/// Networking utilities for SRE and DevOps work
#[derive(Parser)]
#[command(name = "sretools")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "human", global = true)]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// HTTP timeout in seconds (overrides SRETOOLS_TIMEOUT_SECS)
    #[arg(
        long,
        value_name = "SECS",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate network details from CIDR notation
    Subnet(SubnetArgs),
    /// Check if an IP address belongs to AWS and find its region and service
    AwsLookup(AwsLookupArgs),
    /// Check many IP addresses against the AWS ranges
    Batch(BatchArgs),
    /// Show the public IP address this machine is seen from
    MyIp,
    /// List the available tools
    Tools,
}

#[derive(Parser)]
struct SubnetArgs {
    /// One or more blocks, e.g. 192.168.1.0/24
    #[arg(value_name = "CIDR", required = true)]
    cidrs: Vec<String>,
}

#[derive(Parser)]
struct AwsLookupArgs {
    /// IPv4 address, e.g. 52.95.110.1
    #[arg(value_name = "IP")]
    ip: String,

    /// Show every matching range instead of the first
    #[arg(short, long)]
    all: bool,

    /// Read a saved ip-ranges.json instead of downloading it
    #[arg(long, value_name = "PATH")]
    ranges_file: Option<PathBuf>,
}

#[derive(Parser)]
struct BatchArgs {
    /// Input file, one IP per line (use '-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    file: Option<String>,

    /// Number of worker threads
    #[arg(short, long)]
    workers: Option<usize>,

    /// Read a saved ip-ranges.json instead of downloading it
    #[arg(long, value_name = "PATH")]
    ranges_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = apply_overrides(
        Config::from_env().context("loading configuration")?,
        &cli,
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let code = match cli.command {
        Commands::Subnet(args) => handle_subnet(&mut out, args, cli.output)?,
        Commands::AwsLookup(args) => handle_aws_lookup(&mut out, args, &config, cli.output).await?,
        Commands::Batch(args) => handle_batch(&mut out, args, &config, cli.output).await?,
        Commands::MyIp => handle_my_ip(&mut out, &config, cli.output).await?,
        Commands::Tools => {
            output::render_tools(&mut out, ToolRegistry::builtin().iter(), cli.output)?;
            0
        }
    };

    out.flush()?;
    Ok(ExitCode::from(code))
}

/// Command-line flags win over environment configuration
fn apply_overrides(config: Config, cli: &Cli) -> Config {
    match cli.timeout {
        Some(secs) => config.with_timeout(Duration::from_secs(secs)),
        None => config,
    }
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flag
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn handle_subnet<W: Write>(out: &mut W, args: SubnetArgs, format: OutputFormat) -> Result<u8> {
    let results: Vec<SubnetResult> = args
        .cidrs
        .iter()
        .map(|c| SubnetResult::from_input(c))
        .collect();
    output::render_subnets(out, &results, format)?;

    if results.iter().all(SubnetResult::is_ok) {
        Ok(0)
    } else {
        Ok(EXIT_INVALID_INPUT)
    }
}

async fn load_ranges(config: &Config, ranges_file: Option<&Path>) -> Result<IpRangesDocument> {
    match ranges_file {
        Some(path) => {
            tracing::debug!(path = %path.display(), "reading AWS ranges from file");
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok(IpRangesDocument::from_json(&text)?)
        }
        None => {
            let client = ToolsClient::new(config)?;
            client
                .fetch_aws_ranges()
                .await
                .with_context(|| format!("fetching {}", config.aws_ranges_url))
        }
    }
}

fn range_table(document: &IpRangesDocument) -> Vec<IpRangeEntry> {
    let parsed = document.to_entries();
    if parsed.skipped > 0 {
        tracing::debug!(skipped = parsed.skipped, "ignored non-IPv4 range records");
    }
    parsed.entries
}

async fn handle_aws_lookup<W: Write>(
    out: &mut W,
    args: AwsLookupArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<u8> {
    let ip = parse_address(args.ip.trim())
        .with_context(|| format!("invalid IP address '{}'", args.ip))?;

    let document = load_ranges(config, args.ranges_file.as_deref()).await?;
    let ranges = range_table(&document);

    let matches: Vec<IpRangeEntry> = if args.all {
        find_all_containing(ip, &ranges).into_iter().cloned().collect()
    } else {
        find_containing_range(ip, &ranges).into_iter().cloned().collect()
    };

    let result = AwsLookupResult {
        ip,
        found: !matches.is_empty(),
        matches,
        sync_token: document.sync_token,
        create_date: document.create_date,
    };
    output::render_aws_lookup(out, &result, format)?;
    Ok(0)
}

async fn handle_batch<W: Write>(
    out: &mut W,
    args: BatchArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<u8> {
    let inputs = match args.file.as_deref() {
        None | Some("-") => {
            tracing::debug!("reading batch input from stdin");
            read_inputs(io::stdin().lock())?
        }
        Some(path) => {
            tracing::debug!(path, "reading batch input");
            let file = std::fs::File::open(path).with_context(|| format!("opening {}", path))?;
            read_inputs(file)?
        }
    };

    let document = load_ranges(config, args.ranges_file.as_deref()).await?;
    let processor = BatchProcessor::new(range_table(&document), args.workers)?;
    tracing::debug!(
        inputs = inputs.len(),
        workers = processor.thread_count(),
        "batch processing"
    );

    // Rayon work stays off the async executor
    let results = tokio::task::spawn_blocking(move || processor.process(inputs))
        .await
        .context("batch worker panicked")?;
    output::render_batch(out, &results, format)?;

    if results.iter().any(|r| r.error.is_some()) {
        Ok(EXIT_INVALID_INPUT)
    } else {
        Ok(0)
    }
}

async fn handle_my_ip<W: Write>(out: &mut W, config: &Config, format: OutputFormat) -> Result<u8> {
    let client = ToolsClient::new(config)?;
    let ip = client
        .fetch_public_ip()
        .await
        .with_context(|| format!("fetching {}", config.ipify_url))?;
    output::render_public_ip(out, ip, format)?;
    Ok(0)
}
