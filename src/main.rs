use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{ArgGroup, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sc_backup::{Backup, Config, FsBackend, OutputConfig, OutputFormat, run_until_interrupted};

/// Command line options
#[derive(Parser, Debug)]
#[command(name = "sc-backup")]
#[command(version, about = "Back up SensCritique collections and lists")]
#[command(group(ArgGroup::new("target").required(true).args(["collection", "list"])))]
#[command(after_help = "Examples:
  sc-backup --collection mlcdf
  sc-backup --collection mlcdf --format csv --output backups
  sc-backup --list https://www.senscritique.com/liste/Vu_au_cinema/363578 --pretty")]
struct Cli {
    /// Username whose collection is backed up
    #[arg(short, long, value_name = "USERNAME")]
    collection: Option<String>,

    /// URL of the list to back up
    #[arg(short, long, value_name = "URL")]
    list: Option<String>,

    /// Output directory; collections are written to <OUTPUT>/<USERNAME>
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Output format: json or csv
    #[arg(short, long, default_value = "json")]
    format: String,

    /// Indent JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Log every request
    #[arg(short, long)]
    verbose: bool,

    /// JSON settings file (base_url, timeout, concurrency, categories, filters, user_agent)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pages fetched concurrently [default: 20]
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-request timeout in seconds [default: 20]
    #[arg(long)]
    timeout: Option<u64>,
}

impl Cli {
    /// Settings file if any, then flags on top
    fn config(&self) -> sc_backup::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = Duration::from_secs(timeout);
        }
        Ok(config)
    }

    fn output(&self) -> sc_backup::Result<OutputConfig> {
        Ok(OutputConfig {
            directory: self.output.clone(),
            format: self.format.parse::<OutputFormat>()?,
            pretty: self.pretty,
        })
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "sc_backup=debug" } else { "sc_backup=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> sc_backup::Result<PathBuf> {
    let output = cli.output()?;
    let backup = Backup::new(cli.config()?)?;

    let directory = match (&cli.collection, &cli.list) {
        (Some(username), _) => {
            let directory = output.directory.join(username.trim());
            let backend = FsBackend::new(directory.clone(), output.format, output.pretty);
            backup.run_collection(username, &backend).await?;
            directory
        }
        (None, Some(url)) => {
            let backend = FsBackend::new(output.directory.clone(), output.format, output.pretty);
            backup.run_list(url, &backend).await?;
            output.directory
        }
        (None, None) => {
            return Err(sc_backup::Error::InvalidInput {
                message: "either --collection or --list is required".to_string(),
            });
        }
    };

    Ok(std::path::absolute(&directory).unwrap_or(directory))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let start = Instant::now();
    match run_until_interrupted(run(cli)).await {
        Some(Ok(directory)) => {
            info!("Saved to {} in {:.2?}", directory.display(), start.elapsed());
            ExitCode::SUCCESS
        }
        Some(Err(e)) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
        None => ExitCode::from(130),
    }
}
