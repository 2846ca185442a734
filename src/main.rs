use clap::Parser;
use community_updater::config::Config;
use community_updater::runner;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Applies ShortDescription updates from a CSV file to the Communities table.
#[derive(Parser)]
#[command(name = "community-updater")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV file with rows of: domain name, description, short description
    /// (overrides INPUT_FILE)
    input: Option<PathBuf>,

    /// PostgreSQL connection string (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Treat the first row as a header and skip it; `--has-headers=false`
    /// turns off CSV_HAS_HEADERS
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    has_headers: Option<bool>,

    /// Maximum number of updates in flight (overrides UPDATE_CONCURRENCY)
    #[arg(short, long)]
    concurrency: Option<usize>,

    /// Log format: text or json (overrides LOG_FORMAT)
    #[arg(long)]
    log_format: Option<String>,
}

impl Cli {
    fn apply(self, mut config: Config) -> Config {
        if let Some(input) = self.input {
            config.input_path = input;
        }
        if let Some(url) = self.database_url {
            config.database_url = url;
        }
        if let Some(has_headers) = self.has_headers {
            config.has_headers = has_headers;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env(cli.database_url.clone())?;
    let config = cli.apply(config);
    config.validate()?;

    init_tracing(&config);
    config.print_summary();

    let summary = runner::run(config).await?;

    tracing::info!(
        "Done: {} rows, {} updated, {} failed",
        summary.attempted,
        summary.updated,
        summary.failed
    );

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
