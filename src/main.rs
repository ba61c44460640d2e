use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use axus_pull::{AxusApi, Config, OutputFormat, RetryPolicy};

/// Pull today's itineraries from the Axus travel app into a dated file.
///
/// Credentials are read from API_CLIENT_ID and API_AUTH_BASIC (a `.env` file
/// in the working directory is honoured).
#[derive(Parser, Debug)]
#[command(name = "axus-pull")]
#[command(version)]
struct Args {
    /// Output format: csv or json
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Directory the output file is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Provider base URL, overrides API_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Extra attempts after a transport failure or a 5xx reply
    #[arg(long, default_value_t = 0)]
    retries: u32,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::with_retries(self.retries).with_timeout(self.timeout_secs.map(Duration::from_secs))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "axus_pull=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    dotenvy::dotenv().ok();

    let mut config = Config::load()?;
    args.apply_overrides(&mut config);
    tracing::info!("Pulling itineraries from {}", config.base_url);

    let mut api = AxusApi::from_config(config).with_retry(args.retry_policy());

    let path = axus_pull::pull_to_file(&mut api, &args.output_dir, args.format)?;
    println!("{}", path.display());

    Ok(())
}
