use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use rush_client::ApiClient;
use rush_config::ClientConfig;
use rush_types::{DeliveryStatus, EVENT_DELIVERY_STATUS};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rush", about = "rush — UberRUSH delivery API client")]
struct Cli {
    /// Path to a YAML configuration file (defaults to UBER_RUSH_* env vars).
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Route requests to the sandbox environment.
    #[arg(long, global = true)]
    sandbox: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch an access token and print its expiry.
    Token,
    /// Create a delivery from a JSON object.
    Create {
        /// Delivery fields as a JSON object.
        body: String,
    },
    /// List deliveries.
    List {
        /// Filter as key=value (repeatable).
        #[arg(short, long, value_name = "KEY=VALUE")]
        filter: Vec<String>,
    },
    /// Show a delivery.
    Get {
        /// Delivery id.
        id: String,
    },
    /// Cancel a delivery.
    Cancel {
        /// Delivery id.
        id: String,
    },
    /// Print the known delivery status values.
    Statuses,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (config, sandbox) = (cli.config.as_deref(), cli.sandbox);

    let value = match cli.command {
        Commands::Statuses => {
            for line in status_lines() {
                println!("{line}");
            }
            return Ok(());
        }
        Commands::Token => {
            let client = connect(config, sandbox).await?;
            let token = client
                .access_token()
                .context("no access token after fetch")?;
            match token.is_expired() {
                Some(false) => eprintln!("token valid, expires at {:?}", token.expires_at()),
                Some(true) => eprintln!("token already expired"),
                None => eprintln!("token expiry unknown"),
            }
            return Ok(());
        }
        Commands::Create { body } => {
            let params: Value =
                serde_json::from_str(&body).context("delivery body is not valid JSON")?;
            let client = connect(config, sandbox).await?;
            client.deliveries().create(params).await
        }
        Commands::List { filter } => {
            let filter = parse_filter(&filter)?;
            let client = connect(config, sandbox).await?;
            client.deliveries().list(filter).await
        }
        Commands::Get { id } => {
            let client = connect(config, sandbox).await?;
            client.deliveries().get(&id).await
        }
        Commands::Cancel { id } => {
            let client = connect(config, sandbox).await?;
            client.deliveries().cancel(&id).await
        }
    };

    let value = value.map_err(|e| match e.invalid_params() {
        Some(fields) => anyhow::anyhow!("{e}: {}", Value::Object(fields.clone())),
        None => anyhow::anyhow!(e),
    })?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

async fn connect(config_path: Option<&std::path::Path>, sandbox: bool) -> Result<ApiClient> {
    let mut config = match config_path {
        Some(path) => {
            ClientConfig::from_file(path).map_err(|e| anyhow::anyhow!("config error: {e}"))?
        }
        None => ClientConfig::from_env().map_err(|e| anyhow::anyhow!("config error: {e}"))?,
    };
    if sandbox {
        config.sandbox = true;
    }
    tracing::debug!(?config, "loaded configuration");

    let client = ApiClient::new(config)?;
    client
        .fetch_access_token()
        .await
        .context("failed to fetch access token")?;
    Ok(client)
}

fn status_lines() -> Vec<String> {
    DeliveryStatus::all()
        .iter()
        .map(ToString::to_string)
        .chain(std::iter::once(format!("event: {EVENT_DELIVERY_STATUS}")))
        .collect()
}

fn parse_filter(pairs: &[String]) -> Result<Value> {
    let mut map = Map::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("filter '{pair}' is not KEY=VALUE"))?;
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.into()));
        map.insert(key.to_string(), value);
    }
    Ok(Value::Object(map))
}
