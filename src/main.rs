use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gh_market::config::{AppConfig, load_config};
use gh_market::feed::{DataSource, FeedClient};
use gh_market::server;
use gh_market::site::{SiteContext, build_site};

#[derive(Parser)]
#[command(name = "gh-market", version, about = "GitHub Actions catalog site")]
struct Cli {
    /// Path to config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pointer file url (overrides the config file).
    #[arg(long, value_name = "URL")]
    pointer_url: Option<String>,

    /// Local catalog JSON payload (overrides the config file).
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Raise log verbosity to debug.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the catalog and write a static site.
    Build {
        /// Output directory (overrides the config file).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Fetch the catalog and serve it with search and facet filtering.
    Serve {
        /// Bind address, e.g. 127.0.0.1:8321 (overrides the config file).
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
}

/// Pick the data source: command line flags beat the config file, and a
/// local file beats a pointer url at each level.
fn resolve_source(cli: &Cli, config: &AppConfig) -> Result<DataSource> {
    if let Some(path) = &cli.data {
        return Ok(DataSource::File(path.clone()));
    }
    if let Some(url) = &cli.pointer_url {
        return Ok(DataSource::Pointer(url.clone()));
    }
    if let Some(path) = &config.data_file {
        return Ok(DataSource::File(path.clone()));
    }
    if let Some(url) = &config.pointer_url {
        return Ok(DataSource::Pointer(url.clone()));
    }
    anyhow::bail!("no data source configured; pass --pointer-url/--data or set one in gh-market.toml")
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "gh_market=debug"
    } else {
        "gh_market=info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config, then the snapshot everything else derives from.
    let config = load_config(cli.config.as_deref())?;
    let source = resolve_source(&cli, &config)?;

    let client = FeedClient::new(config.timeout_secs);
    let snapshot = client
        .load(&source)
        .await
        .context("loading catalog snapshot")?;
    tracing::info!("loaded {} actions", snapshot.actions.len());

    let ctx = SiteContext::new(config.title.clone(), snapshot);

    match cli.command {
        Commands::Build { out } => {
            let out_dir = out.unwrap_or(config.out_dir);
            build_site(&ctx, &out_dir)?;
            println!("wrote site to {}", out_dir.display());
        }
        Commands::Serve { bind } => {
            server::serve(ctx, bind.unwrap_or(config.bind)).await?;
        }
    }

    Ok(())
}
