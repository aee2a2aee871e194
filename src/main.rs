use anyhow::Context;
use clap::{Parser, Subcommand};
use setkeeper::config::Config;
use setkeeper::loader;
use setkeeper::models::types::ItemHash;
use setkeeper::report::{self, ItemReporter, SetReporter};
use setkeeper::selectors::Shared;
use setkeeper::Registry;
use std::path::PathBuf;
use std::sync::Arc;

// cargo run -- --data-dir ./data item 1363886209 3211806999

#[derive(Debug, Parser)]
#[command(name = "setkeeper", version, about = "Collection state reports from downloaded profile data")]
struct Cli {
    /// TOML configuration file (if omitted, use env/.env)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override the definitions locale (eg: "en")
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ownership, catalyst and stats of one or more items
    Item {
        #[arg(required = true)]
        hashes: Vec<ItemHash>,
    },
    /// New and obtained items of the rotating vendor
    Vendor,
    /// Counts over the unified inventory
    Summary,
    /// Ownership per section of a collection set file (JSON or YAML)
    Set { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };
    if let Some(dir) = cli.data_dir {
        cfg.data_dir = dir;
    }
    if let Some(locale) = cli.locale {
        cfg.locale = locale;
    }

    init_tracing(&cfg.log_filter)?;

    let registry = Registry::new(Arc::new(cfg));
    let cfg = registry.config.clone();
    loader::load_into(&registry.store, &cfg.data_dir, &cfg.locale)
        .with_context(|| format!("loading {}", cfg.data_dir.display()))?;

    let view = registry.read();
    if !view.state().definitions.is_complete() {
        tracing::warn!(locale = %cfg.locale, "some definition tables are missing");
    }

    match cli.command {
        Command::Item { hashes } => {
            let reporter = ItemReporter::new(&registry);
            for hash in hashes {
                print!("{}", report::render_item(&reporter.report(&view, hash)));
            }
        }
        Command::Vendor => print!("{}", report::render_vendor(&view)),
        Command::Summary => print!("{}", report::render_summary(report::summarize(&view).as_ref())),
        Command::Set { path } => {
            let sections = Shared::new(loader::read_sets(&path)?);
            print!("{}", SetReporter::new(&registry).render(&view, &sections));
        }
    }

    Ok(())
}

fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, prelude::*};

    color_eyre::install().map_err(|e| anyhow::anyhow!("installing color-eyre: {e}"))?;

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_timer(tracing_subscriber::fmt::time::uptime()),
        )
        .with(tracing_error::ErrorLayer::default())
        .init();

    Ok(())
}
