use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sitewatch_common::Config;
use sitewatch_monitor::notify::{email::EmailBackend, AlertBackend, AlertRouter};
use sitewatch_monitor::observer::{HttpTitleObserver, NoopSearcher};
use sitewatch_monitor::snapshot::SnapshotStore;
use sitewatch_monitor::watch::{NewsWatcher, ProfileWatcher};

#[derive(Parser)]
#[command(name = "sitewatch")]
#[command(about = "Persisted-diff monitor for a public profile or news search")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the profile page for a changed, keyword-bearing title
    Profile,
    /// Scan for new headlines about the watched subject
    News,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("sitewatch=info".parse()?)
                .add_directive("sitewatch_common=info".parse()?)
                .add_directive("sitewatch_monitor=info".parse()?),
        )
        .init();

    info!("Sitewatch starting...");

    // Load config
    let config = Config::from_env()?;
    config.log_redacted();

    // Build notification backend: email if fully configured, otherwise
    // alerts are logged only
    let backend: Option<Box<dyn AlertBackend>> = match EmailBackend::from_config(&config)? {
        Some(email) => {
            info!("Email notifications enabled");
            Some(Box::new(email))
        }
        None => {
            info!("Email not configured, alerts will be logged only");
            None
        }
    };
    let notifier = AlertRouter::new(backend);

    match cli.command {
        Commands::Profile => {
            let store = SnapshotStore::new(config.data_dir.join("last_check_data.json"));
            let watcher = ProfileWatcher::new(
                store,
                Box::new(HttpTitleObserver::new(&config.watch_url)),
                config.keywords.clone(),
                notifier,
                config.on_corrupt,
            );
            let stats = watcher.run().await?;
            info!("Profile check complete. {stats}");
        }
        Commands::News => {
            let store = SnapshotStore::new(config.data_dir.join("last_run_data.json"));
            let watcher = NewsWatcher::new(
                store,
                Box::new(NoopSearcher),
                config.watch_subject.clone(),
                config.keywords.clone(),
                notifier,
                config.on_corrupt,
            );
            let stats = watcher.run().await?;
            info!("News scan complete. {stats}");
        }
    }

    Ok(())
}
