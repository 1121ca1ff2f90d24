//! Glance CLI - watch-face complication host simulator.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glance_core::{Clock, ComplicationType, FixedClock, InstanceId, ProjectionConfig, ProviderId, SystemClock};
use glance_providers::{
    ChannelRefreshRequester, ComplicationProvider, ComplicationRequest, ProviderRegistry, StatusUpdater,
};
use glance_storage::{JsonPreferenceStore, SqliteDailyStore};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glance")]
#[command(about = "Watch-face complication data sources", long_about = None)]
struct Cli {
    /// Directory holding prefs.json and daily.db
    #[arg(long, default_value = ".glance")]
    data_dir: PathBuf,

    /// Projection config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretend the current time is this epoch millis
    #[arg(long)]
    now_millis: Option<i64>,

    /// Pretend today is this day key (YYYY-MM-DD)
    #[arg(long)]
    day: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a provider like the host would
    Evaluate {
        /// Provider name
        provider: ProviderId,
        /// Requested type (defaults to the provider's own)
        #[arg(long = "type")]
        complication_type: Option<ComplicationType>,
        /// Instance id
        #[arg(long, default_value = "0")]
        instance: i32,
    },
    /// Show the editor preview of a provider
    Preview {
        /// Provider name
        provider: ProviderId,
        /// Requested type (defaults to the provider's own)
        #[arg(long = "type")]
        complication_type: Option<ComplicationType>,
    },
    /// List providers
    List,
    /// Record a service heartbeat now
    Heartbeat,
    /// Set the study week
    SetWeek {
        /// Week id
        week: i64,
    },
    /// Record today's cumulative progress minutes
    RecordProgress {
        /// Minutes
        minutes: i64,
    },
    /// Record today's worn minutes
    RecordWorn {
        /// Minutes
        minutes: i64,
    },
    /// Record a new adjusted daily goal
    SetGoal {
        /// Minutes
        minutes: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ProjectionConfig::load(path)?,
        None => ProjectionConfig::default(),
    };
    let clock = make_clock(cli.now_millis, cli.day.clone());

    // Open storage
    let prefs = Arc::new(
        JsonPreferenceStore::new(cli.data_dir.join("prefs.json"))
            .await
            .context("opening preferences")?,
    );
    let daily = Arc::new(
        SqliteDailyStore::new(cli.data_dir.join("daily.db"))
            .await
            .context("opening daily database")?
            .with_clock(clock.clone()),
    );
    if !daily.health_check().await {
        anyhow::bail!("daily database {} is not answering", cli.data_dir.join("daily.db").display());
    }

    let registry = ProviderRegistry::with_defaults(prefs.clone(), daily.clone(), clock.clone(), config);
    let (refresh, mut refreshes) = ChannelRefreshRequester::channel();
    let updater = StatusUpdater::new(prefs, daily, clock, Arc::new(refresh));

    match cli.command {
        Commands::Evaluate { provider, complication_type, instance } => {
            let complication_type = match complication_type {
                Some(t) => t,
                None => registry.get(provider)?.supported_type(),
            };
            let request = ComplicationRequest::new(complication_type, InstanceId(instance));

            registry.activate(provider, request.instance_id, complication_type)?;
            let evaluation = registry.evaluate(provider, &request).await?;
            registry.deactivate(provider, request.instance_id)?;

            println!("{}", serde_json::to_string_pretty(&evaluation)?);
        }
        Commands::Preview { provider, complication_type } => {
            let complication_type = match complication_type {
                Some(t) => t,
                None => registry.get(provider)?.supported_type(),
            };
            let evaluation = registry.preview(provider, complication_type)?;
            println!("{}", serde_json::to_string_pretty(&evaluation)?);
        }
        Commands::List => {
            println!("Providers ({})", registry.ids().len());
            for id in registry.ids() {
                println!("  {} | {}", id, registry.get(id)?.supported_type());
            }
        }
        Commands::Heartbeat => {
            let at = updater.record_heartbeat().await?;
            info!(at, "heartbeat recorded");
            repoll(&registry, &mut refreshes).await?;
        }
        Commands::SetWeek { week } => {
            updater.set_week(week).await?;
            repoll(&registry, &mut refreshes).await?;
        }
        Commands::RecordProgress { minutes } => {
            updater.record_progress(minutes).await?;
            repoll(&registry, &mut refreshes).await?;
        }
        Commands::RecordWorn { minutes } => {
            updater.record_worn(minutes).await?;
            repoll(&registry, &mut refreshes).await?;
        }
        Commands::SetGoal { minutes } => {
            updater.set_adjusted_goal(minutes).await?;
            repoll(&registry, &mut refreshes).await?;
        }
    }

    Ok(())
}

fn make_clock(now_millis: Option<i64>, day: Option<String>) -> Arc<dyn Clock> {
    if now_millis.is_none() && day.is_none() {
        return Arc::new(SystemClock);
    }
    let mut clock = FixedClock::at(now_millis.unwrap_or_else(|| SystemClock.now_epoch_millis()));
    if let Some(day) = day {
        clock = clock.with_day_key(day);
    }
    Arc::new(clock)
}

/// Re-poll every provider a refresh was requested for, like the host does.
async fn repoll(registry: &ProviderRegistry, refreshes: &mut UnboundedReceiver<ProviderId>) -> Result<()> {
    let mut pending = BTreeSet::new();
    while let Ok(id) = refreshes.try_recv() {
        pending.insert(id);
    }

    for id in pending {
        let complication_type = registry.get(id)?.supported_type();
        let evaluation = registry
            .evaluate(id, &ComplicationRequest::new(complication_type, InstanceId(0)))
            .await?;
        println!("{}: {}", id, serde_json::to_string(&evaluation)?);
    }
    Ok(())
}
