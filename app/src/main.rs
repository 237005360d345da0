//! NutriTrack
//!
//! Local-first calorie and macro tracker.
//!
//! ## Architecture
//!
//! - Shared core: pure nutrition computations (no I/O, no clock)
//! - Services: session state, dashboard views, advice generation
//! - Store: one JSON document per key in the data directory

use anyhow::Result;
use chrono::Local;
use nutritrack_app::config;
use nutritrack_app::services::{advisor_from_config, AdviceProducer, Session};
use nutritrack_app::store::FileStore;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting NutriTrack"
    );

    validate_config(&config)?;

    let store = FileStore::open(&config.storage.data_dir)?;
    info!(data_dir = %store.dir().display(), "Opened data directory");

    let mut session = Session::load(store, &config, &Local::now())?;
    // Load may have pruned expired logs or repaired the catalog
    session.save()?;

    let advisor = advisor_from_config(&config.advice);
    report_today(&session, advisor.as_ref()).await;

    let mut interval = tokio::time::interval(config.clock.check_interval());
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if session.tick(&Local::now()) {
                    if let Err(e) = session.save() {
                        error!(error = %e, "Failed to save after day rollover");
                    }
                    report_today(&session, advisor.as_ref()).await;
                }
            }
            _ = &mut shutdown => break,
        }
    }

    session.save()?;
    info!("Shutdown complete");
    Ok(())
}

/// Log today's dashboard, recommendations and advice
async fn report_today(session: &Session<FileStore>, advisor: &dyn AdviceProducer) {
    let now = Local::now();
    let dashboard = session.dashboard(&now);
    let progress = &dashboard.progress;

    info!(
        date = %dashboard.date,
        consumed = progress.consumed.calories,
        burned = progress.burned,
        budget = progress.calorie_budget,
        remaining = progress.remaining_calories,
        calories_pct = progress.calorie_percent,
        protein_pct = progress.protein_percent,
        carbs_pct = progress.carbs_percent,
        fat_pct = progress.fat_percent,
        "Today's dashboard"
    );

    for food in &dashboard.recommendations {
        info!(
            food = %food.name,
            reason = food.reason.label(),
            score = food.score,
            "Recommended"
        );
    }

    let advice = advisor.daily_advice(&session.advice_request(&now)).await;
    info!(%advice, "Daily advice");

    let trend = session.weekly_trend(&now);
    let trend_advice = advisor.trend_advice(&trend).await;
    info!(advice = %trend_advice, "Weekly advice");
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "nutritrack_app=info,nutritrack=info".into()
        } else {
            "nutritrack_app=debug,nutritrack=debug,reqwest=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Reject settings the session cannot run with
fn validate_config(config: &config::AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.retention.window_days == 0 {
        errors.push("retention.window_days must be at least 1");
    }
    if config.recommendations.top_n == 0 {
        warn!("recommendations.top_n is 0 - no foods will be recommended");
    }
    if config.advice.enabled && config.advice.model.trim().is_empty() {
        errors.push("advice.model must be set when advice is enabled");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid configuration");
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
