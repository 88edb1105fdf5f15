// Framework bootstrap for the museum server runtime.

use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::sync::{broadcast, mpsc};

use crate::domain::entities::{MusicSource, UserAccount};
use crate::domain::tuning::{AuctionTuning, AudioTuning, EconomyTuning, GuestTuning};
use crate::frameworks::config;
use crate::interface_adapters::clients::CritiqueClient;
use crate::interface_adapters::net::ws_handler;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::storage::{JsonFileQuotaStore, SystemClock};
use crate::use_cases::hall::{hall_task, HallSettings, MuseumWorld};
use crate::use_cases::quota::DailyQuota;
use crate::use_cases::{HallEvent, HallUpdate, MuseumEvent};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state();
    let app = Router::new().route("/ws", get(ws_handler)).with_state(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

fn build_state() -> Arc<AppState> {
    let (input_tx, input_rx) = mpsc::channel::<HallEvent>(config::INPUT_CHANNEL_CAPACITY);
    let (hall_tx, _hall_rx) = broadcast::channel::<HallUpdate>(config::HALL_BROADCAST_CAPACITY);
    let (event_tx, _event_rx) = broadcast::channel::<MuseumEvent>(config::EVENT_BROADCAST_CAPACITY);

    let critique_url = config::critique_service_url();
    let critique_client = CritiqueClient::new(
        critique_url.clone(),
        config::critique_model(),
        config::critique_timeout(),
    );
    tracing::debug!(critique_url = %critique_url, "critique client configured");

    let quota = DailyQuota::new(
        SystemClock,
        JsonFileQuotaStore::new(config::quota_file_path()),
        config::DAILY_CRITIQUE_SAMPLE,
    );

    // The hall starts empty; the client seeds guests and artworks over the
    // socket once it connects.
    let world = MuseumWorld {
        artworks: Vec::new(),
        guests: Vec::new(),
        user: UserAccount {
            username: config::user_name(),
            balance: config::starting_balance(),
        },
        global_music: MusicSource::None,
        volume: 1.0,
    };
    let settings = HallSettings {
        tick_interval: config::TICK_INTERVAL,
        rng_seed: config::rng_seed(),
        guest: GuestTuning::default(),
        auction: AuctionTuning::default(),
        economy: EconomyTuning::default(),
        audio: AudioTuning::default(),
    };

    // Runs for the life of the process; shutdown stays unused outside tests.
    let shutdown = Arc::new(tokio::sync::Notify::new());
    tokio::spawn(hall_task(
        world,
        settings,
        quota,
        Arc::new(critique_client),
        Arc::new(SystemClock),
        input_rx,
        hall_tx.clone(),
        event_tx.clone(),
        shutdown,
    ));

    Arc::new(AppState {
        input_tx,
        hall_tx,
        event_tx,
    })
}
