//! Loja Online Admin - startup refresh.
//!
//! Loads the local workspace from the data directory, refreshes products and
//! clients from the demo API, and logs a summary of what is held locally.
//!
//! Every step after configuration is best-effort: an unreachable API or an
//! unwritable data directory is logged and the run carries on with whatever
//! local state is available.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;
use std::sync::Arc;

use loja_admin::config::{AdminConfig, LogFormat};
use loja_admin::remote::FakeStoreClient;
use loja_admin::services::SyncService;
use loja_core::ClientStatus;
use loja_core::format::format_price;
use loja_storage::{FileStore, KeyValueStore, MemoryStore, Workspace};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &AdminConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "loja_admin=info,loja_storage=info".into());

    let is_json = format == LogFormat::Json;
    let json_layer = is_json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

/// Open the file-backed store, or fall back to memory so the run still works.
fn open_backend(config: &AdminConfig) -> Arc<dyn KeyValueStore> {
    match FileStore::open(&config.data_dir) {
        Ok(store) => {
            tracing::info!(dir = %config.data_dir.display(), "Using file store");
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!(
                dir = %config.data_dir.display(),
                error = %e,
                "Data directory unavailable, changes will not outlive this run"
            );
            Arc::new(MemoryStore::new())
        }
    }
}

// Tracing is not set up until the configuration is known
#[allow(clippy::print_stderr)]
#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration from environment (needed for Sentry init)
    let config = match AdminConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);
    init_tracing(config.log_format);

    let remote = match FakeStoreClient::new(&config.remote) {
        Ok(remote) => remote,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(base_url = %remote.base_url(), "Refreshing from demo API");

    let mut workspace = Workspace::open(open_backend(&config));
    let report = SyncService::new(remote).refresh_all(&mut workspace).await;

    let deactivated = workspace
        .clients()
        .records()
        .iter()
        .filter(|c| c.status == ClientStatus::Deactivated)
        .count();
    let local_products = workspace
        .products()
        .records()
        .iter()
        .filter(|p| p.id.is_local())
        .count();

    tracing::info!(
        products = workspace.products().len(),
        local_products,
        clients = workspace.clients().len(),
        deactivated,
        cart_items = workspace.cart().item_count(),
        cart_total = %format_price(workspace.cart().total()),
        refreshed = report.is_complete(),
        "Workspace ready"
    );

    // Fetch failures are not fatal; the local collections are still usable
    ExitCode::SUCCESS
}
