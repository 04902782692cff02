//! Chainpay Verifier — Entry Point
//!
//! Initializes configuration, logging, chain adapters and the HTTP
//! API. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate (env overrides for secrets)
//! 2. Init tracing (JSON structured logging)
//! 3. Create explorer clients (Ethereum, Polygon) + Solana RPC client
//! 4. Create chain verifiers + VerificationDispatcher
//! 5. Create fee sources + FeeOracle (per-branch timeouts)
//! 6. Create Prometheus metrics registry
//! 7. Serve the API with graceful shutdown
//! 8. Wait for SIGINT → flip readiness → drain → exit

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::{broadcast, watch};
use tracing::{error, info};

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::evm::{EvmGasSource, EvmVerifier, ExplorerClient};
use adapters::http::{ApiState, PlatformFeeInfo};
use adapters::metrics::MetricsRegistry;
use adapters::solana::{SolanaFeeSource, SolanaRpcClient, SolanaVerifier};
use domain::verification::ChainId;
use usecases::dispatcher::VerificationDispatcher;
use usecases::fee_oracle::FeeOracle;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config = config::loader::load_config(&config_path)
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.service.log_level)
                }),
        )
        .json()
        .init();

    info!(
        name = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        bind = %config.service.bind_address,
        "Starting Chainpay Verifier"
    );

    // ── 3. Shutdown signal channels ─────────────────────────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);
    let (ready_tx, ready_rx) = watch::channel(true);

    let request_timeout = Duration::from_secs(config.timeouts.request_seconds);

    // ── 4. Create provider clients (one per endpoint) ───────
    let ethereum_explorer = Arc::new(
        ExplorerClient::new(
            &config.ethereum.base_url,
            &config.ethereum.api_key,
            request_timeout,
        )
        .context("Failed to create Ethereum explorer client")?,
    );
    let polygon_explorer = Arc::new(
        ExplorerClient::new(
            &config.polygon.base_url,
            &config.polygon.api_key,
            request_timeout,
        )
        .context("Failed to create Polygon explorer client")?,
    );
    let solana_rpc = Arc::new(
        SolanaRpcClient::new(&config.solana.rpc_url, request_timeout)
            .context("Failed to create Solana RPC client")?,
    );

    // ── 5. Wire chain verifiers into the dispatcher ─────────
    let dispatcher = Arc::new(VerificationDispatcher::new(
        Arc::new(
            EvmVerifier::new(
                ChainId::Ethereum,
                Arc::clone(&ethereum_explorer),
                &config.admin.evm_address,
            )
            .context("Failed to create Ethereum verifier")?,
        ),
        Arc::new(
            EvmVerifier::new(
                ChainId::Polygon,
                Arc::clone(&polygon_explorer),
                &config.admin.evm_address,
            )
            .context("Failed to create Polygon verifier")?,
        ),
        Arc::new(SolanaVerifier::new(
            Arc::clone(&solana_rpc),
            &config.admin.solana_address,
        )),
    ));

    // ── 6. Wire fee sources into the oracle ─────────────────
    let fee_oracle = Arc::new(FeeOracle::new(
        Arc::new(
            EvmGasSource::new(ChainId::Ethereum, Arc::clone(&ethereum_explorer))
                .context("Failed to create Ethereum gas source")?,
        ),
        Arc::new(
            EvmGasSource::new(ChainId::Polygon, Arc::clone(&polygon_explorer))
                .context("Failed to create Polygon gas source")?,
        ),
        Arc::new(SolanaFeeSource::new(Arc::clone(&solana_rpc))),
        Duration::from_secs(config.timeouts.fee_branch_seconds),
    ));

    // ── 7. Metrics registry ─────────────────────────────────
    let metrics = Arc::new(MetricsRegistry::new().context("Failed to create metrics registry")?);

    // ── 8. Serve the API ────────────────────────────────────
    let state = ApiState {
        dispatcher,
        fee_oracle,
        metrics,
        fee_info: Arc::new(PlatformFeeInfo {
            fees: config.platform_fees.clone(),
            admin_wallets: config.admin.clone(),
        }),
        ready: ready_rx,
    };

    let bind_address = config.service.bind_address.clone();
    let server_shutdown = shutdown_tx.subscribe();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = adapters::http::serve(state, &bind_address, server_shutdown).await {
            error!(error = %e, "API server failed");
        }
    });

    info!("Verifier is running");

    // ── 9. Wait for SIGINT ──────────────────────────────────
    signal::ctrl_c()
        .await
        .context("Failed to listen for SIGINT")?;
    info!("SIGINT received, initiating graceful shutdown");

    // Readiness probe flips to 503 while in-flight requests drain
    let _ = ready_tx.send(false);
    let _ = shutdown_tx.send(());

    let _ = tokio::time::timeout(Duration::from_secs(10), server_handle).await;

    info!("Shutdown complete");
    Ok(())
}
