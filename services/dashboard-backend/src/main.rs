//! ODH Dashboard Backend
//!
//! Serves the dashboard API from a periodically refreshed, in-memory cache of
//! cluster state:
//! - ClusterServiceVersions: installed operators
//! - Services: all namespaces
//! - KfDef applications: the Kubeflow components that are deployed
//! - OdhApplications / OdhDocuments: the component and documentation catalog
//!
//! Requests are answered from the cache and never wait on the Kubernetes API,
//! except for the few endpoints that read or write cluster settings directly.

mod config;
mod error;
mod features;
mod fetch;
mod registry;
mod routes;
#[cfg(test)]
mod test_utils;

use std::sync::Arc;

use anyhow::Context;
use cluster_client::{ClusterClientTrait, KubeClusterClient};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::registry::Resources;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if rustls::crypto::ring::default_provider().install_default().is_err() {
        warn!("A rustls crypto provider was already installed");
    }

    info!("Starting ODH Dashboard backend");

    // Load configuration from environment variables
    let config = Config::from_env()?;

    info!("Configuration:");
    info!("  Namespace: {}", config.namespace.as_deref().unwrap_or("kube client default"));
    info!("  Listen address: {}", config.listen_addr);
    info!("  Poll interval: {:?}", config.watcher.poll_interval);
    info!("  Fetch timeout: {:?}", config.watcher.fetch_timeout);
    info!("  Failure policy: {:?}", config.watcher.failure_policy);
    info!("  Dev mode: {}", config.dev_mode);

    let client = KubeClusterClient::try_default(config.namespace.clone())
        .await
        .context("failed to create Kubernetes client")?;
    let client: Arc<dyn ClusterClientTrait> = Arc::new(client);

    let resources = Resources::new();
    resources.initialize_watched_resources(Arc::clone(&client), &config.watcher)?;

    let state = AppState::new(resources.clone(), client, config.feature_flags.clone());
    let app = routes::router(state, config.dev_mode);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!("Listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    resources.shutdown();
    info!("ODH Dashboard backend stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
