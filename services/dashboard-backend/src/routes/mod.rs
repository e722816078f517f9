//! HTTP API
//!
//! Cached endpoints read snapshots from [`Resources`] and filter them per
//! request; quick starts, cluster settings and the segment key go to the
//! cluster directly.

mod cluster_settings;
mod components;
mod docs;
mod getting_started;
mod quickstarts;
mod segment_key;
mod status;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use cluster_client::ClusterClientTrait;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::features::FeatureFlags;
use crate::registry::Resources;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub resources: Resources,
    pub client: Arc<dyn ClusterClientTrait>,
    pub feature_flags: Arc<FeatureFlags>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("resources", &self.resources)
            .field("namespace", &self.client.namespace())
            .field("feature_flags", &self.feature_flags)
            .finish()
    }
}

impl AppState {
    pub fn new(resources: Resources, client: Arc<dyn ClusterClientTrait>, feature_flags: FeatureFlags) -> Self {
        Self {
            resources,
            client,
            feature_flags: Arc::new(feature_flags),
        }
    }
}

pub fn router(state: AppState, dev_mode: bool) -> Router {
    let api = Router::new()
        .route("/components", get(components::list_components))
        .route("/docs", get(docs::list_docs))
        .route("/quickstarts", get(quickstarts::list_quick_starts))
        .route("/getting-started", get(getting_started::list_getting_started))
        .route(
            "/cluster-settings",
            get(cluster_settings::get_cluster_settings).put(cluster_settings::update_cluster_settings),
        )
        .route("/segment-key", get(segment_key::get_segment_key))
        .route("/status", get(status::get_status))
        .route("/watchers", get(status::list_watchers));

    let router = Router::new()
        .nest("/api", api)
        .route("/healthz", get(status::healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if dev_mode {
        router.layer(CorsLayer::very_permissive())
    } else {
        router
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use cluster_client::MockClusterClient;
    use resource_watcher::WatcherConfig;
    use std::time::Duration;
    use tower::ServiceExt;

    /// Router over a mock cluster with started watchers whose first refresh has completed.
    pub async fn started_router(mock: &MockClusterClient, flags: FeatureFlags) -> Router {
        let client: Arc<dyn ClusterClientTrait> = Arc::new(mock.clone());
        let resources = Resources::new();
        resources
            .initialize_watched_resources(Arc::clone(&client), &WatcherConfig::new(Duration::from_secs(30)))
            .unwrap();
        // First refresh fires immediately; the mock answers without delay
        tokio::time::sleep(Duration::from_millis(10)).await;
        router(AppState::new(resources, client, flags), false)
    }

    pub async fn request(router: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        request(router, "GET", uri).await
    }

    pub fn names(body: &serde_json::Value) -> Vec<String> {
        body.as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item["metadata"]["name"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
