//! `GET /api/status`, `GET /api/watchers` and `GET /healthz`

use axum::Json;
use axum::extract::State;
use resource_watcher::WatchStatus;
use serde::Serialize;

use super::AppState;
use crate::error::BackendError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KubeStatus {
    pub current_context: String,
    pub namespace: String,
    pub cluster_url: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub kube: KubeStatus,
}

pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let client = &state.client;
    let current_context = client
        .current_context()
        .map(str::trim)
        .filter(|context| !context.is_empty())
        .unwrap_or("in-cluster");

    Json(StatusResponse {
        kube: KubeStatus {
            current_context: current_context.to_string(),
            namespace: client.namespace().to_string(),
            cluster_url: client.cluster_url().to_string(),
        },
    })
}

pub async fn list_watchers(State(state): State<AppState>) -> Result<Json<Vec<WatchStatus>>, BackendError> {
    Ok(Json(state.resources.statuses()?))
}

#[derive(Debug, Serialize)]
pub struct Health {
    ok: bool,
}

pub async fn healthz() -> Json<Health> {
    Json(Health { ok: true })
}
