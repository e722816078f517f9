//! `GET /api/quickstarts`
//!
//! Not cached: every request lists ConsoleQuickStarts from the cluster.

use axum::Json;
use axum::extract::State;
use crds::ConsoleQuickStart;
use tracing::error;

use super::AppState;
use crate::error::BackendError;

const QUICK_STARTS_UNAVAILABLE: &str =
    "Unable to load quick starts. Please ensure the Open Data Hub operator has been installed.";

pub async fn list_quick_starts(State(state): State<AppState>) -> Result<Json<Vec<ConsoleQuickStart>>, BackendError> {
    let quick_starts = state.client.list_quick_starts().await.map_err(|source| {
        error!("Failed to get quickstarts: {}", source);
        BackendError::Upstream {
            error: "failed to get quickstarts",
            message: QUICK_STARTS_UNAVAILABLE,
            source,
        }
    })?;

    Ok(Json(
        quick_starts
            .into_iter()
            .filter(|qs| state.feature_flags.allows(qs.spec.feature_flag.as_deref()))
            .collect(),
    ))
}
