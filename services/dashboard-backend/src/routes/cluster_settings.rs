//! `GET` and `PUT /api/cluster-settings`
//!
//! User tracking is toggled through the `segmentKeyEnabled` key of a
//! ConfigMap in the dashboard namespace.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Query, State};
use k8s_openapi::api::core::v1::ConfigMap;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::AppState;
use crate::error::BackendError;

pub const SETTINGS_CONFIG_MAP: &str = "rhods-segment-key-config";
pub const TRACKING_ENABLED_KEY: &str = "segmentKeyEnabled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSettings {
    pub user_tracking_enabled: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuery {
    #[serde(default)]
    user_tracking_enabled: Option<bool>,
}

/// Reads the tracking switch; anything but the string `"true"` is off.
pub fn tracking_enabled(config_map: &ConfigMap) -> bool {
    config_map
        .data
        .as_ref()
        .and_then(|data| data.get(TRACKING_ENABLED_KEY))
        .is_some_and(|value| value == "true")
}

pub async fn get_cluster_settings(State(state): State<AppState>) -> Result<Json<ClusterSettings>, BackendError> {
    let config_map = state.client.read_config_map(SETTINGS_CONFIG_MAP).await.map_err(|source| {
        if !source.is_not_found() {
            error!("Error retrieving segment key enabled: {}", source);
        }
        BackendError::Upstream {
            error: "failed to retrieve cluster settings",
            message: "Unable to retrieve cluster settings.",
            source,
        }
    })?;

    Ok(Json(ClusterSettings {
        user_tracking_enabled: tracking_enabled(&config_map),
    }))
}

/// Patches the switch when `userTrackingEnabled` is given and echoes the requested value.
pub async fn update_cluster_settings(
    State(state): State<AppState>,
    Query(query): Query<UpdateQuery>,
) -> Result<Json<ClusterSettings>, BackendError> {
    if let Some(enabled) = query.user_tracking_enabled {
        let data = BTreeMap::from([(TRACKING_ENABLED_KEY.to_string(), enabled.to_string())]);
        state
            .client
            .patch_config_map_data(SETTINGS_CONFIG_MAP, data)
            .await
            .map_err(|source| {
                if !source.is_not_found() {
                    error!("Setting cluster settings error: {}", source);
                }
                BackendError::Upstream {
                    error: "failed to update cluster settings",
                    message: "Unable to update cluster settings.",
                    source,
                }
            })?;
        info!("User tracking {}", if enabled { "enabled" } else { "disabled" });
    }

    Ok(Json(ClusterSettings {
        user_tracking_enabled: query.user_tracking_enabled.unwrap_or(false),
    }))
}
