//! `GET /api/segment-key`

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use tracing::error;

use super::AppState;
use super::cluster_settings::{SETTINGS_CONFIG_MAP, tracking_enabled};

const SEGMENT_KEY_SECRET: &str = "rhods-segment-key";
const SEGMENT_KEY: &str = "segmentKey";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentKey {
    pub segment_key: String,
}

/// Decoded key when tracking is enabled; an empty key in every other case, errors included.
pub async fn get_segment_key(State(state): State<AppState>) -> Json<SegmentKey> {
    let config_map = match state.client.read_config_map(SETTINGS_CONFIG_MAP).await {
        Ok(config_map) => config_map,
        Err(err) => {
            if !err.is_not_found() {
                error!("Load segment key error: {}", err);
            }
            return Json(SegmentKey::default());
        }
    };
    if !tracking_enabled(&config_map) {
        return Json(SegmentKey::default());
    }

    let secret = match state.client.read_secret(SEGMENT_KEY_SECRET).await {
        Ok(secret) => secret,
        Err(err) => {
            if !err.is_not_found() {
                error!("Load segment key error: {}", err);
            }
            return Json(SegmentKey::default());
        }
    };

    // Secret data arrives base64-decoded
    let segment_key = secret
        .data
        .as_ref()
        .and_then(|data| data.get(SEGMENT_KEY))
        .map(|bytes| String::from_utf8_lossy(&bytes.0).into_owned())
        .unwrap_or_default();

    Json(SegmentKey { segment_key })
}
