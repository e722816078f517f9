//! `GET /api/getting-started`

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use crds::OdhApplication;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::BackendError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GettingStartedQuery {
    #[serde(default)]
    app_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GettingStartedLink {
    pub app_name: String,
    pub link: String,
}

impl GettingStartedLink {
    fn from_application(application: &OdhApplication) -> Option<Self> {
        Some(Self {
            app_name: application.metadata.name.clone()?,
            link: application.spec.get_started_link.clone()?,
        })
    }
}

/// One link for `?appName=`, otherwise every visible application that has one.
pub async fn list_getting_started(
    State(state): State<AppState>,
    Query(query): Query<GettingStartedQuery>,
) -> Result<Response, BackendError> {
    if let Some(app_name) = query.app_name {
        let link = state
            .resources
            .get_application_def(&app_name)?
            .filter(|app| state.feature_flags.allows(app.spec.feature_flag.as_deref()))
            .as_ref()
            .and_then(GettingStartedLink::from_application)
            .ok_or_else(|| BackendError::NotFound(format!("No getting started link for application {app_name}")))?;
        return Ok(Json(link).into_response());
    }

    let links: Vec<GettingStartedLink> = state
        .resources
        .get_application_defs()?
        .iter()
        .filter(|app| state.feature_flags.allows(app.spec.feature_flag.as_deref()))
        .filter_map(GettingStartedLink::from_application)
        .collect();
    Ok(Json(links).into_response())
}
