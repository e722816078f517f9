//! `GET /api/components`

use axum::Json;
use axum::extract::{Query, State};
use crds::{ClusterServiceVersion, KfDefApplication, OdhApplication};
use serde::Deserialize;

use super::AppState;
use crate::error::BackendError;

#[derive(Debug, Default, Deserialize)]
pub struct ComponentsQuery {
    #[serde(default)]
    installed: Option<bool>,
}

pub async fn list_components(
    State(state): State<AppState>,
    Query(query): Query<ComponentsQuery>,
) -> Result<Json<Vec<OdhApplication>>, BackendError> {
    let applications = state.resources.get_application_defs()?;
    let mut components: Vec<OdhApplication> = applications
        .iter()
        .filter(|app| state.feature_flags.allows(app.spec.feature_flag.as_deref()))
        .cloned()
        .collect();

    if query.installed == Some(true) {
        let operators = state.resources.get_installed_operators()?;
        let kfdefs = state.resources.get_installed_kfdefs()?;
        components.retain(|app| is_installed(app, &operators, &kfdefs));
    }

    Ok(Json(components))
}

/// An application counts as installed if it says so itself, if an operator
/// whose CSV name starts with `spec.csvName` has finished installing, or if
/// one of its `spec.kfdefApplications` is deployed by the KfDef.
pub fn is_installed(
    application: &OdhApplication,
    operators: &[ClusterServiceVersion],
    kfdef_applications: &[KfDefApplication],
) -> bool {
    if application.reports_enabled() {
        return true;
    }

    let csv_installed = application
        .spec
        .csv_name
        .as_deref()
        .filter(|prefix| !prefix.is_empty())
        .is_some_and(|prefix| {
            operators
                .iter()
                .any(|csv| csv.metadata.name.as_deref().is_some_and(|name| name.starts_with(prefix)))
        });

    csv_installed
        || application
            .spec
            .kfdef_applications
            .iter()
            .any(|name| kfdef_applications.iter().any(|deployed| &deployed.name == name))
}
