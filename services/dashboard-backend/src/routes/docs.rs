//! `GET /api/docs`

use axum::Json;
use axum::extract::{Query, State};
use crds::{OdhDocument, OdhDocumentType};
use serde::Deserialize;

use super::AppState;
use crate::error::BackendError;

#[derive(Debug, Default, Deserialize)]
pub struct DocsQuery {
    #[serde(rename = "type", default)]
    doc_type: Option<String>,
}

pub async fn list_docs(
    State(state): State<AppState>,
    Query(query): Query<DocsQuery>,
) -> Result<Json<Vec<OdhDocument>>, BackendError> {
    let doc_type = query
        .doc_type
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(str::parse::<OdhDocumentType>)
        .transpose()
        .map_err(|err| BackendError::BadRequest(err.to_string()))?;
    let documents = state.resources.get_docs()?;

    let documents = documents
        .iter()
        .filter(|doc| state.feature_flags.allows(doc.spec.feature_flag.as_deref()))
        .filter(|doc| doc_type.is_none_or(|t| doc.document_type() == Some(t)))
        .cloned()
        .collect();

    Ok(Json(documents))
}
