//! OdhDocument CRD
//!
//! Documentation, how-to, quick start and tutorial entries linked to applications.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "documents.console.openshift.io",
    version = "v1alpha1",
    kind = "OdhDocument",
    namespaced,
    status = "OdhDocumentStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct OdhDocumentSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Name of the OdhApplication this document belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_display_name: Option<String>,

    /// Raw document type, see [`OdhDocumentType`]
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_flag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark_down: Option<String>,

    #[serde(flatten)]
    #[schemars(skip)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OdhDocumentStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Known values of `spec.type`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum OdhDocumentType {
    Documentation,
    HowTo,
    #[serde(rename = "quickstart")]
    QuickStart,
    Tutorial,
}

impl OdhDocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Documentation => "documentation",
            Self::HowTo => "how-to",
            Self::QuickStart => "quickstart",
            Self::Tutorial => "tutorial",
        }
    }
}

impl fmt::Display for OdhDocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown document type: {0}")]
pub struct UnknownDocumentType(pub String);

impl FromStr for OdhDocumentType {
    type Err = UnknownDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "documentation" => Ok(Self::Documentation),
            "how-to" => Ok(Self::HowTo),
            "quickstart" => Ok(Self::QuickStart),
            "tutorial" => Ok(Self::Tutorial),
            other => Err(UnknownDocumentType(other.to_string())),
        }
    }
}

impl OdhDocument {
    /// Parsed document type, `None` when missing or not one of the known values.
    pub fn document_type(&self) -> Option<OdhDocumentType> {
        self.spec.doc_type.as_deref().and_then(|t| t.parse().ok())
    }
}
