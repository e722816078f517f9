//! OdhApplication CRD
//!
//! Describes a component tile shown in the dashboard's application gallery.

use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "applications.console.openshift.io",
    version = "v1alpha1",
    kind = "OdhApplication",
    namespaced,
    status = "OdhApplicationStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct OdhApplicationSpec {
    /// Display name of the application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coming_soon: Option<bool>,

    /// Prefix of the ClusterServiceVersion name that marks this application installed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_name: Option<String>,

    /// Feature flag gating whether the application is exposed at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_flag: Option<String>,

    /// Names of KfDef applications that make up this component
    #[serde(default)]
    pub kfdef_applications: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<OdhApplicationEnable>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_started_link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_start: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_point: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_suffix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    #[serde(flatten)]
    #[schemars(skip)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Enablement form shown when a user turns the application on
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OdhApplicationEnable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_config_map: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_job: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_secret: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variable_display_text: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variable_help_text: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OdhApplicationStatus {
    /// Set by the operator once the application has been enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl OdhApplication {
    /// Whether the application reports itself as enabled, either in its spec or status.
    pub fn reports_enabled(&self) -> bool {
        self.spec.is_enabled.unwrap_or(false)
            || self.status.as_ref().and_then(|s| s.enabled).unwrap_or(false)
    }
}
