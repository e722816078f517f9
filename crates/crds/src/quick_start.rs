//! ConsoleQuickStart CRD
//!
//! Cluster-scoped OpenShift console quick starts listed by the dashboard.

use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "console.openshift.io",
    version = "v1",
    kind = "ConsoleQuickStart"
)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleQuickStartSpec {
    pub display_name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub duration_minutes: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Feature flag gating whether the quick start is listed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_flag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,

    /// Task steps, passed through untouched
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<serde_json::Value>,

    /// Fields without a typed counterpart (`prerequisites`, `nextQuickStart`, ...)
    #[serde(flatten)]
    #[schemars(skip)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
