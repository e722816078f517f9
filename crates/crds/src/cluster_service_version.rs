//! ClusterServiceVersion CRD (OLM)
//!
//! Only the status phase and reason are read, to decide whether an operator is installed.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Phase reported by OLM once an operator install has completed
pub const CSV_PHASE_SUCCEEDED: &str = "Succeeded";
/// Reason reported alongside [`CSV_PHASE_SUCCEEDED`] for a clean install
pub const CSV_REASON_INSTALL_SUCCEEDED: &str = "InstallSucceeded";

#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "operators.coreos.com",
    version = "v1alpha1",
    kind = "ClusterServiceVersion",
    namespaced,
    status = "ClusterServiceVersionStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterServiceVersionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterServiceVersionStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ClusterServiceVersion {
    /// True once OLM reports the install as succeeded.
    pub fn install_succeeded(&self) -> bool {
        self.status.as_ref().is_some_and(|s| {
            s.phase.as_deref() == Some(CSV_PHASE_SUCCEEDED)
                && s.reason.as_deref() == Some(CSV_REASON_INSTALL_SUCCEEDED)
        })
    }
}
