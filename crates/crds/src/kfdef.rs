//! KfDef CRD
//!
//! Kubeflow deployment definition; the dashboard only reads its application list.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "kfdef.apps.kubeflow.org",
    version = "v1",
    kind = "KfDef",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct KfDefSpec {
    #[serde(default)]
    pub applications: Vec<KfDefApplication>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KfDefApplication {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kustomize_config: Option<KustomizeConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KustomizeConfig {
    pub repo_ref: RepoRef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RepoRef {
    pub name: String,
    pub path: String,
}
