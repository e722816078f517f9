//! ClusterClient trait for mocking
//!
//! This trait abstracts the Kubernetes API calls the dashboard makes so that
//! watchers and route handlers can be unit tested against an in-memory mock.

use std::collections::BTreeMap;

use crate::error::ClusterError;
use crds::{ClusterServiceVersion, ConsoleQuickStart, KfDef, OdhApplication, OdhDocument};
use k8s_openapi::api::core::v1::{ConfigMap, Secret, Service};

/// Trait for Kubernetes API operations used by the dashboard backend
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait ClusterClientTrait: Send + Sync {
    /// Namespace the dashboard is deployed in
    fn namespace(&self) -> &str;

    /// API server URL
    fn cluster_url(&self) -> &str;

    /// Current kubeconfig context, if running from a kubeconfig
    fn current_context(&self) -> Option<&str>;

    // Cluster-wide lists
    async fn list_cluster_service_versions(&self) -> Result<Vec<ClusterServiceVersion>, ClusterError>;
    async fn list_services(&self) -> Result<Vec<Service>, ClusterError>;
    async fn list_quick_starts(&self) -> Result<Vec<ConsoleQuickStart>, ClusterError>;

    // Dashboard namespace lists
    async fn list_kfdefs(&self) -> Result<Vec<KfDef>, ClusterError>;
    async fn list_odh_applications(&self) -> Result<Vec<OdhApplication>, ClusterError>;
    async fn list_odh_documents(&self) -> Result<Vec<OdhDocument>, ClusterError>;

    // Dashboard namespace config
    async fn read_config_map(&self, name: &str) -> Result<ConfigMap, ClusterError>;
    async fn patch_config_map_data(&self, name: &str, data: BTreeMap<String, String>) -> Result<ConfigMap, ClusterError>;
    async fn read_secret(&self, name: &str) -> Result<Secret, ClusterError>;
}
