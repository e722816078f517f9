//! Mock ClusterClient for unit testing
//!
//! Stores resources in memory and can be told to fail or to stall a given
//! kind of call, so watcher and handler behavior can be tested without a
//! running cluster.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::cluster_trait::ClusterClientTrait;
use crate::error::ClusterError;
use crds::{ClusterServiceVersion, ConsoleQuickStart, KfDef, OdhApplication, OdhDocument};
use k8s_openapi::api::core::v1::{ConfigMap, Secret, Service};

/// Kind of call made against the mock, used for failure/latency injection and call counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    ClusterServiceVersions,
    Services,
    QuickStarts,
    KfDefs,
    OdhApplications,
    OdhDocuments,
    ConfigMaps,
    Secrets,
}

/// Mock ClusterClient for testing
#[derive(Clone, Default)]
pub struct MockClusterClient {
    pub(crate) namespace: String,
    pub(crate) csvs: Arc<Mutex<Vec<ClusterServiceVersion>>>,
    pub(crate) services: Arc<Mutex<Vec<Service>>>,
    pub(crate) quick_starts: Arc<Mutex<Vec<ConsoleQuickStart>>>,
    pub(crate) kfdefs: Arc<Mutex<Vec<KfDef>>>,
    pub(crate) applications: Arc<Mutex<Vec<OdhApplication>>>,
    pub(crate) documents: Arc<Mutex<Vec<OdhDocument>>>,
    pub(crate) config_maps: Arc<Mutex<BTreeMap<String, ConfigMap>>>,
    pub(crate) secrets: Arc<Mutex<BTreeMap<String, Secret>>>,
    // Injected behavior
    pub(crate) failures: Arc<Mutex<HashMap<ResourceKind, u16>>>,
    pub(crate) delays: Arc<Mutex<HashMap<ResourceKind, Duration>>>,
    pub(crate) calls: Arc<Mutex<HashMap<ResourceKind, usize>>>,
}

impl std::fmt::Debug for MockClusterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockClusterClient")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl MockClusterClient {
    /// Create a new mock client for `namespace`
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    pub fn set_cluster_service_versions(&self, csvs: Vec<ClusterServiceVersion>) {
        *self.csvs.lock().unwrap() = csvs;
    }

    pub fn set_services(&self, services: Vec<Service>) {
        *self.services.lock().unwrap() = services;
    }

    pub fn set_quick_starts(&self, quick_starts: Vec<ConsoleQuickStart>) {
        *self.quick_starts.lock().unwrap() = quick_starts;
    }

    pub fn set_kfdefs(&self, kfdefs: Vec<KfDef>) {
        *self.kfdefs.lock().unwrap() = kfdefs;
    }

    pub fn set_applications(&self, applications: Vec<OdhApplication>) {
        *self.applications.lock().unwrap() = applications;
    }

    pub fn set_documents(&self, documents: Vec<OdhDocument>) {
        *self.documents.lock().unwrap() = documents;
    }

    /// Add a ConfigMap to the mock store (for test setup)
    pub fn add_config_map(&self, name: &str, data: BTreeMap<String, String>) {
        let config_map = ConfigMap {
            metadata: k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(self.namespace.clone()),
                ..Default::default()
            },
            data: Some(data),
            ..Default::default()
        };
        self.config_maps.lock().unwrap().insert(name.to_string(), config_map);
    }

    /// Add a Secret to the mock store (for test setup); values are raw, already decoded bytes
    pub fn add_secret(&self, name: &str, data: BTreeMap<String, Vec<u8>>) {
        let secret = Secret {
            metadata: k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(self.namespace.clone()),
                ..Default::default()
            },
            data: Some(
                data.into_iter()
                    .map(|(k, v)| (k, k8s_openapi::ByteString(v)))
                    .collect(),
            ),
            ..Default::default()
        };
        self.secrets.lock().unwrap().insert(name.to_string(), secret);
    }

    /// Make every call of `kind` fail with the given HTTP status until [`recover`](Self::recover)
    pub fn fail(&self, kind: ResourceKind, code: u16) {
        self.failures.lock().unwrap().insert(kind, code);
    }

    pub fn recover(&self, kind: ResourceKind) {
        self.failures.lock().unwrap().remove(&kind);
    }

    /// Delay every call of `kind` by `delay` before answering
    pub fn set_delay(&self, kind: ResourceKind, delay: Duration) {
        self.delays.lock().unwrap().insert(kind, delay);
    }

    /// Number of calls made for `kind` so far
    pub fn calls(&self, kind: ResourceKind) -> usize {
        self.calls.lock().unwrap().get(&kind).copied().unwrap_or(0)
    }

    /// Stored ConfigMap data (for test assertions)
    pub fn config_map_data(&self, name: &str) -> Option<BTreeMap<String, String>> {
        self.config_maps.lock().unwrap().get(name).and_then(|cm| cm.data.clone())
    }

    async fn enter(&self, kind: ResourceKind) -> Result<(), ClusterError> {
        *self.calls.lock().unwrap().entry(kind).or_default() += 1;

        let delay = self.delays.lock().unwrap().get(&kind).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.failures.lock().unwrap().get(&kind).copied();
        match failure {
            Some(code) => Err(ClusterError::Api {
                code,
                message: format!("injected failure for {kind:?}"),
            }),
            None => Ok(()),
        }
    }
}

fn not_found(kind: &str, name: &str) -> ClusterError {
    ClusterError::Api {
        code: 404,
        message: format!("{kind} \"{name}\" not found"),
    }
}

#[async_trait::async_trait]
impl ClusterClientTrait for MockClusterClient {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn cluster_url(&self) -> &str {
        "https://mock-cluster:6443"
    }

    fn current_context(&self) -> Option<&str> {
        Some("mock-context")
    }

    async fn list_cluster_service_versions(&self) -> Result<Vec<ClusterServiceVersion>, ClusterError> {
        self.enter(ResourceKind::ClusterServiceVersions).await?;
        Ok(self.csvs.lock().unwrap().clone())
    }

    async fn list_services(&self) -> Result<Vec<Service>, ClusterError> {
        self.enter(ResourceKind::Services).await?;
        Ok(self.services.lock().unwrap().clone())
    }

    async fn list_quick_starts(&self) -> Result<Vec<ConsoleQuickStart>, ClusterError> {
        self.enter(ResourceKind::QuickStarts).await?;
        Ok(self.quick_starts.lock().unwrap().clone())
    }

    async fn list_kfdefs(&self) -> Result<Vec<KfDef>, ClusterError> {
        self.enter(ResourceKind::KfDefs).await?;
        Ok(self.kfdefs.lock().unwrap().clone())
    }

    async fn list_odh_applications(&self) -> Result<Vec<OdhApplication>, ClusterError> {
        self.enter(ResourceKind::OdhApplications).await?;
        Ok(self.applications.lock().unwrap().clone())
    }

    async fn list_odh_documents(&self) -> Result<Vec<OdhDocument>, ClusterError> {
        self.enter(ResourceKind::OdhDocuments).await?;
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn read_config_map(&self, name: &str) -> Result<ConfigMap, ClusterError> {
        self.enter(ResourceKind::ConfigMaps).await?;
        let found = self.config_maps.lock().unwrap().get(name).cloned();
        found.ok_or_else(|| not_found("configmaps", name))
    }

    async fn patch_config_map_data(&self, name: &str, data: BTreeMap<String, String>) -> Result<ConfigMap, ClusterError> {
        self.enter(ResourceKind::ConfigMaps).await?;
        let mut config_maps = self.config_maps.lock().unwrap();
        let config_map = config_maps.get_mut(name).ok_or_else(|| not_found("configmaps", name))?;
        config_map.data.get_or_insert_with(BTreeMap::new).extend(data);
        Ok(config_map.clone())
    }

    async fn read_secret(&self, name: &str) -> Result<Secret, ClusterError> {
        self.enter(ResourceKind::Secrets).await?;
        let found = self.secrets.lock().unwrap().get(name).cloned();
        found.ok_or_else(|| not_found("secrets", name))
    }
}
