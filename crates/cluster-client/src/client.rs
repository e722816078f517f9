//! kube-rs backed implementation of [`ClusterClientTrait`].

use std::collections::BTreeMap;

use crate::error::ClusterError;
use crate::common::list_all;
use crate::cluster_trait::ClusterClientTrait;
use crds::{ClusterServiceVersion, ConsoleQuickStart, KfDef, OdhApplication, OdhDocument};
use k8s_openapi::api::core::v1::{ConfigMap, Secret, Service};
use kube::api::{Api, Patch, PatchParams};
use kube::config::Kubeconfig;
use kube::{Client, Config};
use tracing::{debug, info};

/// Kubernetes API client scoped to the dashboard namespace.
#[derive(Clone)]
pub struct KubeClusterClient {
    client: Client,
    namespace: String,
    cluster_url: String,
    current_context: Option<String>,
}

impl std::fmt::Debug for KubeClusterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeClusterClient")
            .field("namespace", &self.namespace)
            .field("cluster_url", &self.cluster_url)
            .field("current_context", &self.current_context)
            .finish_non_exhaustive()
    }
}

impl KubeClusterClient {
    /// Connects using the in-cluster service account or the local kubeconfig.
    ///
    /// `namespace` overrides the namespace taken from the inferred configuration.
    pub async fn try_default(namespace: Option<String>) -> Result<Self, ClusterError> {
        let config = Config::infer().await?;
        let namespace = namespace.unwrap_or_else(|| config.default_namespace.clone());
        let cluster_url = config.cluster_url.to_string();
        // Only meaningful outside the cluster; in-cluster config has no kubeconfig context
        let current_context = Kubeconfig::read().ok().and_then(|k| k.current_context);
        let client = Client::try_from(config)?;

        info!(
            "Connected to Kubernetes API at {} (namespace {}, context {})",
            cluster_url,
            namespace,
            current_context.as_deref().unwrap_or("in-cluster")
        );

        Ok(Self {
            client,
            namespace,
            cluster_url,
            current_context,
        })
    }

    fn namespaced<K>(&self) -> Api<K>
    where
        K: kube::Resource<Scope = k8s_openapi::NamespaceResourceScope>,
        K::DynamicType: Default,
    {
        Api::namespaced(self.client.clone(), &self.namespace)
    }

    fn cluster_wide<K>(&self) -> Api<K>
    where
        K: kube::Resource,
        K::DynamicType: Default,
    {
        Api::all(self.client.clone())
    }
}

#[async_trait::async_trait]
impl ClusterClientTrait for KubeClusterClient {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn cluster_url(&self) -> &str {
        &self.cluster_url
    }

    fn current_context(&self) -> Option<&str> {
        self.current_context.as_deref()
    }

    async fn list_cluster_service_versions(&self) -> Result<Vec<ClusterServiceVersion>, ClusterError> {
        list_all(&self.cluster_wide::<ClusterServiceVersion>()).await
    }

    async fn list_services(&self) -> Result<Vec<Service>, ClusterError> {
        list_all(&self.cluster_wide::<Service>()).await
    }

    async fn list_quick_starts(&self) -> Result<Vec<ConsoleQuickStart>, ClusterError> {
        list_all(&self.cluster_wide::<ConsoleQuickStart>()).await
    }

    async fn list_kfdefs(&self) -> Result<Vec<KfDef>, ClusterError> {
        list_all(&self.namespaced::<KfDef>()).await
    }

    async fn list_odh_applications(&self) -> Result<Vec<OdhApplication>, ClusterError> {
        list_all(&self.namespaced::<OdhApplication>()).await
    }

    async fn list_odh_documents(&self) -> Result<Vec<OdhDocument>, ClusterError> {
        list_all(&self.namespaced::<OdhDocument>()).await
    }

    async fn read_config_map(&self, name: &str) -> Result<ConfigMap, ClusterError> {
        Ok(self.namespaced::<ConfigMap>().get(name).await?)
    }

    async fn patch_config_map_data(&self, name: &str, data: BTreeMap<String, String>) -> Result<ConfigMap, ClusterError> {
        debug!("Merge-patching ConfigMap {}/{}", self.namespace, name);
        let patch = serde_json::json!({ "data": data });
        Ok(self
            .namespaced::<ConfigMap>()
            .patch(name, &PatchParams::default(), &Patch::Merge(&patch))
            .await?)
    }

    async fn read_secret(&self, name: &str) -> Result<Secret, ClusterError> {
        Ok(self.namespaced::<Secret>().get(name).await?)
    }
}
