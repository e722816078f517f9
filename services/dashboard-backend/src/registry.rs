//! Watched resources registry.
//!
//! One [`ResourceWatcher`] per resource kind, started once at process start
//! and shared with every handler through [`Resources`]. Accessors hand out
//! the raw snapshots; filtering is up to the caller.

use std::sync::{Arc, OnceLock};

use cluster_client::ClusterClientTrait;
use crds::{ClusterServiceVersion, KfDefApplication, OdhApplication, OdhDocument};
use k8s_openapi::api::core::v1::Service;
use resource_watcher::{ResourceWatcher, WatchStatus, WatchedResource, WatcherConfig};
use tracing::info;

use crate::error::BackendError;
use crate::fetch;

/// Starts a watcher whose fetch borrows the shared cluster client.
macro_rules! watch {
    ($name:literal, $client:expr, $config:expr, $fetch:path) => {{
        let client = Arc::clone(&$client);
        ResourceWatcher::spawn(
            $name,
            move || {
                let client = Arc::clone(&client);
                async move { $fetch(client.as_ref()).await }
            },
            $config.clone(),
        )
    }};
}

#[derive(Debug)]
pub struct WatchRegistry {
    operators: ResourceWatcher<ClusterServiceVersion>,
    services: ResourceWatcher<Service>,
    kfdefs: ResourceWatcher<KfDefApplication>,
    applications: ResourceWatcher<OdhApplication>,
    documents: ResourceWatcher<OdhDocument>,
}

impl WatchRegistry {
    /// Spawns every watcher. Must be called inside a Tokio runtime.
    pub fn start(client: Arc<dyn ClusterClientTrait>, config: &WatcherConfig) -> Self {
        let registry = Self {
            operators: watch!("operators", client, config, fetch::fetch_installed_operators),
            services: watch!("services", client, config, fetch::fetch_services),
            kfdefs: watch!("kfdefs", client, config, fetch::fetch_installed_kfdefs),
            applications: watch!("applications", client, config, fetch::fetch_odh_applications),
            documents: watch!("documents", client, config, fetch::fetch_odh_documents),
        };
        info!("Started {} resource watchers", registry.watchers().len());
        registry
    }

    pub fn watchers(&self) -> [&dyn WatchedResource; 5] {
        [
            &self.operators,
            &self.services,
            &self.kfdefs,
            &self.applications,
            &self.documents,
        ]
    }

    /// Stops every watcher; snapshots remain readable.
    pub fn shutdown(&self) {
        self.operators.shutdown();
        self.services.shutdown();
        self.kfdefs.shutdown();
        self.applications.shutdown();
        self.documents.shutdown();
    }
}

/// Handle to the process-wide registry, cheap to clone into handler state.
///
/// Empty until [`initialize_watched_resources`](Self::initialize_watched_resources)
/// has run; every accessor fails with [`BackendError::NotInitialized`] before that.
#[derive(Debug, Clone, Default)]
pub struct Resources {
    registry: Arc<OnceLock<WatchRegistry>>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the watchers. Succeeds exactly once per handle.
    pub fn initialize_watched_resources(
        &self,
        client: Arc<dyn ClusterClientTrait>,
        config: &WatcherConfig,
    ) -> Result<(), BackendError> {
        if self.registry.get().is_some() {
            return Err(BackendError::AlreadyInitialized);
        }
        // A registry that loses a concurrent race is dropped here, which stops its watchers
        self.registry
            .set(WatchRegistry::start(client, config))
            .map_err(|_rejected| BackendError::AlreadyInitialized)
    }

    fn registry(&self) -> Result<&WatchRegistry, BackendError> {
        self.registry.get().ok_or(BackendError::NotInitialized)
    }

    pub fn get_installed_operators(&self) -> Result<Arc<Vec<ClusterServiceVersion>>, BackendError> {
        Ok(self.registry()?.operators.get_resources())
    }

    pub fn get_services(&self) -> Result<Arc<Vec<Service>>, BackendError> {
        Ok(self.registry()?.services.get_resources())
    }

    pub fn get_installed_kfdefs(&self) -> Result<Arc<Vec<KfDefApplication>>, BackendError> {
        Ok(self.registry()?.kfdefs.get_resources())
    }

    pub fn get_application_defs(&self) -> Result<Arc<Vec<OdhApplication>>, BackendError> {
        Ok(self.registry()?.applications.get_resources())
    }

    /// Cached application with the given `metadata.name`.
    pub fn get_application_def(&self, name: &str) -> Result<Option<OdhApplication>, BackendError> {
        Ok(self
            .get_application_defs()?
            .iter()
            .find(|app| app.metadata.name.as_deref() == Some(name))
            .cloned())
    }

    pub fn get_docs(&self) -> Result<Arc<Vec<OdhDocument>>, BackendError> {
        Ok(self.registry()?.documents.get_resources())
    }

    pub fn statuses(&self) -> Result<Vec<WatchStatus>, BackendError> {
        Ok(self.registry()?.watchers().iter().map(|w| w.status()).collect())
    }

    pub fn shutdown(&self) {
        if let Some(registry) = self.registry.get() {
            registry.shutdown();
        }
    }
}
