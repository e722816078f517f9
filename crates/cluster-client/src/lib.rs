//! Kubernetes API client for the ODH dashboard backend
//!
//! Thin typed access to the resources the dashboard reads:
//! OLM ClusterServiceVersions, Services, KfDefs, OdhApplications,
//! OdhDocuments, ConsoleQuickStarts, and the ConfigMaps/Secrets behind
//! cluster settings.
//!
//! # Example
//!
//! ```no_run
//! use cluster_client::{ClusterClientTrait, KubeClusterClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = KubeClusterClient::try_default(Some("opendatahub".to_string())).await?;
//! let applications = client.list_odh_applications().await?;
//! println!("{} applications", applications.len());
//! # Ok(())
//! # }
//! ```
//!
//! Enable the `test-util` feature for [`MockClusterClient`], an in-memory
//! implementation with failure and latency injection.

pub mod client;
pub mod common;
pub mod error;
#[path = "trait.rs"]
pub mod cluster_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::KubeClusterClient;
pub use error::ClusterError;
pub use cluster_trait::ClusterClientTrait;
#[cfg(feature = "test-util")]
pub use mock::{MockClusterClient, ResourceKind};
