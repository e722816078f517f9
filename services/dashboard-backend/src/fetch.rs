//! Fetch functions backing the watched resources.
//!
//! Each fetch returns the complete list for its resource kind or fails as a
//! whole; the watcher decides what to do with a failure.

use cluster_client::{ClusterClientTrait, ClusterError};
use crds::{ClusterServiceVersion, KfDefApplication, OdhApplication, OdhDocument};
use k8s_openapi::api::core::v1::Service;
use thiserror::Error;
use tracing::debug;

pub const KFDEF_UNAVAILABLE: &str =
    "Unable to load Kubeflow resources. Please ensure the Open Data Hub operator has been installed.";
pub const APPLICATIONS_UNAVAILABLE: &str =
    "Unable to get OdhApplication resources. Please ensure the Open Data Hub operator has been installed.";
pub const DOCUMENTS_UNAVAILABLE: &str =
    "Unable to get OdhDocument resources. Please ensure the Open Data Hub operator has been installed.";

#[derive(Debug, Error)]
pub enum FetchError {
    /// Listing failed for a resource kind owned by the Open Data Hub operator
    #[error("{message} ({source})")]
    OperatorResource {
        message: &'static str,
        #[source]
        source: ClusterError,
    },

    /// Listing failed for a built-in or OLM resource kind
    #[error("failed to list {kind}: {source}")]
    List {
        kind: &'static str,
        #[source]
        source: ClusterError,
    },
}

/// Operators whose install has completed.
pub async fn fetch_installed_operators(
    client: &dyn ClusterClientTrait,
) -> Result<Vec<ClusterServiceVersion>, FetchError> {
    let csvs = client
        .list_cluster_service_versions()
        .await
        .map_err(|source| FetchError::List {
            kind: "clusterserviceversions",
            source,
        })?;

    Ok(csvs.into_iter().filter(ClusterServiceVersion::install_succeeded).collect())
}

/// Services in every namespace.
pub async fn fetch_services(client: &dyn ClusterClientTrait) -> Result<Vec<Service>, FetchError> {
    client
        .list_services()
        .await
        .map_err(|source| FetchError::List { kind: "services", source })
}

/// Applications of the first KfDef in the dashboard namespace; empty when there is none.
pub async fn fetch_installed_kfdefs(client: &dyn ClusterClientTrait) -> Result<Vec<KfDefApplication>, FetchError> {
    let kfdefs = client
        .list_kfdefs()
        .await
        .map_err(|source| FetchError::OperatorResource {
            message: KFDEF_UNAVAILABLE,
            source,
        })?;

    Ok(kfdefs
        .into_iter()
        .next()
        .map(|kfdef| kfdef.spec.applications)
        .unwrap_or_default())
}

pub async fn fetch_odh_applications(client: &dyn ClusterClientTrait) -> Result<Vec<OdhApplication>, FetchError> {
    client
        .list_odh_applications()
        .await
        .map_err(|source| FetchError::OperatorResource {
            message: APPLICATIONS_UNAVAILABLE,
            source,
        })
}

/// Documents joined against a fresh (uncached) application list.
pub async fn fetch_odh_documents(client: &dyn ClusterClientTrait) -> Result<Vec<OdhDocument>, FetchError> {
    let applications = fetch_odh_applications(client).await?;
    let documents = client
        .list_odh_documents()
        .await
        .map_err(|source| FetchError::OperatorResource {
            message: DOCUMENTS_UNAVAILABLE,
            source,
        })?;

    let total = documents.len();
    let joined = join_documents(documents, &applications);
    debug!(
        "Kept {} of {} documents against {} applications",
        joined.len(),
        total,
        applications.len()
    );
    Ok(joined)
}

/// Drops documents that reference an application which does not exist.
///
/// Flagged documents are kept regardless of their application; they are
/// gated on the flag when served. Documents without `appName` are always kept.
pub fn join_documents(documents: Vec<OdhDocument>, applications: &[OdhApplication]) -> Vec<OdhDocument> {
    documents
        .into_iter()
        .filter(|doc| {
            if doc.spec.feature_flag.is_some() {
                return true;
            }
            doc.spec.app_name.as_deref().is_none_or(|app_name| {
                applications
                    .iter()
                    .any(|app| app.metadata.name.as_deref() == Some(app_name))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use cluster_client::{MockClusterClient, ResourceKind};

    fn names(documents: &[OdhDocument]) -> Vec<&str> {
        documents.iter().filter_map(|d| d.metadata.name.as_deref()).collect()
    }

    #[test]
    fn test_join_keeps_only_documents_of_existing_applications() {
        let applications = vec![create_test_application("a")];
        let documents = vec![
            create_test_document("doc-a", Some("a"), None, None),
            create_test_document("doc-b", Some("b"), None, None),
        ];

        let joined = join_documents(documents, &applications);
        assert_eq!(names(&joined), vec!["doc-a"]);
    }

    #[test]
    fn test_join_keeps_unowned_and_flagged_documents() {
        let documents = vec![
            create_test_document("general", None, None, None),
            create_test_document("preview", Some("gone"), None, Some("X")),
            create_test_document("orphan", Some("gone"), None, None),
        ];

        let joined = join_documents(documents, &[]);
        assert_eq!(names(&joined), vec!["general", "preview"]);
    }

    #[tokio::test]
    async fn test_fetch_installed_operators_filters_on_install_status() {
        let mock = MockClusterClient::new("opendatahub");
        mock.set_cluster_service_versions(vec![
            create_test_csv("rhods-operator.1.2.0", "Succeeded", "InstallSucceeded"),
            create_test_csv("starburst.0.1.0", "Installing", "InstallWaiting"),
            create_test_csv("anaconda.2.0.0", "Succeeded", "Copied"),
        ]);

        let operators = fetch_installed_operators(&mock).await.unwrap();
        let names: Vec<_> = operators.iter().filter_map(|o| o.metadata.name.as_deref()).collect();
        assert_eq!(names, vec!["rhods-operator.1.2.0"]);
    }

    #[tokio::test]
    async fn test_fetch_installed_kfdefs_uses_first_kfdef() {
        let mock = MockClusterClient::new("opendatahub");
        assert!(fetch_installed_kfdefs(&mock).await.unwrap().is_empty());

        mock.set_kfdefs(vec![
            create_test_kfdef("opendatahub", &["odh-common", "jupyterhub"]),
            create_test_kfdef("other", &["ignored"]),
        ]);
        let applications = fetch_installed_kfdefs(&mock).await.unwrap();
        let names: Vec<_> = applications.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["odh-common", "jupyterhub"]);
    }

    #[tokio::test]
    async fn test_missing_crd_reports_operator_message() {
        let mock = MockClusterClient::new("opendatahub");
        mock.fail(ResourceKind::KfDefs, 404);

        let err = fetch_installed_kfdefs(&mock).await.unwrap_err();
        assert!(err.to_string().starts_with(KFDEF_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_document_fetch_uses_fresh_applications() {
        let mock = MockClusterClient::new("opendatahub");
        mock.set_applications(vec![create_test_application("a")]);
        mock.set_documents(vec![
            create_test_document("doc-a", Some("a"), None, None),
            create_test_document("doc-b", Some("b"), None, None),
        ]);

        let documents = fetch_odh_documents(&mock).await.unwrap();
        assert_eq!(names(&documents), vec!["doc-a"]);
        assert_eq!(mock.calls(ResourceKind::OdhApplications), 1);
    }

    #[tokio::test]
    async fn test_document_fetch_fails_with_application_fetch() {
        let mock = MockClusterClient::new("opendatahub");
        mock.set_documents(vec![create_test_document("doc", None, None, None)]);
        mock.fail(ResourceKind::OdhApplications, 500);

        let err = fetch_odh_documents(&mock).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::OperatorResource {
                message: APPLICATIONS_UNAVAILABLE,
                ..
            }
        ));
        assert_eq!(mock.calls(ResourceKind::OdhDocuments), 0);
    }
}
