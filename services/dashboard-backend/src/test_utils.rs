//! Test utilities for handler and fetch tests
//!
//! Builders for the custom resources the backend reads.

use crds::*;
use k8s_openapi::api::core::v1::Service;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

pub const TEST_NAMESPACE: &str = "opendatahub";

fn metadata(name: &str, namespace: Option<&str>) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: namespace.map(str::to_string),
        ..Default::default()
    }
}

/// Helper to create test OdhApplication
pub fn create_test_application(name: &str) -> OdhApplication {
    OdhApplication {
        metadata: metadata(name, Some(TEST_NAMESPACE)),
        spec: OdhApplicationSpec {
            display_name: Some(name.to_string()),
            ..Default::default()
        },
        status: None,
    }
}

/// Helper to create test OdhApplication with a customised spec
pub fn create_test_application_with(name: &str, customise: impl FnOnce(&mut OdhApplicationSpec)) -> OdhApplication {
    let mut application = create_test_application(name);
    customise(&mut application.spec);
    application
}

/// Helper to create test OdhDocument
pub fn create_test_document(
    name: &str,
    app_name: Option<&str>,
    doc_type: Option<&str>,
    feature_flag: Option<&str>,
) -> OdhDocument {
    OdhDocument {
        metadata: metadata(name, Some(TEST_NAMESPACE)),
        spec: OdhDocumentSpec {
            display_name: Some(name.to_string()),
            app_name: app_name.map(str::to_string),
            doc_type: doc_type.map(str::to_string),
            feature_flag: feature_flag.map(str::to_string),
            ..Default::default()
        },
        status: None,
    }
}

/// Helper to create test ClusterServiceVersion with status
pub fn create_test_csv(name: &str, phase: &str, reason: &str) -> ClusterServiceVersion {
    ClusterServiceVersion {
        metadata: metadata(name, Some("openshift-operators")),
        spec: ClusterServiceVersionSpec::default(),
        status: Some(ClusterServiceVersionStatus {
            phase: Some(phase.to_string()),
            reason: Some(reason.to_string()),
        }),
    }
}

/// Helper to create test KfDef listing the given applications
pub fn create_test_kfdef(name: &str, applications: &[&str]) -> KfDef {
    let mut kfdef = KfDef::new(
        name,
        KfDefSpec {
            applications: applications
                .iter()
                .map(|app| KfDefApplication {
                    name: (*app).to_string(),
                    kustomize_config: None,
                })
                .collect(),
        },
    );
    kfdef.metadata.namespace = Some(TEST_NAMESPACE.to_string());
    kfdef
}

/// Helper to create test ConsoleQuickStart
pub fn create_test_quick_start(name: &str, feature_flag: Option<&str>) -> ConsoleQuickStart {
    ConsoleQuickStart::new(
        name,
        ConsoleQuickStartSpec {
            display_name: name.to_string(),
            duration_minutes: 10,
            feature_flag: feature_flag.map(str::to_string),
            ..Default::default()
        },
    )
}

/// Helper to create test Service
pub fn create_test_service(name: &str, namespace: &str) -> Service {
    Service {
        metadata: metadata(name, Some(namespace)),
        ..Default::default()
    }
}
