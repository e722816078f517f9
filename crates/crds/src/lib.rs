//! ODH Dashboard CRD Definitions
//!
//! Kubernetes custom resource types read by the dashboard backend.
//! Only the fields the dashboard displays or filters on are modelled;
//! unknown fields are ignored on deserialization.

pub mod odh_application;
pub mod odh_document;
pub mod quick_start;
pub mod kfdef;
pub mod cluster_service_version;

pub use odh_application::*;
pub use odh_document::*;
pub use quick_start::*;
pub use kfdef::*;
pub use cluster_service_version::*;
