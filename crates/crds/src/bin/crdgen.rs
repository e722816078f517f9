//! Prints the CRD manifests for the dashboard-owned resource kinds as a YAML stream.

use crds::{OdhApplication, OdhDocument};
use kube::CustomResourceExt;

fn main() -> Result<(), serde_yaml::Error> {
    for crd in [OdhApplication::crd(), OdhDocument::crd()] {
        print!("---\n{}", serde_yaml::to_string(&crd)?);
    }
    Ok(())
}
