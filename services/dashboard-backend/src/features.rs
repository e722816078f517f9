//! Component feature flags.
//!
//! Flags come from `COMPONENT_FEATURE_FLAGS` as a comma separated list of
//! `name=true|false` pairs. A resource naming a flag that is absent from the
//! map is treated as disabled.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;

use crate::error::BackendError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureFlags(BTreeMap<String, bool>);

impl FeatureFlags {
    pub fn is_enabled(&self, flag: &str) -> bool {
        self.0.get(flag).copied().unwrap_or(false)
    }

    /// True when the resource has no flag, or its flag is enabled.
    pub fn allows(&self, flag: Option<&str>) -> bool {
        flag.is_none_or(|flag| self.is_enabled(flag))
    }
}

impl FromIterator<(String, bool)> for FeatureFlags {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for FeatureFlags {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (name, value) = pair.split_once('=').ok_or_else(|| {
                    BackendError::InvalidConfig(format!("feature flag `{pair}` is not of the form name=true|false"))
                })?;
                let enabled = value.trim().parse::<bool>().map_err(|_err| {
                    BackendError::InvalidConfig(format!("feature flag `{name}` has non-boolean value `{value}`"))
                })?;
                Ok((name.trim().to_string(), enabled))
            })
            .collect()
    }
}
