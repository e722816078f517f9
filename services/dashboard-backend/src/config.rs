//! Runtime configuration read from environment variables.
//!
//! Variables missing from the process environment fall back to `.env` files
//! in `ENV_FILE_DIR` (default: the working directory), looked up in this order:
//! `.env.<APP_ENV>.local`, `.env.<APP_ENV>`, `.env.local`, `.env`.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use resource_watcher::{FailurePolicy, WatcherConfig};
use tracing::debug;

use crate::error::BackendError;
use crate::features::FeatureFlags;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
/// First retry delay when the backoff failure policy is enabled
const BACKOFF_MIN: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Config {
    /// Dashboard namespace; `None` uses the kube client default
    pub namespace: Option<String>,
    pub listen_addr: SocketAddr,
    pub watcher: WatcherConfig,
    pub feature_flags: FeatureFlags,
    /// Permissive CORS for a locally served frontend
    pub dev_mode: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, BackendError> {
        let dir = std::env::var("ENV_FILE_DIR").unwrap_or_else(|_| ".".to_string());
        let app_env = std::env::var("APP_ENV").ok();
        let files = load_env_files(Path::new(&dir), app_env.as_deref())?;
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| files.get(key).cloned()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BackendError> {
        let namespace = lookup("NAMESPACE")
            .or_else(|| lookup("WATCH_NAMESPACE"))
            .filter(|ns| !ns.trim().is_empty());

        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr
            .parse::<SocketAddr>()
            .map_err(|err| BackendError::InvalidConfig(format!("LISTEN_ADDR `{listen_addr}`: {err}")))?;

        let poll_interval = secs(&lookup, "POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?;
        if poll_interval.is_zero() {
            return Err(BackendError::InvalidConfig("POLL_INTERVAL_SECS must be greater than 0".to_string()));
        }
        let fetch_timeout = secs(&lookup, "FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)?;
        let backoff_max = secs(&lookup, "FETCH_BACKOFF_MAX_SECS", 0)?;

        let failure_policy = if backoff_max.is_zero() {
            FailurePolicy::NextTick
        } else {
            FailurePolicy::Backoff {
                min: BACKOFF_MIN.min(backoff_max),
                max: backoff_max,
            }
        };

        let watcher = WatcherConfig::new(poll_interval)
            .with_fetch_timeout((!fetch_timeout.is_zero()).then_some(fetch_timeout))
            .with_failure_policy(failure_policy);

        let feature_flags = lookup("COMPONENT_FEATURE_FLAGS")
            .map(|raw| raw.parse::<FeatureFlags>())
            .transpose()?
            .unwrap_or_default();

        let dev_mode = lookup("DEV_MODE").is_some_and(|v| matches!(v.trim(), "true" | "1"));

        Ok(Self {
            namespace,
            listen_addr,
            watcher,
            feature_flags,
            dev_mode,
        })
    }
}

/// Merged contents of the `.env` files in `dir`. Earlier files win; missing files are skipped.
fn load_env_files(dir: &Path, app_env: Option<&str>) -> Result<HashMap<String, String>, BackendError> {
    let mut names = Vec::with_capacity(4);
    if let Some(app_env) = app_env.map(str::trim).filter(|e| !e.is_empty()) {
        names.push(format!(".env.{app_env}.local"));
        names.push(format!(".env.{app_env}"));
    }
    names.push(".env.local".to_string());
    names.push(".env".to_string());

    let mut vars = HashMap::new();
    for name in names {
        let path = dir.join(name);
        let entries = match dotenvy::from_path_iter(&path) {
            Ok(entries) => entries,
            Err(err) if err.not_found() => continue,
            Err(err) => return Err(BackendError::InvalidConfig(format!("{}: {err}", path.display()))),
        };
        for entry in entries {
            let (key, value) =
                entry.map_err(|err| BackendError::InvalidConfig(format!("{}: {err}", path.display())))?;
            vars.entry(key).or_insert(value);
        }
        debug!("Loaded environment file {}", path.display());
    }
    Ok(vars)
}

fn secs(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<Duration, BackendError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|err| BackendError::InvalidConfig(format!("{key} `{raw}`: {err}"))),
        None => Ok(Duration::from_secs(default)),
    }
}
