//! Client configuration: defaults, an optional RON file, then CLI/env overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use summary_engine::ApiSettings;

use crate::cli::Args;
use crate::timer::POLL_INTERVAL;

/// Contents of the optional config file. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub save_dir: Option<PathBuf>,
}

impl ClientConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        ron::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

/// Fully resolved settings used by the running client.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api: ApiSettings,
    pub poll_interval: Duration,
    pub save_dir: Option<PathBuf>,
}

impl ClientSettings {
    pub fn resolve(args: &Args, file: ClientConfig) -> Result<Self> {
        let mut api = ApiSettings::default();
        if let Some(base_url) = args.base_url.clone().or(file.base_url) {
            api.base_url = base_url;
        }
        if let Some(secs) = file.request_timeout_secs {
            if secs == 0 {
                bail!("request_timeout_secs must be greater than zero");
            }
            api.request_timeout = Duration::from_secs(secs);
        }

        let poll_interval = match args.poll_interval_ms.or(file.poll_interval_ms) {
            Some(0) => bail!("poll interval must be greater than zero"),
            Some(ms) => Duration::from_millis(ms),
            None => POLL_INTERVAL,
        };

        Ok(Self {
            api,
            poll_interval,
            save_dir: args.save_dir.clone().or(file.save_dir),
        })
    }
}
