use anyhow::Context;
use pulsecore::service::ServiceConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub service: ServiceConfig,
    /// Pause between two scan-indicator frames in the terminal.
    pub frame_interval_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            frame_interval_ms: 16,
        }
    }
}

impl DriverConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading driver config {}", path_ref.display()))?;
        let config: DriverConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing driver config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Environment first, then an explicit `--api-url` on top.
    pub fn resolve(mut self, api_url: Option<String>) -> Self {
        self.service = self.service.with_env_override();
        if let Some(url) = api_url {
            self.service = self.service.with_api_base(url);
        }
        self
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}
