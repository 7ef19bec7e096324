use config::Config;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    registry: Registry,
    sync: SyncOptions,
    jobs: Jobs,
}

impl AppConfig {
    pub fn load() -> Self {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::default())
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn sync(&self) -> &SyncOptions {
        &self.sync
    }

    pub fn jobs(&self) -> &Jobs {
        &self.jobs
    }
}

#[derive(Debug, Deserialize)]
pub struct Registry {
    url: String,
    api_key: String,
    page_size: u32,
}

impl Registry {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

#[derive(Debug, Deserialize)]
pub struct SyncOptions {
    /// Bounded fan-out for per-item detail lookups; 1 keeps them sequential.
    describe_concurrency: usize,
    /// Coarse whole-cycle limit; cycles have no per-item timeouts.
    #[serde(default, with = "humantime_serde")]
    cycle_timeout: Option<Duration>,
}

impl SyncOptions {
    pub fn describe_concurrency(&self) -> usize {
        self.describe_concurrency
    }

    pub fn cycle_timeout(&self) -> Option<Duration> {
        self.cycle_timeout
    }
}

/// Cron expression per job variant. A job without an expression never runs.
#[derive(Debug, Deserialize)]
pub struct Jobs {
    #[serde(default)]
    device_models: Option<String>,
    #[serde(default)]
    devices: Option<String>,
    #[serde(default)]
    edge_devices: Option<String>,
    #[serde(default)]
    edge_device_models: Option<String>,
}

impl Jobs {
    pub fn device_models(&self) -> Option<&str> {
        self.device_models.as_deref()
    }

    pub fn devices(&self) -> Option<&str> {
        self.devices.as_deref()
    }

    pub fn edge_devices(&self) -> Option<&str> {
        self.edge_devices.as_deref()
    }

    pub fn edge_device_models(&self) -> Option<&str> {
        self.edge_device_models.as_deref()
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                registry: Registry {
                    url: "https://registry.url".to_string(),
                    api_key: "key".to_string(),
                    page_size: 50,
                },
                sync: SyncOptions {
                    describe_concurrency: 1,
                    cycle_timeout: None,
                },
                jobs: Jobs {
                    device_models: Some("0 */5 * * * *".to_string()),
                    devices: Some("0 */5 * * * *".to_string()),
                    edge_devices: None,
                    edge_device_models: None,
                },
            },
        }
    }

    pub fn registry_url(mut self, url: String) -> Self {
        self.config.registry.url = url;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
