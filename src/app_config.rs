use crate::catalogue::CatalogueUrls;
use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    server: Server,
    metadata: Metadata,
    dispatch: Dispatch,
    catalogue: CatalogueUrls,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn server(&self) -> &Server {
        &self.server
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    pub fn catalogue(&self) -> &CatalogueUrls {
        &self.catalogue
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    bind_address: String,
}

impl Server {
    pub fn bind_address(&self) -> &str {
        &self.bind_address
    }
}

#[derive(Debug, Deserialize)]
pub struct Metadata {
    url: String,
    #[serde(with = "humantime_serde")]
    timeout: Duration,
}

impl Metadata {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[derive(Debug, Deserialize)]
pub struct Dispatch {
    #[serde(with = "humantime_serde")]
    timeout: Duration,
}

impl Dispatch {
    pub fn timeout(&self) -> Duration {
        self.timeout
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
                server: Server {
                    bind_address: "127.0.0.1:0".to_string(),
                },
                metadata: Metadata {
                    url: "http://metadata.url".to_string(),
                    timeout: Duration::from_secs(2),
                },
                dispatch: Dispatch {
                    timeout: Duration::from_secs(2),
                },
                catalogue: CatalogueUrls::new("http://", "/api/v1/device/", "/command/"),
            },
        }
    }

    pub fn metadata_url(mut self, url: String) -> Self {
        self.config.metadata.url = url;
        self
    }

    pub fn metadata_timeout(mut self, timeout: Duration) -> Self {
        self.config.metadata.timeout = timeout;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
