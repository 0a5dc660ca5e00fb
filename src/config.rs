use crate::client::Client;
use crate::request::DEFAULT_BASE_URL;
use crate::transport::HyperTransport;

use serde::Deserialize;
use std::num::NonZeroU64;
use std::path::Path;
use std::time::Duration;

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub api_key: String,
    #[serde(default = "Config::default_base_url", alias = "base_uri")]
    pub base_url: String,
    #[serde(default, alias = "lang")]
    pub language: Option<String>,
    #[serde(default = "Config::default_log_level")]
    pub log_level: log::Level,
    /// Seconds
    #[serde(default)]
    pub timeout: Option<NonZeroU64>,
}

impl Config {
    fn default_base_url() -> String {
        DEFAULT_BASE_URL.into()
    }

    fn default_log_level() -> log::Level {
        log::Level::Info
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(|secs| Duration::from_secs(secs.get()))
    }

    pub fn client(&self) -> Client {
        let transport = match self.timeout() {
            Some(timeout) => HyperTransport::new().with_timeout(timeout),
            None => HyperTransport::new(),
        };
        let client = Client::with_transport(self.api_key.clone(), transport)
            .with_base_url(self.base_url.clone());
        match &self.language {
            Some(language) => client.with_language(language.clone()),
            None => client,
        }
    }
}

pub fn parse_config<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let toml_string = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&toml_string)?;
    Ok(config)
}
