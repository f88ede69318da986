use duration_str::deserialize_option_duration;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("isa.default.toml");

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub wiki: Option<Wiki>,
    pub stats: Option<Stats>,
    pub images: Option<Images>,
}

impl Config {
    pub fn embedded_default() -> Result<Self, toml::de::Error> {
        toml::from_str(DEFAULT_CONFIG_FILE)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: Option<String>,
    pub connection_pool_size: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Wiki {
    pub api_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub request_timeout: Option<Duration>,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Stats {
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Images {
    pub allowed_extensions: Option<Vec<String>>,
}
