use anyhow::{anyhow, bail, Result};
use isa_core::{gateways::wiki::OAuthToken, usecases::DEFAULT_ALLOWED_EXTENSIONS};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "isa.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";
const ENV_NAME_CONSUMER_KEY: &str = "ISA_CONSUMER_KEY";
const ENV_NAME_CONSUMER_SECRET: &str = "ISA_CONSUMER_SECRET";

pub struct Config {
    pub db: Db,
    pub wiki: Wiki,
    pub stats: Stats,
    pub images: Images,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let mut raw_config: raw::Config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            raw_config.db.get_or_insert_with(Default::default).connection_sqlite = Some(db_url);
        }
        let wiki = raw_config.wiki.get_or_insert_with(Default::default);
        if let Ok(key) = env::var(ENV_NAME_CONSUMER_KEY) {
            wiki.consumer_key = Some(key);
        }
        if let Ok(secret) = env::var(ENV_NAME_CONSUMER_SECRET) {
            wiki.consumer_secret = Some(secret);
        }
        Self::try_from(raw_config)
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u32,
}

pub struct Wiki {
    /// Endpoint of the MediaWiki action API
    pub api_url: String,
    pub request_timeout: Duration,
    /// Credentials of the registered OAuth consumer.
    ///
    /// Edits are only possible if these are configured.
    pub consumer: Option<OAuthToken>,
}

pub struct Stats {
    pub output_dir: PathBuf,
}

pub struct Images {
    /// Lowercase file extensions without a leading dot
    pub allowed_extensions: Vec<String>,
}

fn required<T>(value: Option<T>, default: Option<T>, name: &str) -> Result<T> {
    value
        .or(default)
        .ok_or_else(|| anyhow!("Missing configuration value '{name}'"))
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let defaults = raw::Config::embedded_default()?;
        let raw::Config {
            db,
            wiki,
            stats,
            images,
        } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();
        let default_db = defaults.db.unwrap_or_default();
        let conn_pool_size = required(
            connection_pool_size,
            default_db.connection_pool_size,
            "db.connection-pool-size",
        )?;
        if conn_pool_size == 0 {
            bail!("The connection pool must not be empty");
        }
        let db = Db {
            conn_sqlite: required(
                connection_sqlite,
                default_db.connection_sqlite,
                "db.connection-sqlite",
            )?,
            conn_pool_size,
        };

        let raw::Wiki {
            api_url,
            request_timeout,
            consumer_key,
            consumer_secret,
        } = wiki.unwrap_or_default();
        let default_wiki = defaults.wiki.unwrap_or_default();
        let request_timeout = required(
            request_timeout,
            default_wiki.request_timeout,
            "wiki.request-timeout",
        )?;
        if request_timeout.is_zero() {
            bail!("The request timeout must be positive");
        }
        let consumer = match (consumer_key, consumer_secret) {
            (Some(key), Some(secret)) => Some(OAuthToken::new(key, secret)),
            (None, None) => {
                log::info!("No OAuth consumer configured => edits are disabled");
                None
            }
            _ => bail!("Incomplete OAuth consumer configuration"),
        };
        let wiki = Wiki {
            api_url: required(api_url, default_wiki.api_url, "wiki.api-url")?,
            request_timeout,
            consumer,
        };

        let raw::Stats { output_dir } = stats.unwrap_or_default();
        let stats = Stats {
            output_dir: required(
                output_dir,
                defaults.stats.unwrap_or_default().output_dir,
                "stats.output-dir",
            )?,
        };

        let raw::Images { allowed_extensions } = images.unwrap_or_default();
        let allowed_extensions: Vec<_> = allowed_extensions
            .or(defaults.images.unwrap_or_default().allowed_extensions)
            .unwrap_or_else(|| {
                DEFAULT_ALLOWED_EXTENSIONS
                    .iter()
                    .map(ToString::to_string)
                    .collect()
            })
            .into_iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        if allowed_extensions.is_empty() {
            bail!("No allowed file extensions defined");
        }
        let images = Images { allowed_extensions };

        Ok(Self {
            db,
            wiki,
            stats,
            images,
        })
    }
}
