use crate::{
    errors::{AppError, AppResult},
    keywords::{SortBy, Threshold},
    provider::DEFAULT_BASE_URL,
    storage::{self, StorageManager},
};
use homedir::my_home;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.yaml";

const DEFAULT_LOCATION: &str = "United States";
const DEFAULT_LANGUAGE: &str = "English";
/// Number of keywords requested per provider call
const DEFAULT_LIMIT: u32 = 50;
/// Provider-side cap on `limit`
const MAX_LIMIT: u32 = 1000;
const DEFAULT_LISTEN: &str = "0.0.0.0:5001";

/// Settings for the keyword data provider
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API root, e.g. "https://api.dataforseo.com/v3"
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Location name sent with every request
    #[serde(default = "default_location")]
    pub location: String,

    /// Language name sent with every request
    #[serde(default = "default_language")]
    pub language: String,

    /// Keywords requested per call
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            default_limit: DEFAULT_LIMIT,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RelevanceConfig {
    /// One of 0, 40, 60, 75, 90
    #[serde(default)]
    pub default_threshold: Threshold,

    #[serde(default)]
    pub default_sort: SortBy,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
        }
    }
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub relevance: RelevanceConfig,
    #[serde(default)]
    pub web: WebConfig,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: String,
}

impl Config {
    pub fn validate(&self) -> AppResult<()> {
        let provider = &self.provider;

        let base_url = url::Url::parse(&provider.base_url).map_err(|err| {
            AppError::configuration(format!(
                "provider.base_url {:?} is not a valid url: {err}",
                provider.base_url
            ))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AppError::configuration(format!(
                "provider.base_url must be http or https, got {}",
                base_url.scheme()
            )));
        }

        if provider.location.trim().is_empty() {
            return Err(AppError::configuration("provider.location must not be empty"));
        }
        if provider.language.trim().is_empty() {
            return Err(AppError::configuration("provider.language must not be empty"));
        }
        if provider.default_limit == 0 || provider.default_limit > MAX_LIMIT {
            return Err(AppError::configuration(format!(
                "provider.default_limit must be between 1 and {MAX_LIMIT}, got {}",
                provider.default_limit
            )));
        }

        self.web
            .listen
            .parse::<std::net::SocketAddr>()
            .map_err(|err| {
                AppError::configuration(format!(
                    "web.listen {:?} is not a socket address: {err}",
                    self.web.listen
                ))
            })?;

        Ok(())
    }

    /// Default location: `KWSCOPE_BASE_PATH` or `~/.local/share/kwscope`.
    pub fn base_path() -> AppResult<String> {
        if let Ok(path) = std::env::var("KWSCOPE_BASE_PATH") {
            return Ok(path);
        }

        let home = my_home()
            .map_err(|err| AppError::configuration(format!("could not determine home directory: {err:?}")))?
            .ok_or_else(|| AppError::configuration("home directory path is empty"))?;
        Ok(format!("{}/.local/share/kwscope", home.to_string_lossy()))
    }

    pub fn load() -> AppResult<Self> {
        Self::load_with(&Self::base_path()?)
    }

    pub fn load_with(base_path: &str) -> AppResult<Self> {
        let store = storage::BackendLocal::new(base_path)?;

        // create new if does not exist
        if !store.exists(CONFIG_FILE) {
            store.write(CONFIG_FILE, serde_yml::to_string(&Self::default())?.as_bytes())?;
        }

        let config_str = String::from_utf8(store.read(CONFIG_FILE)?)
            .map_err(|_| AppError::configuration("config file is not valid utf8"))?;
        let mut config: Self = serde_yml::from_str(&config_str)?;

        config.base_path = base_path.to_string();

        config.validate()?;

        // resave in case new fields were added
        if config_str != serde_yml::to_string(&config)? {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> AppResult<()> {
        let store = storage::BackendLocal::new(&self.base_path)?;

        let config_str = serde_yml::to_string(&self)?;
        store.write(CONFIG_FILE, config_str.as_bytes())?;
        Ok(())
    }
}
