//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (nested keys separated by `__`, e.g. `APP_RETRIEVAL__FOCUS_LIMIT=5`).
//! Every setting has a default, so an empty directory yields a usable config.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(Path::new("."), &env_name)
    }

    pub fn load_for_env(dir: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.settings()?.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to extract settings: {}", e))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub retrieval: RetrievalSettings,
    pub ingest: IngestSettings,
    pub data: DataSettings,
    pub voice: VoiceSettings,
}

impl Settings {
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.retrieval.gather_limit == 0 || self.retrieval.focus_limit == 0 {
            return Err(Error::InvalidConfig("retrieval limits must be at least 1".to_string()));
        }
        if self.ingest.batch_size == 0 {
            return Err(Error::InvalidConfig("ingest.batch_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// How query tokens are matched against chunk text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Count substring occurrences; "a" matches inside "cat".
    #[default]
    Substring,
    /// Count whole lower-cased word tokens only.
    WholeToken,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Broad gather, used by the direct answer path.
    pub gather_limit: usize,
    /// Focused context, used by the tool-calling answer path.
    pub focus_limit: usize,
    pub match_mode: MatchMode,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self { gather_limit: 15, focus_limit: 7, match_mode: MatchMode::Substring }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    pub batch_size: usize,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self { batch_size: 50 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub store_path: String,
    pub docs_dir: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self { store_path: "data/chunks.json".to_string(), docs_dir: "data/docs".to_string() }
    }
}

impl DataSettings {
    pub fn store_path(&self) -> PathBuf {
        expand_path(&self.store_path)
    }

    pub fn docs_dir(&self) -> PathBuf {
        expand_path(&self.docs_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    pub closing_remarks: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self { closing_remarks: true }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
