//! Service configuration and store factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use trivia_core::catalog::load_catalog;
use trivia_core::traits::CatalogStore;

use crate::file::FileStore;
use crate::memory::MemoryStore;

/// Which catalog store backs the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Volatile store, optionally seeded from a catalog file or directory.
    Memory {
        #[serde(default)]
        seed: Option<PathBuf>,
    },
    /// Catalog kept in one TOML file and rewritten on every mutation.
    File {
        #[serde(default = "default_catalog_path")]
        path: PathBuf,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::File {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("catalog/trivia.toml")
}

/// Top-level trivia configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriviaConfig {
    /// Catalog store backend.
    #[serde(default)]
    pub store: StoreConfig,
    /// Questions served per quiz round.
    #[serde(default = "default_questions_per_play")]
    pub questions_per_play: usize,
    /// Output format: json or table.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_questions_per_play() -> usize {
    5
}
fn default_format() -> String {
    "json".to_string()
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            questions_per_play: default_questions_per_play(),
            default_format: default_format(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Resolve env vars in a store config.
fn resolve_store_config(config: &StoreConfig) -> StoreConfig {
    match config {
        StoreConfig::Memory { seed } => StoreConfig::Memory {
            seed: seed.as_deref().map(resolve_path),
        },
        StoreConfig::File { path } => StoreConfig::File {
            path: resolve_path(path),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `trivia.toml` in the current directory
/// 2. `~/.config/trivia/config.toml`
///
/// Environment variable override: `TRIVIA_CATALOG` selects a file store.
pub fn load_config() -> Result<TriviaConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TriviaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("trivia.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TriviaConfig::default(),
    };

    if let Ok(catalog) = std::env::var("TRIVIA_CATALOG") {
        config.store = StoreConfig::File {
            path: PathBuf::from(catalog),
        };
    }

    config.store = resolve_store_config(&config.store);
    Ok(config)
}

/// Parse a TOML string into a `TriviaConfig`.
pub fn parse_config_str(content: &str) -> Result<TriviaConfig> {
    let config: TriviaConfig = toml::from_str(content)?;
    anyhow::ensure!(
        config.questions_per_play >= 1,
        "questions_per_play must be at least 1"
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("trivia"))
}

/// Create a store instance from its configuration.
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn CatalogStore>> {
    match config {
        StoreConfig::Memory { seed: None } => Ok(Arc::new(MemoryStore::new())),
        StoreConfig::Memory { seed: Some(seed) } => {
            let catalog = load_catalog(seed)?;
            let store = MemoryStore::from_catalog(catalog)
                .with_context(|| format!("invalid catalog: {}", seed.display()))?;
            Ok(Arc::new(store))
        }
        StoreConfig::File { path } => Ok(Arc::new(FileStore::open(path.clone())?)),
    }
}
