use crate::error::{Result, ScoreError};
use crate::types::config::AcqConfig;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

pub const DEFAULT_CONFIG_FILE: &str = "acqscore.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".acqscore/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/acqscore/config.toml";

/// Scoring config files, applied global first and local override last.
/// Later layers win key by key; nested tables are merged, not replaced.
#[derive(Debug, Clone)]
pub struct ConfigLayers {
    pub global: Option<PathBuf>,
    pub project: PathBuf,
    pub local: PathBuf,
}

impl ConfigLayers {
    pub fn in_dir(dir: &Path, global: Option<PathBuf>) -> Self {
        Self {
            global,
            project: dir.join(DEFAULT_CONFIG_FILE),
            local: dir.join(DEFAULT_LOCAL_FILE),
        }
    }

    /// Layers for `dir`, with the global file taken from `$HOME`.
    pub fn discover(dir: &Path) -> Self {
        let global = std::env::var_os("HOME")
            .map(PathBuf::from)
            .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
        Self::in_dir(dir, global)
    }

    fn ordered(&self) -> impl Iterator<Item = &Path> {
        self.global
            .as_deref()
            .into_iter()
            .chain([self.project.as_path(), self.local.as_path()])
    }

    /// Merged config, or `None` when the directory has no project file and
    /// built-in defaults apply.
    pub fn load(&self) -> Result<Option<AcqConfig>> {
        if !self.project.is_file() {
            return Ok(None);
        }
        let mut merged = Table::new();
        for path in self.ordered().filter(|path| path.is_file()) {
            overlay(&mut merged, parse_layer(path)?);
            tracing::debug!(path = %path.display(), "applied config layer");
        }
        Value::Table(merged)
            .try_into()
            .map(Some)
            .map_err(|e: toml::de::Error| ScoreError::ConfigParse(e.to_string()))
    }
}

pub fn load_config(dir: &Path) -> Result<Option<AcqConfig>> {
    ConfigLayers::discover(dir).load()
}

fn parse_layer(path: &Path) -> Result<Table> {
    std::fs::read_to_string(path)?
        .parse::<Table>()
        .map_err(|e| ScoreError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn overlay(base: &mut Table, layer: Table) {
    for (key, value) in layer {
        match value {
            Value::Table(nested) => match base.get_mut(&key) {
                Some(Value::Table(existing)) => overlay(existing, nested),
                _ => {
                    base.insert(key, Value::Table(nested));
                }
            },
            scalar => {
                base.insert(key, scalar);
            }
        }
    }
}
