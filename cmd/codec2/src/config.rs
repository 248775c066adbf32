//! CLI configuration.
//!
//! Stored as YAML in ~/.giztoy/codec2/config.yaml. A missing file means
//! defaults; the file is only written by `codec2 config set`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::ValueEnum;
use giztoy_codec2::Mode;
use serde::{Deserialize, Serialize};

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".giztoy";
/// Application directory under the base directory.
pub const APP_NAME: &str = "codec2";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Codec engine backing the sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// System libcodec2 (requires the `native` feature)
    Native,
    /// In-process DC-level engine, for testing pipelines without libcodec2
    Dc,
}

impl Default for EngineKind {
    fn default() -> Self {
        if cfg!(feature = "native") {
            Self::Native
        } else {
            Self::Dc
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default mode for encode and decode.
    pub mode: Mode,

    /// Default engine.
    pub engine: EngineKind,

    /// Path to the config file (not serialized).
    #[serde(skip)]
    path: PathBuf,
}

impl Config {
    /// Gets the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| {
            home.join(DEFAULT_BASE_DIR)
                .join(APP_NAME)
                .join(DEFAULT_CONFIG_FILE)
        })
    }

    /// Returns the config file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saves the configuration to disk, creating its directory if needed.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

/// Loads configuration from `custom_path` or the default location.
pub fn load_config(custom_path: Option<&str>) -> anyhow::Result<Config> {
    let path = match custom_path {
        Some(p) => PathBuf::from(p),
        None => Config::default_path().ok_or_else(|| anyhow::anyhow!("cannot determine config path"))?,
    };

    let mut cfg: Config = if path.exists() {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?
    } else {
        Config::default()
    };

    cfg.path = path;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_in(dir: &tempfile::TempDir) -> String {
        dir.path().join("nested").join("config.yaml").to_string_lossy().into_owned()
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_in(&dir);
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.mode, Mode::Mode3200);
        assert_eq!(cfg.engine, EngineKind::default());
        assert!(!cfg.path().exists());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_in(&dir);

        let mut cfg = load_config(Some(&path)).unwrap();
        cfg.mode = Mode::Mode700C;
        cfg.engine = EngineKind::Dc;
        cfg.save().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("mode: 700C"));
        assert!(content.contains("engine: dc"));

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.mode, Mode::Mode700C);
        assert_eq!(cfg.engine, EngineKind::Dc);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "mode: \"1300\"\n").unwrap();

        let cfg = load_config(path.to_str()).unwrap();
        assert_eq!(cfg.mode, Mode::Mode1300);
        assert_eq!(cfg.engine, EngineKind::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "bitrate: 1300\n").unwrap();
        assert!(load_config(path.to_str()).is_err());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "mode: \"9600\"\n").unwrap();
        assert!(load_config(path.to_str()).is_err());
    }
}
