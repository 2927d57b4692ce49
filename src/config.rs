use crate::{helper::DynError, parser::MAX_STAGES};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 端末から読み込む際のプロンプト
    pub prompt: String,
    /// パイプラインの段数の上限。0は無制限
    pub max_stages: usize,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt: "minshell $ ".to_string(),
            max_stages: MAX_STAGES,
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// off, error, warn, info, debug, trace
    pub level: String,
    /// ログの出力先。未指定ならロガーを登録しない
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// 設定ファイルの既定のパス。`<config_dir>/minshell/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("minshell").join("config.toml"))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 設定ファイルを読み込む。ファイルが存在しない場合は既定値
    pub fn load(path: &Path) -> Result<Self, DynError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}
