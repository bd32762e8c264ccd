use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 데스크톱 GUI 표시 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiSettings {
    pub ui_scale: f32,
    pub always_on_top: bool,
    /// 창 불투명도(0.3~1.0)
    pub window_alpha: f32,
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            ui_scale: 1.0,
            always_on_top: false,
            window_alpha: 1.0,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 마지막 입력값을 담는 JSON 파일
    pub storage_path: PathBuf,
    /// 차트 PNG 출력 폴더
    pub chart_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    /// tracing 로그 수준(trace/debug/info/warn/error)
    pub log_level: String,
    pub gui: GuiSettings,
    #[serde(skip)]
    path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("plate_cost_inputs.json"),
            chart_dir: PathBuf::from("charts"),
            chart_width: 1024,
            chart_height: 768,
            log_level: "info".to_string(),
            gui: GuiSettings::default(),
            path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("config file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str::<Config>(&content)?
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        cfg
    };
    cfg.path = path.to_path_buf();
    Ok(cfg)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 로드한 파일에 다시 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_config(self, &self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn chart_size(&self) -> (u32, u32) {
        (self.chart_width.max(200), self.chart_height.max(150))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = load_or_default(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.storage_path, PathBuf::from("plate_cost_inputs.json"));
        assert_eq!(cfg.path(), path.as_path());

        let again = load_or_default(&path).unwrap();
        assert_eq!(again, cfg);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = \"debug\"\n[gui]\nalways_on_top = true\n").unwrap();
        let cfg = load_or_default(&path).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert!(cfg.gui.always_on_top);
        assert_eq!(cfg.gui.ui_scale, 1.0);
        assert_eq!(cfg.chart_size(), (1024, 768));
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "chart_width = \"wide\"").unwrap();
        assert!(matches!(load_or_default(&path), Err(ConfigError::Parse(_))));
    }
}
