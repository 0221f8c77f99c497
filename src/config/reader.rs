/*!
 * TOML配置读取器
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use super::types::AppConfig;
use super::CONFIG_FILE_NAME;
use crate::utils::error::AppResult;

/// 解析TOML内容为配置结构
pub fn parse_config(content: &str) -> AppResult<AppConfig> {
    toml::from_str::<AppConfig>(content).context("TOML配置解析失败")
}

/// Loads a config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> AppResult<AppConfig> {
    if !path.exists() {
        debug!("配置文件不存在，使用默认配置: {}", path.display());
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("配置文件无效: {}", path.display()))?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// `<config dir>/<app_name>/config.toml`, when the platform has a config dir.
pub fn default_config_path(app_name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(app_name).join(CONFIG_FILE_NAME))
}

/// Loads the config from its default location, or the defaults.
pub fn discover_config(app_name: &str) -> AppResult<AppConfig> {
    match default_config_path(app_name) {
        Some(path) => load_config(&path),
        None => Ok(AppConfig::default()),
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> AppResult<Self> {
        load_config(path)
    }

    pub fn discover(app_name: &str) -> AppResult<Self> {
        discover_config(app_name)
    }

    pub fn default_path(app_name: &str) -> Option<PathBuf> {
        default_config_path(app_name)
    }

    /// 序列化为TOML
    pub fn to_toml(&self) -> AppResult<String> {
        toml::to_string_pretty(self).context("配置序列化失败")
    }
}
