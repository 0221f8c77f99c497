/*!
 * 配置数据类型
 *
 * Every section and key is optional; missing ones take their defaults.
 */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::usage::UsageOrder;

/// 主配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// 日志配置 (对应 TOML 中的 [logging])
    pub logging: LoggingConfig,

    /// 用法输出配置 (对应 TOML 中的 [usage])
    pub usage: UsageConfig,

    /// 命令别名: alias -> command
    pub aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: super::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UsageConfig {
    pub order: UsageOrder,
}
