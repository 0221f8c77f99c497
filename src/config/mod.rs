/*!
 * 配置系统
 *
 * Optional TOML configuration for an application: log level, usage ordering
 * and command aliases.
 */

pub mod reader;
pub mod types;

pub use reader::{default_config_path, discover_config, load_config, parse_config};
pub use types::{AppConfig, LoggingConfig, UsageConfig};

/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// 默认日志级别
pub const DEFAULT_LOG_LEVEL: &str = "warn";
