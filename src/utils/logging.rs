// 日志系统模块

use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use super::error::{app_error, AppResult};

/// 初始化日志系统
///
/// `RUST_LOG` wins when set; otherwise `default_level` is used as the filter
/// directive. Logs go to stderr so command output on stdout stays clean.
pub fn init_logging(default_level: &str) -> AppResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| app_error(format!("日志系统初始化失败: {}", e)))?;

    debug!("logging initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_an_error_not_a_panic() {
        let _ = init_logging("warn");
        assert!(init_logging("debug").is_err());
    }
}
