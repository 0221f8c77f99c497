/*!
 * 错误处理模块
 *
 * Application-level errors (config files, I/O) go through anyhow with
 * `.context(...)`. Domain errors live in `crate::error`.
 */

use anyhow::{anyhow, Result as AnyhowResult};

/// 统一的应用程序结果类型
pub type AppResult<T> = AnyhowResult<T>;

/// 统一的应用程序错误类型
pub type AppError = anyhow::Error;

/// 创建简单的应用程序错误
pub fn app_error(msg: impl Into<String>) -> AppError {
    anyhow!(msg.into())
}
