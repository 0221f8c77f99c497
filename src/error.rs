/*!
 * 错误类型
 *
 * Registration, flag parsing and dispatch errors.
 */

use thiserror::Error;

/// Errors returned when a command cannot be registered as a rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule: missing run entry point")]
    MissingEntryPoint,

    #[error("rule: parameters for run must be strings (parameter {position} is {found})")]
    InvalidParameterType { position: usize, found: &'static str },

    #[error("rule: first return value for run must be an integer (found {found})")]
    InvalidReturnType { found: &'static str },

    #[error("rule: flag redefined: {0}")]
    FlagRedefined(String),
}

/// Flag parse errors. Messages follow the Go `flag` package so existing
/// scripts that match on them keep working.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("flag: help requested")]
    HelpRequested,

    #[error("flag provided but not defined: -{0}")]
    Undefined(String),

    #[error("bad flag syntax: {0}")]
    BadSyntax(String),

    #[error("flag needs an argument: -{0}")]
    MissingValue(String),

    #[error("invalid boolean value {value:?} for -{name}: {reason}")]
    InvalidBool {
        name: String,
        value: String,
        reason: String,
    },

    #[error("invalid value {value:?} for flag -{name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

/// Errors raised while turning the process arguments into a rule invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("missing command")]
    MissingCommand,

    #[error("Error: invalid command {0}")]
    UnknownCommand(String),

    #[error("{source}")]
    Flags {
        command: Option<String>,
        #[source]
        source: FlagError,
    },
}

impl DispatchError {
    /// 进程退出码
    pub fn exit_code(&self) -> i32 {
        match self {
            DispatchError::MissingCommand => 1,
            DispatchError::UnknownCommand(_) => 1,
            DispatchError::Flags {
                source: FlagError::HelpRequested,
                ..
            } => 0,
            DispatchError::Flags { .. } => 2,
        }
    }

    /// Whether an error line should be printed before the usage listing.
    pub fn has_message(&self) -> bool {
        !matches!(
            self,
            DispatchError::MissingCommand
                | DispatchError::Flags {
                    source: FlagError::HelpRequested,
                    ..
                }
        )
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DispatchError::MissingCommand => ErrorSeverity::Info,
            DispatchError::UnknownCommand(_) => ErrorSeverity::Warning,
            DispatchError::Flags {
                source: FlagError::HelpRequested,
                ..
            } => ErrorSeverity::Info,
            DispatchError::Flags { .. } => ErrorSeverity::Warning,
        }
    }
}

/// 错误严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
}

pub type RuleResult<T> = Result<T, RuleError>;
