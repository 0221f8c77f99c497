//! subcli - 命令行子命令框架
//!
//! Register commands by name, each with its own flags and a typed entry
//! point; `App::run` picks the command from the process arguments, parses
//! its flags, binds the remaining positional arguments and exits with the
//! entry point's code. `help` and `version` are registered by default.
//!
//! ```ignore
//! use std::fmt;
//! use subcli::{App, Command, EntryPoint, FlagSet, FlagValue};
//!
//! #[derive(Default)]
//! struct Add {
//!     number: FlagValue<i64>,
//! }
//!
//! impl fmt::Display for Add {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str("Add a user.")
//!     }
//! }
//!
//! impl Command for Add {
//!     fn flags(&mut self, flags: &mut FlagSet) {
//!         self.number = flags.int("number", 0, "some number");
//!     }
//!
//!     fn entry_point() -> Option<EntryPoint<Self>> {
//!         Some(EntryPoint::new(Self::run))
//!     }
//! }
//!
//! impl Add {
//!     fn run(&mut self, key: String, username: String, extra: Vec<String>) -> i32 {
//!         println!("{key} {username} {extra:?} {}", self.number.get());
//!         0
//!     }
//! }
//!
//! fn main() {
//!     let mut app = App::new("myapp", "0.1.0");
//!     app.rule(Add::default(), "add", "<key> <username> [<extra>]")
//!         .expect("valid command");
//!     app.run();
//! }
//! ```

// 模块声明
pub mod app; // 应用程序与进程边界
pub mod builtin; // help / version
pub mod command; // 命令契约
pub mod config; // TOML 配置
pub mod console; // 输出流
pub mod dispatch; // 参数绑定与调用
pub mod entry; // 入口签名
pub mod error; // 错误类型
pub mod flags; // 命令级 flag 集
pub mod registry; // 命令注册表
pub mod usage; // 用法输出
pub mod utils; // 日志与通用错误

pub use app::App;
pub use command::Command;
pub use config::AppConfig;
pub use console::Console;
pub use entry::{Binding, EntryPoint, IntoEntryPoint, Outcome, Param, ParamKind, ReturnKind, Signature};
pub use error::{DispatchError, FlagError, RuleError, RuleResult};
pub use flags::{FlagInfo, FlagSet, FlagType, FlagValue};
pub use registry::{CallingShape, FinalSlot, Rule, RuleRegistry};
pub use usage::{Usage, UsageOrder};
pub use utils::{init_logging, AppResult};
