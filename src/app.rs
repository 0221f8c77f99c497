/*!
 * 应用程序
 *
 * Owns the rule registry and the global flags, and drives the process
 * boundary: read the arguments, pick the command, let its flag set take the
 * flags, bind the rest and exit with the entry point's code.
 */

use std::io::Write;

use tracing::debug;

use crate::builtin::{HelpCommand, VersionCommand};
use crate::command::Command;
use crate::config::AppConfig;
use crate::console::Console;
use crate::dispatch;
use crate::error::{DispatchError, RuleResult};
use crate::flags::FlagSet;
use crate::registry::RuleRegistry;
use crate::usage::Usage;

pub struct App {
    name: String,
    version: String,
    registry: RuleRegistry,
    global: FlagSet,
    console: Console,
    config: AppConfig,
}

impl App {
    /// Creates an application with the `help` and `version` commands.
    pub fn new(name: &str, version: &str) -> Self {
        Self::with_console(name, version, Console::std())
    }

    pub fn with_console(name: &str, version: &str, console: Console) -> Self {
        let usage = Usage::new(name);
        let mut app = Self {
            name: name.to_string(),
            version: version.to_string(),
            registry: RuleRegistry::new(usage.clone()),
            global: FlagSet::new(name),
            console: console.clone(),
            config: AppConfig::default(),
        };

        // 内置命令的入口签名固定，注册不会失败
        let _ = app.rule(HelpCommand::new(usage, console.clone()), "help", "");
        let _ = app.rule(VersionCommand::new(name, version, console), "version", "");

        app
    }

    /// Registers a command. See [`Command`] for what an entry point may look
    /// like.
    pub fn rule<C: Command>(&mut self, command: C, name: &str, arguments: &str) -> RuleResult<()> {
        self.registry.register(command, name, arguments)
    }

    /// Applies usage ordering and aliases from `config`.
    pub fn configure(&mut self, config: AppConfig) {
        self.registry.usage().set_order(config.usage.order);
        for (alias, target) in &config.aliases {
            self.registry.add_alias(alias, target);
        }
        self.config = config;
    }

    /// Flags parsed before the command name.
    pub fn flags(&mut self) -> &mut FlagSet {
        &mut self.global
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn usage(&self) -> String {
        self.registry.usage().render()
    }

    pub fn print_usage(&self) {
        let _ = self.registry.usage().write_to(&mut self.console.err());
    }

    /// Runs with the process arguments and exits.
    ///
    /// Arguments that are not valid UTF-8 are converted lossily, so they
    /// still reach the command.
    pub fn run(mut self) -> ! {
        let args = std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned());
        let code = self.execute(args);
        std::process::exit(code)
    }

    /// Runs with `args` (program name excluded) and returns the exit code.
    pub fn execute<I, S>(&mut self, args: I) -> i32
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.dispatch(args) {
            Ok(code) => code,
            Err(err) => {
                debug!("dispatch failed: {:?} ({:?})", err, err.severity());
                if err.has_message() {
                    let _ = writeln!(self.console.err(), "{}", err);
                }
                self.print_usage();
                err.exit_code()
            }
        }
    }

    fn dispatch<I, S>(&mut self, args: I) -> Result<i32, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.global
            .parse(args)
            .map_err(|source| DispatchError::Flags {
                command: None,
                source,
            })?;

        let mut args = self.global.args().iter().cloned();
        let name = args.next().ok_or(DispatchError::MissingCommand)?;
        let rest: Vec<String> = args.collect();

        let rule = self
            .registry
            .resolve_mut(&name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.clone()))?;

        rule.flags_mut()
            .parse(rest)
            .map_err(|source| DispatchError::Flags {
                command: Some(name.clone()),
                source,
            })?;
        let tokens = rule.flags().args().to_vec();

        Ok(dispatch::invoke(rule, tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_registers_builtins() {
        let app = App::with_console("myapp", "0.0.1", Console::captured());
        assert_eq!(app.registry().len(), 2);
        assert!(app.registry().contains("help"));
        assert!(app.registry().contains("version"));
    }

    #[test]
    fn version_writes_to_output_stream() {
        let console = Console::captured();
        let mut app = App::with_console("myapp", "0.0.1", console.clone());
        assert_eq!(app.execute(["version"]), 0);
        assert_eq!(console.captured_out(), "myapp v0.0.1\n");
        assert_eq!(console.captured_err(), "");
    }

    #[test]
    fn missing_command_prints_usage_only() {
        let console = Console::captured();
        let mut app = App::with_console("myapp", "0.0.1", console.clone());
        assert_eq!(app.execute(Vec::<String>::new()), 1);
        let err = console.captured_err();
        assert!(err.starts_with("Usage: myapp <cmd> [options] [<args>]\n"));
        assert!(!err.contains("invalid command"));
    }

    #[test]
    fn global_help_flag_exits_zero() {
        let console = Console::captured();
        let mut app = App::with_console("myapp", "0.0.1", console.clone());
        assert_eq!(app.execute(["-help"]), 0);
        assert!(console.captured_err().starts_with("Usage: myapp"));
    }
}
