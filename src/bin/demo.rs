//! 示例程序
//!
//! A tiny notebook built on subcli. `DEMO_CONFIG` points at a config file;
//! otherwise the platform config dir is used.

use std::fmt;
use std::path::PathBuf;
use std::process;

use subcli::{init_logging, App, AppConfig, Command, EntryPoint, FlagSet, FlagValue, RuleResult};

#[derive(Default)]
struct Add {
    code: FlagValue<i64>,
    verbose: FlagValue<bool>,
}

impl fmt::Display for Add {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Add a note for a user.")
    }
}

impl Command for Add {
    fn flags(&mut self, flags: &mut FlagSet) {
        self.code = flags.int("code", 0, "exit code to return");
        self.verbose = flags.bool("verbose", false, "print the bound arguments");
    }

    fn entry_point() -> Option<EntryPoint<Self>> {
        Some(EntryPoint::new(Self::run))
    }
}

impl Add {
    fn run(&mut self, key: String, username: String, extra: Vec<String>) -> i64 {
        if self.verbose.get() {
            println!("key={:?} username={:?} extra={:?}", key, username, extra);
        } else {
            let mut parts = vec![key, username];
            parts.extend(extra);
            println!("{}", parts.join(" "));
        }
        self.code.get()
    }
}

#[derive(Default)]
struct Greet {
    greeting: FlagValue<String>,
    times: FlagValue<u64>,
    shout: FlagValue<bool>,
}

impl fmt::Display for Greet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Greet someone.")
    }
}

impl Command for Greet {
    fn flags(&mut self, flags: &mut FlagSet) {
        self.greeting = flags.string("greeting", "hello", "what to say");
        self.times = flags.uint("times", 1, "how many times");
        self.shout = flags.bool("shout", false, "upper-case the greeting");
    }

    fn entry_point() -> Option<EntryPoint<Self>> {
        Some(EntryPoint::new(Self::run))
    }
}

impl Greet {
    fn run(&mut self, name: String) {
        let name = if name.is_empty() { "world".to_string() } else { name };
        let mut line = format!("{}, {}", self.greeting.get(), name);
        if self.shout.get() {
            line = line.to_uppercase();
        }
        for _ in 0..self.times.get() {
            println!("{}", line);
        }
    }
}

struct Echo;

impl fmt::Display for Echo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Print the arguments.")
    }
}

impl Command for Echo {
    fn entry_point() -> Option<EntryPoint<Self>> {
        Some(EntryPoint::new(Self::run))
    }
}

impl Echo {
    fn run(&mut self, words: Vec<String>) {
        println!("{}", words.join(" "));
    }
}

fn load_config() -> AppConfig {
    let loaded = match std::env::var_os("DEMO_CONFIG") {
        Some(path) => AppConfig::load(&PathBuf::from(path)),
        None => AppConfig::discover("demo"),
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("{:#}", e);
        AppConfig::default()
    })
}

fn register(app: &mut App) -> RuleResult<()> {
    app.rule(Add::default(), "add", "<key> <username> [<extra>]")?;
    app.rule(Greet::default(), "greet", "[<name>]")?;
    app.rule(Echo, "echo", "<words>")?;
    Ok(())
}

fn main() {
    let config = load_config();
    if let Err(e) = init_logging(&config.logging.level) {
        eprintln!("{}", e);
    }

    let mut app = App::new("demo", env!("CARGO_PKG_VERSION"));
    app.configure(config);

    if let Err(e) = register(&mut app) {
        eprintln!("{}", e);
        process::exit(1);
    }

    app.run()
}
