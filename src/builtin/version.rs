//! `version` - prints `<name> v<version>`.

use std::fmt;
use std::io::Write;

use crate::command::Command;
use crate::console::Console;
use crate::entry::EntryPoint;

pub struct VersionCommand {
    name: String,
    version: String,
    console: Console,
}

impl VersionCommand {
    pub fn new(name: &str, version: &str, console: Console) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            console,
        }
    }

    fn run(&mut self) {
        let _ = writeln!(self.console.out(), "{} v{}", self.name, self.version);
    }
}

impl fmt::Display for VersionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Output the application version.")
    }
}

impl Command for VersionCommand {
    fn entry_point() -> Option<EntryPoint<Self>> {
        Some(EntryPoint::new(Self::run))
    }
}
