//! `help` - prints the usage listing to the error stream.

use std::fmt;

use crate::command::Command;
use crate::console::Console;
use crate::entry::EntryPoint;
use crate::usage::Usage;

pub struct HelpCommand {
    usage: Usage,
    console: Console,
}

impl HelpCommand {
    pub fn new(usage: Usage, console: Console) -> Self {
        Self { usage, console }
    }

    fn run(&mut self) {
        // Nothing useful to do if stderr is gone.
        let _ = self.usage.write_to(&mut self.console.err());
    }
}

impl fmt::Display for HelpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Output this usage information.")
    }
}

impl Command for HelpCommand {
    fn entry_point() -> Option<EntryPoint<Self>> {
        Some(EntryPoint::new(Self::run))
    }
}
