use std::fmt;

use crate::entry::EntryPoint;
use crate::flags::FlagSet;

/// A sub-command handler.
///
/// `Display` is the one-line description shown by `help`. `flags` is called
/// once at registration with the rule's own flag set; keep the returned
/// handles to read parsed values at run time.
///
/// The entry point is any method `fn(&mut self, ..) -> R` whose parameters
/// are `String`, optionally ending with a `Vec<String>` that collects the
/// remaining arguments, and whose result is `()` or an integer exit code:
///
/// ```ignore
/// impl Command for Add {
///     fn flags(&mut self, flags: &mut FlagSet) {
///         self.number = flags.int("number", 0, "some number");
///     }
///
///     fn entry_point() -> Option<EntryPoint<Self>> {
///         Some(EntryPoint::new(Self::run))
///     }
/// }
///
/// impl Add {
///     fn run(&mut self, key: String, value: String, extra: Vec<String>) -> i32 {
///         0
///     }
/// }
/// ```
///
/// Missing positional arguments arrive as empty strings and surplus ones
/// are dropped unless a trailing `Vec<String>` collects them.
pub trait Command: fmt::Display + 'static {
    fn flags(&mut self, _flags: &mut FlagSet) {}

    fn entry_point() -> Option<EntryPoint<Self>>
    where
        Self: Sized,
    {
        None
    }
}
