/*!
 * Flag sets
 *
 * Per-command flag definitions and parsing with the syntax of Go's `flag`
 * package: `-name`, `--name`, `-name=value` and `-name value`. Parsing stops
 * at the first positional token. Every rule owns one `FlagSet`, and there is
 * no process-wide registry.
 */

mod value;

pub use value::{parse_bool, FlagType, FlagValue};

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use crate::error::FlagError;
use value::ErasedValue;

struct Flag {
    usage: String,
    default: String,
    value: Box<dyn ErasedValue>,
}

/// Display data for one defined flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagInfo {
    pub name: String,
    pub default: String,
    pub usage: String,
    pub is_bool: bool,
}

pub struct FlagSet {
    name: String,
    // BTreeMap keeps lexicographic order for display.
    flags: BTreeMap<String, Flag>,
    args: Vec<String>,
    parsed: bool,
    redefined: Vec<String>,
}

impl FlagSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: BTreeMap::new(),
            args: Vec::new(),
            parsed: false,
            redefined: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Defines a flag of any supported type and returns its live handle.
    ///
    /// Redefining a name replaces the earlier flag and is remembered in
    /// [`FlagSet::redefined`].
    pub fn define<T: FlagType>(&mut self, name: &str, default: T, usage: &str) -> FlagValue<T> {
        let handle = FlagValue::new(default.clone());
        let flag = Flag {
            usage: usage.to_string(),
            default: default.format_flag(),
            value: Box::new(handle.clone()),
        };

        if self.flags.insert(name.to_string(), flag).is_some() {
            warn!("{} flag redefined: {}", self.name, name);
            self.redefined.push(name.to_string());
        }

        handle
    }

    pub fn bool(&mut self, name: &str, default: bool, usage: &str) -> FlagValue<bool> {
        self.define(name, default, usage)
    }

    pub fn int(&mut self, name: &str, default: i64, usage: &str) -> FlagValue<i64> {
        self.define(name, default, usage)
    }

    pub fn uint(&mut self, name: &str, default: u64, usage: &str) -> FlagValue<u64> {
        self.define(name, default, usage)
    }

    pub fn float(&mut self, name: &str, default: f64, usage: &str) -> FlagValue<f64> {
        self.define(name, default, usage)
    }

    pub fn string(&mut self, name: &str, default: &str, usage: &str) -> FlagValue<String> {
        self.define(name, default.to_string(), usage)
    }

    /// Parses `tokens` into the defined flags. The tokens left over after
    /// the flags are available from [`FlagSet::args`].
    pub fn parse<I, S>(&mut self, tokens: I) -> Result<(), FlagError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parsed = true;
        let mut rest: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let mut cursor = 0;

        while cursor < rest.len() {
            match self.parse_one(&rest[cursor..])? {
                Step::Consumed(n) => cursor += n,
                Step::Terminator => {
                    cursor += 1;
                    break;
                }
                Step::Positional => break,
            }
        }

        self.args = rest.split_off(cursor);
        debug!("{}: parsed flags, {} positional", self.name, self.args.len());
        Ok(())
    }

    fn parse_one(&self, tokens: &[String]) -> Result<Step, FlagError> {
        let token = &tokens[0];
        if token.len() < 2 || !token.starts_with('-') {
            return Ok(Step::Positional);
        }

        let mut name = &token[1..];
        if let Some(stripped) = name.strip_prefix('-') {
            if stripped.is_empty() {
                return Ok(Step::Terminator);
            }
            name = stripped;
        }
        if name.starts_with('-') || name.starts_with('=') {
            return Err(FlagError::BadSyntax(token.clone()));
        }

        let (name, inline) = match name.split_once('=') {
            Some((n, v)) => (n, Some(v)),
            None => (name, None),
        };

        let Some(flag) = self.flags.get(name) else {
            if name == "help" || name == "h" {
                return Err(FlagError::HelpRequested);
            }
            return Err(FlagError::Undefined(name.to_string()));
        };

        if flag.value.is_bool() {
            let raw = inline.unwrap_or("true");
            flag.value.set(raw).map_err(|reason| FlagError::InvalidBool {
                name: name.to_string(),
                value: raw.to_string(),
                reason,
            })?;
            return Ok(Step::Consumed(1));
        }

        let (raw, used) = match inline {
            Some(v) => (v, 1),
            None => match tokens.get(1) {
                Some(next) => (next.as_str(), 2),
                None => return Err(FlagError::MissingValue(name.to_string())),
            },
        };

        flag.value
            .set(raw)
            .map_err(|reason| FlagError::InvalidValue {
                name: name.to_string(),
                value: raw.to_string(),
                reason,
            })?;
        Ok(Step::Consumed(used))
    }

    /// Positional tokens remaining after the last parse.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg(&self, i: usize) -> Option<&str> {
        self.args.get(i).map(String::as_str)
    }

    pub fn n_arg(&self) -> usize {
        self.args.len()
    }

    pub fn take_args(&mut self) -> Vec<String> {
        std::mem::take(&mut self.args)
    }

    pub fn parsed(&self) -> bool {
        self.parsed
    }

    pub fn has_flags(&self) -> bool {
        !self.flags.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Option<FlagInfo> {
        self.flags.get(name).map(|flag| info(name, flag))
    }

    /// Sets a flag by name as if it had been given on the command line.
    pub fn set(&self, name: &str, raw: &str) -> Result<(), FlagError> {
        let flag = self
            .flags
            .get(name)
            .ok_or_else(|| FlagError::Undefined(name.to_string()))?;
        flag.value.set(raw).map_err(|reason| FlagError::InvalidValue {
            name: name.to_string(),
            value: raw.to_string(),
            reason,
        })
    }

    /// Current value of a flag, formatted.
    pub fn value_of(&self, name: &str) -> Option<String> {
        self.flags.get(name).map(|flag| flag.value.current())
    }

    /// All defined flags in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = FlagInfo> + '_ {
        self.flags.iter().map(|(name, flag)| info(name, flag))
    }

    pub fn visit_all(&self, mut f: impl FnMut(&FlagInfo)) {
        for flag in self.iter() {
            f(&flag);
        }
    }

    /// Names defined more than once.
    pub fn redefined(&self) -> &[String] {
        &self.redefined
    }
}

fn info(name: &str, flag: &Flag) -> FlagInfo {
    FlagInfo {
        name: name.to_string(),
        default: flag.default.clone(),
        usage: flag.usage.clone(),
        is_bool: flag.value.is_bool(),
    }
}

enum Step {
    Consumed(usize),
    Terminator,
    Positional,
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagSet")
            .field("name", &self.name)
            .field("flags", &self.flags.keys().collect::<Vec<_>>())
            .field("args", &self.args)
            .field("parsed", &self.parsed)
            .finish()
    }
}
