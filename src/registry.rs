/*!
 * RuleRegistry - 命令注册表
 * 负责：校验入口签名、注册、查找、别名
 */

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::command::Command;
use crate::entry::{Binding, EntryPoint, ParamKind, ReturnKind, Signature};
use crate::error::{RuleError, RuleResult};
use crate::flags::FlagSet;
use crate::usage::{Usage, UsageEntry};

/// Kind of an entry point's last parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalSlot {
    Single,
    Variadic,
}

/// The validated parameter/result structure of an entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallingShape {
    leading: usize,
    last: Option<FinalSlot>,
    returns_code: bool,
}

impl CallingShape {
    /// Validates a signature. The first violation wins.
    pub fn from_signature(signature: &Signature) -> RuleResult<Self> {
        let params = &signature.params;

        let leading = params.len().saturating_sub(1);
        for (position, kind) in params.iter().enumerate().take(leading) {
            if *kind != ParamKind::Str {
                return Err(RuleError::InvalidParameterType {
                    position: position + 1,
                    found: kind.type_name(),
                });
            }
        }

        let last = match params.last() {
            None => None,
            Some(ParamKind::Str) => Some(FinalSlot::Single),
            Some(ParamKind::StrList) => Some(FinalSlot::Variadic),
            Some(kind) => {
                return Err(RuleError::InvalidParameterType {
                    position: params.len(),
                    found: kind.type_name(),
                })
            }
        };

        let returns_code = match signature.returns {
            ReturnKind::Nothing => false,
            ReturnKind::Integer => true,
            ReturnKind::Unsupported(found) => return Err(RuleError::InvalidReturnType { found }),
        };

        Ok(Self {
            leading,
            last,
            returns_code,
        })
    }

    /// Number of single-string slots before the final one.
    pub fn leading(&self) -> usize {
        self.leading
    }

    pub fn final_slot(&self) -> Option<FinalSlot> {
        self.last
    }

    pub fn is_variadic(&self) -> bool {
        self.last == Some(FinalSlot::Variadic)
    }

    pub fn returns_code(&self) -> bool {
        self.returns_code
    }

    /// Total number of parameters.
    pub fn arity(&self) -> usize {
        self.leading + usize::from(self.last.is_some())
    }
}

/// Type-erased command plus entry point.
trait Handler {
    fn invoke(&mut self, binding: Binding) -> Option<Option<i32>>;
}

struct BoundCommand<C> {
    command: C,
    entry: EntryPoint<C>,
}

impl<C: Command> Handler for BoundCommand<C> {
    fn invoke(&mut self, binding: Binding) -> Option<Option<i32>> {
        self.entry.call(&mut self.command, binding)
    }
}

/// A registered command.
pub struct Rule {
    name: String,
    arguments: String,
    description: String,
    shape: CallingShape,
    flags: FlagSet,
    handler: Box<dyn Handler>,
}

impl Rule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &str {
        &self.arguments
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn shape(&self) -> &CallingShape {
        &self.shape
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub(crate) fn flags_mut(&mut self) -> &mut FlagSet {
        &mut self.flags
    }

    pub(crate) fn invoke(&mut self, binding: Binding) -> Option<Option<i32>> {
        self.handler.invoke(binding)
    }

    /// `name [options] arguments`, as shown in the usage listing.
    pub fn usage_line(&self) -> String {
        let mut line = self.name.clone();
        if self.flags.has_flags() {
            line.push_str(" [options]");
        }
        if !self.arguments.is_empty() {
            line.push(' ');
            line.push_str(&self.arguments);
        }
        line
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("arguments", &self.arguments)
            .field("shape", &self.shape)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// 命令注册表
pub struct RuleRegistry {
    rules: BTreeMap<String, Rule>,
    aliases: HashMap<String, String>,
    usage: Usage,
}

impl RuleRegistry {
    pub fn new(usage: Usage) -> Self {
        Self {
            rules: BTreeMap::new(),
            aliases: HashMap::new(),
            usage,
        }
    }

    /// Registers `command` under `name`. A later registration with the same
    /// name replaces the earlier one; a failed one leaves it untouched.
    pub fn register<C: Command>(
        &mut self,
        mut command: C,
        name: &str,
        arguments: &str,
    ) -> RuleResult<()> {
        let entry = C::entry_point().ok_or(RuleError::MissingEntryPoint)?;
        let shape = CallingShape::from_signature(entry.signature())?;

        let mut flags = FlagSet::new(name);
        command.flags(&mut flags);
        if let Some(flag) = flags.redefined().first() {
            return Err(RuleError::FlagRedefined(flag.clone()));
        }

        let rule = Rule {
            name: name.to_string(),
            arguments: arguments.to_string(),
            description: command.to_string(),
            shape,
            flags,
            handler: Box::new(BoundCommand { command, entry }),
        };

        self.usage.insert(
            name,
            UsageEntry {
                line: rule.usage_line(),
                description: rule.description.clone(),
                flags: rule.flags.iter().collect(),
            },
        );

        if self.rules.insert(name.to_string(), rule).is_some() {
            warn!("rule {} replaced by a later registration", name);
        }
        debug!("registered rule {} ({:?})", name, shape);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Looks a command up by name, falling back to aliases.
    pub fn resolve_mut(&mut self, name: &str) -> Option<&mut Rule> {
        let key = if self.rules.contains_key(name) {
            name
        } else {
            self.aliases.get(name)?.as_str()
        };
        self.rules.get_mut(key)
    }

    pub fn add_alias(&mut self, alias: &str, target: &str) {
        debug!("添加命令别名: {} -> {}", alias, target);
        self.aliases.insert(alias.to_string(), target.to_string());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.rules.keys().cloned().collect()
    }

    pub fn usage(&self) -> &Usage {
        &self.usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(params: Vec<ParamKind>, returns: ReturnKind) -> Signature {
        Signature { params, returns }
    }

    #[test]
    fn empty_signature_is_valid() {
        let shape = CallingShape::from_signature(&sig(vec![], ReturnKind::Nothing)).unwrap();
        assert_eq!(shape.arity(), 0);
        assert_eq!(shape.final_slot(), None);
        assert!(!shape.returns_code());
    }

    #[test]
    fn lone_list_is_variadic() {
        let shape =
            CallingShape::from_signature(&sig(vec![ParamKind::StrList], ReturnKind::Integer))
                .unwrap();
        assert_eq!(shape.leading(), 0);
        assert!(shape.is_variadic());
        assert!(shape.returns_code());
    }

    #[test]
    fn list_before_last_is_rejected() {
        let err = CallingShape::from_signature(&sig(
            vec![ParamKind::StrList, ParamKind::Str],
            ReturnKind::Nothing,
        ))
        .unwrap_err();
        assert_eq!(
            err,
            RuleError::InvalidParameterType {
                position: 1,
                found: "Vec<String>"
            }
        );
    }

    #[test]
    fn parameter_errors_win_over_return_errors() {
        let err = CallingShape::from_signature(&sig(
            vec![ParamKind::Unsupported("i64")],
            ReturnKind::Unsupported("String"),
        ))
        .unwrap_err();
        assert!(matches!(err, RuleError::InvalidParameterType { .. }));
    }

    #[test]
    fn unsupported_result_is_rejected() {
        let err = CallingShape::from_signature(&sig(
            vec![ParamKind::Str],
            ReturnKind::Unsupported("bool"),
        ))
        .unwrap_err();
        assert_eq!(err, RuleError::InvalidReturnType { found: "bool" });
    }
}
