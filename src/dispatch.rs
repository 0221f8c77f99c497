/*!
 * Argument binding and invocation
 *
 * Binding never fails on a token-count mismatch. Missing positions become
 * empty strings, a variadic tail takes whatever is left, and surplus tokens
 * without a variadic tail are dropped.
 */

use tracing::{debug, error};

use crate::entry::Binding;
use crate::registry::{CallingShape, FinalSlot, Rule};

/// Binds positional tokens onto a calling shape.
pub fn bind(shape: &CallingShape, tokens: Vec<String>) -> Binding {
    let mut tokens = tokens.into_iter();
    let leading: Vec<String> = (0..shape.leading())
        .map(|_| tokens.next().unwrap_or_default())
        .collect();

    match shape.final_slot() {
        None => Binding::Fixed(leading),
        Some(FinalSlot::Single) => {
            let mut values = leading;
            values.push(tokens.next().unwrap_or_default());
            Binding::Fixed(values)
        }
        Some(FinalSlot::Variadic) => Binding::Variadic {
            leading,
            rest: tokens.collect(),
        },
    }
}

/// Binds `tokens` for `rule`, calls its entry point and returns the exit code.
pub fn invoke(rule: &mut Rule, tokens: Vec<String>) -> i32 {
    let binding = bind(rule.shape(), tokens);
    debug!("dispatching {} with {:?}", rule.name(), binding);

    match rule.invoke(binding) {
        Some(code) => code.unwrap_or(0),
        None => {
            // Only reachable if the shape and the entry point disagree.
            error!("binding for {} does not match its entry point", rule.name());
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{ParamKind, ReturnKind, Signature};

    fn shape(params: Vec<ParamKind>) -> CallingShape {
        CallingShape::from_signature(&Signature {
            params,
            returns: ReturnKind::Nothing,
        })
        .unwrap()
    }

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn fills_missing_with_empty_strings() {
        let s = shape(vec![ParamKind::Str, ParamKind::Str]);
        assert_eq!(
            bind(&s, vec![]),
            Binding::Fixed(vec![String::new(), String::new()])
        );
    }

    #[test]
    fn drops_surplus_without_variadic_tail() {
        let s = shape(vec![ParamKind::Str, ParamKind::Str]);
        assert_eq!(
            bind(&s, tokens(&["a", "b", "c"])),
            Binding::Fixed(tokens(&["a", "b"]))
        );
    }

    #[test]
    fn single_parameter_gets_first_token() {
        let s = shape(vec![ParamKind::Str]);
        assert_eq!(bind(&s, tokens(&["a", "b"])), Binding::Fixed(tokens(&["a"])));
        assert_eq!(bind(&s, vec![]), Binding::Fixed(tokens(&[""])));
    }

    #[test]
    fn variadic_absorbs_the_rest_in_order() {
        let s = shape(vec![ParamKind::Str, ParamKind::Str, ParamKind::StrList]);
        assert_eq!(
            bind(&s, tokens(&["bob", "smith", "x", "y"])),
            Binding::Variadic {
                leading: tokens(&["bob", "smith"]),
                rest: tokens(&["x", "y"]),
            }
        );
        assert_eq!(
            bind(&s, tokens(&["bob"])),
            Binding::Variadic {
                leading: tokens(&["bob", ""]),
                rest: vec![],
            }
        );
    }

    #[test]
    fn no_parameters_ignores_tokens() {
        let s = shape(vec![]);
        assert_eq!(bind(&s, tokens(&["a"])), Binding::Fixed(vec![]));
    }
}
