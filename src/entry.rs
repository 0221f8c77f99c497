/*!
 * Entry points
 *
 * A command's entry point is an ordinary function `fn(&mut C, P1, .., Pn) -> R`.
 * Each parameter and result type reports what kind of slot it is, which
 * gives the registry a [`Signature`] to validate. The function itself is
 * wrapped in a closure that takes a [`Binding`] and calls it with typed
 * arguments.
 */

use std::path::PathBuf;

/// Kind of a single entry-point parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// One positional token.
    Str,
    /// Every remaining positional token. Only valid as the last parameter.
    StrList,
    /// A type the binder cannot fill from string tokens.
    Unsupported(&'static str),
}

impl ParamKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamKind::Str => "String",
            ParamKind::StrList => "Vec<String>",
            ParamKind::Unsupported(name) => name,
        }
    }
}

/// Kind of an entry point's result, as far as the exit code is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    Nothing,
    Integer,
    Unsupported(&'static str),
}

/// Unvalidated description of an entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<ParamKind>,
    pub returns: ReturnKind,
}

/// Positional arguments bound for one call, shaped after the rule's calling
/// shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Every parameter is a single string.
    Fixed(Vec<String>),
    /// Leading single strings followed by a variadic tail.
    Variadic {
        leading: Vec<String>,
        rest: Vec<String>,
    },
}

/// One bound value, handed to [`Param::from_bound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    Single(String),
    Rest(Vec<String>),
}

impl Binding {
    pub fn into_bounds(self) -> Vec<Bound> {
        match self {
            Binding::Fixed(values) => values.into_iter().map(Bound::Single).collect(),
            Binding::Variadic { leading, rest } => leading
                .into_iter()
                .map(Bound::Single)
                .chain(std::iter::once(Bound::Rest(rest)))
                .collect(),
        }
    }
}

/// A type usable as an entry-point parameter.
pub trait Param: Sized {
    const KIND: ParamKind;

    /// Returns `None` when the bound value does not fit this parameter.
    /// Registration rejects such shapes, so dispatch never sees it.
    fn from_bound(bound: Bound) -> Option<Self>;
}

impl Param for String {
    const KIND: ParamKind = ParamKind::Str;

    fn from_bound(bound: Bound) -> Option<Self> {
        match bound {
            Bound::Single(value) => Some(value),
            Bound::Rest(_) => None,
        }
    }
}

impl Param for Vec<String> {
    const KIND: ParamKind = ParamKind::StrList;

    fn from_bound(bound: Bound) -> Option<Self> {
        match bound {
            Bound::Rest(values) => Some(values),
            Bound::Single(_) => None,
        }
    }
}

macro_rules! unsupported_param {
    ($($ty:ty),*) => {
        $(
            impl Param for $ty {
                const KIND: ParamKind = ParamKind::Unsupported(stringify!($ty));

                fn from_bound(_: Bound) -> Option<Self> {
                    None
                }
            }
        )*
    };
}

// Non-string arguments belong in flags.
unsupported_param!(i32, i64, u32, u64, usize, f64, bool, char, PathBuf);

/// A type usable as an entry-point result.
pub trait Outcome {
    const KIND: ReturnKind;

    fn exit_code(self) -> Option<i32>;
}

impl Outcome for () {
    const KIND: ReturnKind = ReturnKind::Nothing;

    fn exit_code(self) -> Option<i32> {
        None
    }
}

/// Every integer primitive is an exit code. Wider values are narrowed to
/// `i32` by truncation, and the platform keeps only the low bits anyway
/// (`256` exits with `0` on Unix).
macro_rules! integer_outcome {
    ($($ty:ty),*) => {
        $(
            impl Outcome for $ty {
                const KIND: ReturnKind = ReturnKind::Integer;

                fn exit_code(self) -> Option<i32> {
                    Some(self as i32)
                }
            }
        )*
    };
}

integer_outcome!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Only the first element of a tuple result is considered.
impl<A: Outcome, B> Outcome for (A, B) {
    const KIND: ReturnKind = match A::KIND {
        ReturnKind::Nothing => ReturnKind::Unsupported("()"),
        kind => kind,
    };

    fn exit_code(self) -> Option<i32> {
        self.0.exit_code()
    }
}

macro_rules! unsupported_outcome {
    ($($ty:ty),*) => {
        $(
            impl Outcome for $ty {
                const KIND: ReturnKind = ReturnKind::Unsupported(stringify!($ty));

                fn exit_code(self) -> Option<i32> {
                    None
                }
            }
        )*
    };
}

unsupported_outcome!(String, &'static str, bool, f64);

type Call<C> = Box<dyn Fn(&mut C, Binding) -> Option<Option<i32>>>;

/// A typed entry point for commands of type `C`.
pub struct EntryPoint<C> {
    signature: Signature,
    call: Call<C>,
}

impl<C> EntryPoint<C> {
    pub fn new<F, M>(f: F) -> Self
    where
        F: IntoEntryPoint<C, M>,
    {
        f.into_entry_point()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Calls the entry point. The outer `None` means the binding did not
    /// match the declared parameters.
    pub(crate) fn call(&self, command: &mut C, binding: Binding) -> Option<Option<i32>> {
        (self.call)(command, binding)
    }
}

impl<C> std::fmt::Debug for EntryPoint<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryPoint")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Conversion from a function into an [`EntryPoint`]. `M` only keeps the
/// arity impls apart.
pub trait IntoEntryPoint<C, M> {
    fn into_entry_point(self) -> EntryPoint<C>;
}

macro_rules! impl_into_entry_point {
    ($($p:ident),*) => {
        #[allow(non_snake_case, unused_mut, unused_variables)]
        impl<C, F, R, $($p,)*> IntoEntryPoint<C, fn($($p,)*) -> R> for F
        where
            C: 'static,
            F: Fn(&mut C, $($p,)*) -> R + 'static,
            R: Outcome + 'static,
            $($p: Param + 'static,)*
        {
            fn into_entry_point(self) -> EntryPoint<C> {
                let signature = Signature {
                    params: vec![$($p::KIND,)*],
                    returns: R::KIND,
                };
                let call: Call<C> = Box::new(move |command: &mut C, binding: Binding| {
                    let mut bounds = binding.into_bounds().into_iter();
                    $(let $p = $p::from_bound(bounds.next()?)?;)*
                    Some(self(command, $($p,)*).exit_code())
                });
                EntryPoint { signature, call }
            }
        }
    };
}

impl_into_entry_point!();
impl_into_entry_point!(P1);
impl_into_entry_point!(P1, P2);
impl_into_entry_point!(P1, P2, P3);
impl_into_entry_point!(P1, P2, P3, P4);
impl_into_entry_point!(P1, P2, P3, P4, P5);
impl_into_entry_point!(P1, P2, P3, P4, P5, P6);
impl_into_entry_point!(P1, P2, P3, P4, P5, P6, P7);
impl_into_entry_point!(P1, P2, P3, P4, P5, P6, P7, P8);

#[cfg(test)]
mod tests {
    use super::*;

    struct Cmd {
        seen: Vec<String>,
    }

    impl Cmd {
        fn run(&mut self, a: String, b: String, extra: Vec<String>) -> i32 {
            self.seen = vec![a, b];
            self.seen.extend(extra);
            7
        }

        fn quiet(&mut self) {}

        fn numeric(&mut self, _n: i64) {}

        fn text(&mut self) -> String {
            String::new()
        }

        fn pair(&mut self, _a: String) -> (i32, String) {
            (3, String::new())
        }

        fn wide(&mut self) -> i64 {
            (1i64 << 32) + 5
        }
    }

    #[test]
    fn signature_reflects_types() {
        let entry = EntryPoint::new(Cmd::run);
        assert_eq!(
            entry.signature(),
            &Signature {
                params: vec![ParamKind::Str, ParamKind::Str, ParamKind::StrList],
                returns: ReturnKind::Integer,
            }
        );
        assert_eq!(
            EntryPoint::new(Cmd::quiet).signature().returns,
            ReturnKind::Nothing
        );
        assert_eq!(
            EntryPoint::new(Cmd::numeric).signature().params,
            vec![ParamKind::Unsupported("i64")]
        );
        assert_eq!(
            EntryPoint::new(Cmd::text).signature().returns,
            ReturnKind::Unsupported("String")
        );
        assert_eq!(
            EntryPoint::new(Cmd::pair).signature().returns,
            ReturnKind::Integer
        );
    }

    #[test]
    fn call_passes_typed_arguments() {
        let entry = EntryPoint::new(Cmd::run);
        let mut cmd = Cmd { seen: Vec::new() };
        let code = entry.call(
            &mut cmd,
            Binding::Variadic {
                leading: vec!["a".into(), "b".into()],
                rest: vec!["c".into()],
            },
        );
        assert_eq!(code, Some(Some(7)));
        assert_eq!(cmd.seen, ["a", "b", "c"]);
    }

    #[test]
    fn wide_integers_are_truncated_to_exit_codes() {
        let entry = EntryPoint::new(Cmd::wide);
        assert_eq!(entry.signature().returns, ReturnKind::Integer);
        let mut cmd = Cmd { seen: Vec::new() };
        assert_eq!(entry.call(&mut cmd, Binding::Fixed(vec![])), Some(Some(5)));
        assert_eq!(Outcome::exit_code(-1i64), Some(-1));
        assert_eq!(Outcome::exit_code(300u16), Some(300));
    }

    #[test]
    fn mismatched_binding_is_reported() {
        let entry = EntryPoint::new(Cmd::run);
        let mut cmd = Cmd { seen: Vec::new() };
        assert_eq!(entry.call(&mut cmd, Binding::Fixed(vec![])), None);
    }

    #[test]
    fn closures_work_too() {
        let entry: EntryPoint<Cmd> = EntryPoint::new(|cmd: &mut Cmd, name: String| {
            cmd.seen.push(name);
        });
        let mut cmd = Cmd { seen: Vec::new() };
        assert_eq!(
            entry.call(&mut cmd, Binding::Fixed(vec!["x".into()])),
            Some(None)
        );
        assert_eq!(cmd.seen, ["x"]);
    }
}
