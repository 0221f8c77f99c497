use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// A type that can back a flag.
pub trait FlagType: Clone + Send + Sync + 'static {
    /// Boolean flags may be given without a value (`-verbose`).
    const IS_BOOL: bool = false;

    fn parse_flag(raw: &str) -> Result<Self, String>;

    fn format_flag(&self) -> String;
}

impl FlagType for bool {
    const IS_BOOL: bool = true;

    fn parse_flag(raw: &str) -> Result<Self, String> {
        parse_bool(raw)
    }

    fn format_flag(&self) -> String {
        self.to_string()
    }
}

impl FlagType for String {
    fn parse_flag(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }

    fn format_flag(&self) -> String {
        self.clone()
    }
}

macro_rules! impl_flag_type_from_str {
    ($($ty:ty),*) => {
        $(
            impl FlagType for $ty {
                fn parse_flag(raw: &str) -> Result<Self, String> {
                    raw.parse::<$ty>().map_err(|e| e.to_string())
                }

                fn format_flag(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_flag_type_from_str!(i32, i64, u32, u64, usize, f64);

/// Accepts the same spellings as Go's `strconv.ParseBool`.
pub fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err("parse error".to_string()),
    }
}

/// Live handle to a flag's value. Clones share the same storage, so the
/// handle a command keeps sees whatever the flag set parsed.
pub struct FlagValue<T> {
    inner: Arc<RwLock<T>>,
}

impl<T: FlagType> FlagValue<T> {
    pub(crate) fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn get(&self) -> T {
        self.inner.read().clone()
    }

    pub(crate) fn replace(&self, value: T) {
        *self.inner.write() = value;
    }
}

impl<T> Clone for FlagValue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: FlagType + Default> Default for FlagValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: FlagType + fmt::Debug> fmt::Debug for FlagValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FlagValue").field(&*self.inner.read()).finish()
    }
}

/// Type-erased view used by the flag set.
pub(crate) trait ErasedValue: Send + Sync {
    fn is_bool(&self) -> bool;

    fn set(&self, raw: &str) -> Result<(), String>;

    fn current(&self) -> String;
}

impl<T: FlagType> ErasedValue for FlagValue<T> {
    fn is_bool(&self) -> bool {
        T::IS_BOOL
    }

    fn set(&self, raw: &str) -> Result<(), String> {
        let value = T::parse_flag(raw)?;
        self.replace(value);
        Ok(())
    }

    fn current(&self) -> String {
        self.inner.read().format_flag()
    }
}
