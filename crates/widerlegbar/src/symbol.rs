use std::{collections::HashMap, fmt, sync::Mutex};

use crate::with_session_globals;

/// An interned proposition name. Symbols are numbered in the order they are
/// first seen within a session.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Maps a string to its interned representation.
    pub fn intern(string: &str) -> Self {
        with_session_globals(|session_globals| session_globals.symbol_interner.intern(string))
    }

    /// Access the underlying string. This requires locking the interner.
    ///
    /// The lifetime of the return value is not tied to `&self` but to the
    /// session owning the interner. Symbols never outlive their session, so
    /// this is fine for the short-lived uses it gets.
    pub fn as_str(&self) -> &str {
        with_session_globals(|session_globals| unsafe {
            std::mem::transmute::<&str, &str>(session_globals.symbol_interner.get(*self))
        })
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::intern(s)
    }
}

#[derive(Default)]
pub(crate) struct Interner(Mutex<InternerInner>);

#[derive(Default)]
struct InternerInner {
    names: HashMap<Box<str>, Symbol>,
    // Boxed so that the string data stays put when the vector grows.
    strings: Vec<Box<str>>,
}

impl Interner {
    pub fn fresh() -> Self {
        Self::default()
    }

    fn intern(&self, string: &str) -> Symbol {
        let mut inner = self.0.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(&name) = inner.names.get(string) {
            return name;
        }

        let name = Symbol(inner.strings.len() as u32);
        inner.strings.push(string.into());
        inner.names.insert(string.into(), name);
        name
    }

    fn get(&self, symbol: Symbol) -> &str {
        let inner = self.0.lock().unwrap_or_else(|e| e.into_inner());
        let s: &str = &inner.strings[symbol.0 as usize];
        // SAFETY: the boxed string is never dropped or moved while the
        // interner lives, and the interner outlives every symbol of its session.
        unsafe { &*(s as *const str) }
    }
}

mod serde {
    use super::Symbol;
    use ::serde::de::{Deserializer, Error, Visitor};
    use std::fmt;

    struct SymbolVisitor;

    impl<'a> Visitor<'a> for SymbolVisitor {
        type Value = Symbol;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a proposition name")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(Symbol::intern(v))
        }
    }

    impl serde::Serialize for Symbol {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(self.as_str())
        }
    }

    impl<'de> serde::Deserialize<'de> for Symbol {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_str(SymbolVisitor)
        }
    }
}
