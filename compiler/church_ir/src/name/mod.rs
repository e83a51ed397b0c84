//! Interned identifier names.
//!
//! Identifiers are interned once into a process-wide table and handled as
//! 32-bit [`Name`] values afterwards. Interned strings live for the rest of
//! the process, so [`Name::as_str`] hands out `&'static str`.

use std::fmt;
use std::sync::LazyLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Interned string identifier.
///
/// Two `Name`s are equal exactly when their strings are equal.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Intern `s`, returning its `Name`.
    #[inline]
    pub fn intern(s: &str) -> Name {
        INTERNER.intern(s)
    }

    /// The interned string.
    #[inline]
    pub fn as_str(self) -> &'static str {
        INTERNER.lookup(self)
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.as_str())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Name::intern(s)
    }
}

static INTERNER: LazyLock<StringInterner> = LazyLock::new(StringInterner::new);

/// Storage behind the interner lock.
struct InternTable {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name`.
    strings: Vec<&'static str>,
}

/// String interner shared by every `Name` in the process.
///
/// Reads take the shared lock; only a miss takes the write lock.
struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        StringInterner {
            table: RwLock::new(InternTable {
                map,
                strings: vec![empty],
            }),
        }
    }

    fn intern(&self, s: &str) -> Name {
        if let Some(&index) = self.table.read().map.get(s) {
            return Name(index);
        }

        let mut table = self.table.write();
        // Another thread may have won the race between the two locks.
        if let Some(&index) = table.map.get(s) {
            return Name(index);
        }
        let Ok(index) = u32::try_from(table.strings.len()) else {
            panic!("string interner exceeded {} entries", u32::MAX);
        };
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        table.map.insert(leaked, index);
        table.strings.push(leaked);
        Name(index)
    }

    fn lookup(&self, name: Name) -> &'static str {
        // Names are only minted by `intern`, so the index is always valid.
        self.table.read().strings[name.0 as usize]
    }
}
