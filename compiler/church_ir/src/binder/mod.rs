//! Binder identities.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::Name;

/// Serial 0 is reserved for [`BinderId::DETACHED`].
static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Identity of a single binding occurrence.
///
/// Minted once per `Function` during binding, and once more per binder each
/// time a `Function` is walked to full normal form. Equality is identity:
/// two binders that share a display name are still different binders.
///
/// The display name rides along for printing only.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct BinderId {
    serial: u64,
    name: Name,
}

impl BinderId {
    /// Placeholder left behind when a term is torn down.
    pub(crate) const DETACHED: BinderId = BinderId {
        serial: 0,
        name: Name::EMPTY,
    };

    /// Mint a new binder displayed as `name`.
    pub fn fresh(name: Name) -> Self {
        BinderId {
            serial: NEXT_SERIAL.fetch_add(1, Ordering::Relaxed),
            name,
        }
    }

    /// Mint a new binder with the same display name as `self`.
    #[inline]
    pub fn renamed(self) -> Self {
        Self::fresh(self.name)
    }

    /// Display name, used only for printing.
    #[inline]
    pub fn name(self) -> Name {
        self.name
    }

    /// Process-unique serial number.
    #[inline]
    pub fn serial(self) -> u64 {
        self.serial
    }
}

impl fmt::Debug for BinderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.serial)
    }
}

#[cfg(test)]
mod tests;
