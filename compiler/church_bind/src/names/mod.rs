//! Collision-free display names.

use church_ir::Name;
use rustc_hash::FxHashMap;

/// Hands out display names that are not currently in use.
///
/// A requested base name is used as is when free; otherwise the smallest
/// numeric suffix not in use is appended (`x`, `x0`, `x1`, ...).
#[derive(Default)]
pub(crate) struct NameAllocator {
    /// Names in use, with how many live claims each has.
    in_use: FxHashMap<Name, usize>,
    /// Per base name, a lower bound on the smallest free suffix.
    next_suffix: FxHashMap<&'static str, usize>,
}

impl NameAllocator {
    /// Mark `name` as taken for the allocator's whole lifetime.
    pub(crate) fn reserve(&mut self, name: Name) {
        *self.in_use.entry(name).or_default() += 1;
    }

    /// Claim a free name derived from `base`.
    pub(crate) fn claim(&mut self, base: Name) -> Name {
        let name = if self.is_taken(base) {
            self.claim_suffixed(base.as_str())
        } else {
            base
        };
        self.reserve(name);
        name
    }

    /// Give back a name obtained from [`claim`](Self::claim).
    pub(crate) fn release(&mut self, name: Name) {
        let Some(count) = self.in_use.get_mut(&name) else {
            return;
        };
        *count -= 1;
        if *count > 0 {
            return;
        }
        self.in_use.remove(&name);

        // The freed name may be a smaller suffix than a base's hint.
        for (base, suffix) in suffix_splits(name.as_str()) {
            if let Some(hint) = self.next_suffix.get_mut(base) {
                *hint = (*hint).min(suffix);
            }
        }
    }

    fn is_taken(&self, name: Name) -> bool {
        self.in_use.contains_key(&name)
    }

    fn claim_suffixed(&mut self, base: &'static str) -> Name {
        let mut suffix = self.next_suffix.get(base).copied().unwrap_or(0);
        loop {
            let candidate = Name::intern(&format!("{base}{suffix}"));
            if !self.is_taken(candidate) {
                self.next_suffix.insert(base, suffix + 1);
                return candidate;
            }
            suffix += 1;
        }
    }
}

/// Every way to read `name` as `base` followed by a canonical decimal suffix.
///
/// `x10` splits as (`x`, 10) and (`x1`, 0).
fn suffix_splits(name: &'static str) -> impl Iterator<Item = (&'static str, usize)> {
    let digits_from = name
        .char_indices()
        .rev()
        .take_while(|(_, ch)| ch.is_ascii_digit())
        .last()
        .map_or(name.len(), |(index, _)| index);

    (digits_from.max(1)..name.len()).filter_map(move |split| {
        let suffix = &name[split..];
        if suffix.len() > 1 && suffix.starts_with('0') {
            return None;
        }
        let value = suffix.parse().ok()?;
        Some((&name[..split], value))
    })
}
