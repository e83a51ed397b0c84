//! Canonical encoding of terms.
//!
//! A term is flattened into a token stream in which bound variables are
//! replaced by their de Bruijn index (distance in binders back to the binding
//! `Function`). Two terms are alpha-equivalent exactly when their streams are
//! equal, so equality, hashing, and the compact [`BitString`] encoding all
//! derive from one traversal.
//!
//! # Strategy
//!
//! Pre-order walk with an explicit stack:
//! - `Apply` emits [`CanonToken::Apply`], then function, then argument
//! - `Function` emits [`CanonToken::Function`] and records its binder depth
//! - `Variable` emits `Bound(depth - binder_depth - 1)`, or `Free(binder)`
//!   for binders introduced outside the term
//!
//! Streams are compared lazily, stopping at the first mismatch.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};

use crate::{BinderId, Term};

/// One element of a term's canonical encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CanonToken {
    Apply,
    Function,
    /// Bound variable, as a zero-based de Bruijn index.
    Bound(usize),
    /// Variable whose binder is not inside the term.
    Free(BinderId),
}

enum Step<'a> {
    Visit(&'a Term),
    Leave {
        binder: BinderId,
        shadowed: Option<usize>,
    },
}

/// Iterator returned by [`canon_tokens`].
pub struct CanonTokens<'a> {
    pending: Vec<Step<'a>>,
    depth: usize,
    /// Depth at which each in-scope binder was introduced.
    binders: FxHashMap<BinderId, usize>,
}

/// Canonical token stream of `term`.
pub fn canon_tokens(term: &Term) -> CanonTokens<'_> {
    CanonTokens {
        pending: vec![Step::Visit(term)],
        depth: 0,
        binders: FxHashMap::default(),
    }
}

impl Iterator for CanonTokens<'_> {
    type Item = CanonToken;

    fn next(&mut self) -> Option<CanonToken> {
        loop {
            match self.pending.pop()? {
                Step::Leave { binder, shadowed } => {
                    self.depth -= 1;
                    match shadowed {
                        Some(depth) => self.binders.insert(binder, depth),
                        None => self.binders.remove(&binder),
                    };
                }
                Step::Visit(Term::Variable(binder)) => {
                    return Some(match self.binders.get(binder) {
                        Some(&introduced) => CanonToken::Bound(self.depth - introduced - 1),
                        None => CanonToken::Free(*binder),
                    });
                }
                Step::Visit(Term::Apply(node)) => {
                    self.pending.push(Step::Visit(&node.argument));
                    self.pending.push(Step::Visit(&node.function));
                    return Some(CanonToken::Apply);
                }
                Step::Visit(Term::Function(node)) => {
                    let shadowed = self.binders.insert(node.parameter, self.depth);
                    self.depth += 1;
                    self.pending.push(Step::Leave {
                        binder: node.parameter,
                        shadowed,
                    });
                    self.pending.push(Step::Visit(&node.body));
                    return Some(CanonToken::Function);
                }
            }
        }
    }
}

/// Alpha-equivalence: same shape, bound variables compared by binding depth.
pub fn alpha_eq(a: &Term, b: &Term) -> bool {
    a.ptr_eq(b) || canon_tokens(a).eq(canon_tokens(b))
}

/// Span-free 64-bit fingerprint, equal for alpha-equivalent terms.
pub fn canonical_hash(term: &Term) -> u64 {
    let mut hasher = FxHasher::default();
    term.hash(&mut hasher);
    hasher.finish()
}

/// Binary lambda calculus encoding of a closed term.
///
/// `Function` → `00`, `Apply` → `01`, bound variable with index `i` →
/// `1` repeated `i + 1` times, then `0`. Returns `None` when the term has a
/// free variable.
pub fn canonical_bits(term: &Term) -> Option<BitString> {
    let mut bits = BitString::new();
    for token in canon_tokens(term) {
        match token {
            CanonToken::Function => {
                bits.push(false);
                bits.push(false);
            }
            CanonToken::Apply => {
                bits.push(false);
                bits.push(true);
            }
            CanonToken::Bound(index) => {
                for _ in 0..=index {
                    bits.push(true);
                }
                bits.push(false);
            }
            CanonToken::Free(_) => return None,
        }
    }
    Some(bits)
}

/// Growable, packed sequence of bits.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    words: Vec<u64>,
    len: usize,
}

impl BitString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 64;
        if offset == 0 {
            self.words.push(0);
        }
        if bit {
            if let Some(word) = self.words.last_mut() {
                *word |= 1u64 << offset;
            }
        }
        self.len += 1;
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.words[index / 64] & (1u64 << (index % 64)) != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).filter_map(|index| self.get(index))
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString({self})")
    }
}
