//! Lazy, memoized capability classification.
//!
//! A [`Vocabulary`] names a closed set of kinds and how to test each of them
//! against a header value. A [`Session`] captures that value once and answers
//! "is it of kind X?" lazily, caching every answer for its own lifetime.
//! [`Negated`] is a complement view over a session with no cache of its own.

use std::fmt;
use std::marker::PhantomData;

use axum::http::HeaderMap;
use once_cell::sync::OnceCell;
use tracing::trace;

use crate::error::{Error, Result};

/// Path segment that flips polarity in [`Session::read`].
pub const NOT: &str = "not";

/// One closed set of classification questions.
pub trait Kind: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every kind, in vocabulary order.
    const ALL: &'static [Self];

    /// Property name of this kind (`"json"`, `"html"`, ...).
    fn name(self) -> &'static str;

    /// Position of this kind in [`Kind::ALL`].
    fn index(self) -> usize;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

/// Kind table plus the extraction rule for one call site.
pub trait Vocabulary: Send + Sync + 'static {
    type Kind: Kind;
    /// Raw value captured from the source headers.
    type Value: fmt::Debug + Send + Sync + 'static;

    /// Classifier name used in error messages.
    const NAME: &'static str;

    /// Pull the raw value out of a header map. Called once per session.
    fn extract(headers: &HeaderMap) -> Self::Value;

    /// Pure predicate deciding `kind` for `value`.
    fn matches(kind: Self::Kind, value: &Self::Value) -> bool;
}

/// Memoized classifier bound to one captured value.
pub struct Session<V: Vocabulary> {
    value: V::Value,
    cells: Box<[OnceCell<bool>]>,
    _vocabulary: PhantomData<fn() -> V>,
}

impl<V: Vocabulary> Session<V> {
    /// Create a session over an already extracted value.
    pub fn new(value: V::Value) -> Self {
        let cells = V::Kind::ALL.iter().map(|_| OnceCell::new()).collect();
        Self {
            value,
            cells,
            _vocabulary: PhantomData,
        }
    }

    /// Create a session by running the vocabulary's extraction rule.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::new(V::extract(headers))
    }

    /// The value captured at creation.
    pub fn value(&self) -> &V::Value {
        &self.value
    }

    /// Whether the captured value is of `kind`. Evaluated on first read only.
    pub fn is(&self, kind: V::Kind) -> bool {
        debug_assert_eq!(
            V::Kind::ALL.get(kind.index()),
            Some(&kind),
            "{}: index() of {:?} disagrees with Kind::ALL",
            V::NAME,
            kind
        );
        match self.cells.get(kind.index()) {
            Some(cell) => *cell.get_or_init(|| self.evaluate(kind)),
            None => self.evaluate(kind),
        }
    }

    /// Read a kind by name.
    ///
    /// Leading `not.` segments flip the answer, so `"not.not.json"` reads the
    /// same as `"json"`. Any other name fails with
    /// [`Error::UnsupportedKind`] carrying the whole path, and leaves the
    /// cache untouched.
    pub fn read(&self, path: &str) -> Result<bool> {
        let mut negated = false;
        let mut rest = path;
        while let Some((head, tail)) = rest.split_once('.') {
            if head != NOT {
                return Err(Self::unsupported(path));
            }
            negated = !negated;
            rest = tail;
        }

        let kind = V::Kind::from_name(rest).ok_or_else(|| Self::unsupported(path))?;
        Ok(self.is(kind) != negated)
    }

    /// Complement view over this session.
    pub fn not(&self) -> Negated<'_, V> {
        Negated { session: self }
    }

    /// Whether `kind` has already been evaluated.
    pub fn is_cached(&self, kind: V::Kind) -> bool {
        self.cells
            .get(kind.index())
            .is_some_and(|cell| cell.get().is_some())
    }

    pub fn cached_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.get().is_some()).count()
    }

    /// Every kind with its answer, in vocabulary order.
    pub fn snapshot(&self) -> Vec<(V::Kind, bool)> {
        V::Kind::ALL.iter().map(|&kind| (kind, self.is(kind))).collect()
    }

    fn evaluate(&self, kind: V::Kind) -> bool {
        let matched = V::matches(kind, &self.value);
        trace!(classifier = V::NAME, kind = kind.name(), matched, "evaluated kind");
        matched
    }

    fn unsupported(name: &str) -> Error {
        Error::UnsupportedKind {
            classifier: V::NAME,
            kind: name.to_string(),
        }
    }
}

impl<V: Vocabulary> fmt::Debug for Session<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached: Vec<_> = V::Kind::ALL
            .iter()
            .filter_map(|&kind| {
                self.cells
                    .get(kind.index())
                    .and_then(|cell| cell.get())
                    .map(|matched| (kind.name(), *matched))
            })
            .collect();
        f.debug_struct("Session")
            .field("classifier", &V::NAME)
            .field("value", &self.value)
            .field("cached", &cached)
            .finish()
    }
}

/// Complement of a [`Session`]. Holds no cache; every read goes through the
/// wrapped session.
pub struct Negated<'a, V: Vocabulary> {
    session: &'a Session<V>,
}

impl<'a, V: Vocabulary> Negated<'a, V> {
    pub fn is(&self, kind: V::Kind) -> bool {
        !self.session.is(kind)
    }

    pub fn read(&self, path: &str) -> Result<bool> {
        self.session.read(path).map(|matched| !matched)
    }

    /// Negating a negation yields the original session.
    pub fn not(&self) -> &'a Session<V> {
        self.session
    }
}

impl<V: Vocabulary> Clone for Negated<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: Vocabulary> Copy for Negated<'_, V> {}

impl<V: Vocabulary> fmt::Debug for Negated<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Negated").field(self.session).finish()
    }
}
