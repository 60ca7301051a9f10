//! Identity-keyed session registry for shared sources.
//!
//! Some sources are held behind an `Arc` and cannot be mutated to carry
//! their own session. The registry maps each source, by `Arc` identity, to
//! its session while keeping only a `Weak` reference to the source. Entries
//! whose source has been dropped are pruned on insertion or by
//! [`SessionRegistry::purge`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::debug;

use crate::classifier::{Session, Vocabulary};
use crate::source::HeaderSource;

struct Entry<S, V: Vocabulary> {
    source: Weak<S>,
    session: Arc<Session<V>>,
}

/// Weakly keyed map from source identity to session.
pub struct SessionRegistry<S, V: Vocabulary> {
    entries: Mutex<HashMap<usize, Entry<S, V>>>,
}

impl<S, V> SessionRegistry<S, V>
where
    S: HeaderSource,
    V: Vocabulary,
{
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Session for `source`, created on first request.
    ///
    /// While an entry holds its `Weak`, the source allocation cannot be
    /// reused, so the address key is unambiguous.
    pub fn session_for(&self, source: &Arc<S>) -> Arc<Session<V>> {
        let key = Arc::as_ptr(source) as usize;
        let mut entries = self.entries.lock();

        if let Some(entry) = entries.get(&key) {
            if entry.source.strong_count() > 0 {
                return entry.session.clone();
            }
        }

        entries.retain(|_, entry| entry.source.strong_count() > 0);

        let session = Arc::new(Session::<V>::from_headers(source.headers()));
        debug!(classifier = V::NAME, live = entries.len(), "registered new session");
        entries.insert(
            key,
            Entry {
                source: Arc::downgrade(source),
                session: session.clone(),
            },
        );
        session
    }

    /// Drop entries whose source is gone. Returns how many were removed.
    pub fn purge(&self) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.source.strong_count() > 0);
        before - entries.len()
    }

    /// Number of entries, including any not yet purged.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S, V> Default for SessionRegistry<S, V>
where
    S: HeaderSource,
    V: Vocabulary,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, V: Vocabulary> fmt::Debug for SessionRegistry<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("classifier", &V::NAME)
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::tests::{Letter, Letters};
    use axum::http::HeaderMap;

    fn headers(letters: &str) -> Arc<HeaderMap> {
        let mut map = HeaderMap::new();
        map.insert("x-letters", letters.parse().unwrap());
        Arc::new(map)
    }

    #[test]
    fn test_same_arc_same_session() {
        let registry: SessionRegistry<HeaderMap, Letters> = SessionRegistry::new();
        let source = headers("a");
        let first = registry.session_for(&source);
        let second = registry.session_for(&source.clone());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_equal_values_distinct_sessions() {
        let registry: SessionRegistry<HeaderMap, Letters> = SessionRegistry::new();
        let a = headers("ab");
        let b = headers("ab");
        let sa = registry.session_for(&a);
        let sb = registry.session_for(&b);
        assert!(!Arc::ptr_eq(&sa, &sb));

        assert!(sa.is(Letter::A));
        assert!(!sb.is_cached(Letter::A));
    }

    #[test]
    fn test_registry_does_not_keep_source_alive() {
        let registry: SessionRegistry<HeaderMap, Letters> = SessionRegistry::new();
        let source = headers("c");
        let weak = Arc::downgrade(&source);
        let session = registry.session_for(&source);
        assert!(session.is(Letter::C));

        drop(source);
        assert!(weak.upgrade().is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.purge(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_stale_entries_pruned_on_insert() {
        let registry: SessionRegistry<HeaderMap, Letters> = SessionRegistry::new();
        for _ in 0..4 {
            let transient = headers("a");
            registry.session_for(&transient);
        }
        let keep = headers("b");
        registry.session_for(&keep);
        assert_eq!(registry.len(), 1);
    }
}
