//! Per-session model storage.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::pipeline::bundle::ModelBundle;

/// Opaque identifier of a user session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        SessionId(id.into())
    }

    /// A fresh random (v4) session id.
    pub fn generate() -> Self {
        SessionId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        SessionId::new(id)
    }
}

/// A bundle as stored for a session, with the name shown to users.
#[derive(Debug, Clone)]
pub struct StoredBundle {
    pub bundle: Arc<ModelBundle>,
    /// Descriptive name, e.g. "Random Forest (default)" for fallback models.
    pub name: String,
}

/// Mapping from session to its current model bundle.
pub trait BundleStore: Send + Sync {
    fn get_bundle(&self, session: &SessionId) -> Option<StoredBundle>;

    /// Store `bundle` for `session`, replacing any previous one.
    fn set_bundle(&self, session: &SessionId, bundle: ModelBundle, name: &str) -> StoredBundle;

    /// Remove the session's bundle. Returns whether one was present.
    fn clear(&self, session: &SessionId) -> bool;

    /// Return the session's bundle, or train and store one with `train`.
    ///
    /// The flag is `true` when `train` ran. The default implementation does
    /// not serialize concurrent callers; stores shared between threads
    /// override it so that `train` runs at most once per session.
    fn get_or_train(
        &self,
        session: &SessionId,
        name: &str,
        train: &mut dyn FnMut() -> Result<ModelBundle>,
    ) -> Result<(StoredBundle, bool)> {
        if let Some(stored) = self.get_bundle(session) {
            return Ok((stored, false));
        }
        let bundle = train()?;
        Ok((self.set_bundle(session, bundle, name), true))
    }
}

/// One session's entry.
///
/// `bundle` is only write-locked to swap the stored value. `training` is held
/// for the whole fallback run so that concurrent callers of one session train
/// once while readers keep seeing the current bundle.
#[derive(Debug, Default)]
struct Slot {
    bundle: RwLock<Option<StoredBundle>>,
    training: Mutex<()>,
}

/// Process-local [`BundleStore`].
///
/// The session map lock is only held to look up or insert a slot, never
/// while a model trains, so sessions do not wait on each other.
#[derive(Debug, Default)]
pub struct InMemoryBundleStore {
    slots: RwLock<HashMap<SessionId, Arc<Slot>>>,
}

impl InMemoryBundleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions holding a bundle.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .values()
            .filter(|slot| slot.bundle.read().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sessions(&self) -> Vec<SessionId> {
        let mut sessions: Vec<SessionId> = self
            .slots
            .read()
            .iter()
            .filter(|(_, slot)| slot.bundle.read().is_some())
            .map(|(session, _)| session.clone())
            .collect();
        sessions.sort();
        sessions
    }

    fn slot(&self, session: &SessionId) -> Option<Arc<Slot>> {
        self.slots.read().get(session).cloned()
    }

    fn slot_or_insert(&self, session: &SessionId) -> Arc<Slot> {
        if let Some(slot) = self.slot(session) {
            return slot;
        }
        Arc::clone(self.slots.write().entry(session.clone()).or_default())
    }
}

impl BundleStore for InMemoryBundleStore {
    fn get_bundle(&self, session: &SessionId) -> Option<StoredBundle> {
        let slot = self.slot(session)?;
        let stored = slot.bundle.read().clone();
        stored
    }

    fn set_bundle(&self, session: &SessionId, bundle: ModelBundle, name: &str) -> StoredBundle {
        let stored = StoredBundle {
            bundle: Arc::new(bundle),
            name: name.to_string(),
        };
        *self.slot_or_insert(session).bundle.write() = Some(stored.clone());
        stored
    }

    fn clear(&self, session: &SessionId) -> bool {
        match self.slots.write().remove(session) {
            Some(slot) => slot.bundle.read().is_some(),
            None => false,
        }
    }

    /// Trains under the session's own lock, so concurrent cold requests for
    /// one session train once and other sessions stay readable.
    ///
    /// A bundle stored with [`set_bundle`](BundleStore::set_bundle) while
    /// training runs is kept, and returned in place of the trained one.
    fn get_or_train(
        &self,
        session: &SessionId,
        name: &str,
        train: &mut dyn FnMut() -> Result<ModelBundle>,
    ) -> Result<(StoredBundle, bool)> {
        let slot = self.slot_or_insert(session);
        if let Some(stored) = slot.bundle.read().clone() {
            return Ok((stored, false));
        }

        let _training = slot.training.lock();
        if let Some(stored) = slot.bundle.read().clone() {
            return Ok((stored, false));
        }
        let trained = StoredBundle {
            bundle: Arc::new(train()?),
            name: name.to_string(),
        };

        let mut current = slot.bundle.write();
        let stored = current.get_or_insert(trained).clone();
        Ok((stored, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::LabelSpace;
    use crate::ml::{ModelParams, MultiLabelClassifier, TfIdfVectorizer};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    fn bundle() -> ModelBundle {
        let mut vectorizer = TfIdfVectorizer::standard().unwrap();
        let x = vectorizer.fit_transform(&["mesin halus"], 10).unwrap();
        let mut classifier =
            MultiLabelClassifier::new("Naive Bayes", &ModelParams::new()).unwrap();
        let mut y = vec![vec![0; 18]];
        y[0][5] = 1;
        classifier.fit(&x, &y).unwrap();
        ModelBundle::new(vectorizer, classifier, LabelSpace::standard()).unwrap()
    }

    #[test]
    fn test_session_id() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert_eq!(Uuid::parse_str(a.as_str()).unwrap().get_version_num(), 4);
        assert_eq!(SessionId::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_set_get_clear() {
        let store = InMemoryBundleStore::new();
        let session = SessionId::from("s1");
        assert!(store.get_bundle(&session).is_none());

        store.set_bundle(&session, bundle(), "Naive Bayes");
        let stored = store.get_bundle(&session).unwrap();
        assert_eq!(stored.name, "Naive Bayes");
        assert_eq!(store.len(), 1);

        assert!(store.clear(&session));
        assert!(!store.clear(&session));
        assert!(store.is_empty());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = InMemoryBundleStore::new();
        store.set_bundle(&SessionId::from("a"), bundle(), "first");
        assert!(store.get_bundle(&SessionId::from("b")).is_none());
        assert_eq!(store.sessions(), vec![SessionId::from("a")]);
    }

    #[test]
    fn test_get_or_train_runs_once() {
        let store = InMemoryBundleStore::new();
        let session = SessionId::generate();
        let mut calls = 0;
        let mut train = || -> Result<ModelBundle> {
            calls += 1;
            Ok(bundle())
        };

        let (first, trained) = store.get_or_train(&session, "default", &mut train).unwrap();
        assert!(trained);
        let (second, trained) = store.get_or_train(&session, "default", &mut train).unwrap();
        assert!(!trained);
        assert!(Arc::ptr_eq(&first.bundle, &second.bundle));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_get_or_train_failure_stores_nothing() {
        let store = InMemoryBundleStore::new();
        let session = SessionId::generate();
        let mut train =
            || -> Result<ModelBundle> { Err(crate::error::UlasanError::insufficient_data("none")) };
        assert!(store.get_or_train(&session, "default", &mut train).is_err());
        assert!(store.get_bundle(&session).is_none());
    }

    #[test]
    fn test_warm_session_readable_while_cold_session_trains() {
        let store = InMemoryBundleStore::new();
        let warm = SessionId::from("warm");
        let cold = SessionId::from("cold");
        store.set_bundle(&warm, bundle(), "Naive Bayes");

        let (started_tx, started_rx) = mpsc::channel();
        let (read_tx, read_rx) = mpsc::channel::<()>();

        thread::scope(|scope| {
            let (store, cold) = (&store, &cold);
            let trainer = scope.spawn(move || {
                let mut train = || -> Result<ModelBundle> {
                    started_tx.send(()).unwrap();
                    // Keep training until the other session has been read.
                    let read = read_rx.recv_timeout(Duration::from_secs(5));
                    assert!(read.is_ok(), "warm session read was blocked by training");
                    Ok(bundle())
                };
                store.get_or_train(cold, "default", &mut train)
            });

            started_rx.recv().unwrap();
            let warm_bundle = store.get_bundle(&warm);
            let cold_bundle = store.get_bundle(cold);
            let _ = read_tx.send(());

            assert_eq!(warm_bundle.map(|s| s.name), Some("Naive Bayes".to_string()));
            assert!(cold_bundle.is_none());
            let (stored, trained) = trainer.join().unwrap().unwrap();
            assert!(trained);
            assert_eq!(stored.name, "default");
        });
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_concurrent_cold_requests_train_once() {
        let store = InMemoryBundleStore::new();
        let session = SessionId::generate();
        let calls = AtomicUsize::new(0);

        let results: Vec<(StoredBundle, bool)> = thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        let mut train = || -> Result<ModelBundle> {
                            calls.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(Duration::from_millis(50));
                            Ok(bundle())
                        };
                        store.get_or_train(&session, "default", &mut train).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(results.iter().filter(|(_, trained)| *trained).count(), 1);
        for (stored, _) in &results {
            assert!(Arc::ptr_eq(&stored.bundle, &results[0].0.bundle));
        }
    }

    #[test]
    fn test_cleared_session_trains_again() {
        let store = InMemoryBundleStore::new();
        let session = SessionId::generate();
        let mut calls = 0;
        let mut train = || -> Result<ModelBundle> {
            calls += 1;
            Ok(bundle())
        };

        store.get_or_train(&session, "default", &mut train).unwrap();
        assert!(store.clear(&session));
        assert!(store.get_bundle(&session).is_none());
        let (_, trained) = store.get_or_train(&session, "default", &mut train).unwrap();
        assert!(trained);
        assert_eq!(calls, 2);
    }
}
