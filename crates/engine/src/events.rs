//! Style change notifications.
//!
//! Listeners are kept in a shared list. Dispatch snapshots the list first,
//! so listeners added or removed while a notification is delivered only see
//! later notifications.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use smallvec::SmallVec;

use crate::error::{CssError, Result};

/// Properties whose computed values changed on one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleChangeEvent<N> {
    pub node: N,
    /// Changed property indices, ascending.
    pub properties: SmallVec<[usize; 8]>,
}

/// Error a listener may return to abort the rest of a dispatch.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Receives [`StyleChangeEvent`]s.
pub trait CssEngineListener<N>: Send + Sync {
    fn properties_changed(&self, event: &StyleChangeEvent<N>) -> std::result::Result<(), ListenerError>;
}

impl<N, F> CssEngineListener<N> for F
where
    F: Fn(&StyleChangeEvent<N>) -> std::result::Result<(), ListenerError> + Send + Sync,
{
    fn properties_changed(&self, event: &StyleChangeEvent<N>) -> std::result::Result<(), ListenerError> {
        self(event)
    }
}

/// Handle returned by [`ListenerSet::add`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Entry<N> = (ListenerId, Arc<dyn CssEngineListener<N>>);

pub struct ListenerSet<N> {
    listeners: Mutex<Vec<Entry<N>>>,
    next_id: AtomicU64,
}

impl<N> Default for ListenerSet<N> {
    fn default() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }
}

impl<N> ListenerSet<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, listener: Arc<dyn CssEngineListener<N>>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, listener));
        id
    }

    /// Returns false if the listener was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.retain(|(candidate, _)| *candidate != id);
        listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Entry<N>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Delivers `event` to a snapshot of the current listeners, in
    /// registration order. The first failure stops the dispatch.
    pub fn dispatch(&self, event: &StyleChangeEvent<N>) -> Result<()> {
        let snapshot: Vec<Arc<dyn CssEngineListener<N>>> =
            self.lock().iter().map(|(_, l)| Arc::clone(l)).collect();
        for listener in snapshot {
            listener
                .properties_changed(event)
                .map_err(|e| CssError::Listener(e.to_string()))?;
        }
        Ok(())
    }
}

impl<N> std::fmt::Debug for ListenerSet<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("listeners", &self.len())
            .finish()
    }
}
