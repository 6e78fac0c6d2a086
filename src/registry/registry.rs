use crate::error::{CallbackError, TriggerError};
use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Callback<A> = Arc<dyn Fn(&A) -> Result<(), CallbackError> + Send + Sync>;

/// One subscriber under one event.
struct Entry<A> {
    key: String,
    callback: Callback<A>,
}

// Manual Clone: `A` itself need not be Clone.
impl<A> Clone for Entry<A> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            callback: Arc::clone(&self.callback),
        }
    }
}

/// Per-instance subscription registry.
///
/// Maps an event name to the callbacks bound under it, each identified by a
/// subscriber key. A host type owns one registry as a field and exposes it
/// through [`Observable`](crate::Observable), usually via [`mixin!`](crate::mixin).
///
/// # Invariants
///
/// 1. Keys are unique within one event; binding a key again replaces its
///    callback and keeps its dispatch position.
/// 2. The same key under two events is two independent entries.
/// 3. Callbacks run in registration order.
/// 4. A dispatch pass runs over the entries present when it started; binds
///    and unbinds made by its callbacks apply from the next pass on.
///
/// The internal lock is never held while a callback runs, so callbacks may
/// call back into the registry.
pub struct Registry<A = ()> {
    events: RwLock<HashMap<String, Vec<Entry<A>>>>,
}

impl<A> Registry<A> {
    /// Create an empty registry. Nothing is allocated until the first bind.
    pub fn new() -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
        }
    }

    /// Bind `callback` under `event` for `key`, replacing any callback
    /// already bound for that key.
    pub fn bind<F>(&self, event: impl Into<String>, key: impl Into<String>, callback: F)
    where
        F: Fn(&A) + Send + Sync + 'static,
        A: 'static,
    {
        self.insert(
            event.into(),
            key.into(),
            Arc::new(move |args: &A| {
                callback(args);
                Ok(())
            }),
        );
    }

    /// Bind a fallible callback.
    ///
    /// An `Err` returned from it aborts the dispatch pass it runs in and is
    /// returned from [`trigger`](Self::trigger).
    pub fn try_bind<F>(&self, event: impl Into<String>, key: impl Into<String>, callback: F)
    where
        F: Fn(&A) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.insert(event.into(), key.into(), Arc::new(callback));
    }

    fn insert(&self, event: String, key: String, callback: Callback<A>) {
        let mut events = self.write();
        let existing = events
            .get_mut(&event)
            .and_then(|entries| entries.iter_mut().find(|entry| entry.key == key));
        if let Some(entry) = existing {
            let old = mem::replace(&mut entry.callback, callback);
            drop(events);
            // Dropped outside the lock: its captures may call back into the registry.
            drop(old);
            tracing::trace!(event = %event, key = %key, "replaced callback");
            return;
        }
        tracing::trace!(event = %event, key = %key, "bound callback");
        events.entry(event).or_default().push(Entry { key, callback });
    }

    /// Remove the callback bound under `event` for `key`.
    ///
    /// Unknown events and keys are ignored. Returns whether an entry was removed.
    pub fn unbind(&self, event: &str, key: &str) -> bool {
        let removed = {
            let mut events = self.write();
            let Some(entries) = events.get_mut(event) else {
                return false;
            };
            let Some(index) = entries.iter().position(|entry| entry.key == key) else {
                return false;
            };
            let removed = entries.remove(index);
            if entries.is_empty() {
                events.remove(event);
            }
            removed
        };
        drop(removed);
        tracing::trace!(event, key, "unbound callback");
        true
    }

    /// Invoke every callback bound under `event`, in registration order,
    /// passing `args` to each.
    ///
    /// An unknown event is a no-op. The first callback error stops the pass
    /// and is returned; callbacks after it are not invoked. Panics from a
    /// callback propagate to the caller unchanged.
    pub fn trigger_with(&self, event: &str, args: &A) -> Result<(), TriggerError> {
        let snapshot: Vec<Entry<A>> = match self.read().get(event) {
            Some(entries) => entries.clone(),
            None => return Ok(()),
        };

        tracing::debug!(event, subscribers = snapshot.len(), "dispatching event");

        for entry in snapshot {
            tracing::trace!(event, key = %entry.key, "invoking callback");
            if let Err(source) = (entry.callback)(args) {
                tracing::debug!(event, key = %entry.key, error = %source, "callback failed");
                return Err(TriggerError::Callback {
                    event: event.to_string(),
                    key: entry.key,
                    source,
                });
            }
        }
        Ok(())
    }

    /// Whether a callback is bound under `event` for `key`.
    pub fn is_bound(&self, event: &str, key: &str) -> bool {
        self.read()
            .get(event)
            .is_some_and(|entries| entries.iter().any(|entry| entry.key == key))
    }

    /// Number of callbacks bound under `event`.
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.read().get(event).map_or(0, Vec::len)
    }

    /// Keys bound under `event`, in dispatch order.
    pub fn keys(&self, event: &str) -> Vec<String> {
        self.read()
            .get(event)
            .map(|entries| entries.iter().map(|entry| entry.key.clone()).collect())
            .unwrap_or_default()
    }

    /// Events with at least one bound callback, sorted by name.
    pub fn events(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// True if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Remove every registration.
    pub fn clear(&self) {
        let old = mem::take(&mut *self.write());
        drop(old);
    }

    // Callbacks never run under the lock, so a poisoned lock still guards a
    // consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Vec<Entry<A>>>> {
        self.events.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Vec<Entry<A>>>> {
        self.events.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A: Default> Registry<A> {
    /// Invoke every callback bound under `event` with `A::default()`.
    ///
    /// For the usual `Registry<()>` this is the payload-less trigger.
    pub fn trigger(&self, event: &str) -> Result<(), TriggerError> {
        self.trigger_with(event, &A::default())
    }
}

impl<A> Default for Registry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Registry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(String, usize)> = self
            .read()
            .iter()
            .map(|(event, entries)| (event.clone(), entries.len()))
            .collect();
        counts.sort();
        f.debug_map().entries(counts).finish()
    }
}
