use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use live_logging::live_error;

use crate::types::{Envelope, EventKind, ServerEvent};

pub type Filter = Arc<dyn Fn(&Envelope) -> bool + Send + Sync>;
pub type Callback = Arc<dyn Fn(&ServerEvent) + Send + Sync>;

/// Handle returned by [`SubscriberRegistry::subscribe`].
///
/// Ids grow monotonically, so ordering by id is registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    filter: Filter,
    callback: Callback,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    subscriptions: BTreeMap<SubscriptionId, Subscription>,
}

/// Shared list of `(filter, callback)` pairs fed by the connection loop.
#[derive(Clone, Default)]
pub struct SubscriberRegistry {
    inner: Arc<Mutex<Inner>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F, C>(&self, filter: F, callback: C) -> SubscriptionId
    where
        F: Fn(&Envelope) -> bool + Send + Sync + 'static,
        C: Fn(&ServerEvent) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.subscriptions.insert(
            id,
            Subscription {
                filter: Arc::new(filter),
                callback: Arc::new(callback),
            },
        );
        id
    }

    /// Removes one registration. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().subscriptions.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invokes every matching callback in registration order and returns how
    /// many ran to completion.
    ///
    /// Callbacks run without the registry lock held, so they may subscribe or
    /// unsubscribe. A panicking filter or callback is logged and skipped.
    pub fn dispatch(&self, envelope: &Envelope) -> usize {
        let snapshot: Vec<(SubscriptionId, Filter, Callback)> = self
            .lock()
            .subscriptions
            .iter()
            .map(|(id, sub)| (*id, sub.filter.clone(), sub.callback.clone()))
            .collect();

        let mut delivered = 0;
        for (id, filter, callback) in snapshot {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                if filter(envelope) {
                    callback(&envelope.event);
                    true
                } else {
                    false
                }
            }));
            match outcome {
                Ok(true) => delivered += 1,
                Ok(false) => {}
                Err(_) => live_error!(
                    "Subscriber {:?} panicked while handling {:?}",
                    id,
                    envelope.kind()
                ),
            }
        }
        delivered
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Filter matching broadcast messages of one kind.
pub fn broadcast_of(kind: EventKind) -> impl Fn(&Envelope) -> bool + Send + Sync + 'static {
    move |envelope: &Envelope| envelope.is_broadcast() && envelope.kind() == kind
}
