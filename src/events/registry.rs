//! Subscriber registry and dispatch.
//!
//! The registry keeps observers in an `im::Vector` behind a read-write lock.
//! Dispatch clones the vector (O(1), structural sharing) and releases the
//! lock before calling any observer, so slow observers never hold up
//! registration and a subscription that finished before the snapshot is
//! guaranteed to see the event.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use im::Vector;
use parking_lot::RwLock;
use tracing::{trace, warn};

use super::event::Event;
use super::observer::Observer;
use crate::errors::ObserverError;

/// Identifier handed out for each subscription, in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

impl SubscriptionId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

#[derive(Clone)]
struct Subscriber {
    id: SubscriptionId,
    observer: Arc<dyn Observer>,
}

/// One observer's failure during a dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObserverFailure {
    pub subscription: SubscriptionId,
    pub error: ObserverError,
}

/// Outcome of delivering one event to every subscriber.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchReport {
    /// The event that was delivered.
    pub event: Event,

    /// Observers that handled the event without error.
    pub delivered: usize,

    /// Observers that returned an error or panicked.
    pub failures: Vec<ObserverFailure>,
}

impl DispatchReport {
    fn new(event: Event) -> Self {
        Self {
            event,
            delivered: 0,
            failures: Vec::new(),
        }
    }

    /// Number of observers the event was handed to.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.delivered + self.failures.len()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Grow-only list of observers.
#[derive(Default)]
pub struct SubscriberRegistry {
    subscribers: RwLock<Vector<Subscriber>>,
    next_id: AtomicU64,
    failures: AtomicU64,
}

impl SubscriberRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for all future events.
    pub fn subscribe(&self, observer: Arc<dyn Observer>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().push_back(Subscriber { id, observer });
        trace!(subscription = %id, "Observer registered");
        id
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total observer failures across all dispatches.
    #[must_use]
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Deliver `event` to every observer registered at this point.
    ///
    /// Each observer runs in isolation: an error or panic in one is
    /// recorded in the report and the remaining observers still run.
    pub fn dispatch(&self, event: &Event) -> DispatchReport {
        let snapshot = self.subscribers.read().clone();
        let mut report = DispatchReport::new(*event);

        for subscriber in snapshot.iter() {
            let result = panic::catch_unwind(AssertUnwindSafe(|| subscriber.observer.on_event(event)))
                .unwrap_or_else(|payload| Err(ObserverError::Panicked(panic_message(payload.as_ref()))));

            match result {
                Ok(()) => report.delivered += 1,
                Err(error) => {
                    self.failures.fetch_add(1, Ordering::Relaxed);
                    warn!(subscription = %subscriber.id, %event, %error, "Observer failed");
                    report.failures.push(ObserverFailure {
                        subscription: subscriber.id,
                        error,
                    });
                }
            }
        }

        trace!(%event, delivered = report.delivered, failed = report.failures.len(), "Event dispatched");
        report
    }
}

impl std::fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("subscribers", &self.len())
            .field("failures", &self.failure_count())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UserId;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, Arc<dyn Observer>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let observer: Arc<dyn Observer> = Arc::new(move |_: &Event| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (count, observer)
    }

    struct Failing;

    impl Observer for Failing {
        fn on_event(&self, _event: &Event) -> Result<(), ObserverError> {
            Err(ObserverError::failed("downstream unavailable"))
        }
    }

    #[test]
    fn test_dispatch_reaches_all_subscribers() {
        let registry = SubscriberRegistry::new();
        let (a, obs_a) = counter();
        let (b, obs_b) = counter();

        let id_a = registry.subscribe(obs_a);
        let id_b = registry.subscribe(obs_b);
        assert!(id_a < id_b);
        assert_eq!(registry.len(), 2);

        let report = registry.dispatch(&Event::album_finished(UserId::new(1)));
        assert_eq!(report.delivered, 2);
        assert!(report.is_clean());
        assert_eq!(a.load(Ordering::SeqCst), 1);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_without_subscribers() {
        let registry = SubscriberRegistry::new();
        assert!(registry.is_empty());

        let report = registry.dispatch(&Event::album_finished(UserId::new(1)));
        assert_eq!(report.attempted(), 0);
    }

    #[test]
    fn test_failures_are_isolated() {
        let registry = SubscriberRegistry::new();
        let (before, obs_before) = counter();
        let (after, obs_after) = counter();

        registry.subscribe(obs_before);
        let failing = registry.subscribe(Arc::new(Failing));
        let panicking = registry.subscribe(Arc::new(|_: &Event| panic!("observer bug")));
        registry.subscribe(obs_after);

        let report = registry.dispatch(&Event::album_finished(UserId::new(3)));

        assert_eq!(report.delivered, 2);
        assert_eq!(report.attempted(), 4);
        assert_eq!(before.load(Ordering::SeqCst), 1);
        assert_eq!(after.load(Ordering::SeqCst), 1);
        assert_eq!(
            report.failures,
            vec![
                ObserverFailure {
                    subscription: failing,
                    error: ObserverError::failed("downstream unavailable"),
                },
                ObserverFailure {
                    subscription: panicking,
                    error: ObserverError::Panicked("observer bug".to_string()),
                },
            ]
        );
        assert_eq!(registry.failure_count(), 2);
    }

    #[test]
    fn test_no_replay_for_late_subscribers() {
        let registry = SubscriberRegistry::new();
        registry.dispatch(&Event::album_finished(UserId::new(1)));

        let (late, obs_late) = counter();
        registry.subscribe(obs_late);
        assert_eq!(late.load(Ordering::SeqCst), 0);

        registry.dispatch(&Event::album_finished(UserId::new(2)));
        assert_eq!(late.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panic_message_formats() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let other: Box<dyn Any + Send> = Box::new(17u32);

        assert_eq!(panic_message(owned.as_ref()), "owned");
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }
}
