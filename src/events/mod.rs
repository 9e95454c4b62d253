//! Event system: completion events, observers, and dispatch.
//!
//! The tracker publishes an [`Event`] whenever a user's collection makes a
//! qualifying transition. Observers registered with the
//! [`SubscriberRegistry`] receive every event dispatched after their
//! registration; there is no replay of earlier events.
//!
//! ## Key Components
//!
//! - [`Event`] / [`EventKind`]: immutable event values
//! - [`Observer`]: callback trait, implemented for plain closures
//! - [`ChannelObserver`]: forwards events into a crossbeam channel
//! - [`SubscriberRegistry`]: grow-only observer list with isolated dispatch
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use album_tracker::core::UserId;
//! use album_tracker::events::{Event, SubscriberRegistry};
//!
//! let registry = SubscriberRegistry::new();
//! let finished = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&finished);
//! registry.subscribe(Arc::new(move |_: &Event| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! }));
//!
//! let report = registry.dispatch(&Event::album_finished(UserId::new(1)));
//! assert_eq!(report.delivered, 1);
//! assert_eq!(finished.load(Ordering::SeqCst), 1);
//! ```

mod event;
mod observer;
mod registry;

pub use event::{Event, EventKind};
pub use observer::{ChannelObserver, Observer};
pub use registry::{DispatchReport, ObserverFailure, SubscriberRegistry, SubscriptionId};
