//! Completion tracking.
//!
//! Per user the collection moves `Empty -> Partial -> Complete`; `Complete`
//! is terminal. Only the edge into `Complete` produces an event, and the
//! tracker guarantees exactly one caller takes that edge per user.

mod completion;
mod state;

pub use state::{CollectionSnapshot, CollectionStatus, IgnoreReason};
pub use completion::{AssignOutcome, CompletionTracker, TrackerStats};
