//! Observer trait and the built-in channel observer.

use crossbeam::channel::Sender;

use super::event::Event;
use crate::errors::ObserverError;

/// Receives tracker events.
///
/// Observers run on whichever thread triggered the event, so they must be
/// `Send + Sync` and should return promptly. Any plain closure taking
/// `&Event` is an observer that never fails.
pub trait Observer: Send + Sync {
    /// Handle one event. An `Err` is reported but never affects tracker
    /// state or delivery to other observers.
    fn on_event(&self, event: &Event) -> Result<(), ObserverError>;
}

impl<F> Observer for F
where
    F: Fn(&Event) + Send + Sync,
{
    fn on_event(&self, event: &Event) -> Result<(), ObserverError> {
        self(event);
        Ok(())
    }
}

/// Observer that forwards events into a crossbeam channel.
#[derive(Clone, Debug)]
pub struct ChannelObserver {
    tx: Sender<Event>,
}

impl ChannelObserver {
    #[must_use]
    pub fn new(tx: Sender<Event>) -> Self {
        Self { tx }
    }
}

impl Observer for ChannelObserver {
    fn on_event(&self, event: &Event) -> Result<(), ObserverError> {
        self.tx.send(*event).map_err(|_| ObserverError::Disconnected)
    }
}
