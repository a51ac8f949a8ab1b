//! Fan-out of state events to view subscribers.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use shared::protocol::StateEvent;
use tracing::{debug, warn};

pub const SUBSCRIBER_CAPACITY: usize = 256;

#[derive(Debug, Default)]
pub struct EventHub {
    subscribers: Vec<Sender<StateEvent>>,
}

impl EventHub {
    pub fn subscribe(&mut self) -> Receiver<StateEvent> {
        let (tx, rx) = bounded(SUBSCRIBER_CAPACITY);
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn publish(&mut self, event: &StateEvent) {
        self.subscribers
            .retain(|tx| match tx.try_send(event.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    warn!(revision = event.revision, "subscriber queue is full; dropping state event");
                    true
                }
                Err(TrySendError::Disconnected(_)) => {
                    debug!("pruning disconnected subscriber");
                    false
                }
            });
    }
}
