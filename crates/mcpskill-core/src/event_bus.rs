//! Progress events for skill generation
//!
//! The generator only knows an [`EventSender`]; whoever wants to show
//! progress subscribes an [`EventReceiver`]. The CLI prints each event as a
//! line, tests collect them with [`EventReceiver::drain`].
//!
//! ```ignore
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//! let generator = SkillGenerator::new(config, out_dir, bus.sender())?;
//! tokio::spawn(async move {
//!     while let Some(event) = rx.recv().await { /* print */ }
//! });
//! ```

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, warn};

use crate::SkillEvent;

/// Events a slow receiver may fall behind by before it starts losing them
const DEFAULT_CAPACITY: usize = 64;

/// Owner of the channel. Hands out senders and receivers.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SkillEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tx: broadcast::channel(capacity).0,
        }
    }

    pub fn sender(&self) -> EventSender {
        EventSender { tx: self.tx.clone() }
    }

    /// Only events emitted after this call are delivered.
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct EventSender {
    tx: broadcast::Sender<SkillEvent>,
}

impl EventSender {
    /// A sender whose events go nowhere
    pub fn detached() -> Self {
        EventBus::new().sender()
    }

    /// Publish `event` and report how many receivers got it.
    /// Publishing with nobody subscribed is fine and yields 0.
    pub fn emit(&self, event: SkillEvent) -> usize {
        let kind = event.type_name();
        let delivered = self.tx.send(event).unwrap_or_default();
        debug!(event_type = kind, delivered, "Skill event published");
        delivered
    }
}

pub struct EventReceiver {
    rx: broadcast::Receiver<SkillEvent>,
}

impl EventReceiver {
    /// Wait for the next event. `None` means every sender is gone; events
    /// lost to lag are skipped with a warning.
    pub async fn recv(&mut self) -> Option<SkillEvent> {
        loop {
            let lost = match self.rx.recv().await {
                Ok(event) => break Some(event),
                Err(RecvError::Closed) => break None,
                Err(RecvError::Lagged(lost)) => lost,
            };
            warn!(lost, "Skill event receiver fell behind");
        }
    }

    /// Everything buffered right now, without waiting
    pub fn drain(&mut self) -> Vec<SkillEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Lagged(lost)) => {
                    warn!(lost, "Skill event receiver fell behind");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return events,
            }
        }
    }
}
