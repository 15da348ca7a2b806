//! Outbound event sinks.
//!
//! The resolver never talks to a transport directly; it hands each
//! announcement to an [`EventSink`] and the event bus delivers it later.

use crate::error::{PresenceError, PresenceResult};
use crate::wire::PresenceEvent;
use tokio::sync::mpsc;

/// Destination for presence announcements.
pub trait EventSink {
    /// Publish one announcement.
    fn publish(&mut self, event: PresenceEvent) -> PresenceResult<()>;
}

impl EventSink for Vec<PresenceEvent> {
    fn publish(&mut self, event: PresenceEvent) -> PresenceResult<()> {
        self.push(event);
        Ok(())
    }
}

/// Sink forwarding announcements into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<PresenceEvent>,
}

impl ChannelSink {
    /// Wrap a sender.
    pub fn new(tx: mpsc::UnboundedSender<PresenceEvent>) -> Self {
        Self { tx }
    }

    /// Create a sink and the receiver its events arrive on.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PresenceEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl EventSink for ChannelSink {
    fn publish(&mut self, event: PresenceEvent) -> PresenceResult<()> {
        self.tx.send(event).map_err(|_| PresenceError::SinkClosed)
    }
}
