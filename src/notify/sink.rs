//! EventSink trait and provided implementations
//!
//! The sink is the injected capability through which the composer announces
//! progress to whatever session/transport layer is listening. `send()` is
//! async (it may represent a network delivery) and the composer awaits
//! each send before emitting the next, so sinks see events in order.

use super::events::ComposeEvent;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors a sink may report back to the composer.
///
/// Delivery is best-effort from the composer's perspective: these never
/// fail the surrounding operation.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("event channel closed")]
    Closed,
    #[error("sink error: {0}")]
    Other(String),
}

/// The interface through which composition progress leaves this core.
///
/// Injected at composer construction so transports and tests can substitute
/// their own delivery.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Deliver one event for one session.
    async fn send(&self, session_id: &str, event: ComposeEvent) -> Result<(), SinkError>;
}

/// A sink that discards everything. The default wiring when no session
/// layer is attached.
#[derive(Debug, Default)]
pub struct NullSink;

#[async_trait]
impl EventSink for NullSink {
    async fn send(&self, _session_id: &str, _event: ComposeEvent) -> Result<(), SinkError> {
        Ok(())
    }
}

/// A sink that forwards `(session_id, event)` pairs into a bounded channel.
///
/// The transport/session layer owns the receiving half and drains it at its
/// own pace; a full channel back-pressures the composer (the await inside
/// `send`), which is what preserves event ordering under a slow consumer.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<(String, ComposeEvent)>,
}

impl ChannelSink {
    /// Wrap an existing sender
    pub fn new(tx: mpsc::Sender<(String, ComposeEvent)>) -> Self {
        Self { tx }
    }

    /// Create a sink together with its receiving half
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<(String, ComposeEvent)>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn send(&self, session_id: &str, event: ComposeEvent) -> Result<(), SinkError> {
        self.tx
            .send((session_id.to_string(), event))
            .await
            .map_err(|_| SinkError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphId, NodeId};

    fn started() -> ComposeEvent {
        ComposeEvent::CompositionStarted {
            graph_id: GraphId::from_string("g"),
            node_ids: vec![NodeId::from_string("a")],
        }
    }

    #[test]
    fn null_sink_accepts_everything() {
        let sink = NullSink;
        tokio_test::block_on(async {
            assert!(sink.send("session-1", started()).await.is_ok());
        });
    }

    #[tokio::test]
    async fn channel_sink_forwards_session_and_event() {
        let (sink, mut rx) = ChannelSink::channel(8);
        sink.send("session-1", started()).await.unwrap();

        let (session, event) = rx.recv().await.unwrap();
        assert_eq!(session, "session-1");
        assert_eq!(event.kind(), "composition_started");
    }

    #[tokio::test]
    async fn channel_sink_reports_closed_receiver() {
        let (sink, rx) = ChannelSink::channel(8);
        drop(rx);

        let err = sink.send("session-1", started()).await.unwrap_err();
        assert!(matches!(err, SinkError::Closed));
    }
}
