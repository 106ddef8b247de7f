//! Message transport.
//!
//! Ports stand in for `postMessage`: a port posts envelopes into the
//! peer's inbound channel, stamped with the sender's identity so the
//! receiving side can verify who is talking. The channel is assumed
//! reliable — same-process delivery — so there is no ack or retry.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tokio::sync::mpsc;

use crate::protocol::SyncMessage;

static NEXT_PORT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one sending port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortId(u64);

impl PortId {
    fn next() -> Self {
        Self(NEXT_PORT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One delivered message with its sender identity.
#[derive(Debug, Clone)]
pub struct Inbound {
    pub source: PortId,
    pub message: SyncMessage,
}

#[derive(Debug, Error)]
pub enum TransportError {
    /// The peer's receiver is gone.
    #[error("peer channel closed")]
    Closed,
}

/// Sending half of one direction of the duplex.
#[derive(Debug, Clone)]
pub struct MessagePort {
    id: PortId,
    tx: mpsc::UnboundedSender<Inbound>,
}

impl MessagePort {
    pub fn id(&self) -> PortId {
        self.id
    }

    pub fn post(&self, message: SyncMessage) -> Result<(), TransportError> {
        self.tx
            .send(Inbound {
                source: self.id,
                message,
            })
            .map_err(|_| TransportError::Closed)
    }
}

/// A linked host/renderer channel pair.
pub struct Duplex {
    /// Held by the host; delivers into `renderer_rx`.
    pub host_port: MessagePort,
    pub host_rx: mpsc::UnboundedReceiver<Inbound>,

    /// Held by the renderer; delivers into `host_rx`.
    pub renderer_port: MessagePort,
    pub renderer_rx: mpsc::UnboundedReceiver<Inbound>,
}

/// Construct a linked pair of ports.
pub fn pair() -> Duplex {
    let (to_renderer, renderer_rx) = mpsc::unbounded_channel();
    let (to_host, host_rx) = mpsc::unbounded_channel();

    Duplex {
        host_port: MessagePort {
            id: PortId::next(),
            tx: to_renderer,
        },
        host_rx,
        renderer_port: MessagePort {
            id: PortId::next(),
            tx: to_host,
        },
        renderer_rx,
    }
}

#[cfg(test)]
pub(crate) fn forged_port(tx: mpsc::UnboundedSender<Inbound>) -> MessagePort {
    MessagePort {
        id: PortId::next(),
        tx,
    }
}

#[cfg(test)]
impl MessagePort {
    pub(crate) fn raw_sender(&self) -> mpsc::UnboundedSender<Inbound> {
        self.tx.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posted_messages_carry_sender_identity() {
        let mut duplex = pair();

        duplex.renderer_port.post(SyncMessage::Ready).unwrap();
        let inbound = duplex.host_rx.try_recv().unwrap();

        assert_eq!(inbound.source, duplex.renderer_port.id());
        assert_eq!(inbound.message, SyncMessage::Ready);
    }

    #[test]
    fn test_post_after_peer_drop_errors() {
        let duplex = pair();
        drop(duplex.renderer_rx);

        assert!(duplex.host_port.post(SyncMessage::DragEnd).is_err());
    }
}
