//! Registry event log and subscriptions.
//!
//! Every accepted write appends one event, carrying the full stored record,
//! to an ordered in-process log and publishes it on a broadcast channel.
//! Emission happens after the state commit and in commit order, so an
//! observer tailing the log sees a total order consistent with the maps.

use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::broadcast;

use daosign_proofs::types::{
    SignedProofOfAgreement, SignedProofOfAuthority, SignedProofOfSignature,
};

// Lagging broadcast subscribers drop oldest events first; the log itself
// never drops.
const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// A committed write, with the stored record as payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RegistryEvent {
    NewProofOfAuthority(SignedProofOfAuthority),
    NewProofOfSignature(SignedProofOfSignature),
    NewProofOfAgreement(SignedProofOfAgreement),
}

impl RegistryEvent {
    /// Event name as exposed to observers.
    pub fn name(&self) -> &'static str {
        match self {
            RegistryEvent::NewProofOfAuthority(_) => "NewProofOfAuthority",
            RegistryEvent::NewProofOfSignature(_) => "NewProofOfSignature",
            RegistryEvent::NewProofOfAgreement(_) => "NewProofOfAgreement",
        }
    }

    /// Proof CID of the stored record.
    pub fn proof_cid(&self) -> &str {
        match self {
            RegistryEvent::NewProofOfAuthority(p) => &p.proof_cid,
            RegistryEvent::NewProofOfSignature(p) => &p.proof_cid,
            RegistryEvent::NewProofOfAgreement(p) => &p.proof_cid,
        }
    }
}

/// Append-only event log with broadcast fan-out.
pub struct EventLog {
    log: RwLock<Vec<RegistryEvent>>,
    sender: broadcast::Sender<RegistryEvent>,
}

impl EventLog {
    /// Create a log whose broadcast side buffers `capacity` events per
    /// subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            log: RwLock::new(Vec::new()),
            sender,
        }
    }

    /// Append an event and publish it to current subscribers.
    pub(crate) fn emit(&self, event: RegistryEvent) {
        self.log.write().push(event.clone());
        // Send fails only when nobody is subscribed.
        let _ = self.sender.send(event);
    }

    /// Snapshot of every event emitted so far, in commit order.
    pub fn snapshot(&self) -> Vec<RegistryEvent> {
        self.log.read().clone()
    }

    /// Number of events emitted so far.
    pub fn len(&self) -> usize {
        self.log.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.read().is_empty()
    }

    /// Subscribe to events emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
