use crate::relay::RelayCommand;
use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use huddle_core::{PeerId, ServerSignal};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

struct SignalingInner {
    peers: DashMap<PeerId, mpsc::UnboundedSender<Message>>,
}

/// Maps channel identifiers to live WebSocket senders. Shared between
/// the socket handlers (which register/unregister peers) and the relay
/// actor (which delivers through [`SignalingOutput`]).
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    pub(crate) relay_cmd_tx: mpsc::Sender<RelayCommand>,
}

impl SignalingService {
    pub fn new(relay_cmd_tx: mpsc::Sender<RelayCommand>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
            }),
            relay_cmd_tx,
        }
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(peer_id, tx);
    }

    pub fn remove_peer(&self, peer_id: &PeerId) {
        self.inner.peers.remove(peer_id);
    }

    /// Full channel teardown: unregister the outbound sender and tell
    /// the relay to drop the peer from every room.
    pub async fn drop_channel(&self, peer_id: &PeerId) {
        self.remove_peer(peer_id);
        let _ = self
            .relay_cmd_tx
            .send(RelayCommand::Disconnect {
                peer_id: peer_id.clone(),
            })
            .await;
    }

    pub fn send_signal(&self, peer_id: PeerId, signal: ServerSignal) {
        if let Some(peer) = self.inner.peers.get(&peer_id) {
            match serde_json::to_string(&signal) {
                Ok(json) => {
                    if let Err(e) = peer.send(Message::Text(json.into())) {
                        error!("Failed to send WS message to {}: {:?}", peer_id, e);
                    }
                }
                Err(e) => error!("Failed to serialize signal: {}", e),
            }
        } else {
            warn!("Attempted to send signal to disconnected peer {}", peer_id);
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send(&self, peer_id: PeerId, signal: ServerSignal) {
        self.send_signal(peer_id, signal);
    }
}
