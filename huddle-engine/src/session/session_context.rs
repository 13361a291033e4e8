use crate::session::PeerSession;
use crate::sink::{MediaSink, SignalSink};
use crate::transport::{SignalingState, TransportEvent, TransportFactory};
use huddle_core::{CandidateInit, ClientSignal, PeerId, ServerSignal, SessionDescription};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Outbound chat entry point, cloneable and detached from the session
/// loop. Obtained from [`SessionContext::chat_handle`] before the loop
/// is spawned.
#[derive(Clone)]
pub struct ChatHandle {
    signals: Arc<dyn SignalSink>,
}

impl ChatHandle {
    pub async fn send_chat(&self, text: impl Into<String>) {
        self.signals
            .send(ClientSignal::Chat { text: text.into() })
            .await;
    }
}

/// Owns every per-peer negotiation for one local client: the peer map,
/// the render dedup set, and the boundaries to the coordinator
/// ([`SignalSink`]) and the rendering layer ([`MediaSink`]).
///
/// All state transitions happen inside the current handler before the
/// next event is taken, so no locking is needed; unrelated peers only
/// interleave between handlers.
pub struct SessionContext {
    peers: HashMap<PeerId, PeerSession>,
    rendered: HashSet<PeerId>,
    factory: Box<dyn TransportFactory>,
    signals: Arc<dyn SignalSink>,
    media: Box<dyn MediaSink>,
    signal_rx: mpsc::Receiver<ServerSignal>,
    transport_rx: mpsc::Receiver<TransportEvent>,
    transport_tx: mpsc::Sender<TransportEvent>,
}

impl SessionContext {
    pub fn new(
        factory: Box<dyn TransportFactory>,
        signals: Arc<dyn SignalSink>,
        media: Box<dyn MediaSink>,
        signal_rx: mpsc::Receiver<ServerSignal>,
    ) -> Self {
        let (transport_tx, transport_rx) = mpsc::channel(256);

        Self {
            peers: HashMap::new(),
            rendered: HashSet::new(),
            factory,
            signals,
            media,
            signal_rx,
            transport_rx,
            transport_tx,
        }
    }

    pub async fn run(mut self) {
        info!("Session event loop started");

        loop {
            tokio::select! {
                sig = self.signal_rx.recv() => {
                    match sig {
                        Some(s) => self.handle_signal(s).await,
                        None => {
                            info!("Signaling channel closed. Shutting down session.");
                            break;
                        }
                    }
                }

                evt = self.transport_rx.recv() => {
                    match evt {
                        Some(e) => self.handle_transport_event(e).await,
                        None => break,
                    }
                }
            }
        }

        info!("Session event loop finished");
    }

    pub async fn handle_signal(&mut self, signal: ServerSignal) {
        match signal {
            ServerSignal::NewPeer { peer_id } => self.initiate(peer_id).await,
            ServerSignal::Offer {
                description,
                sender,
            } => self.handle_offer(sender, description).await,
            ServerSignal::Answer {
                description,
                sender,
            } => self.handle_answer(sender, description).await,
            ServerSignal::Candidate { candidate, sender } => {
                self.handle_candidate(sender, candidate).await
            }
            ServerSignal::Chat { text } => self.media.append_chat(&text),
        }
    }

    pub async fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::LocalCandidate(peer_id, candidate) => {
                debug!("Relaying local candidate for peer {}", peer_id);
                self.signals.send(ClientSignal::Candidate { candidate }).await;
            }

            TransportEvent::TrackAdded(peer_id, track) => {
                if self.rendered.insert(peer_id.clone()) {
                    info!("Rendering stream '{}' for peer {}", track.stream_id, peer_id);
                    self.media.render_stream(&peer_id, track);
                } else {
                    debug!("Stream for peer {} already rendered", peer_id);
                }
            }

            TransportEvent::Disconnected(peer_id) => self.drop_peer(&peer_id).await,
        }
    }

    /// Handle for the embedding application to send chat after the
    /// event loop has taken ownership of the context.
    pub fn chat_handle(&self) -> ChatHandle {
        ChatHandle {
            signals: Arc::clone(&self.signals),
        }
    }

    /// A new remote peer was announced: open a connection and send it
    /// an offer. Reuses the existing session on renegotiation.
    async fn initiate(&mut self, peer_id: PeerId) {
        info!("New peer {} discovered, sending offer", peer_id);

        let Some(session) = self.ensure_session(&peer_id).await else {
            return;
        };

        let offer = match session.transport.create_offer().await {
            Ok(offer) => offer,
            Err(e) => {
                error!("Failed to create offer for {}: {}", peer_id, e);
                return;
            }
        };
        if let Err(e) = session.transport.set_local_description(offer.clone()).await {
            error!("Failed to set local offer for {}: {}", peer_id, e);
            return;
        }

        self.signals
            .send(ClientSignal::Offer { description: offer })
            .await;
    }

    async fn handle_offer(&mut self, sender: PeerId, description: SessionDescription) {
        if let Some(session) = self.peers.get(&sender) {
            if session.transport.signaling_state() == SignalingState::Stable
                && session.transport.remote_description().is_some()
            {
                debug!("Ignoring offer from {}: already negotiated", sender);
                return;
            }
        }

        let Some(session) = self.ensure_session(&sender).await else {
            return;
        };

        if let Err(e) = session.transport.set_remote_description(description).await {
            error!("Failed to apply offer from {}: {}", sender, e);
            return;
        }
        Self::drain_candidates(session, &sender).await;

        let answer = match session.transport.create_answer().await {
            Ok(answer) => answer,
            Err(e) => {
                error!("Failed to create answer for {}: {}", sender, e);
                return;
            }
        };
        if let Err(e) = session.transport.set_local_description(answer.clone()).await {
            error!("Failed to set local answer for {}: {}", sender, e);
            return;
        }

        self.signals
            .send(ClientSignal::Answer {
                description: answer,
            })
            .await;
    }

    async fn handle_answer(&mut self, sender: PeerId, description: SessionDescription) {
        let Some(session) = self.peers.get_mut(&sender) else {
            warn!("Answer from {} without a pending offer", sender);
            return;
        };

        if session.transport.signaling_state() == SignalingState::Stable
            && session.transport.remote_description().is_some()
        {
            debug!("Ignoring answer from {}: already negotiated", sender);
            return;
        }

        if let Err(e) = session.transport.set_remote_description(description).await {
            error!("Failed to apply answer from {}: {}", sender, e);
            return;
        }
        Self::drain_candidates(session, &sender).await;
    }

    async fn handle_candidate(&mut self, sender: PeerId, candidate: CandidateInit) {
        let Some(session) = self.ensure_session(&sender).await else {
            return;
        };

        if session.transport.remote_description().is_some() {
            if let Err(e) = session.transport.add_ice_candidate(candidate).await {
                warn!("Skipping candidate from {}: {}", sender, e);
            }
        } else if session.enqueue_candidate(candidate) {
            debug!("Remote description not set, queued candidate from {}", sender);
        } else {
            error!("Candidate queue overflow for peer {}, dropping", sender);
        }
    }

    /// Apply everything queued before the remote description arrived,
    /// in arrival order. A stale candidate is skipped, not fatal.
    async fn drain_candidates(session: &mut PeerSession, peer_id: &PeerId) {
        while let Some(candidate) = session.pending_candidates.pop_front() {
            if let Err(e) = session.transport.add_ice_candidate(candidate).await {
                warn!("Skipping queued candidate for {}: {}", peer_id, e);
            }
        }
    }

    async fn ensure_session(&mut self, peer_id: &PeerId) -> Option<&mut PeerSession> {
        if !self.peers.contains_key(peer_id) {
            match self
                .factory
                .create(peer_id.clone(), self.transport_tx.clone())
                .await
            {
                Ok(transport) => {
                    if let Err(e) = transport.add_local_tracks().await {
                        error!("Failed to register local tracks for {}: {}", peer_id, e);
                    }
                    self.peers
                        .insert(peer_id.clone(), PeerSession::new(transport));
                }
                Err(e) => {
                    error!("Failed to create transport for {}: {}", peer_id, e);
                    return None;
                }
            }
        }
        self.peers.get_mut(peer_id)
    }

    async fn drop_peer(&mut self, peer_id: &PeerId) {
        self.rendered.remove(peer_id);

        let Some(session) = self.peers.remove(peer_id) else {
            return;
        };
        info!("Peer {} disconnected, dropping session", peer_id);
        if let Err(e) = session.transport.close().await {
            debug!("Error closing transport for {}: {}", peer_id, e);
        }
    }
}
