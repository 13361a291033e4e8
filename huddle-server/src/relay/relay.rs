use crate::relay::RelayCommand;
use crate::signaling::SignalingOutput;
use huddle_core::{ClientSignal, PeerId, RoomId, ServerSignal};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Pure fan-out broker. Owns all room membership state; never
/// interprets payloads, never blocks on a slow recipient, no retries.
pub struct Relay {
    rooms: HashMap<RoomId, HashSet<PeerId>>,
    memberships: HashMap<PeerId, HashSet<RoomId>>,
    command_rx: mpsc::Receiver<RelayCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl Relay {
    pub fn new(command_rx: mpsc::Receiver<RelayCommand>, signaling: Arc<dyn SignalingOutput>) -> Self {
        Self {
            rooms: HashMap::new(),
            memberships: HashMap::new(),
            command_rx,
            signaling,
        }
    }

    pub async fn run(mut self) {
        info!("Relay event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Relay event loop finished");
    }

    pub async fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Join { peer_id, room } => self.join(peer_id, room).await,
            RelayCommand::Relay { peer_id, signal } => self.relay(peer_id, signal).await,
            RelayCommand::Disconnect { peer_id } => self.disconnect(&peer_id),
        }
    }

    async fn join(&mut self, peer_id: PeerId, room: RoomId) {
        info!("Peer {} joined room '{}'", peer_id, room);

        let members = self.rooms.entry(room.clone()).or_default();
        members.insert(peer_id.clone());
        self.memberships
            .entry(peer_id.clone())
            .or_default()
            .insert(room);

        // Every join re-announces the joiner, including repeated joins.
        let others: Vec<PeerId> = members
            .iter()
            .filter(|m| **m != peer_id)
            .cloned()
            .collect();
        for member in others {
            self.signaling
                .send(
                    member,
                    ServerSignal::NewPeer {
                        peer_id: peer_id.clone(),
                    },
                )
                .await;
        }
    }

    async fn relay(&mut self, peer_id: PeerId, signal: ClientSignal) {
        let Some(outbound) = forwarded(signal, &peer_id) else {
            debug!("Dropping non-relayable signal from {}", peer_id);
            return;
        };

        let targets = self.room_peers_of(&peer_id);
        if targets.is_empty() {
            debug!("Peer {} relayed into an empty room set", peer_id);
        }
        for target in targets {
            self.signaling.send(target, outbound.clone()).await;
        }
    }

    /// All other current members of every room the peer belongs to,
    /// deduplicated across rooms.
    fn room_peers_of(&self, peer_id: &PeerId) -> HashSet<PeerId> {
        let mut targets = HashSet::new();
        if let Some(rooms) = self.memberships.get(peer_id) {
            for room in rooms {
                if let Some(members) = self.rooms.get(room) {
                    targets.extend(members.iter().filter(|m| *m != peer_id).cloned());
                }
            }
        }
        targets
    }

    fn disconnect(&mut self, peer_id: &PeerId) {
        let Some(rooms) = self.memberships.remove(peer_id) else {
            return;
        };
        for room in &rooms {
            if let Some(members) = self.rooms.get_mut(room) {
                members.remove(peer_id);
            }
        }
        info!("Peer {} removed from {} room(s)", peer_id, rooms.len());
    }
}

/// Attach the sender identifier where the protocol calls for it.
/// Chat is forwarded verbatim; join is not a relayable payload.
fn forwarded(signal: ClientSignal, sender: &PeerId) -> Option<ServerSignal> {
    match signal {
        ClientSignal::Offer { description } => Some(ServerSignal::Offer {
            description,
            sender: sender.clone(),
        }),
        ClientSignal::Answer { description } => Some(ServerSignal::Answer {
            description,
            sender: sender.clone(),
        }),
        ClientSignal::Candidate { candidate } => Some(ServerSignal::Candidate {
            candidate,
            sender: sender.clone(),
        }),
        ClientSignal::Chat { text } => Some(ServerSignal::Chat { text }),
        ClientSignal::Join { .. } => None,
    }
}
