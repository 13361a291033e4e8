use huddle_core::{ClientSignal, PeerId, RoomId};

/// Commands fed to the relay actor by the WebSocket layer.
#[derive(Debug)]
pub enum RelayCommand {
    /// A client asked to join a room.
    Join { peer_id: PeerId, room: RoomId },

    /// A signaling payload to fan out to the other members of the
    /// sender's rooms. Contents are never inspected beyond routing.
    Relay { peer_id: PeerId, signal: ClientSignal },

    /// The client's channel went away.
    Disconnect { peer_id: PeerId },
}
