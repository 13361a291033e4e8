use crate::transport::RemoteTrack;
use huddle_core::PeerId;

/// Rendering layer boundary. Purely a sink: the session hands over
/// inbound media keyed by peer and chat text, nothing comes back.
pub trait MediaSink: Send {
    fn render_stream(&mut self, peer_id: &PeerId, track: RemoteTrack);

    fn append_chat(&mut self, text: &str);
}
