use huddle_core::{PeerId, ServerSignal};
use huddle_engine::{MediaKind, RemoteTrack, TransportEvent};

use crate::integration::{create_session, init_tracing};

#[tokio::test]
async fn test_disconnect_drops_session_and_render_state() {
    init_tracing();

    let (mut session, factory, _signals, media) = create_session();
    let remote = PeerId::new();

    session
        .handle_signal(ServerSignal::NewPeer {
            peer_id: remote.clone(),
        })
        .await;
    assert_eq!(factory.created_count(), 1);

    let track = RemoteTrack {
        id: "track-1".to_owned(),
        stream_id: "stream-1".to_owned(),
        kind: MediaKind::Audio,
    };
    session
        .handle_transport_event(TransportEvent::TrackAdded(remote.clone(), track.clone()))
        .await;
    assert_eq!(media.rendered().len(), 1);

    session
        .handle_transport_event(TransportEvent::Disconnected(remote.clone()))
        .await;

    let transport = factory.transport_for(&remote).unwrap();
    assert!(transport.is_closed(), "Dropping a peer closes its transport");

    // The peer comes back: a fresh connection and a fresh render.
    session
        .handle_signal(ServerSignal::NewPeer {
            peer_id: remote.clone(),
        })
        .await;
    assert_eq!(factory.created_count(), 2);

    session
        .handle_transport_event(TransportEvent::TrackAdded(remote.clone(), track))
        .await;
    assert_eq!(
        media.rendered().len(),
        2,
        "A returning peer's stream renders again"
    );
}
