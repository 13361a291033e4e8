use huddle_core::PeerId;
use huddle_engine::{MediaKind, RemoteTrack, TransportEvent};

use crate::integration::{create_session, init_tracing};

#[tokio::test]
async fn test_track_rendered_once_per_peer() {
    init_tracing();

    let (mut session, _factory, _signals, media) = create_session();
    let remote = PeerId::new();

    let track = RemoteTrack {
        id: "track-1".to_owned(),
        stream_id: "stream-1".to_owned(),
        kind: MediaKind::Video,
    };

    session
        .handle_transport_event(TransportEvent::TrackAdded(remote.clone(), track.clone()))
        .await;
    session
        .handle_transport_event(TransportEvent::TrackAdded(remote.clone(), track))
        .await;

    assert_eq!(
        media.rendered().len(),
        1,
        "Repeated track events for one peer must render once"
    );
    assert_eq!(media.rendered()[0].0, remote);
}
