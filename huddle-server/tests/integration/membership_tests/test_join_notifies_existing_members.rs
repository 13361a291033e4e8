use huddle_core::PeerId;

use crate::integration::{create_relay, init_tracing, join};

#[tokio::test]
async fn test_join_notifies_existing_members() {
    init_tracing();

    let (mut relay, signaling) = create_relay();

    let peer_a = PeerId::new();
    let peer_b = PeerId::new();
    let peer_c = PeerId::new();

    join(&mut relay, &peer_a, "room1").await;
    join(&mut relay, &peer_b, "room1").await;
    join(&mut relay, &peer_c, "room1").await;

    // Each existing member hears about each later joiner, in order.
    assert_eq!(
        signaling.new_peers_for(&peer_a).await,
        vec![peer_b.clone(), peer_c.clone()],
        "First joiner should hear about both later joiners"
    );
    assert_eq!(signaling.new_peers_for(&peer_b).await, vec![peer_c.clone()]);
    assert!(
        signaling.new_peers_for(&peer_c).await.is_empty(),
        "Last joiner should receive no announcements"
    );
}

#[tokio::test]
async fn test_join_notifications_stay_within_room() {
    init_tracing();

    let (mut relay, signaling) = create_relay();

    let peer_a = PeerId::new();
    let peer_b = PeerId::new();

    join(&mut relay, &peer_a, "room1").await;
    join(&mut relay, &peer_b, "room2").await;

    assert!(
        signaling.new_peers_for(&peer_a).await.is_empty(),
        "A member of room1 should never hear about a room2 join"
    );
    assert_eq!(signaling.total_delivered().await, 0);
}
