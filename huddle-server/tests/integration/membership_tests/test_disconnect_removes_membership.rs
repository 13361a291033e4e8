use huddle_core::{ClientSignal, PeerId, SessionDescription};
use huddle_server::RelayCommand;

use crate::integration::{create_relay, init_tracing, join};

#[tokio::test]
async fn test_disconnect_removes_membership() {
    init_tracing();

    let (mut relay, signaling) = create_relay();

    let peer_a = PeerId::new();
    let peer_b = PeerId::new();

    join(&mut relay, &peer_a, "room1").await;
    join(&mut relay, &peer_b, "room1").await;

    relay
        .handle_command(RelayCommand::Disconnect {
            peer_id: peer_b.clone(),
        })
        .await;

    let before = signaling.signals_for(&peer_b).await.len();

    relay
        .handle_command(RelayCommand::Relay {
            peer_id: peer_a.clone(),
            signal: ClientSignal::Offer {
                description: SessionDescription::offer("v=0\r\n"),
            },
        })
        .await;

    assert_eq!(
        signaling.signals_for(&peer_b).await.len(),
        before,
        "A disconnected peer should receive nothing further"
    );
}

#[tokio::test]
async fn test_disconnect_of_unknown_peer_is_noop() {
    init_tracing();

    let (mut relay, signaling) = create_relay();

    relay
        .handle_command(RelayCommand::Disconnect {
            peer_id: PeerId::new(),
        })
        .await;

    assert_eq!(signaling.total_delivered().await, 0);
}
