use huddle_core::{ClientSignal, PeerId, SessionDescription};
use huddle_server::RelayCommand;

use crate::integration::{create_relay, init_tracing};

#[tokio::test]
async fn test_relay_from_peer_in_no_room_delivers_nothing() {
    init_tracing();

    let (mut relay, signaling) = create_relay();

    relay
        .handle_command(RelayCommand::Relay {
            peer_id: PeerId::new(),
            signal: ClientSignal::Offer {
                description: SessionDescription::offer("v=0\r\n"),
            },
        })
        .await;

    assert_eq!(
        signaling.total_delivered().await,
        0,
        "Fan-out with no room membership is a silent no-op"
    );
}
