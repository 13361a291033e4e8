use huddle_core::{ClientSignal, PeerId, ServerSignal, SessionDescription};
use huddle_server::RelayCommand;

use crate::integration::{create_relay, init_tracing, join};

#[tokio::test]
async fn test_offer_relayed_to_other_members_with_sender() {
    init_tracing();

    let (mut relay, signaling) = create_relay();

    let peer_a = PeerId::new();
    let peer_b = PeerId::new();
    let peer_c = PeerId::new();

    join(&mut relay, &peer_a, "room1").await;
    join(&mut relay, &peer_b, "room1").await;
    join(&mut relay, &peer_c, "room1").await;

    relay
        .handle_command(RelayCommand::Relay {
            peer_id: peer_a.clone(),
            signal: ClientSignal::Offer {
                description: SessionDescription::offer("v=0 offer from a\r\n"),
            },
        })
        .await;

    assert_eq!(signaling.offers_for(&peer_b).await, vec![peer_a.clone()]);
    assert_eq!(signaling.offers_for(&peer_c).await, vec![peer_a.clone()]);
    assert!(
        signaling.offers_for(&peer_a).await.is_empty(),
        "An offer must never be echoed back to its sender"
    );
}

#[tokio::test]
async fn test_candidate_relayed_verbatim() {
    init_tracing();

    let (mut relay, signaling) = create_relay();

    let peer_a = PeerId::new();
    let peer_b = PeerId::new();

    join(&mut relay, &peer_a, "room1").await;
    join(&mut relay, &peer_b, "room1").await;

    let candidate =
        huddle_core::CandidateInit::new("candidate:1 1 udp 2122260223 192.0.2.1 54400 typ host");

    relay
        .handle_command(RelayCommand::Relay {
            peer_id: peer_b.clone(),
            signal: ClientSignal::Candidate {
                candidate: candidate.clone(),
            },
        })
        .await;

    let delivered = signaling.signals_for(&peer_a).await;
    assert!(delivered.iter().any(|s| matches!(
        s,
        ServerSignal::Candidate { candidate: c, sender } if *c == candidate && *sender == peer_b
    )));
}
