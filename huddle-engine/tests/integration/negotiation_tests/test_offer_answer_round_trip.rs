use huddle_core::{PeerId, ServerSignal};
use huddle_engine::SignalingState;

use crate::integration::{create_session, init_tracing};

/// Full exchange between two sessions: discovery, offer, answer. Both
/// sides must end Stable with a non-empty remote description.
#[tokio::test]
async fn test_offer_answer_round_trip() {
    init_tracing();

    let (mut session_a, factory_a, signals_a, _media_a) = create_session();
    let (mut session_b, factory_b, signals_b, _media_b) = create_session();

    let peer_a = PeerId::new();
    let peer_b = PeerId::new();

    // A discovers B and offers.
    session_a
        .handle_signal(ServerSignal::NewPeer {
            peer_id: peer_b.clone(),
        })
        .await;
    let offer = signals_a.offers().pop().expect("A produced no offer");

    // The coordinator relays the offer to B, who answers.
    session_b
        .handle_signal(ServerSignal::Offer {
            description: offer,
            sender: peer_a.clone(),
        })
        .await;
    let answer = signals_b.answers().pop().expect("B produced no answer");

    // The answer travels back to A.
    session_a
        .handle_signal(ServerSignal::Answer {
            description: answer,
            sender: peer_b.clone(),
        })
        .await;

    let transport_a = factory_a.transport_for(&peer_b).unwrap();
    let transport_b = factory_b.transport_for(&peer_a).unwrap();

    assert_eq!(transport_a.signaling_state(), SignalingState::Stable);
    assert_eq!(transport_b.signaling_state(), SignalingState::Stable);

    let remote_a = transport_a.remote_description().expect("A has no remote");
    let remote_b = transport_b.remote_description().expect("B has no remote");
    assert!(!remote_a.sdp.is_empty());
    assert!(!remote_b.sdp.is_empty());
}
