use crate::error::TransportError;
use crate::transport::{
    MediaKind, PeerTransport, RemoteTrack, SignalingState, TransportConfig, TransportEvent,
    TransportFactory,
};
use async_trait::async_trait;
use huddle_core::{CandidateInit, PeerId, SdpType, SessionDescription};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{debug, info};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::peer_connection::signaling_state::RTCSignalingState;
use webrtc::rtp_transceiver::RTCRtpTransceiver;
use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;
use webrtc::rtp_transceiver::rtp_receiver::RTCRtpReceiver;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_remote::TrackRemote;

/// Adapter over `webrtc::RTCPeerConnection` satisfying the engine's
/// [`PeerTransport`] capability. Candidate, track and connection-state
/// callbacks are forwarded into the session loop as [`TransportEvent`]s.
pub struct WebRtcTransport {
    peer_connection: Arc<RTCPeerConnection>,
    local_tracks: Vec<Arc<dyn TrackLocal + Send + Sync>>,
    remote_description: Mutex<Option<SessionDescription>>,
}

impl WebRtcTransport {
    pub async fn connect(
        peer_id: PeerId,
        config: TransportConfig,
        local_tracks: Vec<Arc<dyn TrackLocal + Send + Sync>>,
        event_tx: mpsc::Sender<TransportEvent>,
    ) -> Result<Self, TransportError> {
        let mut media = MediaEngine::default();
        media.register_default_codecs().map_err(to_err)?;

        let registry = register_default_interceptors(Registry::new(), &mut media).map_err(to_err)?;

        let api = APIBuilder::new()
            .with_media_engine(media)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: vec![RTCIceServer {
                urls: config.ice_servers,
                ..Default::default()
            }],
            ..Default::default()
        };

        let peer_connection = Arc::new(api.new_peer_connection(rtc_config).await.map_err(to_err)?);

        // Trickle ICE: every locally gathered candidate goes straight
        // to the session loop for relay.
        let ice_tx = event_tx.clone();
        let ice_peer = peer_id.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            let peer = ice_peer.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                let candidate = CandidateInit {
                    candidate: init.candidate,
                    sdp_mid: init.sdp_mid,
                    sdp_mline_index: init.sdp_mline_index,
                };
                let _ = tx
                    .send(TransportEvent::LocalCandidate(peer, candidate))
                    .await;
            })
        }));

        let track_tx = event_tx.clone();
        let track_peer = peer_id.clone();
        peer_connection.on_track(Box::new(
            move |track: Arc<TrackRemote>,
                  _receiver: Arc<RTCRtpReceiver>,
                  _transceiver: Arc<RTCRtpTransceiver>| {
                let tx = track_tx.clone();
                let peer = track_peer.clone();

                Box::pin(async move {
                    let kind = match track.kind() {
                        RTPCodecType::Audio => MediaKind::Audio,
                        RTPCodecType::Video => MediaKind::Video,
                        _ => MediaKind::Unknown,
                    };
                    let remote = RemoteTrack {
                        id: track.id(),
                        stream_id: track.stream_id(),
                        kind,
                    };
                    debug!("Remote track '{}' for peer {}", remote.id, peer);
                    let _ = tx.send(TransportEvent::TrackAdded(peer, remote)).await;
                })
            },
        ));

        let state_tx = event_tx;
        let state_peer = peer_id;
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();
                let peer = state_peer.clone();

                Box::pin(async move {
                    info!("Connection state for peer {}: {}", peer, s);
                    match s {
                        RTCPeerConnectionState::Failed
                        | RTCPeerConnectionState::Disconnected
                        | RTCPeerConnectionState::Closed => {
                            let _ = tx.send(TransportEvent::Disconnected(peer)).await;
                        }
                        _ => {}
                    }
                })
            },
        ));

        Ok(Self {
            peer_connection,
            local_tracks,
            remote_description: Mutex::new(None),
        })
    }
}

#[async_trait]
impl PeerTransport for WebRtcTransport {
    fn signaling_state(&self) -> SignalingState {
        match self.peer_connection.signaling_state() {
            RTCSignalingState::HaveLocalOffer | RTCSignalingState::HaveLocalPranswer => {
                SignalingState::HaveLocalOffer
            }
            RTCSignalingState::HaveRemoteOffer | RTCSignalingState::HaveRemotePranswer => {
                SignalingState::HaveRemoteOffer
            }
            RTCSignalingState::Closed => SignalingState::Closed,
            _ => SignalingState::Stable,
        }
    }

    fn remote_description(&self) -> Option<SessionDescription> {
        self.remote_description.lock().ok().and_then(|d| d.clone())
    }

    async fn add_local_tracks(&self) -> Result<(), TransportError> {
        for track in &self.local_tracks {
            self.peer_connection
                .add_track(Arc::clone(track))
                .await
                .map_err(to_err)?;
        }
        Ok(())
    }

    async fn create_offer(&self) -> Result<SessionDescription, TransportError> {
        let offer = self
            .peer_connection
            .create_offer(None)
            .await
            .map_err(to_err)?;
        Ok(SessionDescription::offer(offer.sdp))
    }

    async fn create_answer(&self) -> Result<SessionDescription, TransportError> {
        let answer = self
            .peer_connection
            .create_answer(None)
            .await
            .map_err(to_err)?;
        Ok(SessionDescription::answer(answer.sdp))
    }

    async fn set_local_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), TransportError> {
        let desc = to_rtc(description)?;
        self.peer_connection
            .set_local_description(desc)
            .await
            .map_err(to_err)
    }

    async fn set_remote_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), TransportError> {
        let desc = to_rtc(description.clone())?;
        self.peer_connection
            .set_remote_description(desc)
            .await
            .map_err(to_err)?;

        if let Ok(mut guard) = self.remote_description.lock() {
            *guard = Some(description);
        }
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: CandidateInit) -> Result<(), TransportError> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate,
            sdp_mid: candidate.sdp_mid,
            sdp_mline_index: candidate.sdp_mline_index,
            username_fragment: None,
        };
        self.peer_connection
            .add_ice_candidate(init)
            .await
            .map_err(|e| TransportError::CandidateRejected(e.to_string()))
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.peer_connection.close().await.map_err(to_err)
    }
}

/// Factory used by real sessions: one `RTCPeerConnection` per remote
/// peer, all sharing the configured ICE servers and local tracks.
pub struct WebRtcFactory {
    config: TransportConfig,
    local_tracks: Vec<Arc<dyn TrackLocal + Send + Sync>>,
}

impl WebRtcFactory {
    pub fn new(
        config: TransportConfig,
        local_tracks: Vec<Arc<dyn TrackLocal + Send + Sync>>,
    ) -> Self {
        Self {
            config,
            local_tracks,
        }
    }
}

#[async_trait]
impl TransportFactory for WebRtcFactory {
    async fn create(
        &self,
        peer_id: PeerId,
        event_tx: mpsc::Sender<TransportEvent>,
    ) -> Result<Box<dyn PeerTransport>, TransportError> {
        let transport = WebRtcTransport::connect(
            peer_id,
            self.config.clone(),
            self.local_tracks.clone(),
            event_tx,
        )
        .await?;
        Ok(Box::new(transport))
    }
}

fn to_rtc(description: SessionDescription) -> Result<RTCSessionDescription, TransportError> {
    let res = match description.kind {
        SdpType::Offer => RTCSessionDescription::offer(description.sdp),
        SdpType::Answer => RTCSessionDescription::answer(description.sdp),
    };
    res.map_err(|e| TransportError::InvalidDescription(e.to_string()))
}

fn to_err(e: webrtc::Error) -> TransportError {
    TransportError::Other(e.into())
}
