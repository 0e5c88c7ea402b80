use crate::error::SessionError;
use crate::session::SessionConfig;
use crate::transport::TransportEvent;
use bytes::Bytes;
use flare_core::SignalMessage;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::data_channel::RTCDataChannel;
use webrtc::data_channel::data_channel_message::DataChannelMessage;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::sdp_type::RTCSdpType;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::track::track_local::TrackLocal;

/// Thin wrapper over the native peer connection.
///
/// All engine callbacks are converted into [`TransportEvent`]s on a single
/// channel so the owning session handles them sequentially, never
/// re-entering its own state.
pub struct PeerConnection {
    pc: Arc<RTCPeerConnection>,
    event_tx: mpsc::Sender<TransportEvent>,
}

impl PeerConnection {
    pub async fn new(
        config: &SessionConfig,
        event_tx: mpsc::Sender<TransportEvent>,
    ) -> Result<Self, SessionError> {
        let mut media_engine = MediaEngine::default();
        media_engine.register_default_codecs()?;

        let registry = register_default_interceptors(Registry::new(), &mut media_engine)?;

        let api = APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build();

        let ice_servers = if config.ice_servers.is_empty() {
            vec![]
        } else {
            vec![RTCIceServer {
                urls: config.ice_servers.clone(),
                ..Default::default()
            }]
        };

        let rtc_config = RTCConfiguration {
            ice_servers,
            ..Default::default()
        };

        let pc = Arc::new(api.new_peer_connection(rtc_config).await?);

        // Connection liveness. Anything terminal becomes Disconnected.
        let state_tx = event_tx.clone();
        pc.on_peer_connection_state_change(Box::new(move |s: RTCPeerConnectionState| {
            let tx = state_tx.clone();
            Box::pin(async move {
                debug!("Peer connection state: {:?}", s);
                match s {
                    RTCPeerConnectionState::Failed
                    | RTCPeerConnectionState::Disconnected
                    | RTCPeerConnectionState::Closed => {
                        let _ = tx.send(TransportEvent::Disconnected).await;
                    }
                    _ => {}
                }
            })
        }));

        // Local candidates. `None` marks the end of gathering.
        let ice_tx = event_tx.clone();
        pc.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            Box::pin(async move {
                let Some(candidate) = c else {
                    let _ = tx.send(TransportEvent::GatheringComplete).await;
                    return;
                };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                let msg = SignalMessage::Candidate {
                    candidate: init.candidate,
                    label: init.sdp_mline_index,
                    id: init.sdp_mid,
                };
                let _ = tx.send(TransportEvent::CandidateGenerated(msg)).await;
            })
        }));

        // Inbound channel announced by the remote initiator.
        let dc_tx = event_tx.clone();
        pc.on_data_channel(Box::new(move |dc: Arc<RTCDataChannel>| {
            let tx = dc_tx.clone();
            Box::pin(async move {
                info!("Remote data channel announced: {}", dc.label());
                Self::wire_channel(dc, tx);
            })
        }));

        Ok(Self { pc, event_tx })
    }

    /// Register open/close/message handlers on a data channel, local or
    /// remote, funneling everything into the session's event channel.
    fn wire_channel(dc: Arc<RTCDataChannel>, event_tx: mpsc::Sender<TransportEvent>) {
        let open_tx = event_tx.clone();
        let dc_for_open = dc.clone();
        dc.on_open(Box::new(move || {
            let tx = open_tx.clone();
            let channel = dc_for_open.clone();
            Box::pin(async move {
                info!("Data channel open: {}", channel.label());
                let _ = tx.send(TransportEvent::DataChannelOpen(channel)).await;
            })
        }));

        let close_tx = event_tx.clone();
        dc.on_close(Box::new(move || {
            let tx = close_tx.clone();
            Box::pin(async move {
                let _ = tx.send(TransportEvent::DataChannelClosed).await;
            })
        }));

        let msg_tx = event_tx.clone();
        dc.on_message(Box::new(move |msg: DataChannelMessage| {
            let tx = msg_tx.clone();
            Box::pin(async move {
                let event = if msg.is_string {
                    TransportEvent::ChannelText(String::from_utf8_lossy(&msg.data).into_owned())
                } else {
                    TransportEvent::ChannelBinary(Bytes::from(msg.data.to_vec()))
                };
                let _ = tx.send(event).await;
            })
        }));
    }

    /// Create the outbound data channel (initiator side). Ordered and
    /// reliable by default; the transfer protocol depends on both.
    pub async fn create_data_channel(
        &self,
        label: &str,
    ) -> Result<Arc<RTCDataChannel>, SessionError> {
        let dc = self.pc.create_data_channel(label, None).await?;
        Self::wire_channel(dc.clone(), self.event_tx.clone());
        Ok(dc)
    }

    pub async fn add_track(
        &self,
        track: Arc<dyn TrackLocal + Send + Sync>,
    ) -> Result<(), SessionError> {
        let _ = self.pc.add_track(track).await?;
        Ok(())
    }

    /// Create an offer and install it as the local description.
    pub async fn create_offer(&self) -> Result<String, SessionError> {
        let offer = self.pc.create_offer(None).await?;
        self.pc.set_local_description(offer.clone()).await?;
        Ok(offer.sdp)
    }

    /// Create an answer to the current remote offer and install it as the
    /// local description.
    pub async fn create_answer(&self) -> Result<String, SessionError> {
        let answer = self.pc.create_answer(None).await?;
        self.pc.set_local_description(answer.clone()).await?;
        Ok(answer.sdp)
    }

    pub async fn set_remote_offer(&self, sdp: String) -> Result<(), SessionError> {
        let desc = RTCSessionDescription::offer(sdp)?;
        self.pc.set_remote_description(desc).await?;
        Ok(())
    }

    pub async fn set_remote_answer(&self, sdp: String) -> Result<(), SessionError> {
        let desc = RTCSessionDescription::answer(sdp)?;
        self.pc.set_remote_description(desc).await?;
        Ok(())
    }

    pub async fn add_remote_candidate(
        &self,
        candidate: String,
        label: Option<u16>,
        id: Option<String>,
    ) -> Result<(), SessionError> {
        let init = RTCIceCandidateInit {
            candidate,
            sdp_mid: id,
            sdp_mline_index: label,
            username_fragment: None,
        };
        self.pc.add_ice_candidate(init).await?;
        Ok(())
    }

    /// The current local description as a signal message, once gathering
    /// has folded all candidates into it (batch mode).
    pub async fn local_description(&self) -> Option<SignalMessage> {
        let desc = self.pc.local_description().await?;
        match desc.sdp_type {
            RTCSdpType::Offer => Some(SignalMessage::Offer { sdp: desc.sdp }),
            RTCSdpType::Answer => Some(SignalMessage::Answer { sdp: desc.sdp }),
            _ => None,
        }
    }

    pub async fn close(&self) -> Result<(), SessionError> {
        self.pc.close().await?;
        Ok(())
    }
}
