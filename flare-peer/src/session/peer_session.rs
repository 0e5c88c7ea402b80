use crate::error::SessionError;
use crate::media::MediaSource;
use crate::session::{
    CandidatePolicy, Role, SessionCommand, SessionConfig, SessionEvent, SessionState, SignalSink,
};
use crate::transport::{PeerConnection, TransportEvent};
use bytes::Bytes;
use flare_core::SignalMessage;
use flare_core::transfer::{TransferAssembler, TransferHeader, chunks};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use webrtc::data_channel::RTCDataChannel;

/// One negotiation session with one remote peer, run as a task.
///
/// The session owns all mutable state (connection handle, data channel,
/// transfer buffer) and processes commands and engine events one at a
/// time, so handlers never interleave on the same receive buffer.
pub struct PeerSession {
    role: Role,
    state: SessionState,
    config: SessionConfig,
    media: Arc<dyn MediaSource>,
    signals: Arc<dyn SignalSink>,
    command_rx: mpsc::Receiver<SessionCommand>,
    transport_rx: mpsc::Receiver<TransportEvent>,
    transport_tx: mpsc::Sender<TransportEvent>,
    events: mpsc::UnboundedSender<SessionEvent>,
    connection: Option<PeerConnection>,
    data_channel: Option<Arc<RTCDataChannel>>,
    assembler: TransferAssembler,
}

impl PeerSession {
    pub fn new(
        role: Role,
        config: SessionConfig,
        media: Arc<dyn MediaSource>,
        signals: Arc<dyn SignalSink>,
        command_rx: mpsc::Receiver<SessionCommand>,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        let (transport_tx, transport_rx) = mpsc::channel(256);

        Self {
            role,
            state: SessionState::Idle,
            config,
            media,
            signals,
            command_rx,
            transport_rx,
            transport_tx,
            events,
            connection: None,
            data_channel: None,
            assembler: TransferAssembler::new(),
        }
    }

    pub async fn run(mut self) {
        info!("Session starting as {:?}", self.role);

        if let Err(e) = self.start_negotiation().await {
            error!("Session setup failed: {}", e);
            self.state = SessionState::Closed;
            self.emit(SessionEvent::Failed(e.to_string()));
            return;
        }

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(c) => {
                            if self.handle_command(c).await {
                                break;
                            }
                        }
                        None => {
                            info!("Command channel closed. Shutting down session.");
                            self.shutdown().await;
                            break;
                        }
                    }
                }

                evt = self.transport_rx.recv() => {
                    match evt {
                        Some(e) => {
                            if self.handle_transport_event(e).await {
                                break;
                            }
                        }
                        None => {
                            warn!("Transport channel closed unexpectedly");
                            self.shutdown().await;
                            break;
                        }
                    }
                }
            }
        }

        info!("Session finished");
    }

    /// Media, connection, and (for the initiator) channel + offer.
    async fn start_negotiation(&mut self) -> Result<(), SessionError> {
        self.state = SessionState::AwaitingLocalMedia;
        let tracks = self.media.acquire().await?;

        let connection = PeerConnection::new(&self.config, self.transport_tx.clone()).await?;
        for track in tracks {
            connection.add_track(track).await?;
        }

        self.state = SessionState::Negotiating(self.role);

        if self.role == Role::Initiator {
            connection
                .create_data_channel(&self.config.channel_label)
                .await?;

            let sdp = connection.create_offer().await?;
            if self.config.candidate_policy == CandidatePolicy::Trickle {
                self.signals.send(SignalMessage::Offer { sdp }).await;
            }
            // Batch mode holds the offer until gathering completes.
        }

        self.connection = Some(connection);
        Ok(())
    }

    /// Returns true when the session should stop.
    async fn handle_command(&mut self, cmd: SessionCommand) -> bool {
        match cmd {
            SessionCommand::Signal(msg) => {
                self.handle_signal(msg).await;
                false
            }

            SessionCommand::PeerLeft => {
                info!("Remote peer left the room");
                self.emit(SessionEvent::PeerLeft);
                false
            }

            SessionCommand::SendFile { name, data } => {
                match self.send_file(&name, &data).await {
                    Ok(()) => self.emit(SessionEvent::FileSent {
                        name,
                        size: data.len(),
                    }),
                    Err(e) => warn!("Failed to send file {:?}: {}", name, e),
                }
                false
            }

            SessionCommand::Close => {
                self.signals.leave(&self.config.room).await;
                self.shutdown().await;
                true
            }
        }
    }

    /// A failed negotiation step is logged and the session left stalled;
    /// there is no automatic renegotiation.
    async fn handle_signal(&mut self, msg: SignalMessage) {
        let Some(connection) = self.connection.as_ref() else {
            warn!("Signal received before connection setup, dropping");
            return;
        };

        match msg {
            SignalMessage::Offer { sdp } => {
                if self.role == Role::Initiator {
                    warn!("Initiator received an offer, ignoring");
                    return;
                }

                if let Err(e) = connection.set_remote_offer(sdp).await {
                    error!("Failed to apply remote offer: {}", e);
                    return;
                }

                match connection.create_answer().await {
                    Ok(sdp) => {
                        if self.config.candidate_policy == CandidatePolicy::Trickle {
                            self.signals.send(SignalMessage::Answer { sdp }).await;
                        }
                    }
                    Err(e) => error!("Failed to create answer: {}", e),
                }
            }

            SignalMessage::Answer { sdp } => {
                if self.role == Role::Responder {
                    warn!("Responder received an answer, ignoring");
                    return;
                }

                if let Err(e) = connection.set_remote_answer(sdp).await {
                    error!("Failed to apply remote answer: {}", e);
                }
            }

            SignalMessage::Candidate {
                candidate,
                label,
                id,
            } => {
                if let Err(e) = connection.add_remote_candidate(candidate, label, id).await {
                    warn!("Failed to add remote candidate: {}", e);
                }
            }
        }
    }

    /// Returns true when the session should stop.
    async fn handle_transport_event(&mut self, event: TransportEvent) -> bool {
        match event {
            TransportEvent::CandidateGenerated(msg) => {
                if self.config.candidate_policy == CandidatePolicy::Trickle {
                    self.signals.send(msg).await;
                }
                false
            }

            TransportEvent::GatheringComplete => {
                if self.config.candidate_policy == CandidatePolicy::Batch {
                    if let Some(connection) = self.connection.as_ref() {
                        match connection.local_description().await {
                            Some(msg) => self.signals.send(msg).await,
                            None => warn!("Gathering finished with no local description"),
                        }
                    }
                }
                false
            }

            TransportEvent::DataChannelOpen(dc) => {
                info!("Data channel open, session connected");
                self.data_channel = Some(dc);
                self.state = SessionState::Connected;
                self.emit(SessionEvent::Connected);
                false
            }

            TransportEvent::ChannelText(text) => {
                match text.parse::<TransferHeader>() {
                    Ok(header) => {
                        info!("Incoming transfer: {} ({} bytes)", header.name, header.size);
                        if let Some(discarded) = self.assembler.start(header) {
                            warn!("Abandoning partial transfer ({} bytes buffered)", discarded);
                        }
                    }
                    Err(e) => warn!("Ignoring malformed control message: {}", e),
                }
                false
            }

            TransportEvent::ChannelBinary(data) => {
                if !self.assembler.in_progress() {
                    warn!(
                        "Dropping {}-byte chunk with no transfer in progress",
                        data.len()
                    );
                } else if let Some(file) = self.assembler.push(&data) {
                    info!("Transfer complete: {} ({} bytes)", file.name, file.size());
                    self.emit(SessionEvent::FileReceived(file));
                }
                false
            }

            TransportEvent::DataChannelClosed => {
                info!("Data channel closed");
                self.shutdown().await;
                true
            }

            TransportEvent::Disconnected => {
                info!("Peer connection lost");
                self.shutdown().await;
                true
            }
        }
    }

    /// Control message first, then ordered fixed-size chunks. No per-chunk
    /// acknowledgment: the channel is ordered and reliable.
    async fn send_file(&mut self, name: &str, data: &Bytes) -> Result<(), SessionError> {
        if self.state != SessionState::Connected {
            return Err(SessionError::ChannelNotOpen);
        }
        let Some(dc) = self.data_channel.as_ref() else {
            return Err(SessionError::ChannelNotOpen);
        };
        if data.is_empty() {
            return Err(SessionError::EmptyFile);
        }

        let header = TransferHeader::new(data.len(), name);
        dc.send_text(header.to_string()).await?;

        for chunk in chunks(data, self.config.chunk_size) {
            dc.send(&chunk).await?;
        }

        info!("Sent file {} ({} bytes)", name, data.len());
        Ok(())
    }

    async fn shutdown(&mut self) {
        if let Some(connection) = self.connection.take() {
            if let Err(e) = connection.close().await {
                warn!("Error closing connection: {}", e);
            }
        }
        self.data_channel = None;
        self.state = SessionState::Closed;
        self.emit(SessionEvent::Closed);
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }
}
