use flare_core::SignalMessage;
use flare_peer::{Role, SessionCommand};

use crate::init_tracing;
use crate::utils::{local_config, spawn_session};

#[tokio::test]
async fn test_responder_answers_without_offering() {
    init_tracing();

    // A real offer comes from a second session rather than a canned SDP.
    let initiator = spawn_session(Role::Initiator, local_config());
    assert!(initiator.sink.wait_for_signals(1, 5000).await);
    let offer = initiator.sink.sent().await.into_iter().next().unwrap();
    assert!(matches!(offer, SignalMessage::Offer { .. }));

    let responder = spawn_session(Role::Responder, local_config());

    // Quiet until an offer arrives.
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    assert!(
        responder.sink.sent().await.is_empty(),
        "responder signaled before receiving an offer"
    );

    responder
        .commands
        .send(SessionCommand::Signal(offer))
        .await
        .expect("session dropped its command channel");

    assert!(
        responder.sink.wait_for_signals(1, 5000).await,
        "responder never answered"
    );

    let sent = responder.sink.sent().await;
    assert!(
        matches!(sent[0], SignalMessage::Answer { .. }),
        "responder's first signal must be an answer, got {:?}",
        sent[0]
    );
    assert!(
        sent.iter().all(|m| !matches!(m, SignalMessage::Offer { .. })),
        "a responder must never send an offer"
    );
}
