use flare_core::ServerEvent;

use crate::utils::TestPeer;
use crate::{create_test_relay, init_tracing};

#[tokio::test]
async fn test_leave_notifies_others() {
    init_tracing();

    let relay = create_test_relay();

    let mut leaver = TestPeer::join(&relay).await;
    let mut stayer_1 = TestPeer::join(&relay).await;
    let mut stayer_2 = TestPeer::join(&relay).await;

    // The departure notice is the same broadcast call, fire-and-forget.
    relay.broadcast_from(&leaver.peer_id, &ServerEvent::Bye);

    assert!(leaver.try_recv_event().is_none());
    for stayer in [&mut stayer_1, &mut stayer_2] {
        let events = stayer.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ServerEvent::Bye));
    }
}
