/// Tests for transport failure handling
///
/// A broken transport is the one condition that ends a session: the mirror
/// must be torn down and the error surfaced to the caller's loop.

use trellis_client::{
    transport::TransportError, SessionError, SessionState, TerminateReason,
};
use trellis_test::*;

#[test]
fn receive_failure_tears_down_mirror() {
    let mut test = TestSession::new();
    test.deliver([connect_accept(), node_create(65536, 0)]).unwrap();
    assert_eq!(test.registry().len(), 2);

    test.events.break_connection();
    let result = test.tick();

    match result {
        Err(SessionError::Transport(TransportError::ReceiveFailed { .. })) => {}
        other => panic!("Expected ReceiveFailed transport error, got {:?}", other),
    }
    assert_eq!(test.session.state(), SessionState::Disconnected);
    assert!(test.session.registry().is_none());
    assert_eq!(test.session.terminate_reason(), Some(TerminateReason::Error));
}

#[test]
fn send_failure_tears_down_mirror() {
    let mut test = TestSession::new();
    test.sink = LocalCommandSink::with_capacity(1);

    // accept produces three commands, the second one fails
    let result = test.deliver([connect_accept()]);

    assert!(matches!(
        result,
        Err(SessionError::Transport(TransportError::SendFailed { .. }))
    ));
    assert_eq!(test.sink.sent().len(), 1);
    assert!(!test.session.is_running());
}

#[test]
fn ticking_after_failure_reports_termination() {
    let mut test = TestSession::new();
    test.deliver([connect_accept()]).unwrap();
    test.events.break_connection();
    let _ = test.tick();

    assert_eq!(
        test.tick(),
        Err(SessionError::Terminated(TerminateReason::Error))
    );
}

#[test]
fn lookup_misses_never_end_the_session() {
    let mut test = TestSession::new();
    test.deliver([
        connect_accept(),
        node_destroy(42),
        tag_set(42, 1, 1, vec![1]),
        layer_unset(42, 1, 1),
        uint8_tag_create(0, 9, 1, 1),
    ])
    .unwrap();

    assert!(test.session.is_running());
    assert_eq!(test.registry().len(), 1);
}
