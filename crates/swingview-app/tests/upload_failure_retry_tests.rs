//! Integration tests for failed uploads and user-initiated retry.

mod common;

use std::sync::Arc;

use swingview_core::UploadState;
use swingview_session::SessionError;
use swingview_upload::UploadError;

#[test]
fn upload_failure_retry_tests_network_failure_keeps_selection_for_retry() {
    let transport = Arc::new(common::ScriptedTransport::new(vec![
        common::ScriptedReply::NetworkFailure,
        common::ScriptedReply::Respond {
            status: 200,
            body: common::LOCATOR_PAIR_BODY,
        },
    ]));
    let history = Arc::new(common::RecordingHistory::at("https://app.test/upload"));
    let mut controller = common::controller_with(
        transport.clone(),
        Arc::new(common::MockPicker::mounted()),
        history.clone(),
    );
    common::select_fixture_video(&mut controller);

    let result = controller.submit();
    assert!(matches!(
        result,
        Err(SessionError::Upload(UploadError::Network(_)))
    ));
    match &controller.session.upload_state {
        UploadState::Failed { message } => {
            assert!(message.contains("try again"), "got message: {message}");
        }
        other => panic!("expected failed state, got {other:?}"),
    }
    assert!(controller.session.selected_file.is_some());
    assert!(history.pushes().is_empty());

    // A fresh user submit reuses the retained selection.
    controller.submit().expect("retry should succeed");
    assert_eq!(transport.calls(), 2);
    assert!(matches!(
        controller.session.upload_state,
        UploadState::Succeeded(_)
    ));
    assert_eq!(history.pushes().len(), 1);
}

#[test]
fn upload_failure_retry_tests_server_status_lands_in_failed_state() {
    let transport = Arc::new(common::ScriptedTransport::new(vec![
        common::ScriptedReply::Respond {
            status: 503,
            body: "busy",
        },
    ]));
    let mut controller = common::controller_with(
        transport,
        Arc::new(common::MockPicker::mounted()),
        Arc::new(common::RecordingHistory::at("https://app.test/upload")),
    );
    common::select_fixture_video(&mut controller);

    let result = controller.submit();
    assert!(matches!(
        result,
        Err(SessionError::Upload(UploadError::Server(503)))
    ));
    assert!(controller.session.upload_state.is_terminal());
}

#[test]
fn upload_failure_retry_tests_exactly_one_transport_call_per_submit() {
    let transport = Arc::new(common::ScriptedTransport::new(vec![
        common::ScriptedReply::TimeoutFailure,
    ]));
    let mut controller = common::controller_with(
        transport.clone(),
        Arc::new(common::MockPicker::mounted()),
        Arc::new(common::RecordingHistory::at("https://app.test/upload")),
    );
    common::select_fixture_video(&mut controller);

    let result = controller.submit();
    assert!(matches!(
        result,
        Err(SessionError::Upload(UploadError::Timeout))
    ));
    // No automatic retry: the failed submit made exactly one attempt.
    assert_eq!(transport.calls(), 1);
}
