//! Integration tests for the single-in-flight submit rule.

mod common;

use std::sync::Arc;

use swingview_core::UploadState;
use swingview_session::SessionError;

#[test]
fn duplicate_submit_guard_tests_rejects_submit_while_uploading() {
    let transport = Arc::new(common::ScriptedTransport::new(Vec::new()));
    let mut controller = common::controller_with(
        transport.clone(),
        Arc::new(common::MockPicker::mounted()),
        Arc::new(common::RecordingHistory::at("https://app.test/upload")),
    );
    common::select_fixture_video(&mut controller);

    // Simulate a transfer already in flight for this mount.
    controller.session.upload_state = UploadState::Uploading { percent: 40 };

    let result = controller.submit();
    assert!(matches!(result, Err(SessionError::UploadInFlight)));
    assert_eq!(transport.calls(), 0);
    assert_eq!(
        controller.session.upload_state,
        UploadState::Uploading { percent: 40 }
    );
}

#[test]
fn duplicate_submit_guard_tests_allows_submit_after_terminal_state() {
    let transport = Arc::new(common::ScriptedTransport::new(vec![
        common::ScriptedReply::Respond {
            status: 200,
            body: common::LOCATOR_PAIR_BODY,
        },
    ]));
    let mut controller = common::controller_with(
        transport.clone(),
        Arc::new(common::MockPicker::mounted()),
        Arc::new(common::RecordingHistory::at("https://app.test/upload")),
    );
    common::select_fixture_video(&mut controller);

    controller.session.upload_state = UploadState::Failed {
        message: "Upload failed: upload timed out.".to_string(),
    };

    controller.submit().expect("terminal state permits a fresh submit");
    assert_eq!(transport.calls(), 1);
    assert!(controller.session.upload_state.is_terminal());
}
