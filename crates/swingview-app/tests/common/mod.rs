//! Shared fixtures for app integration tests.

use std::sync::{Arc, Mutex};

use swingview_analysis_contract::ResponseConvention;
use swingview_session::{AddressHistory, FilePicker, SessionError, UploadSessionController};
use swingview_upload::{
    TransferProgress, TransportResponse, UploadEnvelope, UploadError, UploadTransport,
};
use url::Url;

/// Analyze endpoint used by every wired test controller.
#[allow(dead_code)]
pub const TEST_ANALYZE_ENDPOINT: &str = "https://api.swingview.test/analyze";

/// One scripted transport reply, consumed in order.
#[allow(dead_code)]
pub enum ScriptedReply {
    /// Return an HTTP response with the given status and body.
    Respond {
        status: u16,
        body: &'static str,
    },
    /// Fail with a connection-level error.
    NetworkFailure,
    /// Fail with a timeout.
    TimeoutFailure,
}

/// Transport double that replays scripted replies and progress reports.
pub struct ScriptedTransport {
    progress_points: Vec<(u64, u64)>,
    replies: Mutex<Vec<ScriptedReply>>,
    calls: Mutex<u32>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            progress_points: Vec::new(),
            replies: Mutex::new(replies),
            calls: Mutex::new(0),
        }
    }

    /// Scripts `(bytes_sent, total_bytes)` reports emitted before each reply.
    pub fn with_progress(mut self, points: Vec<(u64, u64)>) -> Self {
        self.progress_points = points;
        self
    }

    pub fn calls(&self) -> u32 {
        *self.calls.lock().expect("call counter lock")
    }
}

impl UploadTransport for ScriptedTransport {
    fn send(
        &self,
        _envelope: &UploadEnvelope,
        progress: &mut dyn FnMut(TransferProgress),
    ) -> Result<TransportResponse, UploadError> {
        *self.calls.lock().expect("call counter lock") += 1;
        for (bytes_sent, total_bytes) in &self.progress_points {
            progress(TransferProgress {
                bytes_sent: *bytes_sent,
                total_bytes: *total_bytes,
            });
        }

        let mut replies = self.replies.lock().expect("reply lock");
        assert!(!replies.is_empty(), "transport called more times than scripted");
        match replies.remove(0) {
            ScriptedReply::Respond { status, body } => Ok(TransportResponse {
                status,
                body: body.to_string(),
            }),
            ScriptedReply::NetworkFailure => {
                Err(UploadError::Network("connection reset".to_string()))
            }
            ScriptedReply::TimeoutFailure => Err(UploadError::Timeout),
        }
    }
}

/// Picker double with a switchable mounted flag and an open counter.
pub struct MockPicker {
    mounted: Mutex<bool>,
    opens: Mutex<u32>,
}

#[allow(dead_code)]
impl MockPicker {
    pub fn mounted() -> Self {
        Self {
            mounted: Mutex::new(true),
            opens: Mutex::new(0),
        }
    }

    pub fn unmounted() -> Self {
        Self {
            mounted: Mutex::new(false),
            opens: Mutex::new(0),
        }
    }

    pub fn set_mounted(&self, mounted: bool) {
        *self.mounted.lock().expect("mounted lock") = mounted;
    }

    pub fn opens(&self) -> u32 {
        *self.opens.lock().expect("open counter lock")
    }
}

impl FilePicker for MockPicker {
    fn is_mounted(&self) -> bool {
        *self.mounted.lock().expect("mounted lock")
    }

    fn open(&self) -> Result<(), SessionError> {
        *self.opens.lock().expect("open counter lock") += 1;
        Ok(())
    }
}

/// One recorded navigation action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub enum HistoryAction {
    Push(Url),
    Replace(Url),
}

/// History double that records every navigation and tracks the current address.
pub struct RecordingHistory {
    current: Mutex<Url>,
    actions: Mutex<Vec<HistoryAction>>,
}

#[allow(dead_code)]
impl RecordingHistory {
    pub fn at(address: &str) -> Self {
        Self {
            current: Mutex::new(Url::parse(address).expect("history fixture address")),
            actions: Mutex::new(Vec::new()),
        }
    }

    pub fn current_url(&self) -> Url {
        self.current.lock().expect("current lock").clone()
    }

    pub fn actions(&self) -> Vec<HistoryAction> {
        self.actions.lock().expect("action lock").clone()
    }

    pub fn pushes(&self) -> Vec<Url> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                HistoryAction::Push(url) => Some(url),
                HistoryAction::Replace(_) => None,
            })
            .collect()
    }

    pub fn replaces(&self) -> Vec<Url> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                HistoryAction::Replace(url) => Some(url),
                HistoryAction::Push(_) => None,
            })
            .collect()
    }
}

impl AddressHistory for RecordingHistory {
    fn current(&self) -> Url {
        self.current_url()
    }

    fn push(&self, url: &Url) {
        *self.current.lock().expect("current lock") = url.clone();
        self.actions
            .lock()
            .expect("action lock")
            .push(HistoryAction::Push(url.clone()));
    }

    fn replace(&self, url: &Url) {
        *self.current.lock().expect("current lock") = url.clone();
        self.actions
            .lock()
            .expect("action lock")
            .push(HistoryAction::Replace(url.clone()));
    }
}

/// Wires a controller against the standard test endpoint and viewer base.
#[allow(dead_code)]
pub fn controller_with(
    transport: Arc<ScriptedTransport>,
    picker: Arc<MockPicker>,
    history: Arc<RecordingHistory>,
) -> UploadSessionController {
    controller_with_convention(transport, picker, history, ResponseConvention::LocatorPair)
}

/// Wires a controller with an explicit analyze response convention.
#[allow(dead_code)]
pub fn controller_with_convention(
    transport: Arc<ScriptedTransport>,
    picker: Arc<MockPicker>,
    history: Arc<RecordingHistory>,
    convention: ResponseConvention,
) -> UploadSessionController {
    let client =
        swingview_upload::UploadClient::new(TEST_ANALYZE_ENDPOINT, convention, transport)
            .expect("test upload client should build");
    UploadSessionController::new(
        client,
        picker,
        history,
        Url::parse("https://app.test/analysis").expect("viewer base fixture"),
    )
}

/// Valid locator-pair response body with both video URLs.
#[allow(dead_code)]
pub const LOCATOR_PAIR_BODY: &str =
    r#"{"processed_url":"https://cdn.swingview.test/p.mp4","original_url":"https://cdn.swingview.test/o.mp4"}"#;

/// Deterministic ten-megabyte video selection fixture.
#[allow(dead_code)]
pub fn select_fixture_video(controller: &mut UploadSessionController) {
    controller
        .select_from_picker("swing.mp4", "video/mp4", vec![7; 10 * 1024 * 1024])
        .expect("fixture selection should validate");
}
