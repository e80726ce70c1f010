#![warn(missing_docs)]
//! # swingview-session
//!
//! ## Purpose
//! Implements the upload-side state machines: the Upload Session Controller
//! and the deep-link auto-open coordinator composed into it.
//!
//! ## Responsibilities
//! - Acquire a video from picker, drop, or the sample shortcut.
//! - Enforce selection validation and the single-in-flight submit rule.
//! - Track monotonic upload progress and perform the success-side navigation
//!   handoff to the viewer address.
//! - Fire the deep-link picker open exactly once per mount and scrub the
//!   trigger parameter with an in-place address rewrite.
//!
//! ## Data flow
//! Picker/drop events mutate [`UploadSession`] -> [`UploadSessionController::submit`]
//! drives one transport call through `swingview-upload` -> terminal success
//! pushes a viewer address through [`AddressHistory`].
//!
//! ## Ownership and lifetimes
//! The session is created fresh per mount of the upload view and owns the
//! selected file bytes; nothing here survives navigation away.
//!
//! ## Error model
//! Every operation returns an explicit [`SessionError`]; failed submissions
//! additionally land in [`swingview_core::UploadState::Failed`] with a
//! display-ready message so the selection can be retried without reselecting.

use std::sync::Arc;

use swingview_core::{
    CoreError, UploadState, VideoFile, ViewerAddress, auto_open_requested, monotonic_percent,
    progress_percent, strip_auto_open,
};
use swingview_upload::{FailureClass, UploadClient, UploadError, classify_upload_error};
use thiserror::Error;
use url::Url;

/// Maximum picker-mount polls before the auto-open request is abandoned.
pub const MAX_AUTO_OPEN_POLLS: u32 = 10;

/// Abstract handle to the host file-picker element.
pub trait FilePicker: Send + Sync {
    /// Returns `true` once the picker element exists in the host UI.
    fn is_mounted(&self) -> bool;

    /// Opens the picker dialog.
    ///
    /// # Errors
    /// Returns [`SessionError::Picker`] when the host refuses to open it.
    fn open(&self) -> Result<(), SessionError>;
}

/// Abstract handle to the host navigation history.
pub trait AddressHistory: Send + Sync {
    /// Returns the current address.
    fn current(&self) -> Url;

    /// Navigates to a new address, adding a history entry.
    fn push(&self, url: &Url);

    /// Rewrites the current address in place without a new history entry.
    fn replace(&self, url: &Url);
}

/// Upload-view state owned exclusively by the controller for one mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSession {
    /// Current validated selection; replaced wholesale on each new pick.
    pub selected_file: Option<VideoFile>,
    /// `true` only while a drag gesture hovers the drop target.
    pub drag_active: bool,
    /// Upload lifecycle state.
    pub upload_state: UploadState,
    /// One-shot latch marking the deep-link auto-open as fired.
    pub auto_open_consumed: bool,
}

impl UploadSession {
    fn new() -> Self {
        Self {
            selected_file: None,
            drag_active: false,
            upload_state: UploadState::Idle,
            auto_open_consumed: false,
        }
    }
}

/// Outcome of one auto-open coordinator poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoOpenPoll {
    /// The picker was opened and the trigger parameter scrubbed.
    Fired,
    /// The current address carries no trigger.
    NotRequested,
    /// The latch was already set for this mount.
    AlreadyConsumed,
    /// Trigger present but the picker is not mounted yet; poll again after a
    /// short delay.
    PickerNotReady,
    /// The bounded poll allowance ran out; the request is dropped.
    GaveUp,
}

/// Owns one upload session and routes its terminal transitions.
pub struct UploadSessionController {
    /// Session state for the current upload-view mount.
    pub session: UploadSession,
    client: UploadClient,
    picker: Arc<dyn FilePicker>,
    history: Arc<dyn AddressHistory>,
    viewer_base: Url,
    auto_open_polls: u32,
}

impl UploadSessionController {
    /// Creates a controller with a fresh session for one upload-view mount.
    pub fn new(
        client: UploadClient,
        picker: Arc<dyn FilePicker>,
        history: Arc<dyn AddressHistory>,
        viewer_base: Url,
    ) -> Self {
        Self {
            session: UploadSession::new(),
            client,
            picker,
            history,
            viewer_base,
            auto_open_polls: 0,
        }
    }

    /// Applies a file chosen through the picker dialog.
    ///
    /// Last selection wins; an invalid media type leaves any previous
    /// selection untouched.
    ///
    /// # Errors
    /// Returns [`SessionError::Validation`] for non-video media types.
    pub fn select_from_picker(
        &mut self,
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<(), SessionError> {
        let file = VideoFile::new(name, media_type, bytes)?;
        self.session.selected_file = Some(file);
        Ok(())
    }

    /// Applies a file dropped onto the drop target.
    ///
    /// The drag highlight is cleared regardless of payload validity.
    ///
    /// # Errors
    /// Returns [`SessionError::Validation`] for non-video media types.
    pub fn select_from_drop(
        &mut self,
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<(), SessionError> {
        self.session.drag_active = false;
        self.select_from_picker(name, media_type, bytes)
    }

    /// Toggles the drag-hover highlight.
    pub fn set_drag_active(&mut self, drag_active: bool) {
        self.session.drag_active = drag_active;
    }

    /// Submits the current selection to the analyze endpoint.
    ///
    /// Progress reported by the transport is projected into
    /// `Uploading(percent)` with monotonic clamping. Success transitions to
    /// `Succeeded` and pushes the viewer address; any failure transitions to
    /// `Failed` while retaining the selection for a user-initiated retry.
    ///
    /// # Errors
    /// Returns [`SessionError::NoFileSelected`] or
    /// [`SessionError::UploadInFlight`] without touching state, and
    /// [`SessionError::Upload`] when the transfer itself fails.
    pub fn submit(&mut self) -> Result<(), SessionError> {
        if self.session.upload_state.is_uploading() {
            return Err(SessionError::UploadInFlight);
        }
        let file = self
            .session
            .selected_file
            .clone()
            .ok_or(SessionError::NoFileSelected)?;

        let client = &self.client;
        let session = &mut self.session;
        session.upload_state = UploadState::Uploading { percent: 0 };

        let mut percent = 0_u8;
        let result = client.submit(&file, &mut |report| {
            percent = monotonic_percent(
                percent,
                progress_percent(report.bytes_sent, report.total_bytes),
            );
            session.upload_state = UploadState::Uploading { percent };
        });

        match result {
            Ok(locators) => {
                session.upload_state = UploadState::Succeeded(locators.clone());
                let target = ViewerAddress::for_locators(&locators).apply(&self.viewer_base);
                self.history.push(&target);
                Ok(())
            }
            Err(error) => {
                session.upload_state = UploadState::Failed {
                    message: failure_message(&error),
                };
                Err(SessionError::Upload(error))
            }
        }
    }

    /// Navigates straight to the viewer with a sample identifier.
    ///
    /// Skips validation and upload entirely; the catalog lookup happens on
    /// the viewer side.
    pub fn select_sample(&self, sample_id: &str) {
        let target = ViewerAddress::for_sample(sample_id).apply(&self.viewer_base);
        self.history.push(&target);
    }

    /// Runs one auto-open coordinator check.
    ///
    /// Fires at most once per mount: the latch is set before any side effect,
    /// then the picker is opened and the trigger parameter is scrubbed with a
    /// replace (not push) so reload and back-navigation cannot re-trigger.
    /// `PickerNotReady` asks the host to poll again after a short delay.
    ///
    /// # Errors
    /// Returns [`SessionError::Picker`] when the host picker refuses to open;
    /// the latch stays set, so the request is still not repeated.
    pub fn poll_auto_open(&mut self) -> Result<AutoOpenPoll, SessionError> {
        if self.session.auto_open_consumed {
            return Ok(AutoOpenPoll::AlreadyConsumed);
        }

        let current = self.history.current();
        if !auto_open_requested(&current) {
            return Ok(AutoOpenPoll::NotRequested);
        }

        if !self.picker.is_mounted() {
            self.auto_open_polls += 1;
            if self.auto_open_polls >= MAX_AUTO_OPEN_POLLS {
                self.session.auto_open_consumed = true;
                return Ok(AutoOpenPoll::GaveUp);
            }
            return Ok(AutoOpenPoll::PickerNotReady);
        }

        // Latch before side effects so a failing open still counts as fired.
        self.session.auto_open_consumed = true;
        self.picker.open()?;
        self.history.replace(&strip_auto_open(&current));
        Ok(AutoOpenPoll::Fired)
    }
}

fn failure_message(error: &UploadError) -> String {
    match classify_upload_error(error) {
        FailureClass::Retriable => {
            format!("Upload failed: {error}. Check your connection and try again.")
        }
        FailureClass::Permanent => format!("Upload failed: {error}."),
    }
}

/// Errors produced by session controller operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Selection rejected by media-type validation.
    #[error("{0}")]
    Validation(#[from] CoreError),
    /// Submit requested without a selection.
    #[error("select a video before uploading")]
    NoFileSelected,
    /// Submit requested while a transfer is already in flight.
    #[error("an upload is already in progress")]
    UploadInFlight,
    /// The transfer or response validation failed.
    #[error("upload failed: {0}")]
    Upload(#[from] UploadError),
    /// The host file picker could not be opened.
    #[error("file picker failure: {0}")]
    Picker(String),
}
