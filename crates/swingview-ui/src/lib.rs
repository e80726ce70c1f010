#![warn(missing_docs)]
//! # swingview-ui
//!
//! ## Purpose
//! Projects session and viewer machine state into display-safe text.
//!
//! ## Responsibilities
//! - Render upload lifecycle states as status lines.
//! - Convert operation errors and share outcomes into user notices.
//!
//! ## Data flow
//! State machine snapshots in -> strings out. This crate never owns
//! authoritative state and never mutates anything.

use swingview_core::UploadState;
use swingview_session::SessionError;
use swingview_viewer::ShareOutcome;

/// Severity of a user notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Non-blocking confirmation or hint.
    Info,
    /// Blocking warning requiring user attention.
    Warning,
}

/// One display-ready user notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Notice severity.
    pub level: NoticeLevel,
    /// Display text.
    pub message: String,
}

/// Message shown by the viewer's explicit no-video state.
pub const EMPTY_VIEW_MESSAGE: &str = "No video selected for analysis";
/// Call-to-action label linking the empty state back to the upload flow.
pub const EMPTY_VIEW_ACTION: &str = "Upload a swing video";

/// Renders the upload lifecycle as one status line.
pub fn upload_status_line(state: &UploadState) -> String {
    match state {
        UploadState::Idle => "Ready to upload".to_string(),
        UploadState::Uploading { percent } => format!("Uploading {percent}%"),
        UploadState::Succeeded(_) => "Analysis ready".to_string(),
        UploadState::Failed { message } => message.clone(),
    }
}

/// Converts a session operation error into a user notice.
pub fn notice_for_session_error(error: &SessionError) -> Notice {
    Notice {
        level: NoticeLevel::Warning,
        message: error.to_string(),
    }
}

/// Converts a share outcome into an optional notice.
///
/// A native share needs no confirmation; the clipboard fallback confirms the
/// copy, and a failed share surfaces the non-blocking notice text.
pub fn notice_for_share_outcome(outcome: &ShareOutcome) -> Option<Notice> {
    match outcome {
        ShareOutcome::NativeShared => None,
        ShareOutcome::CopiedToClipboard => Some(Notice {
            level: NoticeLevel::Info,
            message: "Link copied to clipboard".to_string(),
        }),
        ShareOutcome::Unavailable { notice } => Some(Notice {
            level: NoticeLevel::Warning,
            message: notice.clone(),
        }),
    }
}
