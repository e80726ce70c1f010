#![warn(missing_docs)]
//! # swingview-core
//!
//! ## Purpose
//! Defines the pure data model shared by the upload and viewer flows of
//! `swingview`.
//!
//! ## Responsibilities
//! - Represent validated in-memory video selections.
//! - Model the upload lifecycle state machine values.
//! - Provide progress arithmetic with monotonic clamping.
//! - Own the navigation address contract that hands results from the upload
//!   flow to the result viewer.
//!
//! ## Data flow
//! Picker/drop input becomes a [`VideoFile`]. The session controller moves
//! [`UploadState`] through its lifecycle and encodes [`AnalysisLocators`] into
//! a [`ViewerAddress`]. The viewer decodes the same address back into
//! locators on every render.
//!
//! ## Ownership and lifetimes
//! Video files own their byte buffers (`Vec<u8>`) so upload retries never
//! borrow from transient picker or drag-event storage.
//!
//! ## Error model
//! Selection validation failures (non-video media type, blank name) return
//! [`CoreError`] variants with caller-actionable categorization.
//!
//! ## Example
//! ```rust
//! use swingview_core::VideoFile;
//!
//! let file = VideoFile::new("swing.mp4", "video/mp4", vec![0; 16]).unwrap();
//! assert_eq!(file.size_bytes(), 16);
//! assert!(VideoFile::new("notes.txt", "text/plain", vec![]).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Required media-type prefix for any accepted selection.
pub const VIDEO_MEDIA_TYPE_PREFIX: &str = "video/";

/// Viewer address parameter carrying the processed-video locator.
pub const PARAM_PROCESSED_VIDEO_REF: &str = "processedVideoRef";
/// Viewer address parameter carrying the original-video locator.
pub const PARAM_ORIGINAL_VIDEO_REF: &str = "originalVideoRef";
/// Viewer address parameter carrying a sample catalog identifier.
pub const PARAM_SAMPLE_ID: &str = "sampleId";
/// Upload address parameter requesting a one-time picker open on entry.
pub const PARAM_AUTO_OPEN: &str = "autoOpen";

/// One validated in-memory video selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    /// Original filename reported by the picker or drop event.
    pub name: String,
    /// Declared media type, always starting with `video/`.
    pub media_type: String,
    /// Raw file bytes held for the duration of the session.
    pub bytes: Vec<u8>,
}

impl VideoFile {
    /// Constructs a validated video file.
    ///
    /// # Errors
    /// Returns [`CoreError::UnsupportedMediaType`] when the media type does
    /// not start with `video/`, and [`CoreError::EmptyFileName`] for a blank
    /// filename.
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, CoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::EmptyFileName);
        }

        let media_type = media_type.into();
        if !media_type.starts_with(VIDEO_MEDIA_TYPE_PREFIX) {
            return Err(CoreError::UnsupportedMediaType { media_type });
        }

        Ok(Self {
            name,
            media_type,
            bytes,
        })
    }

    /// Returns the payload size in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Locator pair returned by a successful analysis submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisLocators {
    /// Opaque URL of the processed (annotated) video.
    pub processed_ref: String,
    /// Opaque URL of the untouched original, when the service returns one.
    pub original_ref: Option<String>,
}

/// Upload lifecycle state owned by the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    /// No transfer has started.
    Idle,
    /// A transfer is in flight at the given percent (0..=100).
    Uploading {
        /// Monotonic transfer percent derived from transport byte counts.
        percent: u8,
    },
    /// Transfer completed and the response carried a processed locator.
    Succeeded(AnalysisLocators),
    /// Transfer or response validation failed; retry is user-initiated.
    Failed {
        /// Human-readable failure description for the notice surface.
        message: String,
    },
}

impl UploadState {
    /// Returns `true` while a transfer is in flight.
    pub fn is_uploading(&self) -> bool {
        matches!(self, UploadState::Uploading { .. })
    }

    /// Returns `true` for `Succeeded` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadState::Succeeded(_) | UploadState::Failed { .. })
    }
}

/// Converts transport byte counts into a rounded percent.
///
/// # Semantics
/// `round(bytes_sent / total_bytes * 100)`, clamped to 100. A zero-byte
/// transfer is reported as complete.
pub fn progress_percent(bytes_sent: u64, total_bytes: u64) -> u8 {
    if total_bytes == 0 {
        return 100;
    }

    let scaled = bytes_sent
        .saturating_mul(100)
        .saturating_add(total_bytes / 2)
        / total_bytes;
    scaled.min(100) as u8
}

/// Clamps a reported percent so the observed sequence never decreases.
pub fn monotonic_percent(current: u8, reported: u8) -> u8 {
    reported.max(current).min(100)
}

/// Decoded viewer-entry address parameters.
///
/// The viewer treats this as its entire authoritative input: it is rebuilt
/// from the current address on every render and never cached across
/// navigations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerAddress {
    /// Processed-video locator, when passed directly.
    pub processed_ref: Option<String>,
    /// Original-video locator, when passed directly.
    pub original_ref: Option<String>,
    /// Sample catalog identifier, which takes resolution precedence.
    pub sample_id: Option<String>,
}

impl ViewerAddress {
    /// Builds the address payload for a successful upload handoff.
    pub fn for_locators(locators: &AnalysisLocators) -> Self {
        Self {
            processed_ref: Some(locators.processed_ref.clone()),
            original_ref: locators.original_ref.clone(),
            sample_id: None,
        }
    }

    /// Builds the address payload for a sample shortcut.
    pub fn for_sample(sample_id: impl Into<String>) -> Self {
        Self {
            processed_ref: None,
            original_ref: None,
            sample_id: Some(sample_id.into()),
        }
    }

    /// Decodes recognized parameters from a viewer-entry URL.
    ///
    /// Unrecognized parameters are ignored; blank values count as absent.
    pub fn from_url(url: &Url) -> Self {
        let mut decoded = Self::default();
        for (key, value) in url.query_pairs() {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                PARAM_PROCESSED_VIDEO_REF => decoded.processed_ref = Some(value.to_string()),
                PARAM_ORIGINAL_VIDEO_REF => decoded.original_ref = Some(value.to_string()),
                PARAM_SAMPLE_ID => decoded.sample_id = Some(value.to_string()),
                _ => {}
            }
        }
        decoded
    }

    /// Attaches the present parameters to a base viewer URL.
    pub fn apply(&self, base: &Url) -> Url {
        let mut target = base.clone();
        {
            let mut pairs = target.query_pairs_mut();
            if let Some(processed) = &self.processed_ref {
                pairs.append_pair(PARAM_PROCESSED_VIDEO_REF, processed);
            }
            if let Some(original) = &self.original_ref {
                pairs.append_pair(PARAM_ORIGINAL_VIDEO_REF, original);
            }
            if let Some(sample_id) = &self.sample_id {
                pairs.append_pair(PARAM_SAMPLE_ID, sample_id);
            }
        }
        target
    }
}

/// Returns `true` when the address requests a one-time picker open.
///
/// Only the literal value `"true"` triggers; any other value is inert.
pub fn auto_open_requested(url: &Url) -> bool {
    url.query_pairs()
        .any(|(key, value)| key == PARAM_AUTO_OPEN && value == "true")
}

/// Returns the address with the auto-open trigger parameter removed.
///
/// All other parameters are preserved in order so a replace-in-place rewrite
/// does not disturb unrelated state.
pub fn strip_auto_open(url: &Url) -> Url {
    let remaining: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != PARAM_AUTO_OPEN)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut stripped = url.clone();
    stripped.set_query(None);
    if !remaining.is_empty() {
        let mut pairs = stripped.query_pairs_mut();
        for (key, value) in &remaining {
            pairs.append_pair(key, value);
        }
    }
    stripped
}

/// Error type for core model validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Selection media type is not a video type.
    #[error("unsupported media type '{media_type}': only video files are accepted")]
    UnsupportedMediaType {
        /// The rejected media type as reported by the input source.
        media_type: String,
    },
    /// Selection filename is blank.
    #[error("file name is empty")]
    EmptyFileName,
}
