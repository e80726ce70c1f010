#![warn(missing_docs)]
//! # swingview-viewer
//!
//! ## Purpose
//! Implements the Analysis Result Viewer: address-derived video resolution,
//! tab selection, and the download/share side effects.
//!
//! ## Responsibilities
//! - Resolve the current address into a video set (sample id first, then
//!   direct locators, then an explicit empty state).
//! - Manage processed/original tab selection with the Original tab disabled
//!   when no original locator exists.
//! - Perform guarded downloads and best-effort share actions through
//!   injectable capability traits.
//!
//! ## Data flow
//! Current address -> [`swingview_core::ViewerAddress`] -> [`resolve_view`]
//! -> rendered source via [`ViewerState::active_source`]; download/share run
//! against the resolved locators only.
//!
//! ## Ownership and lifetimes
//! The viewer owns nothing authoritative: resolution is recomputed from the
//! address on every render, and only the ephemeral tab/download flags live in
//! [`ViewerState`].
//!
//! ## Error model
//! Download failures return [`ViewerError`] with the in-flight guard always
//! released; share failures never escape as errors, only as a
//! [`ShareOutcome`] notice.

use swingview_core::{AnalysisLocators, ViewerAddress};
use swingview_samples::SampleCatalog;
use thiserror::Error;
use url::Url;

/// Fetches a video resource as an in-memory blob.
pub trait VideoFetcher: Send + Sync {
    /// Retrieves the bytes behind one locator.
    ///
    /// # Errors
    /// Returns [`ViewerError::Fetch`] on any transport failure.
    fn fetch(&self, locator: &str) -> Result<Vec<u8>, ViewerError>;
}

/// Persists a downloaded blob under a local artifact name.
pub trait FileSaver: Send + Sync {
    /// Triggers the host save action for one named artifact.
    ///
    /// # Errors
    /// Returns [`ViewerError::Save`] when the host rejects the save.
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<(), ViewerError>;
}

/// Native share capability of the host.
pub trait ShareProvider: Send + Sync {
    /// Returns `true` when native sharing is available.
    fn is_available(&self) -> bool;

    /// Invokes the native share sheet.
    ///
    /// # Errors
    /// Returns [`ViewerError::Share`] when the share sheet fails or is
    /// dismissed by the host with an error.
    fn share(&self, request: &ShareRequest) -> Result<(), ViewerError>;
}

/// Clipboard capability used as the share fallback.
pub trait Clipboard: Send + Sync {
    /// Copies text to the host clipboard.
    ///
    /// # Errors
    /// Returns [`ViewerError::Clipboard`] when the host denies access.
    fn copy_text(&self, text: &str) -> Result<(), ViewerError>;
}

/// Payload handed to the native share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    /// Share sheet title.
    pub title: String,
    /// Share sheet body text.
    pub text: String,
    /// Current viewer address being shared.
    pub address: Url,
}

/// Which video the viewer currently renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoTab {
    /// Annotated analysis output (the default tab).
    #[default]
    Processed,
    /// Untouched uploaded video.
    Original,
}

impl VideoTab {
    /// Category tag embedded into download artifact names.
    pub fn category_tag(&self) -> &'static str {
        match self {
            VideoTab::Processed => "processed",
            VideoTab::Original => "original",
        }
    }
}

/// Video set the viewer resolved from the current address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedView {
    /// Locator pair to render.
    pub locators: AnalysisLocators,
    /// Display title, present for catalog samples.
    pub title: Option<String>,
}

/// Result of resolving the current address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewResolution {
    /// A processed video is available to render.
    Resolved(ResolvedView),
    /// No processed reference could be derived; render the explicit empty
    /// state with a call-to-action back to the upload flow.
    Empty,
}

/// Resolves the address into a renderable video set.
///
/// Resolution order: sample id through the catalog (unknown ids fall through
/// as if absent), then direct locator parameters, then [`ViewResolution::Empty`].
pub fn resolve_view(address: &ViewerAddress, catalog: &SampleCatalog) -> ViewResolution {
    if let Some(sample_id) = &address.sample_id
        && let Some(record) = catalog.lookup(sample_id)
    {
        return ViewResolution::Resolved(ResolvedView {
            locators: record.locators.clone(),
            title: Some(record.title.clone()),
        });
    }

    if let Some(processed) = &address.processed_ref {
        return ViewResolution::Resolved(ResolvedView {
            locators: AnalysisLocators {
                processed_ref: processed.clone(),
                original_ref: address.original_ref.clone(),
            },
            title: None,
        });
    }

    ViewResolution::Empty
}

/// Completed-download summary for status display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    /// Local artifact name the blob was saved under.
    pub file_name: String,
    /// Downloaded blob size.
    pub size_bytes: u64,
}

/// How a share request was ultimately serviced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The native share sheet handled it.
    NativeShared,
    /// No native capability; the address was copied to the clipboard.
    CopiedToClipboard,
    /// Neither path worked; surface the notice without blocking.
    Unavailable {
        /// Non-blocking notice text for the user.
        notice: String,
    },
}

/// Ephemeral per-render viewer state (tab and download guard).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerState {
    /// Currently rendered tab; defaults to `Processed`.
    pub active_tab: VideoTab,
    /// Guard preventing concurrent duplicate downloads.
    pub download_in_flight: bool,
}

impl ViewerState {
    /// Creates the default state (processed tab, no download in flight).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the Original tab control should be enabled.
    pub fn original_tab_enabled(view: &ResolvedView) -> bool {
        view.locators.original_ref.is_some()
    }

    /// Switches tabs.
    ///
    /// # Errors
    /// Returns [`ViewerError::OriginalUnavailable`] when the Original tab is
    /// requested without an original locator (the control is disabled in that
    /// case, so this only guards programmatic calls).
    pub fn select_tab(&mut self, tab: VideoTab, view: &ResolvedView) -> Result<(), ViewerError> {
        if tab == VideoTab::Original && !Self::original_tab_enabled(view) {
            return Err(ViewerError::OriginalUnavailable);
        }
        self.active_tab = tab;
        Ok(())
    }

    /// Returns the media source for the active tab.
    ///
    /// Falls back to the processed locator if the state was constructed in an
    /// Original-without-locator combination, so the player never renders a
    /// missing source.
    pub fn active_source<'a>(&self, view: &'a ResolvedView) -> &'a str {
        match self.active_tab {
            VideoTab::Processed => &view.locators.processed_ref,
            VideoTab::Original => view
                .locators
                .original_ref
                .as_deref()
                .unwrap_or(&view.locators.processed_ref),
        }
    }

    /// Downloads the targeted video as a named local artifact.
    ///
    /// The in-flight guard is released on success and failure alike, so a
    /// failed download never permanently disables the action.
    ///
    /// # Errors
    /// Returns [`ViewerError::DownloadInFlight`] while another download runs,
    /// [`ViewerError::MissingSource`] when the target has no locator, and
    /// fetch/save failures from the capability traits.
    pub fn download(
        &mut self,
        target: VideoTab,
        view: &ResolvedView,
        fetcher: &dyn VideoFetcher,
        saver: &dyn FileSaver,
        now_ms: u64,
    ) -> Result<DownloadReport, ViewerError> {
        if self.download_in_flight {
            return Err(ViewerError::DownloadInFlight);
        }
        let locator = match target {
            VideoTab::Processed => view.locators.processed_ref.clone(),
            VideoTab::Original => view
                .locators
                .original_ref
                .clone()
                .ok_or(ViewerError::MissingSource { target })?,
        };

        self.download_in_flight = true;
        let result = run_download(&locator, target, fetcher, saver, now_ms);
        self.download_in_flight = false;
        result
    }
}

fn run_download(
    locator: &str,
    target: VideoTab,
    fetcher: &dyn VideoFetcher,
    saver: &dyn FileSaver,
    now_ms: u64,
) -> Result<DownloadReport, ViewerError> {
    let bytes = fetcher.fetch(locator)?;
    let file_name = download_file_name(target, now_ms);
    saver.save(&file_name, &bytes)?;

    Ok(DownloadReport {
        file_name,
        size_bytes: bytes.len() as u64,
    })
}

/// Builds the local artifact name for one download.
///
/// Embeds the category tag and a timestamp so repeated downloads in one
/// session never collide.
pub fn download_file_name(target: VideoTab, now_ms: u64) -> String {
    format!("{}-video-{now_ms}.mp4", target.category_tag())
}

/// Shares the current viewer address, best-effort.
///
/// Prefers the native share sheet; without one, copies the address to the
/// clipboard. Neither path returns an error to the caller.
pub fn share_current_view(
    address: &Url,
    title: &str,
    share: &dyn ShareProvider,
    clipboard: &dyn Clipboard,
) -> ShareOutcome {
    if share.is_available() {
        let request = ShareRequest {
            title: title.to_string(),
            text: "Check out this swing analysis".to_string(),
            address: address.clone(),
        };
        return match share.share(&request) {
            Ok(()) => ShareOutcome::NativeShared,
            Err(error) => ShareOutcome::Unavailable {
                notice: format!("Sharing failed: {error}"),
            },
        };
    }

    match clipboard.copy_text(address.as_str()) {
        Ok(()) => ShareOutcome::CopiedToClipboard,
        Err(error) => ShareOutcome::Unavailable {
            notice: format!("Could not copy link: {error}"),
        },
    }
}

/// Errors produced by viewer actions.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// A download is already in flight.
    #[error("a download is already in progress")]
    DownloadInFlight,
    /// The targeted video has no locator in the resolved view.
    #[error("no {} video is available to download", target.category_tag())]
    MissingSource {
        /// The tab whose locator was absent.
        target: VideoTab,
    },
    /// The Original tab was requested without an original locator.
    #[error("no original video is available for this view")]
    OriginalUnavailable,
    /// Blob fetch failure.
    #[error("video fetch failed: {0}")]
    Fetch(String),
    /// Host save action failure.
    #[error("save failed: {0}")]
    Save(String),
    /// Native share sheet failure.
    #[error("native share failed: {0}")]
    Share(String),
    /// Clipboard access failure.
    #[error("clipboard failure: {0}")]
    Clipboard(String),
}
