#![warn(missing_docs)]
//! # swingview-app
//!
//! ## Purpose
//! Wires the session, viewer, upload, and sample subsystems into the client
//! application and holds the env-driven configuration surface.
//!
//! ## Responsibilities
//! - Source the app version from the root `VERSION` file.
//! - Resolve the analyze endpoint and response convention from environment
//!   configuration.
//! - Build a fully wired [`UploadSessionController`] for one upload-view
//!   mount.
//! - Project session state into a flat status snapshot for simple display.
//!
//! ## Data flow
//! Env config + injected capabilities -> [`build_controller`] -> the host
//! drives the controller; [`project_session_status`] turns its state into
//! display text.
//!
//! ## Error model
//! Configuration and wiring failures are wrapped in [`AppError`].

use std::sync::Arc;

use swingview_analysis_contract::ResponseConvention;
use swingview_core::UploadState;
use swingview_session::{AddressHistory, FilePicker, UploadSession, UploadSessionController};
use swingview_ui::upload_status_line;
use swingview_upload::{UploadClient, UploadError, UploadTransport};
use thiserror::Error;
use url::Url;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("SWINGVIEW_VERSION");

/// Analyze endpoint used when no override is configured.
pub const DEFAULT_ANALYZE_ENDPOINT: &str = "https://api.swingview.test/analyze";

/// Env var overriding the analyze endpoint.
pub const ENV_ANALYZE_ENDPOINT: &str = "SWINGVIEW_ANALYZE_ENDPOINT";
/// Env var selecting the analyze response convention.
pub const ENV_RESPONSE_CONVENTION: &str = "SWINGVIEW_RESPONSE_CONVENTION";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Resolves the analyze endpoint from the environment.
pub fn analyze_endpoint_from_env() -> String {
    std::env::var(ENV_ANALYZE_ENDPOINT)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_ANALYZE_ENDPOINT.to_string())
}

/// Resolves the response convention from the environment.
///
/// Semantics:
/// - `output-path` (case-insensitive) selects the legacy convention.
/// - Anything else, or unset, selects the locator-pair convention.
pub fn response_convention_from_env() -> ResponseConvention {
    match std::env::var(ENV_RESPONSE_CONVENTION) {
        Ok(value) if value.trim().eq_ignore_ascii_case("output-path") => {
            ResponseConvention::OutputPath
        }
        _ => ResponseConvention::LocatorPair,
    }
}

/// Returns `true` when the endpoint URL is HTTPS.
pub fn is_https_endpoint(endpoint: &str) -> bool {
    Url::parse(endpoint)
        .map(|url| url.scheme() == "https")
        .unwrap_or(false)
}

/// Derives the viewer entry address from the current upload-view address.
///
/// # Errors
/// Returns [`AppError::InvalidAddress`] when the current address cannot host
/// an `/analysis` sibling path.
pub fn viewer_base_from(current: &Url) -> Result<Url, AppError> {
    current
        .join("/analysis")
        .map_err(|error| AppError::InvalidAddress(format!("cannot derive viewer address: {error}")))
}

/// Builds a wired session controller for one upload-view mount.
///
/// # Errors
/// Returns [`AppError::Upload`] when the configured endpoint fails policy
/// validation, and [`AppError::InvalidAddress`] for an unusable current
/// address.
pub fn build_controller(
    transport: Arc<dyn UploadTransport>,
    picker: Arc<dyn FilePicker>,
    history: Arc<dyn AddressHistory>,
) -> Result<UploadSessionController, AppError> {
    let client = UploadClient::new(
        analyze_endpoint_from_env(),
        response_convention_from_env(),
        transport,
    )?;
    let viewer_base = viewer_base_from(&history.current())?;

    Ok(UploadSessionController::new(
        client,
        picker,
        history,
        viewer_base,
    ))
}

/// Flat session status snapshot for simple display surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    /// Upload lifecycle as a display line.
    pub upload: String,
    /// Name of the current selection, when present.
    pub selected_file: Option<String>,
    /// Whether a drag gesture currently hovers the drop target.
    pub drag_active: bool,
    /// Whether the controller may accept a submit right now.
    pub submit_allowed: bool,
}

/// Projects one session snapshot into a flat status.
pub fn project_session_status(session: &UploadSession) -> SessionStatus {
    SessionStatus {
        upload: upload_status_line(&session.upload_state),
        selected_file: session
            .selected_file
            .as_ref()
            .map(|file| file.name.clone()),
        drag_active: session.drag_active,
        submit_allowed: session.selected_file.is_some()
            && !matches!(session.upload_state, UploadState::Uploading { .. }),
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Upload subsystem configuration error.
    #[error("upload error: {0}")]
    Upload(#[from] UploadError),
    /// Current address cannot be used to derive navigation targets.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}
