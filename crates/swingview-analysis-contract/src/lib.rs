#![warn(missing_docs)]
//! # swingview-analysis-contract
//!
//! ## Purpose
//! Defines the analysis endpoint response schema and client-side parsing.
//!
//! ## Responsibilities
//! - Parse analyze responses under both observed endpoint conventions.
//! - Convert a well-formed response into a tagged locator result.
//! - Treat a missing processed-video locator as a first-class error variant
//!   rather than an implicit absent value.
//!
//! ## Data flow
//! Raw JSON response body -> [`parse_analyze_response`] ->
//! [`swingview_core::AnalysisLocators`] consumed by the session controller's
//! success transition.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned strings so locators can outlive transient network
//! buffers and ride the navigation handoff.
//!
//! ## Error model
//! Invalid JSON, blank mandatory fields, and unresolvable relative paths
//! return [`AnalysisContractError`]. Callers fold all variants into the
//! retryable failed-upload presentation.

use serde::Deserialize;
use swingview_core::AnalysisLocators;
use thiserror::Error;
use url::Url;

/// Supported analyze-response wire conventions.
///
/// The production contract is ambiguous across backend revisions, so the
/// convention is configuration rather than a hard-coded assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseConvention {
    /// Later convention: `processed_url` (required) plus optional
    /// `original_url`, both absolute locators.
    #[default]
    LocatorPair,
    /// Legacy convention: `output_path` (required), possibly relative to the
    /// analyze endpoint origin, with no original locator.
    OutputPath,
}

#[derive(Debug, Deserialize)]
struct LocatorPairResponse {
    #[serde(default)]
    processed_url: Option<String>,
    #[serde(default)]
    original_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OutputPathResponse {
    #[serde(default)]
    output_path: Option<String>,
    // Present in legacy responses; carried by serde but unused by the client.
    #[serde(default)]
    #[allow(dead_code)]
    feedback: Option<String>,
}

/// Parses a raw analyze response body into a locator pair.
///
/// # Parameters
/// - `endpoint`: the analyze endpoint, used to resolve relative legacy paths.
///
/// # Errors
/// Returns [`AnalysisContractError::Decode`] for invalid JSON,
/// [`AnalysisContractError::MissingProcessedLocator`] when the required field
/// is absent or blank, and [`AnalysisContractError::InvalidLocator`] when a
/// legacy path cannot be resolved against the endpoint.
pub fn parse_analyze_response(
    raw: &str,
    convention: ResponseConvention,
    endpoint: &Url,
) -> Result<AnalysisLocators, AnalysisContractError> {
    match convention {
        ResponseConvention::LocatorPair => {
            let parsed: LocatorPairResponse =
                serde_json::from_str(raw).map_err(AnalysisContractError::Decode)?;
            let processed_ref = require_locator(parsed.processed_url, "processed_url")?;
            let original_ref = parsed
                .original_url
                .filter(|value| !value.trim().is_empty());

            Ok(AnalysisLocators {
                processed_ref,
                original_ref,
            })
        }
        ResponseConvention::OutputPath => {
            let parsed: OutputPathResponse =
                serde_json::from_str(raw).map_err(AnalysisContractError::Decode)?;
            let path = require_locator(parsed.output_path, "output_path")?;
            let processed_ref = resolve_output_path(&path, endpoint)?;

            Ok(AnalysisLocators {
                processed_ref,
                original_ref: None,
            })
        }
    }
}

fn require_locator(
    value: Option<String>,
    field: &'static str,
) -> Result<String, AnalysisContractError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or(AnalysisContractError::MissingProcessedLocator { field })
}

fn resolve_output_path(path: &str, endpoint: &Url) -> Result<String, AnalysisContractError> {
    if path.starts_with("http://") || path.starts_with("https://") {
        return Ok(path.to_string());
    }

    endpoint
        .join(path)
        .map(|resolved| resolved.to_string())
        .map_err(|error| AnalysisContractError::InvalidLocator(format!(
            "cannot resolve output path '{path}': {error}"
        )))
}

/// Analysis response contract errors.
#[derive(Debug, Error)]
pub enum AnalysisContractError {
    /// JSON decode failure.
    #[error("analyze response decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// Required processed-video locator field is absent or blank.
    #[error("analyze response is missing required field '{field}'")]
    MissingProcessedLocator {
        /// Name of the absent field under the active convention.
        field: &'static str,
    },
    /// Locator value could not be turned into a usable reference.
    #[error("invalid locator in analyze response: {0}")]
    InvalidLocator(String),
}
