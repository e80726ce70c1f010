#![warn(missing_docs)]
//! # swingview-upload
//!
//! ## Purpose
//! Implements the one-shot analyze submission over an injectable transport.
//!
//! ## Responsibilities
//! - Validate analyze endpoint policy (HTTPS).
//! - Encode the selected video into a deterministic multipart envelope.
//! - Drive exactly one transport call per submission and surface transport
//!   byte progress to the caller.
//! - Parse the response body through the configured contract convention.
//! - Classify failures for message phrasing (never for automatic retry).
//!
//! ## Data flow
//! [`swingview_core::VideoFile`] -> [`UploadClient::submit`] sends an
//! [`UploadEnvelope`] through [`UploadTransport`] -> response body is parsed
//! into [`swingview_core::AnalysisLocators`].
//!
//! ## Ownership and lifetimes
//! Envelopes own their encoded bodies so a user-initiated retry re-encodes
//! from the retained selection without borrowing transport buffers.
//!
//! ## Error model
//! Endpoint policy violations, transport failures, non-2xx statuses, and
//! malformed response bodies are all surfaced as [`UploadError`]; the session
//! controller collapses every variant into one retryable failed state.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use swingview_analysis_contract::{
    AnalysisContractError, ResponseConvention, parse_analyze_response,
};
use swingview_core::{AnalysisLocators, VideoFile};
use thiserror::Error;
use url::Url;

/// Multipart form field name expected by the analyze endpoint.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Byte-count progress report from the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    /// Bytes acknowledged as sent so far.
    pub bytes_sent: u64,
    /// Total bytes in the envelope body.
    pub total_bytes: u64,
}

/// Encoded multipart request handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEnvelope {
    /// Analyze endpoint the transport must POST to.
    pub endpoint: Url,
    /// Stable traceability key derived from the payload.
    pub request_key: String,
    /// `Content-Type` header value including the boundary.
    pub content_type: String,
    /// Encoded multipart body bytes.
    pub body: Vec<u8>,
}

/// Raw transport result before contract parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as UTF-8 text.
    pub body: String,
}

/// Abstract transport used by the upload client.
///
/// Implementations must report progress in non-decreasing byte order and
/// deliver a final report equal to the body length before returning success.
pub trait UploadTransport: Send + Sync {
    /// Sends one envelope, reporting progress through `progress`.
    fn send(
        &self,
        envelope: &UploadEnvelope,
        progress: &mut dyn FnMut(TransferProgress),
    ) -> Result<TransportResponse, UploadError>;
}

/// Upload client bound to one validated analyze endpoint.
#[derive(Clone)]
pub struct UploadClient {
    endpoint: Url,
    convention: ResponseConvention,
    transport: Arc<dyn UploadTransport>,
}

impl UploadClient {
    /// Creates a validated upload client.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidEndpoint`] when the URL does not parse
    /// or is not HTTPS.
    pub fn new(
        endpoint: impl AsRef<str>,
        convention: ResponseConvention,
        transport: Arc<dyn UploadTransport>,
    ) -> Result<Self, UploadError> {
        let endpoint = Url::parse(endpoint.as_ref())
            .map_err(|error| UploadError::InvalidEndpoint(format!("invalid analyze url: {error}")))?;
        if endpoint.scheme() != "https" {
            return Err(UploadError::InvalidEndpoint(
                "analyze endpoint must use https".to_string(),
            ));
        }

        Ok(Self {
            endpoint,
            convention,
            transport,
        })
    }

    /// Returns the configured analyze endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submits one video and parses the analyze response.
    ///
    /// Exactly one transport call is made per invocation; there is no
    /// automatic retry.
    ///
    /// # Errors
    /// Propagates transport failures, maps non-2xx statuses to
    /// [`UploadError::Server`]/[`UploadError::Client`], and folds malformed
    /// response bodies into [`UploadError::Contract`].
    pub fn submit(
        &self,
        file: &VideoFile,
        progress: &mut dyn FnMut(TransferProgress),
    ) -> Result<AnalysisLocators, UploadError> {
        let envelope = build_envelope(&self.endpoint, file);
        let response = self.transport.send(&envelope, progress)?;

        match response.status {
            200..=299 => {}
            500..=599 => return Err(UploadError::Server(response.status)),
            status => return Err(UploadError::Client(status)),
        }

        let locators = parse_analyze_response(&response.body, self.convention, &self.endpoint)?;
        Ok(locators)
    }
}

/// Builds the multipart envelope for one video selection.
pub fn build_envelope(endpoint: &Url, file: &VideoFile) -> UploadEnvelope {
    let request_key = request_key_for_video(file);
    let boundary = multipart_boundary(&request_key);
    let body = encode_multipart_body(file, &boundary);

    UploadEnvelope {
        endpoint: endpoint.clone(),
        request_key,
        content_type: format!("multipart/form-data; boundary={boundary}"),
        body,
    }
}

/// Derives a stable traceability key for one video payload.
///
/// Identical selections produce identical keys, which makes duplicate
/// submissions visible in server-side logs.
pub fn request_key_for_video(file: &VideoFile) -> String {
    let mut hasher = Sha256::new();
    hasher.update(file.name.as_bytes());
    hasher.update([0]);
    hasher.update(file.media_type.as_bytes());
    hasher.update([0]);
    hasher.update(file.size_bytes().to_be_bytes());
    hasher.update(&file.bytes);
    hex::encode(hasher.finalize())
}

fn multipart_boundary(request_key: &str) -> String {
    // The key is 64 hex chars; 24 are enough to avoid body collisions.
    format!("swingview-{}", &request_key[..24])
}

/// Encodes the single-part `file` form body the analyze endpoint expects.
pub fn encode_multipart_body(file: &VideoFile, boundary: &str) -> Vec<u8> {
    let header = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{UPLOAD_FIELD_NAME}\"; filename=\"{}\"\r\n\
         Content-Type: {}\r\n\r\n",
        file.name, file.media_type
    );
    let footer = format!("\r\n--{boundary}--\r\n");

    let mut body = Vec::with_capacity(header.len() + file.bytes.len() + footer.len());
    body.extend_from_slice(header.as_bytes());
    body.extend_from_slice(&file.bytes);
    body.extend_from_slice(footer.as_bytes());
    body
}

/// Coarse failure grouping used to phrase user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Likely transient; a fresh user-initiated submit may succeed.
    Retriable,
    /// Unlikely to succeed without changing the request or configuration.
    Permanent,
}

/// Classifies an upload error for message phrasing.
pub fn classify_upload_error(error: &UploadError) -> FailureClass {
    match error {
        UploadError::Network(_) | UploadError::Timeout | UploadError::Server(_) => {
            FailureClass::Retriable
        }
        UploadError::InvalidEndpoint(_) | UploadError::Client(_) | UploadError::Contract(_) => {
            FailureClass::Permanent
        }
    }
}

/// Errors produced by the upload client and transports.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Endpoint violates configuration or security requirements.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Connection-level transport failure.
    #[error("network failure: {0}")]
    Network(String),
    /// Transport gave up waiting for the server.
    #[error("upload timed out")]
    Timeout,
    /// Server-side (5xx) response status.
    #[error("server rejected upload with status {0}")]
    Server(u16),
    /// Client-side (4xx or otherwise unexpected) response status.
    #[error("upload rejected with status {0}")]
    Client(u16),
    /// Transport succeeded but the response violated the analyze contract.
    #[error("analyze response contract violation: {0}")]
    Contract(#[from] AnalysisContractError),
}

#[cfg(test)]
mod tests {
    //! Unit tests for envelope encoding and endpoint policy.

    use super::*;

    fn fixture_file() -> VideoFile {
        VideoFile::new("swing.mp4", "video/mp4", vec![1, 2, 3, 4]).expect("fixture file")
    }

    #[test]
    fn rejects_non_https_endpoint() {
        struct NoopTransport;
        impl UploadTransport for NoopTransport {
            fn send(
                &self,
                _envelope: &UploadEnvelope,
                _progress: &mut dyn FnMut(TransferProgress),
            ) -> Result<TransportResponse, UploadError> {
                unreachable!("client construction should fail first")
            }
        }

        let result = UploadClient::new(
            "http://api.swingview.test/analyze",
            ResponseConvention::LocatorPair,
            Arc::new(NoopTransport),
        );
        assert!(matches!(result, Err(UploadError::InvalidEndpoint(_))));
    }

    #[test]
    fn multipart_body_carries_filename_and_media_type() {
        let file = fixture_file();
        let body = encode_multipart_body(&file, "swingview-abc");
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("name=\"file\"; filename=\"swing.mp4\""));
        assert!(text.contains("Content-Type: video/mp4"));
        assert!(text.ends_with("--swingview-abc--\r\n"));
    }

    #[test]
    fn request_key_is_stable_for_identical_payloads() {
        assert_eq!(
            request_key_for_video(&fixture_file()),
            request_key_for_video(&fixture_file())
        );
    }
}
