#![warn(missing_docs)]
//! # swingview-samples
//!
//! ## Purpose
//! Provides the static demonstration-sample catalog.
//!
//! ## Responsibilities
//! - Populate the shortcut gallery shown under the upload drop target.
//! - Resolve a sample identifier into a pre-existing locator pair.
//!
//! ## Data flow
//! Gallery selection -> sample id rides the navigation address -> the viewer
//! resolves it through [`SampleCatalog::lookup`].
//!
//! ## Error model
//! Unknown identifiers resolve to `None`; the viewer treats that the same as
//! an absent sample parameter. Nothing here can fail.

use swingview_core::AnalysisLocators;

/// One gallery tile in the sample shortcut strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleEntry {
    /// Stable catalog identifier carried by the navigation address.
    pub sample_id: String,
    /// Thumbnail image reference for the gallery tile.
    pub display_image_ref: String,
}

/// Resolved sample content for the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRecord {
    /// Locator pair for the pre-analyzed sample videos.
    pub locators: AnalysisLocators,
    /// Display title shown above the player.
    pub title: String,
}

/// Static, read-only sample lookup table.
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    entries: Vec<(SampleEntry, SampleRecord)>,
}

impl SampleCatalog {
    /// Creates a catalog from caller-provided entries.
    pub fn new(entries: Vec<(SampleEntry, SampleRecord)>) -> Self {
        Self { entries }
    }

    /// Returns the built-in four-sample catalog.
    pub fn built_in() -> Self {
        let entries = (1..=4)
            .map(|index| {
                let sample_id = format!("sample{index}");
                (
                    SampleEntry {
                        sample_id: sample_id.clone(),
                        display_image_ref: format!("/images/test_pic{index}.png"),
                    },
                    SampleRecord {
                        locators: AnalysisLocators {
                            processed_ref: format!(
                                "https://samples.swingview.test/{sample_id}/processed.mp4"
                            ),
                            original_ref: Some(format!(
                                "https://samples.swingview.test/{sample_id}/original.mp4"
                            )),
                        },
                        title: format!("Sample swing {index}"),
                    },
                )
            })
            .collect();

        Self { entries }
    }

    /// Returns gallery tiles in display order.
    pub fn gallery(&self) -> Vec<SampleEntry> {
        self.entries.iter().map(|(entry, _)| entry.clone()).collect()
    }

    /// Resolves a sample identifier; unknown ids yield `None`.
    pub fn lookup(&self, sample_id: &str) -> Option<&SampleRecord> {
        self.entries
            .iter()
            .find(|(entry, _)| entry.sample_id == sample_id)
            .map(|(_, record)| record)
    }
}
