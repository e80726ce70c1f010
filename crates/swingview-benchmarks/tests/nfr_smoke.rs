//! Benchmark smoke test for the deterministic client hot paths.

use std::time::Instant;

use swingview_core::{VideoFile, ViewerAddress, monotonic_percent, progress_percent};
use swingview_samples::SampleCatalog;
use swingview_upload::build_envelope;
use swingview_viewer::{ViewResolution, resolve_view};
use url::Url;

#[test]
fn benchmark_client_paths_smoke_prints_latency() {
    let endpoint = Url::parse("https://api.swingview.test/analyze").expect("endpoint");
    let file =
        VideoFile::new("swing.mp4", "video/mp4", vec![0x5A; 256 * 1024]).expect("fixture file");
    let catalog = SampleCatalog::built_in();
    let address = ViewerAddress::for_sample("sample3");

    let start = Instant::now();
    let mut body_lengths = 0usize;
    let mut resolved = 0usize;

    for _ in 0..100 {
        let envelope = build_envelope(&endpoint, &file);
        body_lengths += envelope.body.len();

        let mut percent = 0_u8;
        let total = file.size_bytes();
        for step in 0..=total / 4_096 {
            percent = monotonic_percent(percent, progress_percent(step * 4_096, total));
        }
        assert_eq!(percent, 100);

        if let ViewResolution::Resolved(_) = resolve_view(&address, &catalog) {
            resolved += 1;
        }
    }

    let elapsed_ms = start.elapsed().as_millis();
    println!("benchmark_client_paths_elapsed_ms={elapsed_ms}");
    println!("benchmark_envelope_body_total_len={body_lengths}");
    assert_eq!(resolved, 100);

    // This is a lightweight guardrail; strict NFR checks are environment-specific.
    assert!(
        elapsed_ms < 5_000,
        "client path smoke benchmark should stay bounded"
    );
}
