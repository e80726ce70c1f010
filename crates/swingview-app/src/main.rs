#![warn(missing_docs)]
//! # swingview-app binary
//!
//! Diagnostic entry point printing the effective client configuration.

/// CLI entry point.
fn main() {
    let endpoint = swingview_app::analyze_endpoint_from_env();
    println!("swingview-app {}", swingview_app::app_version());
    println!(
        "analyze_endpoint={endpoint} https_ok={} ({})",
        swingview_app::is_https_endpoint(&endpoint),
        swingview_app::ENV_ANALYZE_ENDPOINT
    );
    println!(
        "response_convention={:?} ({})",
        swingview_app::response_convention_from_env(),
        swingview_app::ENV_RESPONSE_CONVENTION
    );
}
