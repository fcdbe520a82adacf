//! HTTP Client Factory
//!
//! Builds the shared reqwest client. No request timeout is configured;
//! a stalled backend call stalls its flow until the user gives up.

/// Build a `reqwest::Client` for the workbench's outbound calls.
pub fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("failed to build reqwest client")
}
