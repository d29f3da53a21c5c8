use crate::domain::Recommendation;
use hyper::{Body, Client, Method, Request};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Failed to encode recommendation: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid submission request: {0}")]
    Request(#[from] hyper::http::Error),

    #[error("Failed to reach recommendation service: {0}")]
    Http(#[from] hyper::Error),

    #[error("Recommendation service returned HTTP {0}")]
    Status(hyper::StatusCode),
}

/// Submit a recommendation comment to the portal backend.
///
/// Success is any 2xx status. Anything else, including transport errors,
/// is reported back to the caller; nothing is retried here.
///
/// # Arguments
/// * `client` - Hyper HTTP client
/// * `base_url` - Base URL of the portal backend (e.g., "http://127.0.0.1:8000")
/// * `recommendation` - The comment payload to submit
pub async fn submit_recommendation(
    client: &Client<hyper::client::HttpConnector>,
    base_url: &str,
    recommendation: &Recommendation,
) -> Result<(), SubmissionError> {
    let body_json = serde_json::to_string(recommendation)?;

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("{}/student/addcomment", base_url))
        .header("content-type", "application/json")
        .body(Body::from(body_json))?;

    let response = client.request(request).await?;

    if !response.status().is_success() {
        return Err(SubmissionError::Status(response.status()));
    }

    Ok(())
}
