// Request dispatch for the portal service. Exposed publicly so the
// integration tests can drive it through a real server.

use std::convert::Infallible;
use std::sync::Arc;

use hyper::client::HttpConnector;
use hyper::{Body, Client, Method, Request, Response, StatusCode};
use log::{error, info, warn};
use tokio::sync::Mutex;

use crate::application::{
    AckResponse, DocumentListResponse, DocumentResponse, DocumentRegistry, ErrorResponse,
    FileResponse, PortalAction, RegistryError,
};
use crate::infrastructure::submission::submit_recommendation;

/// Shown to users when a recommendation could not be delivered. The
/// underlying cause goes to the log, not to the user.
const RECOMMEND_RETRY_MESSAGE: &str = "Could not submit the recommendation. Please try again.";

/// Shared state for the portal service.
///
/// One registry instance for the whole process. The mutex serializes
/// registry calls, so each operation runs to completion before the next
/// one starts; conflicting in-flight calls resolve last-write-wins.
pub struct PortalContext {
    pub registry: Mutex<DocumentRegistry>,
    pub http: Client<HttpConnector>,
    pub recommendation_url: String,
}

impl PortalContext {
    pub fn new(registry: DocumentRegistry, recommendation_url: String) -> Self {
        Self {
            registry: Mutex::new(registry),
            http: Client::new(),
            recommendation_url,
        }
    }
}

pub async fn handle_request(
    ctx: Arc<PortalContext>,
    req: Request<Body>,
) -> Result<Response<Body>, Infallible> {
    if req.uri().path() != "/actions" {
        return Ok(error_response(StatusCode::NOT_FOUND, "Not found"));
    }

    if req.method() != Method::POST {
        return Ok(error_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed",
        ));
    }

    let body_bytes = match hyper::body::to_bytes(req.into_body()).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read request body: {}", e);
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                "Invalid request body",
            ));
        }
    };

    // Parse the action envelope
    let action: PortalAction = match serde_json::from_slice(&body_bytes) {
        Ok(action) => action,
        Err(e) => {
            warn!("Failed to parse portal action: {}", e);
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                &format!("Invalid action format: {}", e),
            ));
        }
    };

    Ok(handle_action(&ctx, action).await)
}

pub async fn handle_action(ctx: &PortalContext, action: PortalAction) -> Response<Body> {
    match action {
        PortalAction::Upload { data } => {
            info!(
                "Uploading document: {} ({})",
                data.name,
                data.doc_type.as_tag()
            );

            // Decode base64 content
            use base64::Engine;
            let content = match base64::engine::general_purpose::STANDARD.decode(&data.content) {
                Ok(c) => c,
                Err(e) => {
                    warn!("Failed to decode base64 content: {}", e);
                    return error_response(
                        StatusCode::BAD_REQUEST,
                        &format!("Invalid base64 content: {}", e),
                    );
                }
            };

            let registry = ctx.registry.lock().await;
            match registry
                .upload(&data.student_id, &data.name, data.doc_type, &content)
                .await
            {
                Ok(document) => {
                    info!("Document uploaded: {}", document.id);
                    json_response(StatusCode::OK, &DocumentResponse::new(document))
                }
                Err(e @ RegistryError::Store(_)) => {
                    error!("Upload failed: {}", e);
                    error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
                }
                Err(e) => {
                    warn!("Upload rejected: {}", e);
                    error_response(StatusCode::BAD_REQUEST, &e.to_string())
                }
            }
        }
        PortalAction::List { data } => {
            let registry = ctx.registry.lock().await;
            match registry.list_by_student(&data.student_id).await {
                Ok(documents) => {
                    json_response(StatusCode::OK, &DocumentListResponse::new(documents))
                }
                Err(e) => {
                    error!("Listing documents failed: {}", e);
                    error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
                }
            }
        }
        PortalAction::Remove { data } => {
            let registry = ctx.registry.lock().await;
            match registry.remove(&data.document_id).await {
                Ok(()) => {
                    info!("Document removed: {}", data.document_id);
                    json_response(StatusCode::OK, &AckResponse::removed())
                }
                Err(e) => {
                    error!("Removing document failed: {}", e);
                    error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
                }
            }
        }
        PortalAction::Verify { data } => {
            let registry = ctx.registry.lock().await;
            match registry.verify(&data.document_id).await {
                Ok(document) => {
                    info!("Document verified: {}", document.id);
                    json_response(StatusCode::OK, &DocumentResponse::new(document))
                }
                Err(RegistryError::NotFound) => {
                    warn!("Verify against unknown document id: {}", data.document_id);
                    error_response(StatusCode::NOT_FOUND, "Document not found")
                }
                Err(e) => {
                    error!("Verifying document failed: {}", e);
                    error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
                }
            }
        }
        PortalAction::Fetch { data } => {
            let registry = ctx.registry.lock().await;
            match registry.fetch_file(&data.file_url).await {
                Ok(content) => {
                    use base64::Engine;
                    let encoded = base64::engine::general_purpose::STANDARD.encode(content);
                    json_response(StatusCode::OK, &FileResponse::new(encoded))
                }
                Err(RegistryError::NotFound) => {
                    warn!("Fetch against unknown locator: {}", data.file_url);
                    error_response(StatusCode::NOT_FOUND, "Unknown file locator")
                }
                Err(e) => {
                    error!("Fetching file failed: {}", e);
                    error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
                }
            }
        }
        PortalAction::Recommend { data } => {
            info!(
                "Forwarding recommendation for application {}",
                data.application_id
            );

            match submit_recommendation(&ctx.http, &ctx.recommendation_url, &data).await {
                Ok(()) => json_response(StatusCode::OK, &AckResponse::recommendation_sent()),
                Err(e) => {
                    error!("Recommendation submission failed: {}", e);
                    error_response(StatusCode::BAD_GATEWAY, RECOMMEND_RETRY_MESSAGE)
                }
            }
        }
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: &T) -> Response<Body> {
    match serde_json::to_string(body) {
        Ok(json) => raw_json_response(status, json),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            raw_json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("{\"error\":\"internal error\"}"),
            )
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response<Body> {
    json_response(status, &ErrorResponse::new(message))
}

fn raw_json_response(status: StatusCode, json: String) -> Response<Body> {
    let mut response = Response::new(Body::from(json));
    *response.status_mut() = status;
    response.headers_mut().insert(
        hyper::header::CONTENT_TYPE,
        hyper::header::HeaderValue::from_static("application/json"),
    );
    response
}
