use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Stand-in for the portal backend that receives recommendation
/// submissions. Captures every comment posted to /student/addcomment and
/// can be switched into a failure mode that answers HTTP 500.
#[derive(Clone)]
pub struct MockRecommendationServer {
    comments: Arc<Mutex<Vec<serde_json::Value>>>,
    fail: Arc<AtomicBool>,
}

impl MockRecommendationServer {
    pub fn new() -> Self {
        Self {
            comments: Arc::new(Mutex::new(Vec::new())),
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn start(&self) -> String {
        let comments = self.comments.clone();
        let fail = self.fail.clone();

        let make_svc = make_service_fn(move |_conn| {
            let comments = comments.clone();
            let fail = fail.clone();

            async move {
                Ok::<_, Infallible>(service_fn(move |req| {
                    handle_request(req, comments.clone(), fail.clone())
                }))
            }
        });

        // Bind to random port
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        let server = Server::bind(&addr).serve(make_svc);
        let actual_addr = server.local_addr();

        // Spawn server in background
        tokio::spawn(async move {
            if let Err(e) = server.await {
                eprintln!("Mock server error: {}", e);
            }
        });

        format!("http://{}", actual_addr)
    }

    pub fn get_comments(&self) -> Vec<serde_json::Value> {
        self.comments.lock().unwrap().clone()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    #[allow(dead_code)]
    pub fn clear(&self) {
        self.comments.lock().unwrap().clear();
    }
}

async fn handle_request(
    req: Request<Body>,
    comments: Arc<Mutex<Vec<serde_json::Value>>>,
    fail: Arc<AtomicBool>,
) -> Result<Response<Body>, Infallible> {
    let path = req.uri().path();

    match path {
        "/student/addcomment" => {
            if fail.load(Ordering::SeqCst) {
                let mut response = Response::new(Body::from("{\"error\":\"boom\"}"));
                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                return Ok(response);
            }

            let body_bytes = hyper::body::to_bytes(req.into_body())
                .await
                .unwrap_or_default();

            if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&body_bytes) {
                comments.lock().unwrap().push(value);
            }

            Ok(Response::new(Body::from("{\"status\":\"ok\"}")))
        }
        _ => {
            let mut response = Response::new(Body::from("Not Found"));
            *response.status_mut() = StatusCode::NOT_FOUND;
            Ok(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::Method;

    #[tokio::test]
    async fn test_mock_server_starts() {
        let server = MockRecommendationServer::new();
        let url = server.start().await;

        assert!(url.starts_with("http://127.0.0.1:"));
    }

    #[tokio::test]
    async fn test_mock_server_captures_comments() {
        let server = MockRecommendationServer::new();
        let url = server.start().await;

        let client = hyper::Client::new();
        let payload = r#"{"id":"r1","author_id":"p1","application_id":"a1","comment":"hi"}"#;

        let req = Request::builder()
            .method(Method::POST)
            .uri(format!("{}/student/addcomment", url))
            .header("content-type", "application/json")
            .body(Body::from(payload))
            .unwrap();

        let response = client.request(req).await.unwrap();
        assert!(response.status().is_success());

        let comments = server.get_comments();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0]["author_id"], "p1");
    }

    #[tokio::test]
    async fn test_mock_server_failure_mode() {
        let server = MockRecommendationServer::new();
        let url = server.start().await;
        server.set_fail(true);

        let client = hyper::Client::new();
        let req = Request::builder()
            .method(Method::POST)
            .uri(format!("{}/student/addcomment", url))
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = client.request(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(server.get_comments().is_empty());
    }
}
