use std::net::SocketAddr;
use std::sync::Arc;

use hyper::service::{make_service_fn, service_fn};
use hyper::Server;
use log::info;

use uniportal::application::DocumentRegistry;
use uniportal::handlers::{handle_request, PortalContext};
use uniportal::infrastructure::store::SqliteStore;

// Defaults, overridable via environment
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8970";
const DEFAULT_RECOMMENDATION_URL: &str = "http://127.0.0.1:8000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let listen_addr = std::env::var("PORTAL_LISTEN_ADDR")
        .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
    let recommendation_url = std::env::var("RECOMMENDATION_SERVICE_URL")
        .unwrap_or_else(|_| DEFAULT_RECOMMENDATION_URL.to_string());

    let addr: SocketAddr = listen_addr.parse()?;

    // Document state lives only as long as this process
    let store = SqliteStore::new_in_memory()?;
    let registry = DocumentRegistry::new(Box::new(store));
    let ctx = Arc::new(PortalContext::new(registry, recommendation_url.clone()));

    info!("Starting university portal service on {}", addr);
    info!(
        "Recommendation submissions forwarded to {}",
        recommendation_url
    );

    let make_svc = make_service_fn(move |_conn| {
        let ctx = ctx.clone();

        async move {
            Ok::<_, std::convert::Infallible>(service_fn(move |req| {
                handle_request(ctx.clone(), req)
            }))
        }
    });

    Server::bind(&addr).serve(make_svc).await?;

    Ok(())
}
