use crate::error::Result;
use crate::pipeline::Orchestrator;
use crate::types::RawSubmission;
use axum::{
    extract::Form,
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Extension, Router,
};
use hyper::Server;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, Instrument};
use uuid::Uuid;

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "crisis_locator",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Minimal submission form; the pipeline itself is the product, this page is
/// just a convenience for manual testing.
async fn index() -> impl IntoResponse {
    Html(
        r#"<!DOCTYPE html>
<html lang="en">
  <head><meta charset="utf-8" /><title>Crisis Locator</title></head>
  <body>
    <h1>Crisis Locator</h1>
    <form action="/process_input" method="post">
      <p><label>Post text<br/><textarea name="text" rows="4" cols="60"></textarea></label></p>
      <p><label>Image URL<br/><input name="image_url" size="60" /></label></p>
      <p><button type="submit">Analyze</button></p>
    </form>
  </body>
</html>"#,
    )
}

#[derive(Debug, Deserialize)]
struct SubmissionForm {
    text: String,
    image_url: String,
}

/// One-shot pipeline invocation. Errors surface as a single 500 with a
/// message naming the failing stage; no partial results.
async fn process_input(
    Extension(orchestrator): Extension<Arc<Orchestrator>>,
    Form(form): Form<SubmissionForm>,
) -> axum::response::Response {
    let invocation_id = Uuid::new_v4();
    let span = tracing::info_span!("process_input", %invocation_id);

    let submission = RawSubmission {
        text: form.text,
        image_reference: form.image_url,
    };

    async move {
        match orchestrator.process(&submission).await {
            Ok(result) => Json(result).into_response(),
            Err(e) => {
                error!("Pipeline invocation failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Pipeline failed: {e}"),
                )
                    .into_response()
            }
        }
    }
    .instrument(span)
    .await
}

pub async fn run_server(port: u16, orchestrator: Arc<Orchestrator>) -> Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/process_input", post(process_input))
        .layer(ServiceBuilder::new().layer(cors))
        .layer(Extension(orchestrator));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on http://{}", addr);
    Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
