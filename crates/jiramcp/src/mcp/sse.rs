use crate::prelude::{eprintln, *};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream, StreamExt};
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::JsonRpcResponse;

/// Path clients POST JSON-RPC requests to
const MESSAGE_PATH: &str = "/message";

pub async fn run_sse(options: super::cli::SseOptions, global: crate::Global) -> Result<()> {
    let addr = options.addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    log::info!("MCP SSE transport listening on {addr}");
    if global.verbose {
        eprintln!("SSE endpoint: http://{addr}/sse");
        eprintln!("Message endpoint: http://{addr}{MESSAGE_PATH}");
    }

    axum::serve(listener, router(global))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

fn router(global: crate::Global) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/sse", get(sse_handler))
        .route(MESSAGE_PATH, post(message_handler))
        .layer(cors)
        .with_state(Arc::new(global))
}

/// Announce the message endpoint, then hold the stream open with keep-alives
async fn sse_handler() -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let endpoint = stream::once(async { Ok(Event::default().event("endpoint").data(MESSAGE_PATH)) });
    Sse::new(endpoint.chain(stream::pending())).keep_alive(KeepAlive::default())
}

/// Raw body so malformed JSON is reported as a JSON-RPC parse error
async fn message_handler(State(global): State<Arc<crate::Global>>, body: String) -> Response {
    let response = super::handle_request(&body, &global).await;
    reply(response)
}

/// Notifications get `202 Accepted` with no body, same as stdio writing nothing
fn reply(response: JsonRpcResponse) -> Response {
    if response.is_silent() {
        StatusCode::ACCEPTED.into_response()
    } else {
        Json(response).into_response()
    }
}
