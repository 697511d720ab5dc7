use axum::{
    Json, Router,
    http::{HeaderName, HeaderValue, Method, Request, Response, StatusCode, Uri, header},
    routing::get,
};
use std::{
    future::{Future, IntoFuture},
    sync::Arc,
    time::Duration,
};
use tokio::{net::TcpListener, sync::Notify};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::{
    config::AppConfig,
    error::ErrorData,
    response::ApiResponse,
    routes::{create_api_router, doc::scalar_docs, health},
    state::AppState,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Assemble the full HTTP application: API routes, health, docs and the
/// tower middleware stack.
pub fn build_app(state: AppState, config: &AppConfig) -> anyhow::Result<Router> {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id(request)
            )
        })
        .on_request(|request: &Request<_>, _span: &tracing::Span| {
            tracing::info!(
                request_id = %request_id(request),
                method = %request.method(),
                uri = %request.uri(),
                "request started"
            );
        })
        .on_response(|response: &Response<_>, latency: Duration, _span: &tracing::Span| {
            tracing::info!(
                status = %response.status(),
                ms = %latency.as_millis(),
                "request finished"
            );
        });

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::PUT])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness))
        .nest("/api", create_api_router())
        .merge(scalar_docs())
        .fallback(not_found)
        .layer(trace_layer)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .layer(ConcurrencyLimitLayer::new(100))
        .with_state(state);

    Ok(app)
}

/// Serve `app` until `signal` resolves, then let in-flight requests drain.
///
/// Fails if connections are still open `shutdown_timeout` after the signal.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    shutdown_timeout: Duration,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let shutdown_started = Arc::new(Notify::new());
    let server = axum::serve(listener, app).with_graceful_shutdown({
        let shutdown_started = shutdown_started.clone();
        async move {
            signal.await;
            shutdown_started.notify_one();
        }
    });

    let deadline = async {
        shutdown_started.notified().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        result = server.into_future() => {
            result?;
            tracing::info!("closed out remaining connections");
            Ok(())
        }
        () = deadline => {
            tracing::error!(
                timeout_ms = shutdown_timeout.as_millis() as u64,
                "graceful shutdown timed out, forcing exit"
            );
            anyhow::bail!("graceful shutdown timed out")
        }
    }
}

fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<ErrorData>>) {
    let body = ApiResponse::success(
        "Not Found",
        ErrorData {
            error: format!("no route for {}", uri.path()),
        },
    );
    (StatusCode::NOT_FOUND, Json(body))
}
