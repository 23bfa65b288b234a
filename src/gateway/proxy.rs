//! Request forwarding
//!
//! Relays an inbound request to the configured backend and the backend's
//! answer back to the client. Method, path, query, headers and body go out
//! unchanged; status, headers and body come back unchanged. Bodies are
//! streamed in both directions and never buffered whole.
//!
//! One attempt per request. No retry, no deadline beyond the client's own.

use std::sync::Arc;

use axum::{
    body::{Body, HttpBody},
    extract::{Request, State},
    http::{Uri, header},
    response::{IntoResponse, Response},
};
use futures::TryStreamExt;
use reqwest::Url;
use tracing::{Instrument, Span, error, info, info_span};

use super::error::ProxyError;
use super::state::{GatewayState, ServerConfig};

/// Handler bound to `/orders`, `/orders/` and `/orders/{*rest}` for every method
pub async fn handle_orders(State(state): State<Arc<GatewayState>>, request: Request) -> Response {
    let span = info_span!(
        parent: &state.span,
        "forward",
        method = %request.method(),
        path = %request.uri().path()
    );

    async move {
        info!(method = %request.method(), url = %request.uri(), "Handle orders");
        match forward(&state.orders, request).await {
            Ok(response) => response,
            Err(e) => e.into_response(),
        }
    }
    .instrument(span)
    .await
}

/// Forward `request` to `server` and relay its response.
///
/// Every error is logged here with the method and target it concerns.
pub async fn forward(server: &ServerConfig, request: Request) -> Result<Response, ProxyError> {
    let target = resolve_target(server.base_url(), request.uri()).inspect_err(|e| {
        error!(error = %e, url = %server.base_url(), "Failed to parse url");
    })?;

    let (parts, body) = request.into_parts();
    let method = parts.method;
    let mut headers = parts.headers;
    // The backend is addressed by its own authority
    headers.remove(header::HOST);

    let mut builder = server
        .client()
        .request(method.clone(), target.clone())
        .headers(headers);
    if !body.is_end_stream() {
        builder = builder.body(reqwest::Body::wrap_stream(body.into_data_stream()));
    }

    let outbound = builder.build().map_err(|e| {
        error!(error = %e, method = %method, url = %target, "Failed to create http request");
        ProxyError::BuildRequest {
            method: method.clone(),
            url: target.to_string(),
            source: e,
        }
    })?;

    let upstream = server.client().execute(outbound).await.map_err(|e| {
        error!(error = %e, method = %method, url = %target, "Failed to send http request");
        ProxyError::Dispatch {
            method: method.clone(),
            url: target.to_string(),
            source: e,
        }
    })?;

    let status = upstream.status();
    let upstream_headers = upstream.headers().clone();

    // The status line is gone once streaming starts; a broken copy can only
    // be logged. Dropping the stream releases the backend connection.
    let span = Span::current();
    let stream = upstream.bytes_stream().inspect_err(move |e| {
        span.in_scope(|| error!(error = %e, "Failed to copy response body"));
    });

    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = status;
    *response.headers_mut() = upstream_headers;
    Ok(response)
}

/// Configured base URL with path and query taken from the inbound URI
pub fn resolve_target(base_url: &str, inbound: &Uri) -> Result<Url, ProxyError> {
    let invalid = |reason: String| ProxyError::InvalidTarget {
        url: base_url.to_string(),
        reason,
    };

    let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported target scheme {}", url.scheme())));
    }

    url.set_path(inbound.path());
    url.set_query(inbound.query());
    url.set_fragment(None);
    Ok(url)
}
