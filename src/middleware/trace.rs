//! Per-request logging: one completion event per request, no exceptions.
//!
//! [`wrap`] takes the future that handles the request and brackets it: clock
//! started before the first byte of work, a `debug` event on arrival, and a
//! single `info` event once the response exists, carrying remote address,
//! method, path, status, and elapsed milliseconds. The subscriber supplies
//! the timestamp and serializes concurrent writers, so lines from parallel
//! requests never interleave mid-line.
//!
//! The handling future is infallible (`Output = Response`; failures inside
//! it have already been converted to `4xx`/`5xx` responses), so every
//! request reaches the completion event exactly once. A request that fell to
//! 500 is logged as 500; its underlying error was recorded separately where
//! it was converted ([`IntoResponse`](crate::IntoResponse) for `Result`).

use std::future::Future;
use std::net::SocketAddr;
use std::time::Instant;

use http::Method;
use tracing::{debug, info};

use crate::response::Response;

/// Runs `handle` and logs its outcome.
///
/// Returns the response unchanged; this function observes, it never alters.
pub async fn wrap<F>(remote: SocketAddr, method: &Method, path: &str, handle: F) -> Response
where
    F: Future<Output = Response>,
{
    let started = Instant::now();
    debug!(remote = %remote, "request received");

    let response = handle.await;

    let elapsed_ms = started.elapsed().as_millis() as u64;
    info!(
        remote = %remote,
        method = %method,
        path,
        status = response.status_code().as_u16(),
        elapsed_ms,
        "request"
    );
    response
}
