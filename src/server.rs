//! HTTP server, request boundary, and graceful shutdown.
//!
//! The per-request pipeline is composed here, explicitly, in one place:
//!
//! ```text
//! accept → trace::wrap( method gate → role parse → Router::handle ) → write
//! ```
//!
//! The trace wrapper sits outside everything else, so boundary rejections
//! (405, 400) produce the same one-line log record as routed requests.
//!
//! # Graceful shutdown
//!
//! On SIGTERM or Ctrl-C the server stops accepting immediately and lets every
//! in-flight connection task run to completion before [`Server::serve`]
//! returns. Size your orchestrator's grace period (Kubernetes
//! `terminationGracePeriodSeconds` and friends) above your slowest request.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::{Method, StatusCode};
use http_body_util::Full;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::Error;
use crate::middleware::trace;
use crate::request::Request;
use crate::response::Response;
use crate::role::{ROLE_HEADER, Role};
use crate::router::Router;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not a valid `host:port` string.
    pub fn bind(addr: &str) -> Self {
        let addr: SocketAddr = addr.parse().expect("invalid socket address");
        Self { addr }
    }

    /// Starts accepting connections and dispatching them through `router`.
    ///
    /// Returns only after a full graceful shutdown: a signal, followed by all
    /// in-flight requests completing.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;

        // The route table is immutable from here on; Arc shares it across
        // connection tasks without locking.
        let router = Arc::new(router);

        info!(addr = %self.addr, "anteroom listening");

        // Every connection task lands in the JoinSet so shutdown can drain them.
        let mut tasks = tokio::task::JoinSet::new();

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // `biased` checks arms top-to-bottom: a signal must win over a
                // queued accept.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // One closure call per request on the connection.
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            async move { dispatch(router, req, remote_addr).await }
                        });

                        // Serves HTTP/1.1 or HTTP/2, whichever the client speaks.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished tasks so the JoinSet stays bounded.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("anteroom stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Handles one request end to end.
///
/// The error type is [`Infallible`]: every failure is expressed as a
/// response (400, 403, 404, 405, 500), so hyper never sees an error and the
/// trace wrapper logs every outcome.
async fn dispatch(
    router: Arc<Router>,
    req: hyper::Request<hyper::body::Incoming>,
    remote_addr: SocketAddr,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    // Lossy decode keeps the raw bytes printable; anything mangled fails role
    // parsing and comes back as a 400 naming the value.
    let role_header = req
        .headers()
        .get(ROLE_HEADER)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    let handling = route_request(&router, &method, &path, role_header, remote_addr);
    let response = trace::wrap(remote_addr, &method, &path, handling).await;

    Ok(response.into_inner())
}

/// The request boundary: method gate, then role resolution, then the router.
///
/// The surface is GET-only; anything else stops here with `405`. The caller's
/// role comes from [`ROLE_HEADER`]: absent means an anonymous [`Role::Public`]
/// caller, an unknown value is a `400` and never reaches router or policy.
async fn route_request(
    router: &Router,
    method: &Method,
    path: &str,
    role_header: Option<String>,
    remote_addr: SocketAddr,
) -> Response {
    if *method != Method::GET {
        return Response::status(StatusCode::METHOD_NOT_ALLOWED);
    }

    let role = match role_header {
        None => Role::Public,
        Some(value) => match value.parse::<Role>() {
            Ok(role) => role,
            Err(e) => {
                return Response::builder()
                    .status(StatusCode::BAD_REQUEST)
                    .text(e.to_string());
            }
        },
    };

    router
        .handle(Request::new(method.clone(), path, role, remote_addr))
        .await
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// Unix: SIGTERM (orchestrators) or SIGINT (Ctrl-C). Elsewhere: Ctrl-C only.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    // Never resolves, which disables the SIGTERM arm on non-Unix targets.
    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote() -> SocketAddr {
        "192.0.2.1:5000".parse().unwrap()
    }

    fn app() -> Router {
        Router::new()
            .route("/open",   Role::Public, |_req: Request| async { Response::text("open") })
            .route("/member", Role::User,   |_req: Request| async { Response::text("member") })
    }

    #[tokio::test]
    async fn non_get_is_rejected_before_routing() {
        let res = route_request(&app(), &Method::POST, "/open", None, remote()).await;
        assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn missing_role_header_means_anonymous_public() {
        let app = app();
        let res = route_request(&app, &Method::GET, "/open", None, remote()).await;
        assert_eq!(res.status_code(), StatusCode::OK);

        let res = route_request(&app, &Method::GET, "/member", None, remote()).await;
        assert_eq!(res.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unknown_role_is_a_400_naming_the_value() {
        let res = route_request(
            &app(),
            &Method::GET,
            "/open",
            Some("WIZARD".to_owned()),
            remote(),
        )
        .await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(res.body(), br#"invalid role: "WIZARD""#);
    }

    #[tokio::test]
    async fn role_header_value_is_case_insensitive() {
        let res = route_request(
            &app(),
            &Method::GET,
            "/member",
            Some("user".to_owned()),
            remote(),
        )
        .await;
        assert_eq!(res.status_code(), StatusCode::OK);
    }
}
