//! Request router with a per-route access gate.
//!
//! One static table, built once at startup, immutable and lock-free after
//! that. Every registration names the minimum [`Role`] the route demands;
//! [`Router::handle`] runs the policy check before the handler ever sees the
//! request. No wildcards, no path parameters: a path either matches exactly
//! or it is a 404.

use std::sync::Arc;

use http::StatusCode;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::policy::{self, AccessDecision, Route};
use crate::request::Request;
use crate::response::Response;
use crate::role::Role;

/// One registered path: its access requirement plus the handler behind it.
struct Endpoint {
    route: Route,
    handler: BoxedHandler,
}

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::route`] call returns `self` so registrations chain:
///
/// ```rust,no_run
/// # use anteroom::{Request, Response, Role, Router};
/// # async fn public_page(_: Request) -> Response { Response::text("") }
/// # async fn admin_page(_: Request) -> Response { Response::text("") }
/// Router::new()
///     .route("/public", Role::Public, public_page)
///     .route("/admin",  Role::Admin,  admin_page);
/// ```
pub struct Router {
    table: MatchitRouter<Endpoint>,
}

impl Router {
    pub fn new() -> Self {
        Self { table: MatchitRouter::new() }
    }

    /// Register `handler` at `path`, gated behind `required_role`.
    ///
    /// Returns `self` for chaining.
    ///
    /// # Panics
    ///
    /// Panics if `path` is already registered or malformed. Route tables are
    /// program text, not input; a bad one should stop the process at startup.
    pub fn route(mut self, path: &str, required_role: Role, handler: impl Handler) -> Self {
        let endpoint = Endpoint {
            route: Route::new(path, required_role),
            handler: handler.into_boxed_handler(),
        };
        self.table
            .insert(path, endpoint)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Routes one request: exact path lookup, then the access gate, then the
    /// handler.
    ///
    /// Unknown path → `404`. Denied → `403` with the policy's reason as the
    /// body. Allowed → whatever the handler returns. Logging is not this
    /// function's job; the caller wraps it in
    /// [`middleware::trace`](crate::middleware::trace).
    pub async fn handle(&self, req: Request) -> Response {
        let Some((route, handler)) = self.lookup(req.path()) else {
            return Response::builder()
                .status(StatusCode::NOT_FOUND)
                .text("not found");
        };

        match policy::decide(&route, req.role()) {
            AccessDecision::Denied { reason } => Response::builder()
                .status(StatusCode::FORBIDDEN)
                .text(reason),
            AccessDecision::Allowed => handler.call(req).await,
        }
    }

    fn lookup(&self, path: &str) -> Option<(Route, BoxedHandler)> {
        let matched = self.table.at(path).ok()?;
        Some((matched.value.route.clone(), Arc::clone(&matched.value.handler)))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(path: &str, role: Role) -> Request {
        Request::new(http::Method::GET, path, role, "203.0.113.9:4711".parse().unwrap())
    }

    fn app() -> Router {
        Router::new()
            .route("/open",   Role::Public, |_req: Request| async { Response::text("open") })
            .route("/locked", Role::Admin,  |_req: Request| async { Response::text("locked") })
    }

    #[tokio::test]
    async fn unknown_path_is_404_for_any_role() {
        let app = app();
        for role in [Role::Public, Role::User, Role::Admin] {
            let res = app.handle(req("/missing", role)).await;
            assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn denied_request_carries_the_reason() {
        let res = app().handle(req("/locked", Role::User)).await;
        assert_eq!(res.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(res.body(), b"insufficient role: have USER, need ADMIN");
    }

    #[tokio::test]
    async fn allowed_request_reaches_the_handler() {
        let res = app().handle(req("/locked", Role::Admin)).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"locked");
    }

    #[tokio::test]
    async fn handler_sees_the_request_context() {
        let app = Router::new().route("/whoami", Role::Public, |req: Request| async move {
            format!("{} {} via {}", req.method(), req.path(), req.role())
        });
        let res = app.handle(req("/whoami", Role::User)).await;
        assert_eq!(res.body(), b"GET /whoami via USER");
    }

    #[tokio::test]
    async fn failing_handler_surfaces_as_500() {
        let app = Router::new().route("/flaky", Role::Public, |_req: Request| async {
            Err::<Response, _>(std::io::Error::other("backing store on fire"))
        });
        let res = app.handle(req("/flaky", Role::Public)).await;
        assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn duplicate_path_panics_at_registration() {
        let _ = Router::new()
            .route("/twice", Role::Public, |_req: Request| async { Response::text("a") })
            .route("/twice", Role::Public, |_req: Request| async { Response::text("b") });
    }
}
