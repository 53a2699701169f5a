//! # anteroom
//!
//! A minimal role-gated HTTP service core. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! Whatever sits in front of this service — a session layer, an auth proxy,
//! a gateway — authenticates the caller and forwards the resolved privilege
//! level in the `x-role` header. anteroom does not authenticate, by design.
//! The authenticator does authenticator things. This crate does exactly one
//! thing with the result: authorize.
//!
//! What anteroom owns — the part that changes between applications:
//!
//! - A static route table, built once at startup, immutable and lock-free
//!   after that. Exact-match lookup, unique paths enforced at registration.
//! - A totally ordered [`Role`] ladder (`Public < User < Admin`) and a pure
//!   [`decide`] function gating every route.
//! - One structured log line per request — remote address, method, path,
//!   status, latency — on every exit path, via [`middleware::trace`].
//! - Graceful shutdown: SIGTERM / Ctrl-C, drains in-flight requests.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use anteroom::{Request, Response, Role, Router, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .route("/public", Role::Public, public_page)
//!         .route("/admin",  Role::Admin,  admin_page);
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn public_page(_req: Request) -> Response {
//!     Response::html("<h1>open to everyone</h1>")
//! }
//!
//! async fn admin_page(_req: Request) -> Response {
//!     Response::html("<h1>admins only</h1>")
//! }
//! ```
//!
//! A caller with `x-role: USER` gets `403 insufficient role: have USER, need
//! ADMIN` from `/admin`; no header at all means an anonymous `Public` caller.
//! An `x-role` value naming no known role is a `400` before routing happens.

mod error;
mod handler;
mod policy;
mod request;
mod response;
mod role;
mod router;
mod server;

pub mod middleware;
pub mod routes;

pub use error::Error;
pub use handler::Handler;
pub use policy::{AccessDecision, Route, decide};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use role::{InvalidRoleError, ROLE_HEADER, Role};
pub use router::Router;
pub use server::Server;
