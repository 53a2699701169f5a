//! Middleware layer.
//!
//! Cross-cutting concerns that wrap request handling. There is no implicit
//! registration mechanism: the server's dispatch composes middleware and
//! router as ordinary functions, so what runs per request is visible in one
//! place ([`server`](crate::Server)).
//!
//! Currently one middleware exists:
//! - [`trace`] — the request logger: one structured completion event per
//!   request with remote address, method, path, status, and latency.

pub mod trace;
