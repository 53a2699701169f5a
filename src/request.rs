//! Per-request context.

use std::net::SocketAddr;
use std::time::Instant;

use http::Method;

use crate::role::Role;

/// Everything a handler (or the policy gate in front of it) may need to know
/// about one request.
///
/// Built by the server once the boundary checks pass — by then the caller's
/// role is a parsed [`Role`], never a raw header string. Owned by the task
/// handling the request and dropped when the response is written; nothing
/// here outlives the request.
pub struct Request {
    method: Method,
    path: String,
    role: Role,
    remote_addr: SocketAddr,
    received_at: Instant,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>, role: Role, remote_addr: SocketAddr) -> Self {
        Self {
            method,
            path: path.into(),
            role,
            remote_addr,
            received_at: Instant::now(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The caller's pre-resolved privilege level.
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    /// Instant this context was created, for handlers that want their own
    /// elapsed-time measurements (the request logger keeps its own clock).
    pub fn received_at(&self) -> Instant {
        self.received_at
    }
}
