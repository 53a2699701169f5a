//! The application's route table and page handlers.
//!
//! Three pages, three tiers. The bodies say which tier served them; the
//! router's access gate is what makes the labels true.

use crate::request::Request;
use crate::response::Response;
use crate::role::Role;
use crate::router::Router;

/// Builds the application router.
///
/// | Path      | Required role |
/// |-----------|---------------|
/// | `/public` | `Public`      |
/// | `/hello`  | `User`        |
/// | `/admin`  | `Admin`       |
pub fn app() -> Router {
    Router::new()
        .route("/public", Role::Public, public_page)
        .route("/hello",  Role::User,   hello)
        .route("/admin",  Role::Admin,  admin_page)
}

/// GET /public — open to everyone, header or not.
pub async fn public_page(_req: Request) -> Response {
    Response::html("<h1>This is a Public Page! (No authentication required)</h1>")
}

/// GET /hello — requires `User` or better.
pub async fn hello(_req: Request) -> Response {
    Response::html("<h1>Hello from Spring Controller! (USER access)</h1>")
}

/// GET /admin — requires `Admin`.
pub async fn admin_page(_req: Request) -> Response {
    Response::html("<h1>Welcome to Admin Page! (ADMIN access)</h1>")
}

#[cfg(test)]
mod tests {
    use http::{Method, StatusCode};

    use super::*;

    async fn get(path: &str, role: Role) -> Response {
        app()
            .handle(Request::new(Method::GET, path, role, "127.0.0.1:6000".parse().unwrap()))
            .await
    }

    #[tokio::test]
    async fn public_page_serves_anonymous_callers() {
        let res = get("/public", Role::Public).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(
            res.body(),
            b"<h1>This is a Public Page! (No authentication required)</h1>"
        );
    }

    #[tokio::test]
    async fn hello_denies_public_with_a_reason() {
        let res = get("/hello", Role::Public).await;
        assert_eq!(res.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(res.body(), b"insufficient role: have PUBLIC, need USER");
    }

    #[tokio::test]
    async fn hello_serves_users() {
        let res = get("/hello", Role::User).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"<h1>Hello from Spring Controller! (USER access)</h1>");
    }

    #[tokio::test]
    async fn admin_page_denies_users() {
        let res = get("/admin", Role::User).await;
        assert_eq!(res.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_page_serves_admins() {
        let res = get("/admin", Role::Admin).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"<h1>Welcome to Admin Page! (ADMIN access)</h1>");
    }

    #[tokio::test]
    async fn unknown_path_is_404_even_for_admins() {
        let res = get("/unknown", Role::Admin).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }
}
