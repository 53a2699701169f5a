//! anteroom demo binary — three pages, three tiers.
//!
//! Run with:
//!   RUST_LOG=info cargo run
//!
//! Try:
//!   curl http://localhost:3000/public
//!   curl http://localhost:3000/hello
//!   curl -H 'x-role: USER'  http://localhost:3000/hello
//!   curl -H 'x-role: USER'  http://localhost:3000/admin
//!   curl -H 'x-role: ADMIN' http://localhost:3000/admin

use anteroom::{Server, routes};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("ANTEROOM_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_owned());

    Server::bind(&addr)
        .serve(routes::app())
        .await
        .expect("server error");
}
