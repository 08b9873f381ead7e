//! Root status endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Status response
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /
async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "library catalog API running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Status routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn status_reports_running() {
        let Json(body) = status().await;
        assert_eq!(body.status, "library catalog API running");
    }
}
