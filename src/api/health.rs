use chrono::{SecondsFormat, Utc};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::types::dto::common::HealthResponse;

/// Liveness check
pub struct HealthApi;

#[derive(Tags)]
enum HealthTags {
    Health,
}

#[OpenApi]
impl HealthApi {
    /// Report that the service is up
    #[oai(path = "/health", method = "get", tag = "HealthTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }
}
