// API layer - HTTP endpoints
pub mod fitness;
pub mod health;
pub mod sections;
pub mod users;

use std::sync::Arc;

use poem::{Endpoint, EndpointExt, IntoResponse, Route};
use poem_openapi::error::{ParseMultipartError, ParseParamError, ParseRequestPayloadError};
use poem_openapi::OpenApiService;

pub use fitness::FitnessApi;
pub use health::HealthApi;
pub use sections::SectionApi;
pub use users::UserApi;

use crate::app_data::AppData;
use crate::coordinators::{
    FitnessCoordinator, PerformanceCoordinator, RosterCoordinator, SectionCoordinator, UserCoordinator,
};
use crate::errors::ApiError;
use crate::types::dto::common::CsvUpload;

/// Compose the API under `/api` and Swagger UI under `/swagger`
///
/// Payloads or parameters the framework cannot parse are answered with the same
/// 422 body the validators produce.
pub fn build_routes(app_data: Arc<AppData>, server_url: &str) -> impl Endpoint + use<> {
    let section_api = SectionApi::new(
        Arc::new(SectionCoordinator::new(app_data.clone())),
        Arc::new(RosterCoordinator::new(app_data.clone())),
    );
    let user_api = UserApi::new(Arc::new(UserCoordinator::new(app_data.clone())));
    let fitness_api = FitnessApi::new(
        Arc::new(FitnessCoordinator::new(app_data.clone())),
        Arc::new(PerformanceCoordinator::new(app_data)),
    );

    let api_service = OpenApiService::new(
        (HealthApi, section_api, user_api, fitness_api),
        "Schoolyard API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url);
    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .catch_error(|err: ParseRequestPayloadError| async move {
            ApiError::malformed_request(err.to_string()).into_response()
        })
        .catch_error(|err: ParseParamError| async move {
            ApiError::malformed_request(err.to_string()).into_response()
        })
        .catch_error(|err: ParseMultipartError| async move {
            ApiError::malformed_request(err.to_string()).into_response()
        })
}

/// Read an uploaded CSV file fully into memory
pub(crate) async fn read_upload(upload: CsvUpload) -> Result<Vec<u8>, ApiError> {
    upload
        .file
        .into_vec()
        .await
        .map_err(|e| ApiError::malformed_request(format!("Could not read uploaded file: {}", e)))
}
