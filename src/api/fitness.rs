use std::sync::Arc;

use poem::Request;
use poem_openapi::param::Path;
use poem_openapi::payload::Json;
use poem_openapi::{OpenApi, Tags};

use crate::coordinators::{FitnessCoordinator, PerformanceCoordinator};
use crate::errors::ApiError;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::fitness::{
    AnthroCreatedResponse, AnthroResponse, AssignPerformanceTestRequest, AssignedPerformanceTestResponse,
    CreateAnthroRequest, CreatePerformanceGradeRequest, CreatePerformanceTypeRequest, PerformanceGradeCreatedResponse,
    PerformanceGradeResponse, PerformanceTestAssignedResponse, PerformanceTypeCreatedResponse, PerformanceTypeResponse,
    UpdateAnthroRequest, UpdatePerformanceGradeRequest, UpdatePerformanceTypeRequest,
};
use crate::types::internal::context::RequestContext;

/// Fitness metric endpoints
pub struct FitnessApi {
    fitness_coordinator: Arc<FitnessCoordinator>,
    performance_coordinator: Arc<PerformanceCoordinator>,
}

impl FitnessApi {
    pub fn new(
        fitness_coordinator: Arc<FitnessCoordinator>,
        performance_coordinator: Arc<PerformanceCoordinator>,
    ) -> Self {
        Self {
            fitness_coordinator,
            performance_coordinator,
        }
    }
}

#[derive(Tags)]
enum FitnessTags {
    /// Height and weight measurements
    Anthropometrics,
    /// Performance types, assigned tests and grades
    PerformanceTests,
}

#[OpenApi(prefix_path = "/fitness-metrics")]
impl FitnessApi {
    /// Record a measurement taken by a teacher or admin
    #[oai(path = "/anthros", method = "post", tag = "FitnessTags::Anthropometrics")]
    async fn record_anthro(&self, req: &Request, body: Json<CreateAnthroRequest>) -> Result<AnthroCreatedResponse, ApiError> {
        let ctx = RequestContext::from_request(req);

        let record = self
            .fitness_coordinator
            .record_anthro(&ctx, body.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(AnthroCreatedResponse::Created(Json(record.into())))
    }

    /// Measurements of one student, newest first
    #[oai(path = "/anthros/student/:id", method = "get", tag = "FitnessTags::Anthropometrics")]
    async fn list_student_anthros(&self, req: &Request, id: Path<i32>) -> Result<Json<Vec<AnthroResponse>>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let records = self
            .fitness_coordinator
            .list_student_anthros(&ctx, id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(records.into_iter().map(AnthroResponse::from).collect()))
    }

    #[oai(path = "/anthros/:id", method = "get", tag = "FitnessTags::Anthropometrics")]
    async fn get_anthro(&self, req: &Request, id: Path<i32>) -> Result<Json<AnthroResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let record = self
            .fitness_coordinator
            .get_anthro(&ctx, id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(record.into()))
    }

    #[oai(path = "/anthros/:id", method = "patch", tag = "FitnessTags::Anthropometrics")]
    async fn update_anthro(
        &self,
        req: &Request,
        id: Path<i32>,
        body: Json<UpdateAnthroRequest>,
    ) -> Result<Json<AnthroResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let record = self
            .fitness_coordinator
            .update_anthro(&ctx, id.0, body.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(record.into()))
    }

    #[oai(path = "/anthros/:id", method = "delete", tag = "FitnessTags::Anthropometrics")]
    async fn delete_anthro(&self, req: &Request, id: Path<i32>) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        self.fitness_coordinator
            .delete_anthro(&ctx, id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse {
            message: format!("Anthropometric record {} deleted", id.0),
        }))
    }

    #[oai(path = "/performance-types", method = "post", tag = "FitnessTags::PerformanceTests")]
    async fn create_performance_type(
        &self,
        req: &Request,
        body: Json<CreatePerformanceTypeRequest>,
    ) -> Result<PerformanceTypeCreatedResponse, ApiError> {
        let ctx = RequestContext::from_request(req);

        let created = self
            .performance_coordinator
            .create_performance_type(&ctx, body.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(PerformanceTypeCreatedResponse::Created(Json(created.into())))
    }

    /// All performance types, by name
    #[oai(path = "/performance-types", method = "get", tag = "FitnessTags::PerformanceTests")]
    async fn list_performance_types(&self, req: &Request) -> Result<Json<Vec<PerformanceTypeResponse>>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let types = self
            .performance_coordinator
            .list_performance_types(&ctx)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(types.into_iter().map(PerformanceTypeResponse::from).collect()))
    }

    #[oai(path = "/performance-types/:id", method = "patch", tag = "FitnessTags::PerformanceTests")]
    async fn update_performance_type(
        &self,
        req: &Request,
        id: Path<i32>,
        body: Json<UpdatePerformanceTypeRequest>,
    ) -> Result<Json<PerformanceTypeResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let updated = self
            .performance_coordinator
            .update_performance_type(&ctx, id.0, body.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(updated.into()))
    }

    /// Delete a type together with its assigned tests and grades
    #[oai(path = "/performance-types/:id", method = "delete", tag = "FitnessTags::PerformanceTests")]
    async fn delete_performance_type(&self, req: &Request, id: Path<i32>) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        self.performance_coordinator
            .delete_performance_type(&ctx, id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse {
            message: format!("Performance type {} deleted", id.0),
        }))
    }

    /// Assign a performance test to a student; once per type and student
    #[oai(path = "/performance-tests", method = "post", tag = "FitnessTags::PerformanceTests")]
    async fn assign_performance_test(
        &self,
        req: &Request,
        body: Json<AssignPerformanceTestRequest>,
    ) -> Result<PerformanceTestAssignedResponse, ApiError> {
        let ctx = RequestContext::from_request(req);

        let assignment = self
            .performance_coordinator
            .assign_performance_test(&ctx, body.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(PerformanceTestAssignedResponse::Created(Json(assignment.into())))
    }

    #[oai(path = "/performance-tests/student/:id", method = "get", tag = "FitnessTags::PerformanceTests")]
    async fn list_student_performance_tests(
        &self,
        req: &Request,
        id: Path<i32>,
    ) -> Result<Json<Vec<AssignedPerformanceTestResponse>>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let assignments = self
            .performance_coordinator
            .list_student_performance_tests(&ctx, id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(assignments.into_iter().map(AssignedPerformanceTestResponse::from).collect()))
    }

    #[oai(path = "/performance-tests/:id", method = "delete", tag = "FitnessTags::PerformanceTests")]
    async fn delete_performance_test(&self, req: &Request, id: Path<i32>) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        self.performance_coordinator
            .delete_performance_test(&ctx, id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse {
            message: format!("Performance test assignment {} deleted", id.0),
        }))
    }

    #[oai(path = "/performance-grades", method = "post", tag = "FitnessTags::PerformanceTests")]
    async fn record_performance_grade(
        &self,
        req: &Request,
        body: Json<CreatePerformanceGradeRequest>,
    ) -> Result<PerformanceGradeCreatedResponse, ApiError> {
        let ctx = RequestContext::from_request(req);

        let grade = self
            .performance_coordinator
            .record_performance_grade(&ctx, body.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(PerformanceGradeCreatedResponse::Created(Json(grade.into())))
    }

    /// Grades of one student, newest first
    #[oai(path = "/performance-grades/student/:id", method = "get", tag = "FitnessTags::PerformanceTests")]
    async fn list_student_performance_grades(
        &self,
        req: &Request,
        id: Path<i32>,
    ) -> Result<Json<Vec<PerformanceGradeResponse>>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let grades = self
            .performance_coordinator
            .list_student_performance_grades(&ctx, id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(grades.into_iter().map(PerformanceGradeResponse::from).collect()))
    }

    #[oai(path = "/performance-grades/:id", method = "get", tag = "FitnessTags::PerformanceTests")]
    async fn get_performance_grade(&self, req: &Request, id: Path<i32>) -> Result<Json<PerformanceGradeResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let grade = self
            .performance_coordinator
            .get_performance_grade(&ctx, id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(grade.into()))
    }

    #[oai(path = "/performance-grades/:id", method = "patch", tag = "FitnessTags::PerformanceTests")]
    async fn update_performance_grade(
        &self,
        req: &Request,
        id: Path<i32>,
        body: Json<UpdatePerformanceGradeRequest>,
    ) -> Result<Json<PerformanceGradeResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let grade = self
            .performance_coordinator
            .update_performance_grade(&ctx, id.0, body.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(grade.into()))
    }

    #[oai(path = "/performance-grades/:id", method = "delete", tag = "FitnessTags::PerformanceTests")]
    async fn delete_performance_grade(&self, req: &Request, id: Path<i32>) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        self.performance_coordinator
            .delete_performance_grade(&ctx, id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse {
            message: format!("Performance grade {} deleted", id.0),
        }))
    }
}
