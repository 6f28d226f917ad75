use std::sync::Arc;

use poem::Request;
use poem_openapi::param::Path;
use poem_openapi::payload::Json;
use poem_openapi::{OpenApi, Tags};

use crate::api::read_upload;
use crate::coordinators::{RosterCoordinator, SectionCoordinator};
use crate::errors::ApiError;
use crate::types::dto::common::{CsvUpload, MessageResponse};
use crate::types::dto::roster::{
    CsvRosterResponse, CsvRosterSuccess, RosterStudentsResponse, RosterStudentsSuccess, StudentIdsRequest,
    TransferStudentsRequest, TransferStudentsResponse, TransferSuccess, UnrosterStudentsResponse,
};
use crate::types::dto::section::{
    CreateSectionRequest, SectionCreatedResponse, SectionDetailResponse, SectionResponse, SectionsCreatedResponse,
    UpdateSectionRequest,
};
use crate::types::internal::context::RequestContext;
use crate::types::internal::roster::BatchOutcome;

/// Section management and roster endpoints
pub struct SectionApi {
    section_coordinator: Arc<SectionCoordinator>,
    roster_coordinator: Arc<RosterCoordinator>,
}

impl SectionApi {
    pub fn new(section_coordinator: Arc<SectionCoordinator>, roster_coordinator: Arc<RosterCoordinator>) -> Self {
        Self {
            section_coordinator,
            roster_coordinator,
        }
    }
}

#[derive(Tags)]
enum SectionTags {
    /// Class sections
    Sections,
    /// Assigning students to sections
    Rosters,
}

#[OpenApi]
impl SectionApi {
    /// Create a section
    #[oai(path = "/sections", method = "post", tag = "SectionTags::Sections")]
    async fn create_section(
        &self,
        req: &Request,
        body: Json<CreateSectionRequest>,
    ) -> Result<SectionCreatedResponse, ApiError> {
        let ctx = RequestContext::from_request(req);

        let section = self
            .section_coordinator
            .create_section(&ctx, body.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(SectionCreatedResponse::Created(Json(SectionResponse::from(section))))
    }

    /// List all sections
    #[oai(path = "/sections", method = "get", tag = "SectionTags::Sections")]
    async fn list_sections(&self, req: &Request) -> Result<Json<Vec<SectionResponse>>, ApiError> {
        self.list(req, false).await
    }

    /// List active sections
    #[oai(path = "/sections/active", method = "get", tag = "SectionTags::Sections")]
    async fn list_active_sections(&self, req: &Request) -> Result<Json<Vec<SectionResponse>>, ApiError> {
        self.list(req, true).await
    }

    /// Create sections from a CSV file (`sectionCode,gradeLevel,isActive`)
    ///
    /// All rows are created or none are.
    #[oai(path = "/sections/upload-csv", method = "post", tag = "SectionTags::Sections")]
    async fn upload_sections_csv(&self, req: &Request, upload: CsvUpload) -> Result<SectionsCreatedResponse, ApiError> {
        let ctx = RequestContext::from_request(req);
        let content = read_upload(upload).await?;

        let sections = self
            .section_coordinator
            .upload_sections_csv(&ctx, &content)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(SectionsCreatedResponse::Created(Json(
            sections.into_iter().map(SectionResponse::from).collect(),
        )))
    }

    /// Move students between sections
    #[oai(path = "/sections/transfer-students", method = "post", tag = "SectionTags::Rosters")]
    async fn transfer_students(
        &self,
        req: &Request,
        body: Json<TransferStudentsRequest>,
    ) -> Result<TransferStudentsResponse, ApiError> {
        let ctx = RequestContext::from_request(req);

        let outcome = self
            .roster_coordinator
            .transfer_students(&ctx, body.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(match outcome {
            BatchOutcome::Committed(entries) => TransferStudentsResponse::Transferred(Json(TransferSuccess::new(entries))),
            BatchOutcome::Rejected(rejections) => TransferStudentsResponse::Rejected(Json(rejections.into())),
        })
    }

    /// Get a section with its rostered students
    #[oai(path = "/sections/:id", method = "get", tag = "SectionTags::Sections")]
    async fn get_section(&self, req: &Request, id: Path<i32>) -> Result<Json<SectionDetailResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let section = self
            .section_coordinator
            .get_section(&ctx, id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(section.into()))
    }

    /// Update a section
    ///
    /// Sections with rostered students cannot be deactivated or change grade level.
    #[oai(path = "/sections/:id", method = "patch", tag = "SectionTags::Sections")]
    async fn update_section(
        &self,
        req: &Request,
        id: Path<i32>,
        body: Json<UpdateSectionRequest>,
    ) -> Result<Json<SectionResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let section = self
            .section_coordinator
            .update_section(&ctx, id.0, body.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(section.into()))
    }

    /// Delete a section without rostered students
    #[oai(path = "/sections/:id", method = "delete", tag = "SectionTags::Sections")]
    async fn delete_section(&self, req: &Request, id: Path<i32>) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        self.section_coordinator
            .delete_section(&ctx, id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse {
            message: format!("Section {} deleted", id.0),
        }))
    }

    /// Roster students into a section
    ///
    /// All-or-nothing: any duplicate, unknown, wrong-grade or already rostered id
    /// rejects the whole batch.
    #[oai(path = "/sections/:id/roster-students", method = "post", tag = "SectionTags::Rosters")]
    async fn roster_students(
        &self,
        req: &Request,
        id: Path<i32>,
        body: Json<StudentIdsRequest>,
    ) -> Result<RosterStudentsResponse, ApiError> {
        let ctx = RequestContext::from_request(req);

        let outcome = self
            .roster_coordinator
            .roster_students(&ctx, id.0, body.0.student_user_ids)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(match outcome {
            BatchOutcome::Committed(entries) => RosterStudentsResponse::Rostered(Json(RosterStudentsSuccess::new(entries))),
            BatchOutcome::Rejected(rejections) => RosterStudentsResponse::Rejected(Json(rejections.into())),
        })
    }

    /// Roster students listed in a CSV file (`email,sectionCode`)
    #[oai(
        path = "/sections/:id/roster-students-upload-csv",
        method = "post",
        tag = "SectionTags::Rosters"
    )]
    async fn roster_students_from_csv(
        &self,
        req: &Request,
        id: Path<i32>,
        upload: CsvUpload,
    ) -> Result<CsvRosterResponse, ApiError> {
        let ctx = RequestContext::from_request(req);
        let content = read_upload(upload).await?;

        let outcome = self
            .roster_coordinator
            .roster_students_from_csv(&ctx, id.0, &content)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(match outcome {
            BatchOutcome::Committed(entries) => CsvRosterResponse::Rostered(Json(CsvRosterSuccess::new(entries))),
            BatchOutcome::Rejected(rejections) => CsvRosterResponse::Rejected(Json(rejections.into())),
        })
    }

    /// Remove students from a section
    ///
    /// Ids that are not rostered in the section are skipped and reported.
    #[oai(path = "/sections/:id/unroster-students", method = "delete", tag = "SectionTags::Rosters")]
    async fn unroster_students(
        &self,
        req: &Request,
        id: Path<i32>,
        body: Json<StudentIdsRequest>,
    ) -> Result<Json<UnrosterStudentsResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let summary = self
            .roster_coordinator
            .unroster_students(&ctx, id.0, body.0.student_user_ids)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(summary.into()))
    }
}

impl SectionApi {
    async fn list(&self, req: &Request, active_only: bool) -> Result<Json<Vec<SectionResponse>>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let sections = self
            .section_coordinator
            .list_sections(&ctx, active_only)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(sections.into_iter().map(SectionResponse::from).collect()))
    }
}
