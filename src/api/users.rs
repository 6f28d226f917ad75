use std::sync::Arc;

use poem::Request;
use poem_openapi::param::Path;
use poem_openapi::payload::Json;
use poem_openapi::{OpenApi, Tags};

use crate::api::read_upload;
use crate::coordinators::UserCoordinator;
use crate::errors::ApiError;
use crate::types::db::user::UserType;
use crate::types::dto::common::{CsvUpload, MessageResponse};
use crate::types::dto::user::{
    RegisterUserRequest, UpdateUserRequest, UserCreatedResponse, UserResponse, UsersCreatedResponse,
};
use crate::types::internal::context::RequestContext;
use crate::types::internal::user::UserFilter;

/// User registration and management endpoints
pub struct UserApi {
    user_coordinator: Arc<UserCoordinator>,
}

impl UserApi {
    pub fn new(user_coordinator: Arc<UserCoordinator>) -> Self {
        Self { user_coordinator }
    }
}

#[derive(Tags)]
enum UserTags {
    /// Students, teachers and admins
    Users,
}

#[OpenApi]
impl UserApi {
    /// Register a user with its role details
    #[oai(path = "/users/register", method = "post", tag = "UserTags::Users")]
    async fn register_user(&self, req: &Request, body: Json<RegisterUserRequest>) -> Result<UserCreatedResponse, ApiError> {
        let ctx = RequestContext::from_request(req);

        let record = self
            .user_coordinator
            .register_user(&ctx, body.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(UserCreatedResponse::Created(Json(record.into())))
    }

    /// Register users from a CSV file
    ///
    /// Columns: `email,password,firstName,lastName,birthDate,userType` plus optional
    /// `genderIdentity,pronouns,photoUrl,gradYear,yearsExp,bio`. All rows are created or none are.
    #[oai(path = "/users/register-upload-csv", method = "post", tag = "UserTags::Users")]
    async fn register_users_from_csv(&self, req: &Request, upload: CsvUpload) -> Result<UsersCreatedResponse, ApiError> {
        let ctx = RequestContext::from_request(req);
        let content = read_upload(upload).await?;

        let records = self
            .user_coordinator
            .register_users_from_csv(&ctx, &content)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(UsersCreatedResponse::Created(Json(
            records.into_iter().map(UserResponse::from).collect(),
        )))
    }

    #[oai(path = "/users", method = "get", tag = "UserTags::Users")]
    async fn list_users(&self, req: &Request) -> Result<Json<Vec<UserResponse>>, ApiError> {
        self.list(req, UserFilter::all()).await
    }

    #[oai(path = "/users/active", method = "get", tag = "UserTags::Users")]
    async fn list_active_users(&self, req: &Request) -> Result<Json<Vec<UserResponse>>, ApiError> {
        self.list(req, UserFilter::all().active()).await
    }

    #[oai(path = "/users/archived", method = "get", tag = "UserTags::Users")]
    async fn list_archived_users(&self, req: &Request) -> Result<Json<Vec<UserResponse>>, ApiError> {
        self.list(req, UserFilter::all().archived()).await
    }

    #[oai(path = "/users/student", method = "get", tag = "UserTags::Users")]
    async fn list_students(&self, req: &Request) -> Result<Json<Vec<UserResponse>>, ApiError> {
        self.list(req, UserFilter::of_type(UserType::Student)).await
    }

    #[oai(path = "/users/student/active", method = "get", tag = "UserTags::Users")]
    async fn list_active_students(&self, req: &Request) -> Result<Json<Vec<UserResponse>>, ApiError> {
        self.list(req, UserFilter::of_type(UserType::Student).active()).await
    }

    #[oai(path = "/users/teacher", method = "get", tag = "UserTags::Users")]
    async fn list_teachers(&self, req: &Request) -> Result<Json<Vec<UserResponse>>, ApiError> {
        self.list(req, UserFilter::of_type(UserType::Teacher)).await
    }

    #[oai(path = "/users/teacher/active", method = "get", tag = "UserTags::Users")]
    async fn list_active_teachers(&self, req: &Request) -> Result<Json<Vec<UserResponse>>, ApiError> {
        self.list(req, UserFilter::of_type(UserType::Teacher).active()).await
    }

    #[oai(path = "/users/admin", method = "get", tag = "UserTags::Users")]
    async fn list_admins(&self, req: &Request) -> Result<Json<Vec<UserResponse>>, ApiError> {
        self.list(req, UserFilter::of_type(UserType::Admin)).await
    }

    #[oai(path = "/users/admin/active", method = "get", tag = "UserTags::Users")]
    async fn list_active_admins(&self, req: &Request) -> Result<Json<Vec<UserResponse>>, ApiError> {
        self.list(req, UserFilter::of_type(UserType::Admin).active()).await
    }

    /// Active teachers and admins together
    #[oai(path = "/users/teacher-admin/active", method = "get", tag = "UserTags::Users")]
    async fn list_active_staff(&self, req: &Request) -> Result<Json<Vec<UserResponse>>, ApiError> {
        self.list(req, UserFilter::staff().active()).await
    }

    #[oai(path = "/users/:id", method = "get", tag = "UserTags::Users")]
    async fn get_user(&self, req: &Request, id: Path<i32>) -> Result<Json<UserResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let record = self
            .user_coordinator
            .get_user(&ctx, id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(record.into()))
    }

    /// Update a user; `isArchived: true` archives, `false` restores
    #[oai(path = "/users/:id", method = "patch", tag = "UserTags::Users")]
    async fn update_user(
        &self,
        req: &Request,
        id: Path<i32>,
        body: Json<UpdateUserRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let record = self
            .user_coordinator
            .update_user(&ctx, id.0, body.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(record.into()))
    }

    /// Permanently delete a user; rostered students must be unrostered first
    #[oai(path = "/users/:id", method = "delete", tag = "UserTags::Users")]
    async fn delete_user(&self, req: &Request, id: Path<i32>) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);

        self.user_coordinator
            .delete_user(&ctx, id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse {
            message: format!("User {} deleted", id.0),
        }))
    }
}

impl UserApi {
    async fn list(&self, req: &Request, filter: UserFilter) -> Result<Json<Vec<UserResponse>>, ApiError> {
        let ctx = RequestContext::from_request(req);

        let records = self
            .user_coordinator
            .list_users(&ctx, filter)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(records.into_iter().map(UserResponse::from).collect()))
    }
}
