use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::types::db::{admin_detail, student_detail, teacher_detail};
use crate::types::internal::user::UserRecord;

#[derive(Object, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
pub struct StudentDetailsInput {
    pub grad_year: Option<i32>,
}

#[derive(Object, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
pub struct StaffDetailsInput {
    pub years_exp: Option<i32>,
    pub bio: Option<String>,
}

/// Registration body; every field is checked together so all problems are reported at once
#[derive(Object, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub email: Option<String>,
    #[oai(write_only)]
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// `YYYY-MM-DD`
    pub birth_date: Option<String>,
    pub gender_identity: Option<String>,
    pub pronouns: Option<String>,
    /// `student`, `teacher` or `admin`
    pub user_type: Option<String>,
    pub photo_url: Option<String>,
    pub student_details: Option<StudentDetailsInput>,
    pub teacher_details: Option<StaffDetailsInput>,
    pub admin_details: Option<StaffDetailsInput>,
}

#[derive(Object, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    #[oai(write_only)]
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub gender_identity: Option<String>,
    pub pronouns: Option<String>,
    /// Must match the stored type when given
    pub user_type: Option<String>,
    pub photo_url: Option<String>,
    pub is_archived: Option<bool>,
    pub student_details: Option<StudentDetailsInput>,
    pub teacher_details: Option<StaffDetailsInput>,
    pub admin_details: Option<StaffDetailsInput>,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct StudentDetailsResponse {
    pub grad_year: i32,
}

impl From<student_detail::Model> for StudentDetailsResponse {
    fn from(model: student_detail::Model) -> Self {
        Self { grad_year: model.grad_year }
    }
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct StaffDetailsResponse {
    pub years_exp: Option<i32>,
    pub bio: Option<String>,
}

impl From<teacher_detail::Model> for StaffDetailsResponse {
    fn from(model: teacher_detail::Model) -> Self {
        Self {
            years_exp: model.years_exp,
            bio: model.bio,
        }
    }
}

impl From<admin_detail::Model> for StaffDetailsResponse {
    fn from(model: admin_detail::Model) -> Self {
        Self {
            years_exp: model.years_exp,
            bio: model.bio,
        }
    }
}

/// User representation; the password hash is never included
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub gender_identity: Option<String>,
    pub pronouns: Option<String>,
    pub user_type: String,
    pub photo_url: Option<String>,
    pub is_archived: bool,
    pub date_archived: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub student_details: Option<StudentDetailsResponse>,
    pub teacher_details: Option<StaffDetailsResponse>,
    pub admin_details: Option<StaffDetailsResponse>,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        let user = record.user;
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            birth_date: user.birth_date.format("%Y-%m-%d").to_string(),
            gender_identity: user.gender_identity,
            pronouns: user.pronouns,
            user_type: user.user_type.as_str().to_string(),
            photo_url: user.photo_url,
            is_archived: user.is_archived,
            date_archived: user.date_archived.map(|d| d.format("%Y-%m-%d").to_string()),
            created_at: user.created_at,
            updated_at: user.updated_at,
            student_details: record.student_details.map(StudentDetailsResponse::from),
            teacher_details: record.teacher_details.map(StaffDetailsResponse::from),
            admin_details: record.admin_details.map(StaffDetailsResponse::from),
        }
    }
}

#[derive(ApiResponse)]
pub enum UserCreatedResponse {
    #[oai(status = 201)]
    Created(Json<UserResponse>),
}

#[derive(ApiResponse)]
pub enum UsersCreatedResponse {
    /// Every row in the file became a user
    #[oai(status = 201)]
    Created(Json<Vec<UserResponse>>),
}
