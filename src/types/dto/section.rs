use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::types::db::section;
use crate::types::internal::section::{RosteredStudent, SectionWithStudents};

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct CreateSectionRequest {
    /// Four digits, a dash, two digits (e.g. `2024-01`)
    pub section_code: Option<String>,
    /// One of `6`, `7`, `8`, `9`, `10-11-12`
    pub grade_level: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Object, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
pub struct UpdateSectionRequest {
    pub section_code: Option<String>,
    pub grade_level: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct SectionResponse {
    pub id: i32,
    pub section_code: String,
    pub grade_level: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<section::Model> for SectionResponse {
    fn from(model: section::Model) -> Self {
        Self {
            id: model.id,
            section_code: model.section_code,
            grade_level: model.grade_level.as_str().to_string(),
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct SectionStudentResponse {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub grad_year: Option<i32>,
}

impl From<RosteredStudent> for SectionStudentResponse {
    fn from(student: RosteredStudent) -> Self {
        Self {
            id: student.user.id,
            email: student.user.email,
            first_name: student.user.first_name,
            last_name: student.user.last_name,
            grad_year: student.grad_year,
        }
    }
}

/// Section with its current roster
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct SectionDetailResponse {
    pub id: i32,
    pub section_code: String,
    pub grade_level: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub students: Vec<SectionStudentResponse>,
}

impl From<SectionWithStudents> for SectionDetailResponse {
    fn from(value: SectionWithStudents) -> Self {
        let section = value.section;
        Self {
            id: section.id,
            section_code: section.section_code,
            grade_level: section.grade_level.as_str().to_string(),
            is_active: section.is_active,
            created_at: section.created_at,
            updated_at: section.updated_at,
            students: value.students.into_iter().map(SectionStudentResponse::from).collect(),
        }
    }
}

#[derive(ApiResponse)]
pub enum SectionCreatedResponse {
    #[oai(status = 201)]
    Created(Json<SectionResponse>),
}

#[derive(ApiResponse)]
pub enum SectionsCreatedResponse {
    /// Every row in the file became a section
    #[oai(status = 201)]
    Created(Json<Vec<SectionResponse>>),
}
