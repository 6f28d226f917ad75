use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::types::db::{assigned_performance_test, performance_grade, performance_type, student_anthro};

#[derive(Object, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
pub struct CreateAnthroRequest {
    pub teacher_user_id: Option<i32>,
    pub student_user_id: Option<i32>,
    /// `YYYY-MM-DD`
    pub date_recorded: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(Object, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
pub struct UpdateAnthroRequest {
    pub date_recorded: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct AnthroResponse {
    pub id: i32,
    pub teacher_user_id: i32,
    pub student_user_id: i32,
    pub date_recorded: String,
    pub height: f64,
    pub weight: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<student_anthro::Model> for AnthroResponse {
    fn from(model: student_anthro::Model) -> Self {
        Self {
            id: model.id,
            teacher_user_id: model.teacher_user_id,
            student_user_id: model.student_user_id,
            date_recorded: model.date_recorded.format("%Y-%m-%d").to_string(),
            height: model.height,
            weight: model.weight,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(ApiResponse)]
pub enum AnthroCreatedResponse {
    #[oai(status = 201)]
    Created(Json<AnthroResponse>),
}

#[derive(Object, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
pub struct CreatePerformanceTypeRequest {
    pub name: Option<String>,
    /// e.g. `seconds`, `reps`
    pub unit: Option<String>,
}

/// An empty `unit` clears it
#[derive(Object, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
pub struct UpdatePerformanceTypeRequest {
    pub name: Option<String>,
    pub unit: Option<String>,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct PerformanceTypeResponse {
    pub id: i32,
    pub name: String,
    pub unit: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<performance_type::Model> for PerformanceTypeResponse {
    fn from(model: performance_type::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            unit: model.unit,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(ApiResponse)]
pub enum PerformanceTypeCreatedResponse {
    #[oai(status = 201)]
    Created(Json<PerformanceTypeResponse>),
}

#[derive(Object, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
pub struct AssignPerformanceTestRequest {
    pub performance_type_id: Option<i32>,
    pub teacher_user_id: Option<i32>,
    pub student_user_id: Option<i32>,
    /// `YYYY-MM-DD`, optional
    pub date_assigned: Option<String>,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct AssignedPerformanceTestResponse {
    pub id: i32,
    pub performance_type_id: i32,
    pub teacher_user_id: i32,
    pub student_user_id: i32,
    pub date_assigned: Option<String>,
    pub created_at: i64,
}

impl From<assigned_performance_test::Model> for AssignedPerformanceTestResponse {
    fn from(model: assigned_performance_test::Model) -> Self {
        Self {
            id: model.id,
            performance_type_id: model.performance_type_id,
            teacher_user_id: model.teacher_user_id,
            student_user_id: model.student_user_id,
            date_assigned: model.date_assigned.map(|d| d.format("%Y-%m-%d").to_string()),
            created_at: model.created_at,
        }
    }
}

#[derive(ApiResponse)]
pub enum PerformanceTestAssignedResponse {
    #[oai(status = 201)]
    Created(Json<AssignedPerformanceTestResponse>),
}

#[derive(Object, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
pub struct CreatePerformanceGradeRequest {
    pub performance_type_id: Option<i32>,
    pub teacher_user_id: Option<i32>,
    pub student_user_id: Option<i32>,
    /// `YYYY-MM-DD`
    pub date_taken: Option<String>,
    pub grade: Option<f64>,
}

#[derive(Object, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
pub struct UpdatePerformanceGradeRequest {
    pub date_taken: Option<String>,
    pub grade: Option<f64>,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct PerformanceGradeResponse {
    pub id: i32,
    pub performance_type_id: i32,
    pub teacher_user_id: i32,
    pub student_user_id: i32,
    pub date_taken: String,
    pub grade: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<performance_grade::Model> for PerformanceGradeResponse {
    fn from(model: performance_grade::Model) -> Self {
        Self {
            id: model.id,
            performance_type_id: model.performance_type_id,
            teacher_user_id: model.teacher_user_id,
            student_user_id: model.student_user_id,
            date_taken: model.date_taken.format("%Y-%m-%d").to_string(),
            grade: model.grade,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(ApiResponse)]
pub enum PerformanceGradeCreatedResponse {
    #[oai(status = 201)]
    Created(Json<PerformanceGradeResponse>),
}
