use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::types::db::section_roster;
use crate::types::internal::roster::{CsvRosterRejections, CsvRosterRow, RosterRejections, UnrosterSummary};

/// Body shared by roster and unroster
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct StudentIdsRequest {
    pub student_user_ids: Vec<i32>,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct TransferStudentsRequest {
    pub from_section_id: i32,
    pub to_section_id: i32,
    pub student_user_ids: Vec<i32>,
}

#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct RosterEntryResponse {
    pub id: i32,
    pub student_user_id: i32,
    pub section_id: i32,
    pub created_at: i64,
}

impl From<section_roster::Model> for RosterEntryResponse {
    fn from(model: section_roster::Model) -> Self {
        Self {
            id: model.id,
            student_user_id: model.student_user_id,
            section_id: model.section_id,
            created_at: model.created_at,
        }
    }
}

fn entries(models: Vec<section_roster::Model>) -> Vec<RosterEntryResponse> {
    models.into_iter().map(RosterEntryResponse::from).collect()
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct RosterStudentsSuccess {
    pub rostered_students: Vec<RosterEntryResponse>,
    pub message: String,
}

impl RosterStudentsSuccess {
    pub fn new(models: Vec<section_roster::Model>) -> Self {
        let rostered_students = entries(models);
        Self {
            message: format!("{} student(s) added to the roster", rostered_students.len()),
            rostered_students,
        }
    }
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct RosterRejectionResponse {
    pub error: String,
    pub duplicate_ids: Vec<i32>,
    pub not_existing_students: Vec<i32>,
    pub incorrect_grade_level: Vec<i32>,
    pub already_rostered_students: Vec<i32>,
}

impl From<RosterRejections<i32>> for RosterRejectionResponse {
    fn from(rejections: RosterRejections<i32>) -> Self {
        Self {
            error: "Some students could not be rostered".to_string(),
            duplicate_ids: rejections.duplicates,
            not_existing_students: rejections.not_found,
            incorrect_grade_level: rejections.wrong_grade,
            already_rostered_students: rejections.already_rostered,
        }
    }
}

#[derive(ApiResponse)]
pub enum RosterStudentsResponse {
    /// Every student was rostered
    #[oai(status = 200)]
    Rostered(Json<RosterStudentsSuccess>),

    /// Nothing was rostered; every problem is listed
    #[oai(status = 400)]
    Rejected(Json<RosterRejectionResponse>),
}

#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct CsvRosterRowResponse {
    pub line: u64,
    pub email: String,
    pub section_code: String,
}

impl From<CsvRosterRow> for CsvRosterRowResponse {
    fn from(row: CsvRosterRow) -> Self {
        Self {
            line: row.line,
            email: row.email,
            section_code: row.section_code,
        }
    }
}

fn rows(rows: Vec<CsvRosterRow>) -> Vec<CsvRosterRowResponse> {
    rows.into_iter().map(CsvRosterRowResponse::from).collect()
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct CsvRosterSuccess {
    pub success: String,
    pub rostered_students: Vec<RosterEntryResponse>,
}

impl CsvRosterSuccess {
    pub fn new(models: Vec<section_roster::Model>) -> Self {
        Self {
            success: "File uploaded and processed successfully".to_string(),
            rostered_students: entries(models),
        }
    }
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct CsvRosterRejectionResponse {
    pub error: String,
    pub missing_email_section_code: Vec<CsvRosterRowResponse>,
    pub not_existing_sections: Vec<CsvRosterRowResponse>,
    pub mismatched_sections: Vec<CsvRosterRowResponse>,
    pub duplicate_ids: Vec<CsvRosterRowResponse>,
    pub not_existing_students: Vec<CsvRosterRowResponse>,
    pub incorrect_grade_level: Vec<CsvRosterRowResponse>,
    pub already_rostered_students: Vec<CsvRosterRowResponse>,
}

impl From<CsvRosterRejections> for CsvRosterRejectionResponse {
    fn from(rejections: CsvRosterRejections) -> Self {
        let CsvRosterRejections { screening, classifier } = rejections;
        Self {
            error: "Some students could not be rostered".to_string(),
            missing_email_section_code: rows(screening.missing_email_section_code),
            not_existing_sections: rows(screening.not_existing_sections),
            mismatched_sections: rows(screening.mismatched_sections),
            duplicate_ids: rows(classifier.duplicates),
            not_existing_students: rows(classifier.not_found),
            incorrect_grade_level: rows(classifier.wrong_grade),
            already_rostered_students: rows(classifier.already_rostered),
        }
    }
}

#[derive(ApiResponse)]
pub enum CsvRosterResponse {
    /// Every row was rostered
    #[oai(status = 201)]
    Rostered(Json<CsvRosterSuccess>),

    /// Nothing was rostered; every problem row is listed
    #[oai(status = 400)]
    Rejected(Json<CsvRosterRejectionResponse>),
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct UnrosterStudentsResponse {
    pub unrostered_students: Vec<RosterEntryResponse>,
    /// Requested ids with no roster entry in the section
    pub skipped_student_user_ids: Vec<i32>,
    pub message: String,
}

impl From<UnrosterSummary> for UnrosterStudentsResponse {
    fn from(summary: UnrosterSummary) -> Self {
        let unrostered_students = entries(summary.unrostered);
        Self {
            message: format!("{} student(s) removed from the roster", unrostered_students.len()),
            unrostered_students,
            skipped_student_user_ids: summary.skipped_student_user_ids,
        }
    }
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct TransferSuccess {
    pub transferred_students: Vec<RosterEntryResponse>,
    pub message: String,
}

impl TransferSuccess {
    pub fn new(models: Vec<section_roster::Model>) -> Self {
        let transferred_students = entries(models);
        Self {
            message: format!("{} student(s) transferred", transferred_students.len()),
            transferred_students,
        }
    }
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct TransferRejectionResponse {
    pub error: String,
    pub duplicate_ids: Vec<i32>,
    pub not_existing_students: Vec<i32>,
    pub not_in_source_section: Vec<i32>,
    pub incorrect_grade_level: Vec<i32>,
}

impl From<RosterRejections<i32>> for TransferRejectionResponse {
    fn from(rejections: RosterRejections<i32>) -> Self {
        Self {
            error: "Some students could not be transferred".to_string(),
            duplicate_ids: rejections.duplicates,
            not_existing_students: rejections.not_found,
            not_in_source_section: rejections.not_in_source_section,
            incorrect_grade_level: rejections.wrong_grade,
        }
    }
}

#[derive(ApiResponse)]
pub enum TransferStudentsResponse {
    #[oai(status = 200)]
    Transferred(Json<TransferSuccess>),

    #[oai(status = 400)]
    Rejected(Json<TransferRejectionResponse>),
}
