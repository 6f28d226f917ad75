use thiserror::Error;

#[derive(Error, Debug)]
pub enum SectionError {
    #[error("Section not found: {section_id}")]
    NotFound { section_id: i32 },

    #[error("Section code already exists: {section_code}")]
    DuplicateCode { section_code: String },

    #[error("Section codes already exist: {}", .section_codes.join(", "))]
    DuplicateCodes { section_codes: Vec<String> },

    #[error("Section {section_id} has {student_count} rostered student(s)")]
    HasRosteredStudents { section_id: i32, student_count: u64 },

    #[error("Section {section_id} is not active")]
    Inactive { section_id: i32 },
}
