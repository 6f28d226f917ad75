use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found: {user_id}")]
    NotFound { user_id: i32 },

    #[error("Teacher not found: {user_id}")]
    TeacherNotFound { user_id: i32 },

    #[error("Student not found: {user_id}")]
    StudentNotFound { user_id: i32 },

    #[error("Email already in use: {email}")]
    EmailTaken { email: String },

    #[error("Emails already in use: {}", .emails.join(", "))]
    DuplicateEmails { emails: Vec<String> },

    #[error("Student {user_id} is rostered in section {section_id}")]
    Rostered { user_id: i32, section_id: i32 },
}
