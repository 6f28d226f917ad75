// Database entities - SeaORM models
pub mod admin_detail;
pub mod performance_grade;
pub mod performance_type;
pub mod section;
pub mod section_roster;
pub mod student_anthro;
pub mod student_detail;
pub mod teacher_detail;
pub mod user;
