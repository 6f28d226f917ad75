use crate::types::db::section::{self, GradeLevel};
use crate::types::db::user;

/// Validated input for a new section
#[derive(Debug, Clone, PartialEq)]
pub struct NewSection {
    pub section_code: String,
    pub grade_level: GradeLevel,
    pub is_active: bool,
}

/// Validated partial update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionChanges {
    pub section_code: Option<String>,
    pub grade_level: Option<GradeLevel>,
    pub is_active: Option<bool>,
}

/// Section resolved by a guard together with its roster size
#[derive(Debug, Clone)]
pub struct SectionRosterState {
    pub section: section::Model,
    pub rostered_count: u64,
}

impl SectionRosterState {
    pub fn has_rostered_students(&self) -> bool {
        self.rostered_count > 0
    }
}

#[derive(Debug, Clone)]
pub struct RosteredStudent {
    pub user: user::Model,
    pub grad_year: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct SectionWithStudents {
    pub section: section::Model,
    pub students: Vec<RosteredStudent>,
}
