use crate::types::db::{section_roster, user};

/// How a roster batch refers to a student
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StudentKey {
    Id(i32),
    /// Normalized (trimmed, lower-cased) email address
    Email(String),
}

/// An element of a roster batch
pub trait RosterItem: Clone {
    fn student_key(&self) -> StudentKey;
}

impl RosterItem for i32 {
    fn student_key(&self) -> StudentKey {
        StudentKey::Id(*self)
    }
}

/// One data line of a roster CSV upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRosterRow {
    pub line: u64,
    pub email: String,
    pub section_code: String,
}

impl RosterItem for CsvRosterRow {
    fn student_key(&self) -> StudentKey {
        StudentKey::Email(self.email.trim().to_lowercase())
    }
}

/// Roster state a student must be in to be accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterRequirement {
    /// Not rostered in any section
    Unrostered,
    /// Currently rostered in the given section
    RosteredIn { section_id: i32 },
}

/// Items the classifier refused, grouped by reason
#[derive(Debug, Clone, PartialEq)]
pub struct RosterRejections<T> {
    pub duplicates: Vec<T>,
    pub not_found: Vec<T>,
    pub wrong_grade: Vec<T>,
    pub already_rostered: Vec<T>,
    pub not_in_source_section: Vec<T>,
}

impl<T> Default for RosterRejections<T> {
    fn default() -> Self {
        Self {
            duplicates: Vec::new(),
            not_found: Vec::new(),
            wrong_grade: Vec::new(),
            already_rostered: Vec::new(),
            not_in_source_section: Vec::new(),
        }
    }
}

impl<T> RosterRejections<T> {
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.duplicates.len()
            + self.not_found.len()
            + self.wrong_grade.len()
            + self.already_rostered.len()
            + self.not_in_source_section.len()
    }
}

/// Batch item paired with the student it resolved to
#[derive(Debug, Clone)]
pub struct AcceptedStudent<T> {
    pub item: T,
    pub student: user::Model,
}

/// Single-pass classification of a roster batch
#[derive(Debug)]
pub struct RosterClassification<T> {
    pub accepted: Vec<AcceptedStudent<T>>,
    pub rejections: RosterRejections<T>,
}

impl<T> RosterClassification<T> {
    pub fn new() -> Self {
        Self {
            accepted: Vec::new(),
            rejections: RosterRejections::default(),
        }
    }
}

impl<T> Default for RosterClassification<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of an all-or-nothing batch: either everything was written or nothing was
#[derive(Debug)]
pub enum BatchOutcome<S, R> {
    Committed(S),
    Rejected(R),
}

/// CSV rows screened out before any student lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvScreening {
    pub missing_email_section_code: Vec<CsvRosterRow>,
    pub not_existing_sections: Vec<CsvRosterRow>,
    pub mismatched_sections: Vec<CsvRosterRow>,
}

impl CsvScreening {
    pub fn is_empty(&self) -> bool {
        self.missing_email_section_code.is_empty()
            && self.not_existing_sections.is_empty()
            && self.mismatched_sections.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CsvRosterRejections {
    pub screening: CsvScreening,
    pub classifier: RosterRejections<CsvRosterRow>,
}

#[derive(Debug, Clone)]
pub struct UnrosterSummary {
    pub unrostered: Vec<section_roster::Model>,
    pub skipped_student_user_ids: Vec<i32>,
}
