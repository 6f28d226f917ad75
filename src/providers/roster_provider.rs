use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sea_orm::ConnectionTrait;

use crate::errors::internal::SectionError;
use crate::errors::InternalError;
use crate::providers::academic_calendar::AcademicCalendar;
use crate::stores::{RosterStore, SectionStore, UserStore};
use crate::types::db::user::UserType;
use crate::types::db::{section, section_roster, user};
use crate::types::internal::roster::{
    AcceptedStudent, BatchOutcome, CsvRosterRejections, CsvRosterRow, CsvScreening, RosterClassification,
    RosterItem, RosterRejections, RosterRequirement, StudentKey, UnrosterSummary,
};

pub type RosterOutcome<R> = BatchOutcome<Vec<section_roster::Model>, R>;

/// Classifies roster batches and applies them all-or-nothing
///
/// Every method expects `conn` to be an open transaction owned by the caller. The
/// caller commits on `Committed` and rolls back on `Rejected` or error.
pub struct RosterProvider {
    section_store: Arc<SectionStore>,
    roster_store: Arc<RosterStore>,
    user_store: Arc<UserStore>,
}

impl RosterProvider {
    pub fn new(
        section_store: Arc<SectionStore>,
        roster_store: Arc<RosterStore>,
        user_store: Arc<UserStore>,
    ) -> Self {
        Self {
            section_store,
            roster_store,
            user_store,
        }
    }

    /// Single pass over a batch sorting each item into accepted or one rejection bucket
    ///
    /// Checks run in order and the first failing one decides the bucket:
    /// duplicate, not a student, grade mismatch with `target`, then `requirement`.
    pub async fn classify<T: RosterItem>(
        &self,
        conn: &impl ConnectionTrait,
        items: Vec<T>,
        target: &section::Model,
        requirement: RosterRequirement,
        calendar: &AcademicCalendar,
    ) -> Result<RosterClassification<T>, InternalError> {
        let mut classification = RosterClassification::new();
        let mut seen: HashSet<StudentKey> = HashSet::new();

        for item in items {
            let key = item.student_key();
            if !seen.insert(key.clone()) {
                classification.rejections.duplicates.push(item);
                continue;
            }

            let student = match self.resolve_student(conn, &key).await? {
                Some(student) => student,
                None => {
                    classification.rejections.not_found.push(item);
                    continue;
                }
            };

            let grade_level = self
                .user_store
                .find_student_detail(conn, student.id)
                .await?
                .and_then(|detail| calendar.grade_level_for(detail.grad_year));
            if grade_level != Some(target.grade_level) {
                classification.rejections.wrong_grade.push(item);
                continue;
            }

            match requirement {
                RosterRequirement::Unrostered => {
                    if self.roster_store.find_by_student(conn, student.id).await?.is_some() {
                        classification.rejections.already_rostered.push(item);
                        continue;
                    }
                }
                RosterRequirement::RosteredIn { section_id } => {
                    if self.roster_store.find_in_section(conn, section_id, student.id).await?.is_none() {
                        classification.rejections.not_in_source_section.push(item);
                        continue;
                    }
                }
            }

            classification.accepted.push(AcceptedStudent { item, student });
        }

        Ok(classification)
    }

    pub async fn roster_students(
        &self,
        conn: &impl ConnectionTrait,
        section: &section::Model,
        student_user_ids: Vec<i32>,
        calendar: &AcademicCalendar,
    ) -> Result<RosterOutcome<RosterRejections<i32>>, InternalError> {
        let classification = self
            .classify(conn, student_user_ids, section, RosterRequirement::Unrostered, calendar)
            .await?;

        if !classification.rejections.is_empty() {
            tracing::info!(
                section_id = section.id,
                rejected = classification.rejections.total(),
                "Roster batch rejected"
            );
            return Ok(BatchOutcome::Rejected(classification.rejections));
        }

        let entries = self.insert_entries(conn, section.id, &classification.accepted).await?;
        Ok(BatchOutcome::Committed(entries))
    }

    /// Roster rows from an uploaded file into `section`
    ///
    /// Rows with blank cells or a section code naming another section are screened
    /// out before any student lookup. Any screened or rejected row rejects the file.
    pub async fn roster_from_csv(
        &self,
        conn: &impl ConnectionTrait,
        section: &section::Model,
        rows: Vec<CsvRosterRow>,
        calendar: &AcademicCalendar,
    ) -> Result<RosterOutcome<CsvRosterRejections>, InternalError> {
        let codes: Vec<String> = rows
            .iter()
            .filter(|row| !row.section_code.is_empty())
            .map(|row| row.section_code.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let sections_by_code: HashMap<String, i32> = self
            .section_store
            .find_by_codes(conn, &codes)
            .await?
            .into_iter()
            .map(|s| (s.section_code, s.id))
            .collect();

        let mut screening = CsvScreening::default();
        let mut candidates = Vec::with_capacity(rows.len());
        for row in rows {
            if row.email.is_empty() || row.section_code.is_empty() {
                screening.missing_email_section_code.push(row);
                continue;
            }
            match sections_by_code.get(&row.section_code) {
                None => screening.not_existing_sections.push(row),
                Some(section_id) if *section_id != section.id => screening.mismatched_sections.push(row),
                Some(_) => candidates.push(row),
            }
        }

        let classification = self
            .classify(conn, candidates, section, RosterRequirement::Unrostered, calendar)
            .await?;

        if !screening.is_empty() || !classification.rejections.is_empty() {
            tracing::info!(section_id = section.id, "CSV roster upload rejected");
            return Ok(BatchOutcome::Rejected(CsvRosterRejections {
                screening,
                classifier: classification.rejections,
            }));
        }

        let entries = self.insert_entries(conn, section.id, &classification.accepted).await?;
        Ok(BatchOutcome::Committed(entries))
    }

    /// Remove roster entries of `section_id`; ids not rostered there are skipped
    pub async fn unroster_students(
        &self,
        conn: &impl ConnectionTrait,
        section_id: i32,
        student_user_ids: Vec<i32>,
    ) -> Result<UnrosterSummary, InternalError> {
        let mut summary = UnrosterSummary {
            unrostered: Vec::new(),
            skipped_student_user_ids: Vec::new(),
        };

        for student_user_id in student_user_ids {
            match self.roster_store.find_in_section(conn, section_id, student_user_id).await? {
                Some(entry) => {
                    self.roster_store.delete(conn, entry.id).await?;
                    summary.unrostered.push(entry);
                }
                None => {
                    tracing::debug!(section_id, student_user_id, "Student not rostered in section, skipping");
                    summary.skipped_student_user_ids.push(student_user_id);
                }
            }
        }

        Ok(summary)
    }

    /// Move students from `from` to `to`, replacing each old entry with a new one
    pub async fn transfer_students(
        &self,
        conn: &impl ConnectionTrait,
        from: &section::Model,
        to: &section::Model,
        student_user_ids: Vec<i32>,
        calendar: &AcademicCalendar,
    ) -> Result<RosterOutcome<RosterRejections<i32>>, InternalError> {
        if !to.is_active {
            return Err(InternalError::Section(SectionError::Inactive { section_id: to.id }));
        }

        let requirement = RosterRequirement::RosteredIn { section_id: from.id };
        let classification = self
            .classify(conn, student_user_ids, to, requirement, calendar)
            .await?;

        if !classification.rejections.is_empty() {
            tracing::info!(
                from_section_id = from.id,
                to_section_id = to.id,
                rejected = classification.rejections.total(),
                "Transfer batch rejected"
            );
            return Ok(BatchOutcome::Rejected(classification.rejections));
        }

        let mut entries = Vec::with_capacity(classification.accepted.len());
        for accepted in &classification.accepted {
            if let Some(old) = self.roster_store.find_in_section(conn, from.id, accepted.student.id).await? {
                self.roster_store.delete(conn, old.id).await?;
            }
            entries.push(self.roster_store.insert(conn, to.id, accepted.student.id).await?);
        }

        Ok(BatchOutcome::Committed(entries))
    }

    async fn resolve_student(
        &self,
        conn: &impl ConnectionTrait,
        key: &StudentKey,
    ) -> Result<Option<user::Model>, InternalError> {
        let user = match key {
            StudentKey::Id(user_id) => self.user_store.find_by_id(conn, *user_id).await?,
            StudentKey::Email(email) => self.user_store.find_by_email(conn, email).await?,
        };

        Ok(user.filter(|u| u.user_type == UserType::Student))
    }

    async fn insert_entries<T>(
        &self,
        conn: &impl ConnectionTrait,
        section_id: i32,
        accepted: &[AcceptedStudent<T>],
    ) -> Result<Vec<section_roster::Model>, InternalError> {
        let mut entries = Vec::with_capacity(accepted.len());
        for accepted in accepted {
            entries.push(self.roster_store.insert(conn, section_id, accepted.student.id).await?);
        }
        Ok(entries)
    }
}
