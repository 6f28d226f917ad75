use std::collections::HashSet;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::config::{begin_transaction, commit_transaction};
use crate::errors::internal::{SectionError, ValidationError};
use crate::errors::InternalError;
use crate::providers::{CsvProvider, GuardProvider, SectionCsvHandler, ValidationProvider};
use crate::stores::{RosterStore, SectionStore, UserStore};
use crate::types::db::section;
use crate::types::dto::section::{CreateSectionRequest, UpdateSectionRequest};
use crate::types::internal::context::RequestContext;
use crate::types::internal::section::{RosteredStudent, SectionWithStudents};

/// Section lifecycle: create, read, update, delete and bulk CSV creation
pub struct SectionCoordinator {
    db: DatabaseConnection,
    section_store: Arc<SectionStore>,
    roster_store: Arc<RosterStore>,
    user_store: Arc<UserStore>,
    guards: GuardProvider,
    validator: ValidationProvider,
    csv_provider: CsvProvider,
}

impl SectionCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        let guards = GuardProvider::new(
            app_data.section_store.clone(),
            app_data.roster_store.clone(),
            app_data.user_store.clone(),
        );

        Self {
            db: app_data.db.clone(),
            section_store: app_data.section_store.clone(),
            roster_store: app_data.roster_store.clone(),
            user_store: app_data.user_store.clone(),
            guards,
            validator: ValidationProvider::new(),
            csv_provider: CsvProvider::new(),
        }
    }

    pub async fn create_section(
        &self,
        ctx: &RequestContext,
        req: CreateSectionRequest,
    ) -> Result<section::Model, InternalError> {
        let new_section = self.validator.validate_new_section(&req).map_err(ValidationError::Fields)?;

        let section = self.section_store.insert(&self.db, &new_section).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            section_id = section.id,
            "Section {} created",
            section.section_code
        );

        Ok(section)
    }

    pub async fn list_sections(&self, _ctx: &RequestContext, active_only: bool) -> Result<Vec<section::Model>, InternalError> {
        self.section_store.list(&self.db, active_only).await
    }

    /// Section with its rostered students and their graduation years
    pub async fn get_section(&self, _ctx: &RequestContext, section_id: i32) -> Result<SectionWithStudents, InternalError> {
        let section = self.guards.require_section(&self.db, section_id).await?;

        let users = self.roster_store.list_students_in_section(&self.db, section_id).await?;
        let mut students = Vec::with_capacity(users.len());
        for user in users {
            let grad_year = self
                .user_store
                .find_student_detail(&self.db, user.id)
                .await?
                .map(|detail| detail.grad_year);
            students.push(RosteredStudent { user, grad_year });
        }

        Ok(SectionWithStudents { section, students })
    }

    /// Create every section in the file or none of them
    ///
    /// Steps:
    /// 1. Parse and validate each row (invalid rows fail the upload)
    /// 2. Reject codes repeated in the file or already stored
    /// 3. Insert all rows in one transaction
    pub async fn upload_sections_csv(
        &self,
        ctx: &RequestContext,
        content: &[u8],
    ) -> Result<Vec<section::Model>, InternalError> {
        let parsed = self.csv_provider.parse(content, &SectionCsvHandler::new())?;
        if !parsed.rejected.is_empty() {
            return Err(ValidationError::Rows(parsed.rejected).into());
        }

        let mut seen = HashSet::new();
        let mut repeated: Vec<String> = Vec::new();
        for row in &parsed.rows {
            if !seen.insert(row.section_code.as_str()) && !repeated.contains(&row.section_code) {
                repeated.push(row.section_code.clone());
            }
        }
        if !repeated.is_empty() {
            return Err(SectionError::DuplicateCodes { section_codes: repeated }.into());
        }

        let txn = begin_transaction(&self.db).await?;

        let codes: Vec<String> = parsed.rows.iter().map(|r| r.section_code.clone()).collect();
        let existing = self.section_store.find_by_codes(&txn, &codes).await?;
        if !existing.is_empty() {
            let section_codes = existing.into_iter().map(|s| s.section_code).collect();
            return Err(SectionError::DuplicateCodes { section_codes }.into());
        }

        let mut sections = Vec::with_capacity(parsed.rows.len());
        for new_section in &parsed.rows {
            sections.push(self.section_store.insert(&txn, new_section).await?);
        }

        commit_transaction(txn).await?;

        tracing::info!(request_id = %ctx.request_id, count = sections.len(), "Sections created from CSV");

        Ok(sections)
    }

    /// Rostered sections keep their grade level and stay active
    pub async fn update_section(
        &self,
        ctx: &RequestContext,
        section_id: i32,
        req: UpdateSectionRequest,
    ) -> Result<section::Model, InternalError> {
        let changes = self.validator.validate_section_changes(&req).map_err(ValidationError::Fields)?;

        let txn = begin_transaction(&self.db).await?;

        let state = self.guards.section_roster_state(&txn, section_id).await?;
        let deactivates = changes.is_active == Some(false) && state.section.is_active;
        let regrades = changes
            .grade_level
            .is_some_and(|level| level != state.section.grade_level);
        if state.has_rostered_students() && (deactivates || regrades) {
            return Err(SectionError::HasRosteredStudents {
                section_id,
                student_count: state.rostered_count,
            }
            .into());
        }

        let section = self.section_store.update(&txn, state.section, &changes).await?;
        commit_transaction(txn).await?;

        tracing::info!(request_id = %ctx.request_id, section_id, "Section updated");

        Ok(section)
    }

    pub async fn delete_section(&self, ctx: &RequestContext, section_id: i32) -> Result<(), InternalError> {
        let txn = begin_transaction(&self.db).await?;

        let section = self.guards.require_section_deletable(&txn, section_id).await?;
        self.section_store.delete(&txn, section.id).await?;

        commit_transaction(txn).await?;

        tracing::info!(request_id = %ctx.request_id, section_id, "Section {} deleted", section.section_code);

        Ok(())
    }
}
