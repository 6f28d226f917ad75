use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::config::{begin_transaction, commit_transaction};
use crate::coordinators::settle_batch;
use crate::errors::internal::ValidationError;
use crate::errors::InternalError;
use crate::providers::roster_provider::RosterOutcome;
use crate::providers::{AcademicCalendar, CsvProvider, GuardProvider, RosterCsvHandler, RosterProvider, ValidationProvider};
use crate::types::dto::roster::TransferStudentsRequest;
use crate::types::internal::context::RequestContext;
use crate::types::internal::roster::{BatchOutcome, CsvRosterRejections, RosterRejections, UnrosterSummary};

/// Roster, unroster and transfer workflows
///
/// Each workflow runs in a single transaction: guards, classification and writes all
/// see the same snapshot, and a rejected batch leaves no trace.
pub struct RosterCoordinator {
    db: DatabaseConnection,
    guards: GuardProvider,
    roster_provider: RosterProvider,
    validator: ValidationProvider,
    csv_provider: CsvProvider,
}

impl RosterCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        let guards = GuardProvider::new(
            app_data.section_store.clone(),
            app_data.roster_store.clone(),
            app_data.user_store.clone(),
        );
        let roster_provider = RosterProvider::new(
            app_data.section_store.clone(),
            app_data.roster_store.clone(),
            app_data.user_store.clone(),
        );

        Self {
            db: app_data.db.clone(),
            guards,
            roster_provider,
            validator: ValidationProvider::new(),
            csv_provider: CsvProvider::new(),
        }
    }

    pub async fn roster_students(
        &self,
        ctx: &RequestContext,
        section_id: i32,
        student_user_ids: Vec<i32>,
    ) -> Result<RosterOutcome<RosterRejections<i32>>, InternalError> {
        self.validator
            .validate_student_ids(&student_user_ids)
            .map_err(ValidationError::Fields)?;

        let calendar = AcademicCalendar::current();
        let txn = begin_transaction(&self.db).await?;

        let section = self.guards.require_section(&txn, section_id).await?;
        let outcome = self
            .roster_provider
            .roster_students(&txn, &section, student_user_ids, &calendar)
            .await?;

        let outcome = settle_batch(txn, outcome).await?;
        if let BatchOutcome::Committed(entries) = &outcome {
            tracing::info!(
                request_id = %ctx.request_id,
                section_id,
                count = entries.len(),
                "Students rostered"
            );
        }

        Ok(outcome)
    }

    /// Roster the students listed in an uploaded `email,sectionCode` file
    pub async fn roster_students_from_csv(
        &self,
        ctx: &RequestContext,
        section_id: i32,
        content: &[u8],
    ) -> Result<RosterOutcome<CsvRosterRejections>, InternalError> {
        let parsed = self.csv_provider.parse(content, &RosterCsvHandler)?;
        if !parsed.rejected.is_empty() {
            return Err(ValidationError::Rows(parsed.rejected).into());
        }

        let calendar = AcademicCalendar::current();
        let txn = begin_transaction(&self.db).await?;

        let section = self.guards.require_section(&txn, section_id).await?;
        let outcome = self
            .roster_provider
            .roster_from_csv(&txn, &section, parsed.rows, &calendar)
            .await?;

        let outcome = settle_batch(txn, outcome).await?;
        if let BatchOutcome::Committed(entries) = &outcome {
            tracing::info!(
                request_id = %ctx.request_id,
                section_id,
                count = entries.len(),
                "Students rostered from CSV"
            );
        }

        Ok(outcome)
    }

    pub async fn unroster_students(
        &self,
        ctx: &RequestContext,
        section_id: i32,
        student_user_ids: Vec<i32>,
    ) -> Result<UnrosterSummary, InternalError> {
        self.validator
            .validate_student_ids(&student_user_ids)
            .map_err(ValidationError::Fields)?;

        let txn = begin_transaction(&self.db).await?;

        self.guards.require_section(&txn, section_id).await?;
        let summary = self
            .roster_provider
            .unroster_students(&txn, section_id, student_user_ids)
            .await?;

        commit_transaction(txn).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            section_id,
            removed = summary.unrostered.len(),
            skipped = summary.skipped_student_user_ids.len(),
            "Students unrostered"
        );

        Ok(summary)
    }

    pub async fn transfer_students(
        &self,
        ctx: &RequestContext,
        req: TransferStudentsRequest,
    ) -> Result<RosterOutcome<RosterRejections<i32>>, InternalError> {
        self.validator.validate_transfer(&req).map_err(ValidationError::Fields)?;

        let calendar = AcademicCalendar::current();
        let txn = begin_transaction(&self.db).await?;

        let from = self.guards.require_section(&txn, req.from_section_id).await?;
        let to = self.guards.require_section(&txn, req.to_section_id).await?;
        let outcome = self
            .roster_provider
            .transfer_students(&txn, &from, &to, req.student_user_ids, &calendar)
            .await?;

        let outcome = settle_batch(txn, outcome).await?;
        if let BatchOutcome::Committed(entries) = &outcome {
            tracing::info!(
                request_id = %ctx.request_id,
                from_section_id = from.id,
                to_section_id = to.id,
                count = entries.len(),
                "Students transferred"
            );
        }

        Ok(outcome)
    }
}
