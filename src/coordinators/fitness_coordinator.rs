use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::errors::internal::{FitnessError, ValidationError};
use crate::errors::InternalError;
use crate::providers::{GuardProvider, ValidationProvider};
use crate::stores::AnthroStore;
use crate::types::db::student_anthro;
use crate::types::dto::fitness::{CreateAnthroRequest, UpdateAnthroRequest};
use crate::types::internal::context::RequestContext;

/// Anthropometric measurements recorded by staff for students
pub struct FitnessCoordinator {
    db: DatabaseConnection,
    anthro_store: Arc<AnthroStore>,
    guards: GuardProvider,
    validator: ValidationProvider,
}

impl FitnessCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        let guards = GuardProvider::new(
            app_data.section_store.clone(),
            app_data.roster_store.clone(),
            app_data.user_store.clone(),
        );

        Self {
            db: app_data.db.clone(),
            anthro_store: app_data.anthro_store.clone(),
            guards,
            validator: ValidationProvider::new(),
        }
    }

    pub async fn record_anthro(
        &self,
        ctx: &RequestContext,
        req: CreateAnthroRequest,
    ) -> Result<student_anthro::Model, InternalError> {
        let new_anthro = self.validator.validate_new_anthro(&req).map_err(ValidationError::Fields)?;

        self.guards.require_teacher(&self.db, new_anthro.teacher_user_id).await?;
        self.guards.require_student(&self.db, new_anthro.student_user_id).await?;

        let record = self.anthro_store.insert(&self.db, &new_anthro).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            anthro_id = record.id,
            student_user_id = record.student_user_id,
            "Anthropometric record created"
        );

        Ok(record)
    }

    pub async fn get_anthro(&self, _ctx: &RequestContext, anthro_id: i32) -> Result<student_anthro::Model, InternalError> {
        self.require_anthro(anthro_id).await
    }

    pub async fn list_student_anthros(
        &self,
        _ctx: &RequestContext,
        student_user_id: i32,
    ) -> Result<Vec<student_anthro::Model>, InternalError> {
        self.guards.require_student(&self.db, student_user_id).await?;
        self.anthro_store.list_for_student(&self.db, student_user_id).await
    }

    pub async fn update_anthro(
        &self,
        ctx: &RequestContext,
        anthro_id: i32,
        req: UpdateAnthroRequest,
    ) -> Result<student_anthro::Model, InternalError> {
        let changes = self.validator.validate_anthro_changes(&req).map_err(ValidationError::Fields)?;
        let existing = self.require_anthro(anthro_id).await?;

        let record = self.anthro_store.update(&self.db, existing, &changes).await?;

        tracing::info!(request_id = %ctx.request_id, anthro_id, "Anthropometric record updated");

        Ok(record)
    }

    pub async fn delete_anthro(&self, ctx: &RequestContext, anthro_id: i32) -> Result<(), InternalError> {
        let existing = self.require_anthro(anthro_id).await?;
        self.anthro_store.delete(&self.db, existing.id).await?;

        tracing::info!(request_id = %ctx.request_id, anthro_id, "Anthropometric record deleted");

        Ok(())
    }

    async fn require_anthro(&self, anthro_id: i32) -> Result<student_anthro::Model, InternalError> {
        self.anthro_store
            .find_by_id(&self.db, anthro_id)
            .await?
            .ok_or(InternalError::Fitness(FitnessError::AnthroNotFound { anthro_id }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::UserError;
    use crate::test::utils::{create_test_student, create_test_teacher, setup_test_app_data};

    fn ctx() -> RequestContext {
        RequestContext::for_system("fitness_coordinator_test")
    }

    #[tokio::test]
    async fn test_record_requires_staff_and_student() {
        let app_data = setup_test_app_data().await;
        let coordinator = FitnessCoordinator::new(app_data.clone());
        let teacher = create_test_teacher(&app_data.db, "coach@school.edu").await;
        let student = create_test_student(&app_data.db, "ana@school.edu", 8).await;

        let swapped = CreateAnthroRequest {
            teacher_user_id: Some(student.id),
            student_user_id: Some(teacher.id),
            date_recorded: Some("2025-02-01".to_string()),
            height: Some(151.0),
            weight: Some(40.5),
        };
        assert!(matches!(
            coordinator.record_anthro(&ctx(), swapped).await,
            Err(InternalError::User(UserError::TeacherNotFound { .. }))
        ));

        let valid = CreateAnthroRequest {
            teacher_user_id: Some(teacher.id),
            student_user_id: Some(student.id),
            date_recorded: Some("2025-02-01".to_string()),
            height: Some(151.0),
            weight: Some(40.5),
        };
        let record = coordinator.record_anthro(&ctx(), valid).await.unwrap();

        let listed = coordinator.list_student_anthros(&ctx(), student.id).await.unwrap();
        assert_eq!(listed, vec![record]);
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let app_data = setup_test_app_data().await;
        let coordinator = FitnessCoordinator::new(app_data);

        assert!(matches!(
            coordinator.delete_anthro(&ctx(), 5).await,
            Err(InternalError::Fitness(FitnessError::AnthroNotFound { anthro_id: 5 }))
        ));
    }
}
