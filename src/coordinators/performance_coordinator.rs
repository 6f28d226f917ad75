use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::errors::internal::{FitnessError, ValidationError};
use crate::errors::InternalError;
use crate::providers::{GuardProvider, ValidationProvider};
use crate::stores::PerformanceStore;
use crate::types::db::{assigned_performance_test, performance_grade, performance_type};
use crate::types::dto::fitness::{
    AssignPerformanceTestRequest, CreatePerformanceGradeRequest, CreatePerformanceTypeRequest,
    UpdatePerformanceGradeRequest, UpdatePerformanceTypeRequest,
};
use crate::types::internal::context::RequestContext;

/// Performance types, test assignments and the grades students earn on them
pub struct PerformanceCoordinator {
    db: DatabaseConnection,
    performance_store: Arc<PerformanceStore>,
    guards: GuardProvider,
    validator: ValidationProvider,
}

impl PerformanceCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        let guards = GuardProvider::new(
            app_data.section_store.clone(),
            app_data.roster_store.clone(),
            app_data.user_store.clone(),
        );

        Self {
            db: app_data.db.clone(),
            performance_store: app_data.performance_store.clone(),
            guards,
            validator: ValidationProvider::new(),
        }
    }

    pub async fn create_performance_type(
        &self,
        ctx: &RequestContext,
        req: CreatePerformanceTypeRequest,
    ) -> Result<performance_type::Model, InternalError> {
        let new_type = self
            .validator
            .validate_new_performance_type(&req)
            .map_err(ValidationError::Fields)?;

        let created = self.performance_store.insert_type(&self.db, &new_type).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            performance_type_id = created.id,
            name = %created.name,
            "Performance type created"
        );

        Ok(created)
    }

    pub async fn list_performance_types(
        &self,
        _ctx: &RequestContext,
    ) -> Result<Vec<performance_type::Model>, InternalError> {
        self.performance_store.list_types(&self.db).await
    }

    pub async fn update_performance_type(
        &self,
        ctx: &RequestContext,
        performance_type_id: i32,
        req: UpdatePerformanceTypeRequest,
    ) -> Result<performance_type::Model, InternalError> {
        let changes = self
            .validator
            .validate_performance_type_changes(&req)
            .map_err(ValidationError::Fields)?;
        let existing = self.require_type(performance_type_id).await?;

        let updated = self.performance_store.update_type(&self.db, existing, &changes).await?;

        tracing::info!(request_id = %ctx.request_id, performance_type_id, "Performance type updated");

        Ok(updated)
    }

    pub async fn delete_performance_type(
        &self,
        ctx: &RequestContext,
        performance_type_id: i32,
    ) -> Result<(), InternalError> {
        let existing = self.require_type(performance_type_id).await?;
        self.performance_store.delete_type(&self.db, existing.id).await?;

        tracing::info!(request_id = %ctx.request_id, performance_type_id, "Performance type deleted");

        Ok(())
    }

    pub async fn assign_performance_test(
        &self,
        ctx: &RequestContext,
        req: AssignPerformanceTestRequest,
    ) -> Result<assigned_performance_test::Model, InternalError> {
        let new_assignment = self
            .validator
            .validate_new_assignment(&req)
            .map_err(ValidationError::Fields)?;

        self.require_type(new_assignment.performance_type_id).await?;
        self.guards.require_teacher(&self.db, new_assignment.teacher_user_id).await?;
        self.guards.require_student(&self.db, new_assignment.student_user_id).await?;

        let assignment = self.performance_store.insert_assignment(&self.db, &new_assignment).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            assignment_id = assignment.id,
            performance_type_id = assignment.performance_type_id,
            student_user_id = assignment.student_user_id,
            "Performance test assigned"
        );

        Ok(assignment)
    }

    pub async fn list_student_performance_tests(
        &self,
        _ctx: &RequestContext,
        student_user_id: i32,
    ) -> Result<Vec<assigned_performance_test::Model>, InternalError> {
        self.guards.require_student(&self.db, student_user_id).await?;
        self.performance_store
            .list_assignments_for_student(&self.db, student_user_id)
            .await
    }

    pub async fn delete_performance_test(&self, ctx: &RequestContext, assignment_id: i32) -> Result<(), InternalError> {
        let existing = self
            .performance_store
            .find_assignment_by_id(&self.db, assignment_id)
            .await?
            .ok_or(InternalError::Fitness(FitnessError::PerformanceTestNotFound { assignment_id }))?;
        self.performance_store.delete_assignment(&self.db, existing.id).await?;

        tracing::info!(request_id = %ctx.request_id, assignment_id, "Performance test assignment deleted");

        Ok(())
    }

    pub async fn record_performance_grade(
        &self,
        ctx: &RequestContext,
        req: CreatePerformanceGradeRequest,
    ) -> Result<performance_grade::Model, InternalError> {
        let new_grade = self
            .validator
            .validate_new_performance_grade(&req)
            .map_err(ValidationError::Fields)?;

        self.require_type(new_grade.performance_type_id).await?;
        self.guards.require_teacher(&self.db, new_grade.teacher_user_id).await?;
        self.guards.require_student(&self.db, new_grade.student_user_id).await?;

        let grade = self.performance_store.insert_grade(&self.db, &new_grade).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            grade_id = grade.id,
            student_user_id = grade.student_user_id,
            "Performance grade recorded"
        );

        Ok(grade)
    }

    pub async fn get_performance_grade(
        &self,
        _ctx: &RequestContext,
        grade_id: i32,
    ) -> Result<performance_grade::Model, InternalError> {
        self.require_grade(grade_id).await
    }

    pub async fn list_student_performance_grades(
        &self,
        _ctx: &RequestContext,
        student_user_id: i32,
    ) -> Result<Vec<performance_grade::Model>, InternalError> {
        self.guards.require_student(&self.db, student_user_id).await?;
        self.performance_store.list_grades_for_student(&self.db, student_user_id).await
    }

    pub async fn update_performance_grade(
        &self,
        ctx: &RequestContext,
        grade_id: i32,
        req: UpdatePerformanceGradeRequest,
    ) -> Result<performance_grade::Model, InternalError> {
        let changes = self
            .validator
            .validate_performance_grade_changes(&req)
            .map_err(ValidationError::Fields)?;
        let existing = self.require_grade(grade_id).await?;

        let grade = self.performance_store.update_grade(&self.db, existing, &changes).await?;

        tracing::info!(request_id = %ctx.request_id, grade_id, "Performance grade updated");

        Ok(grade)
    }

    pub async fn delete_performance_grade(&self, ctx: &RequestContext, grade_id: i32) -> Result<(), InternalError> {
        let existing = self.require_grade(grade_id).await?;
        self.performance_store.delete_grade(&self.db, existing.id).await?;

        tracing::info!(request_id = %ctx.request_id, grade_id, "Performance grade deleted");

        Ok(())
    }

    async fn require_type(&self, performance_type_id: i32) -> Result<performance_type::Model, InternalError> {
        self.performance_store
            .find_type_by_id(&self.db, performance_type_id)
            .await?
            .ok_or(InternalError::Fitness(FitnessError::PerformanceTypeNotFound { performance_type_id }))
    }

    async fn require_grade(&self, grade_id: i32) -> Result<performance_grade::Model, InternalError> {
        self.performance_store
            .find_grade_by_id(&self.db, grade_id)
            .await?
            .ok_or(InternalError::Fitness(FitnessError::PerformanceGradeNotFound { grade_id }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::UserError;
    use crate::test::utils::{create_test_student, create_test_teacher, setup_test_app_data};

    fn ctx() -> RequestContext {
        RequestContext::for_system("performance_coordinator_test")
    }

    async fn push_ups(coordinator: &PerformanceCoordinator) -> performance_type::Model {
        coordinator
            .create_performance_type(
                &ctx(),
                CreatePerformanceTypeRequest {
                    name: Some("Push-ups".to_string()),
                    unit: Some("reps".to_string()),
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_assignment_checks_type_teacher_and_student() {
        let app_data = setup_test_app_data().await;
        let coordinator = PerformanceCoordinator::new(app_data.clone());
        let teacher = create_test_teacher(&app_data.db, "coach@school.edu").await;
        let student = create_test_student(&app_data.db, "ana@school.edu", 7).await;
        let kind = push_ups(&coordinator).await;

        let request = |performance_type_id, teacher_user_id| AssignPerformanceTestRequest {
            performance_type_id: Some(performance_type_id),
            teacher_user_id: Some(teacher_user_id),
            student_user_id: Some(student.id),
            date_assigned: Some("2025-04-01".to_string()),
        };

        assert!(matches!(
            coordinator.assign_performance_test(&ctx(), request(kind.id + 100, teacher.id)).await,
            Err(InternalError::Fitness(FitnessError::PerformanceTypeNotFound { .. }))
        ));
        assert!(matches!(
            coordinator.assign_performance_test(&ctx(), request(kind.id, student.id)).await,
            Err(InternalError::User(UserError::TeacherNotFound { .. }))
        ));

        let assignment = coordinator
            .assign_performance_test(&ctx(), request(kind.id, teacher.id))
            .await
            .unwrap();
        assert_eq!(assignment.date_assigned.map(|d| d.to_string()), Some("2025-04-01".to_string()));

        assert!(matches!(
            coordinator.assign_performance_test(&ctx(), request(kind.id, teacher.id)).await,
            Err(InternalError::Fitness(FitnessError::PerformanceTestAlreadyAssigned { .. }))
        ));

        let listed = coordinator
            .list_student_performance_tests(&ctx(), student.id)
            .await
            .unwrap();
        assert_eq!(listed, vec![assignment]);
    }

    #[tokio::test]
    async fn test_grade_update_keeps_other_fields() {
        let app_data = setup_test_app_data().await;
        let coordinator = PerformanceCoordinator::new(app_data.clone());
        let teacher = create_test_teacher(&app_data.db, "coach@school.edu").await;
        let student = create_test_student(&app_data.db, "ana@school.edu", 7).await;
        let kind = push_ups(&coordinator).await;

        let grade = coordinator
            .record_performance_grade(
                &ctx(),
                CreatePerformanceGradeRequest {
                    performance_type_id: Some(kind.id),
                    teacher_user_id: Some(teacher.id),
                    student_user_id: Some(student.id),
                    date_taken: Some("2025-04-02".to_string()),
                    grade: Some(18.0),
                },
            )
            .await
            .unwrap();

        let updated = coordinator
            .update_performance_grade(
                &ctx(),
                grade.id,
                UpdatePerformanceGradeRequest {
                    date_taken: None,
                    grade: Some(25.0),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.grade, 25.0);
        assert_eq!(updated.date_taken, grade.date_taken);
    }

    #[tokio::test]
    async fn test_missing_records_are_not_found() {
        let app_data = setup_test_app_data().await;
        let coordinator = PerformanceCoordinator::new(app_data);

        assert!(matches!(
            coordinator.delete_performance_type(&ctx(), 3).await,
            Err(InternalError::Fitness(FitnessError::PerformanceTypeNotFound { performance_type_id: 3 }))
        ));
        assert!(matches!(
            coordinator.delete_performance_test(&ctx(), 4).await,
            Err(InternalError::Fitness(FitnessError::PerformanceTestNotFound { assignment_id: 4 }))
        ));
        assert!(matches!(
            coordinator.get_performance_grade(&ctx(), 5).await,
            Err(InternalError::Fitness(FitnessError::PerformanceGradeNotFound { grade_id: 5 }))
        ));
    }
}
