use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::errors::internal::FitnessError;
use crate::errors::InternalError;
use crate::stores::is_unique_violation;
use crate::types::db::assigned_performance_test::{self, Entity as AssignedPerformanceTest};
use crate::types::db::performance_grade::{self, Entity as PerformanceGrade};
use crate::types::db::performance_type::{self, Entity as PerformanceType};
use crate::types::internal::fitness::{
    NewAssignedTest, NewPerformanceGrade, NewPerformanceType, PerformanceGradeChanges, PerformanceTypeChanges,
};

/// Performance types, the tests assigned from them and the grades students earn
pub struct PerformanceStore;

impl PerformanceStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_type_by_id(
        &self,
        conn: &impl ConnectionTrait,
        performance_type_id: i32,
    ) -> Result<Option<performance_type::Model>, InternalError> {
        PerformanceType::find_by_id(performance_type_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_performance_type_by_id", e))
    }

    pub async fn list_types(&self, conn: &impl ConnectionTrait) -> Result<Vec<performance_type::Model>, InternalError> {
        PerformanceType::find()
            .order_by_asc(performance_type::Column::Name)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_performance_types", e))
    }

    pub async fn insert_type(
        &self,
        conn: &impl ConnectionTrait,
        new_type: &NewPerformanceType,
    ) -> Result<performance_type::Model, InternalError> {
        let now = Utc::now().timestamp();

        performance_type::ActiveModel {
            name: Set(new_type.name.clone()),
            unit: Set(new_type.unit.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                InternalError::Fitness(FitnessError::DuplicatePerformanceType {
                    name: new_type.name.clone(),
                })
            } else {
                InternalError::database("insert_performance_type", e)
            }
        })
    }

    pub async fn update_type(
        &self,
        conn: &impl ConnectionTrait,
        existing: performance_type::Model,
        changes: &PerformanceTypeChanges,
    ) -> Result<performance_type::Model, InternalError> {
        let mut active: performance_type::ActiveModel = existing.into();
        if let Some(name) = &changes.name {
            active.name = Set(name.clone());
        }
        if let Some(unit) = &changes.unit {
            active.unit = Set(unit.clone());
        }
        active.updated_at = Set(Utc::now().timestamp());

        active.update(conn).await.map_err(|e| {
            if is_unique_violation(&e) {
                InternalError::Fitness(FitnessError::DuplicatePerformanceType {
                    name: changes.name.clone().unwrap_or_default(),
                })
            } else {
                InternalError::database("update_performance_type", e)
            }
        })
    }

    /// Assigned tests and grades of the type go with it
    pub async fn delete_type(&self, conn: &impl ConnectionTrait, performance_type_id: i32) -> Result<(), InternalError> {
        PerformanceType::delete_by_id(performance_type_id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_performance_type", e))?;

        Ok(())
    }

    pub async fn find_assignment_by_id(
        &self,
        conn: &impl ConnectionTrait,
        assignment_id: i32,
    ) -> Result<Option<assigned_performance_test::Model>, InternalError> {
        AssignedPerformanceTest::find_by_id(assignment_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_performance_test_by_id", e))
    }

    pub async fn list_assignments_for_student(
        &self,
        conn: &impl ConnectionTrait,
        student_user_id: i32,
    ) -> Result<Vec<assigned_performance_test::Model>, InternalError> {
        AssignedPerformanceTest::find()
            .filter(assigned_performance_test::Column::StudentUserId.eq(student_user_id))
            .order_by_asc(assigned_performance_test::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_performance_tests_for_student", e))
    }

    /// Fails with `PerformanceTestAlreadyAssigned` when the student already has the type
    pub async fn insert_assignment(
        &self,
        conn: &impl ConnectionTrait,
        new_assignment: &NewAssignedTest,
    ) -> Result<assigned_performance_test::Model, InternalError> {
        assigned_performance_test::ActiveModel {
            performance_type_id: Set(new_assignment.performance_type_id),
            teacher_user_id: Set(new_assignment.teacher_user_id),
            student_user_id: Set(new_assignment.student_user_id),
            date_assigned: Set(new_assignment.date_assigned),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                InternalError::Fitness(FitnessError::PerformanceTestAlreadyAssigned {
                    performance_type_id: new_assignment.performance_type_id,
                    student_user_id: new_assignment.student_user_id,
                })
            } else {
                InternalError::database("insert_performance_test", e)
            }
        })
    }

    pub async fn delete_assignment(&self, conn: &impl ConnectionTrait, assignment_id: i32) -> Result<(), InternalError> {
        AssignedPerformanceTest::delete_by_id(assignment_id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_performance_test", e))?;

        Ok(())
    }

    pub async fn find_grade_by_id(
        &self,
        conn: &impl ConnectionTrait,
        grade_id: i32,
    ) -> Result<Option<performance_grade::Model>, InternalError> {
        PerformanceGrade::find_by_id(grade_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_performance_grade_by_id", e))
    }

    /// Grades for one student, newest first
    pub async fn list_grades_for_student(
        &self,
        conn: &impl ConnectionTrait,
        student_user_id: i32,
    ) -> Result<Vec<performance_grade::Model>, InternalError> {
        PerformanceGrade::find()
            .filter(performance_grade::Column::StudentUserId.eq(student_user_id))
            .order_by_desc(performance_grade::Column::DateTaken)
            .order_by_desc(performance_grade::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_performance_grades_for_student", e))
    }

    pub async fn insert_grade(
        &self,
        conn: &impl ConnectionTrait,
        new_grade: &NewPerformanceGrade,
    ) -> Result<performance_grade::Model, InternalError> {
        let now = Utc::now().timestamp();

        performance_grade::ActiveModel {
            performance_type_id: Set(new_grade.performance_type_id),
            teacher_user_id: Set(new_grade.teacher_user_id),
            student_user_id: Set(new_grade.student_user_id),
            date_taken: Set(new_grade.date_taken),
            grade: Set(new_grade.grade),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_performance_grade", e))
    }

    pub async fn update_grade(
        &self,
        conn: &impl ConnectionTrait,
        existing: performance_grade::Model,
        changes: &PerformanceGradeChanges,
    ) -> Result<performance_grade::Model, InternalError> {
        let mut active: performance_grade::ActiveModel = existing.into();
        if let Some(date_taken) = changes.date_taken {
            active.date_taken = Set(date_taken);
        }
        if let Some(grade) = changes.grade {
            active.grade = Set(grade);
        }
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_performance_grade", e))
    }

    pub async fn delete_grade(&self, conn: &impl ConnectionTrait, grade_id: i32) -> Result<(), InternalError> {
        PerformanceGrade::delete_by_id(grade_id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_performance_grade", e))?;

        Ok(())
    }
}

impl Default for PerformanceStore {
    fn default() -> Self {
        Self::new()
    }
}
