use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::errors::InternalError;
use crate::types::db::student_anthro::{self, ActiveModel, Entity as StudentAnthro};
use crate::types::internal::fitness::{AnthroChanges, NewAnthro};

pub struct AnthroStore;

impl AnthroStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        anthro_id: i32,
    ) -> Result<Option<student_anthro::Model>, InternalError> {
        StudentAnthro::find_by_id(anthro_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_anthro_by_id", e))
    }

    /// Measurements for one student, newest first
    pub async fn list_for_student(
        &self,
        conn: &impl ConnectionTrait,
        student_user_id: i32,
    ) -> Result<Vec<student_anthro::Model>, InternalError> {
        StudentAnthro::find()
            .filter(student_anthro::Column::StudentUserId.eq(student_user_id))
            .order_by_desc(student_anthro::Column::DateRecorded)
            .order_by_desc(student_anthro::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_anthros_for_student", e))
    }

    pub async fn insert(
        &self,
        conn: &impl ConnectionTrait,
        new_anthro: &NewAnthro,
    ) -> Result<student_anthro::Model, InternalError> {
        let now = Utc::now().timestamp();

        ActiveModel {
            teacher_user_id: Set(new_anthro.teacher_user_id),
            student_user_id: Set(new_anthro.student_user_id),
            date_recorded: Set(new_anthro.date_recorded),
            height: Set(new_anthro.height),
            weight: Set(new_anthro.weight),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_anthro", e))
    }

    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        existing: student_anthro::Model,
        changes: &AnthroChanges,
    ) -> Result<student_anthro::Model, InternalError> {
        let mut active: ActiveModel = existing.into();
        if let Some(date_recorded) = changes.date_recorded {
            active.date_recorded = Set(date_recorded);
        }
        if let Some(height) = changes.height {
            active.height = Set(height);
        }
        if let Some(weight) = changes.weight {
            active.weight = Set(weight);
        }
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_anthro", e))
    }

    pub async fn delete(&self, conn: &impl ConnectionTrait, anthro_id: i32) -> Result<(), InternalError> {
        StudentAnthro::delete_by_id(anthro_id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_anthro", e))?;

        Ok(())
    }
}

impl Default for AnthroStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::test::utils::{create_test_student, create_test_teacher, setup_test_db};

    fn measurement(teacher_user_id: i32, student_user_id: i32, day: u32) -> NewAnthro {
        NewAnthro {
            teacher_user_id,
            student_user_id,
            date_recorded: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            height: 150.5,
            weight: 42.0,
        }
    }

    #[tokio::test]
    async fn test_list_for_student_is_newest_first() {
        let db = setup_test_db().await;
        let store = AnthroStore::new();
        let teacher = create_test_teacher(&db, "coach@school.edu").await;
        let student = create_test_student(&db, "ana@school.edu", 8).await;

        store.insert(&db, &measurement(teacher.id, student.id, 3)).await.unwrap();
        store.insert(&db, &measurement(teacher.id, student.id, 20)).await.unwrap();

        let records = store.list_for_student(&db, student.id).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date_recorded.to_string(), "2025-01-20");
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() {
        let db = setup_test_db().await;
        let store = AnthroStore::new();
        let teacher = create_test_teacher(&db, "coach@school.edu").await;
        let student = create_test_student(&db, "ana@school.edu", 8).await;
        let record = store.insert(&db, &measurement(teacher.id, student.id, 3)).await.unwrap();

        let changes = AnthroChanges {
            weight: Some(44.25),
            ..Default::default()
        };
        let updated = store.update(&db, record, &changes).await.unwrap();

        assert_eq!(updated.weight, 44.25);
        assert_eq!(updated.height, 150.5);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let db = setup_test_db().await;
        let store = AnthroStore::new();
        let teacher = create_test_teacher(&db, "coach@school.edu").await;
        let student = create_test_student(&db, "ana@school.edu", 8).await;
        let record = store.insert(&db, &measurement(teacher.id, student.id, 3)).await.unwrap();

        store.delete(&db, record.id).await.unwrap();

        assert!(store.find_by_id(&db, record.id).await.unwrap().is_none());
    }
}
