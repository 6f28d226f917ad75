use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::types::db::section_roster::{self, ActiveModel, Entity as SectionRoster};
use crate::types::db::user;

pub struct RosterStore;

impl RosterStore {
    pub fn new() -> Self {
        Self
    }

    /// Roster entry of a student in any section
    pub async fn find_by_student(
        &self,
        conn: &impl ConnectionTrait,
        student_user_id: i32,
    ) -> Result<Option<section_roster::Model>, InternalError> {
        SectionRoster::find()
            .filter(section_roster::Column::StudentUserId.eq(student_user_id))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_roster_by_student", e))
    }

    pub async fn find_in_section(
        &self,
        conn: &impl ConnectionTrait,
        section_id: i32,
        student_user_id: i32,
    ) -> Result<Option<section_roster::Model>, InternalError> {
        SectionRoster::find()
            .filter(section_roster::Column::SectionId.eq(section_id))
            .filter(section_roster::Column::StudentUserId.eq(student_user_id))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_roster_in_section", e))
    }

    pub async fn count_in_section(
        &self,
        conn: &impl ConnectionTrait,
        section_id: i32,
    ) -> Result<u64, InternalError> {
        SectionRoster::find()
            .filter(section_roster::Column::SectionId.eq(section_id))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_roster_in_section", e))
    }

    /// Roster entries of a section joined with their student rows
    pub async fn list_students_in_section(
        &self,
        conn: &impl ConnectionTrait,
        section_id: i32,
    ) -> Result<Vec<user::Model>, InternalError> {
        let rows = SectionRoster::find()
            .filter(section_roster::Column::SectionId.eq(section_id))
            .order_by_asc(section_roster::Column::Id)
            .find_also_related(user::Entity)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_students_in_section", e))?;

        Ok(rows.into_iter().filter_map(|(_, student)| student).collect())
    }

    pub async fn insert(
        &self,
        conn: &impl ConnectionTrait,
        section_id: i32,
        student_user_id: i32,
    ) -> Result<section_roster::Model, InternalError> {
        ActiveModel {
            student_user_id: Set(student_user_id),
            section_id: Set(section_id),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_roster_entry", e))
    }

    pub async fn delete(&self, conn: &impl ConnectionTrait, entry_id: i32) -> Result<(), InternalError> {
        SectionRoster::delete_by_id(entry_id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_roster_entry", e))?;

        Ok(())
    }
}

impl Default for RosterStore {
    fn default() -> Self {
        Self::new()
    }
}
