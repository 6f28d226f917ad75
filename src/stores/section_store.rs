use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::internal::SectionError;
use crate::errors::InternalError;
use crate::stores::is_unique_violation;
use crate::types::db::section::{self, ActiveModel, Entity as Section};
use crate::types::internal::section::{NewSection, SectionChanges};

pub struct SectionStore;

impl SectionStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        section_id: i32,
    ) -> Result<Option<section::Model>, InternalError> {
        Section::find_by_id(section_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_section_by_id", e))
    }

    pub async fn find_by_code(
        &self,
        conn: &impl ConnectionTrait,
        section_code: &str,
    ) -> Result<Option<section::Model>, InternalError> {
        Section::find()
            .filter(section::Column::SectionCode.eq(section_code))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_section_by_code", e))
    }

    pub async fn find_by_codes(
        &self,
        conn: &impl ConnectionTrait,
        section_codes: &[String],
    ) -> Result<Vec<section::Model>, InternalError> {
        if section_codes.is_empty() {
            return Ok(Vec::new());
        }

        Section::find()
            .filter(section::Column::SectionCode.is_in(section_codes.iter().cloned()))
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_sections_by_codes", e))
    }

    /// List sections ordered by code
    pub async fn list(
        &self,
        conn: &impl ConnectionTrait,
        active_only: bool,
    ) -> Result<Vec<section::Model>, InternalError> {
        let mut query = Section::find();
        if active_only {
            query = query.filter(section::Column::IsActive.eq(true));
        }

        query
            .order_by_asc(section::Column::SectionCode)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_sections", e))
    }

    pub async fn insert(
        &self,
        conn: &impl ConnectionTrait,
        new_section: &NewSection,
    ) -> Result<section::Model, InternalError> {
        let now = Utc::now().timestamp();

        ActiveModel {
            section_code: Set(new_section.section_code.clone()),
            grade_level: Set(new_section.grade_level),
            is_active: Set(new_section.is_active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                InternalError::Section(SectionError::DuplicateCode {
                    section_code: new_section.section_code.clone(),
                })
            } else {
                InternalError::database("insert_section", e)
            }
        })
    }

    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        existing: section::Model,
        changes: &SectionChanges,
    ) -> Result<section::Model, InternalError> {
        let mut active: ActiveModel = existing.into();

        if let Some(section_code) = &changes.section_code {
            active.section_code = Set(section_code.clone());
        }
        if let Some(grade_level) = changes.grade_level {
            active.grade_level = Set(grade_level);
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().timestamp());

        active.update(conn).await.map_err(|e| {
            if is_unique_violation(&e) {
                InternalError::Section(SectionError::DuplicateCode {
                    section_code: changes.section_code.clone().unwrap_or_default(),
                })
            } else {
                InternalError::database("update_section", e)
            }
        })
    }

    pub async fn delete(&self, conn: &impl ConnectionTrait, section_id: i32) -> Result<(), InternalError> {
        Section::delete_by_id(section_id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_section", e))?;

        Ok(())
    }
}

impl Default for SectionStore {
    fn default() -> Self {
        Self::new()
    }
}
