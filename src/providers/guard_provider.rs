use std::sync::Arc;

use sea_orm::ConnectionTrait;

use crate::errors::internal::{SectionError, UserError};
use crate::errors::InternalError;
use crate::stores::{RosterStore, SectionStore, UserStore};
use crate::types::db::user::UserType;
use crate::types::db::{section, user};
use crate::types::internal::section::SectionRosterState;

/// Existence and state checks run before a workflow mutates anything
///
/// Each guard returns the entity it resolved so callers reuse it instead of
/// querying again.
pub struct GuardProvider {
    section_store: Arc<SectionStore>,
    roster_store: Arc<RosterStore>,
    user_store: Arc<UserStore>,
}

impl GuardProvider {
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

    pub async fn require_section(
        &self,
        conn: &impl ConnectionTrait,
        section_id: i32,
    ) -> Result<section::Model, InternalError> {
        self.section_store
            .find_by_id(conn, section_id)
            .await?
            .ok_or(InternalError::Section(SectionError::NotFound { section_id }))
    }

    pub async fn section_roster_state(
        &self,
        conn: &impl ConnectionTrait,
        section_id: i32,
    ) -> Result<SectionRosterState, InternalError> {
        let section = self.require_section(conn, section_id).await?;
        let rostered_count = self.roster_store.count_in_section(conn, section_id).await?;

        Ok(SectionRosterState {
            section,
            rostered_count,
        })
    }

    /// Sections with rostered students can be neither deleted nor deactivated
    pub async fn require_section_deletable(
        &self,
        conn: &impl ConnectionTrait,
        section_id: i32,
    ) -> Result<section::Model, InternalError> {
        let state = self.section_roster_state(conn, section_id).await?;
        if state.has_rostered_students() {
            return Err(InternalError::Section(SectionError::HasRosteredStudents {
                section_id,
                student_count: state.rostered_count,
            }));
        }

        Ok(state.section)
    }

    pub async fn require_user(&self, conn: &impl ConnectionTrait, user_id: i32) -> Result<user::Model, InternalError> {
        self.user_store
            .find_by_id(conn, user_id)
            .await?
            .ok_or(InternalError::User(UserError::NotFound { user_id }))
    }

    /// Fails when another user already owns the (normalized) email
    pub async fn require_email_available(
        &self,
        conn: &impl ConnectionTrait,
        email: &str,
        except_user_id: Option<i32>,
    ) -> Result<(), InternalError> {
        match self.user_store.find_by_email(conn, email).await? {
            Some(owner) if Some(owner.id) != except_user_id => Err(InternalError::User(UserError::EmailTaken {
                email: email.to_string(),
            })),
            _ => Ok(()),
        }
    }

    pub async fn require_not_rostered(&self, conn: &impl ConnectionTrait, user: &user::Model) -> Result<(), InternalError> {
        if user.user_type != UserType::Student {
            return Ok(());
        }

        match self.roster_store.find_by_student(conn, user.id).await? {
            Some(entry) => Err(InternalError::User(UserError::Rostered {
                user_id: user.id,
                section_id: entry.section_id,
            })),
            None => Ok(()),
        }
    }

    /// Teachers and admins may both record measurements
    pub async fn require_teacher(&self, conn: &impl ConnectionTrait, user_id: i32) -> Result<user::Model, InternalError> {
        match self.user_store.find_by_id(conn, user_id).await? {
            Some(user) if matches!(user.user_type, UserType::Teacher | UserType::Admin) => Ok(user),
            _ => Err(InternalError::User(UserError::TeacherNotFound { user_id })),
        }
    }

    pub async fn require_student(&self, conn: &impl ConnectionTrait, user_id: i32) -> Result<user::Model, InternalError> {
        match self.user_store.find_by_id(conn, user_id).await? {
            Some(user) if user.user_type == UserType::Student => Ok(user),
            _ => Err(InternalError::User(UserError::StudentNotFound { user_id })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{create_test_section, create_test_student, create_test_teacher, setup_test_db};
    use crate::types::db::section::GradeLevel;

    fn guards() -> GuardProvider {
        GuardProvider::new(
            Arc::new(SectionStore::new()),
            Arc::new(RosterStore::new()),
            Arc::new(UserStore::new()),
        )
    }

    #[tokio::test]
    async fn test_require_section_missing_is_not_found() {
        let db = setup_test_db().await;

        let result = guards().require_section(&db, 99).await;

        assert!(matches!(
            result,
            Err(InternalError::Section(SectionError::NotFound { section_id: 99 }))
        ));
    }

    #[tokio::test]
    async fn test_section_with_students_is_not_deletable() {
        let db = setup_test_db().await;
        let guards = guards();
        let section = create_test_section(&db, "2024-01", GradeLevel::Grade7).await;
        let student = create_test_student(&db, "ana@school.edu", 7).await;

        assert!(guards.require_section_deletable(&db, section.id).await.is_ok());

        RosterStore::new().insert(&db, section.id, student.id).await.unwrap();
        let result = guards.require_section_deletable(&db, section.id).await;

        assert!(matches!(
            result,
            Err(InternalError::Section(SectionError::HasRosteredStudents { student_count: 1, .. }))
        ));
        assert!(matches!(
            guards.require_not_rostered(&db, &student).await,
            Err(InternalError::User(UserError::Rostered { .. }))
        ));
    }

    #[tokio::test]
    async fn test_email_available_ignores_the_owner() {
        let db = setup_test_db().await;
        let guards = guards();
        let student = create_test_student(&db, "ana@school.edu", 7).await;

        assert!(guards.require_email_available(&db, "ana@school.edu", Some(student.id)).await.is_ok());
        assert!(guards.require_email_available(&db, "new@school.edu", None).await.is_ok());
        assert!(matches!(
            guards.require_email_available(&db, "ana@school.edu", None).await,
            Err(InternalError::User(UserError::EmailTaken { .. }))
        ));
    }

    #[tokio::test]
    async fn test_role_guards_check_user_type() {
        let db = setup_test_db().await;
        let guards = guards();
        let student = create_test_student(&db, "ana@school.edu", 7).await;
        let teacher = create_test_teacher(&db, "coach@school.edu").await;

        assert_eq!(guards.require_student(&db, student.id).await.unwrap().id, student.id);
        assert_eq!(guards.require_teacher(&db, teacher.id).await.unwrap().id, teacher.id);
        assert!(matches!(
            guards.require_student(&db, teacher.id).await,
            Err(InternalError::User(UserError::StudentNotFound { .. }))
        ));
        assert!(matches!(
            guards.require_teacher(&db, student.id).await,
            Err(InternalError::User(UserError::TeacherNotFound { .. }))
        ));
        assert!(guards.require_user(&db, teacher.id + 100).await.is_err());
    }
}
