// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::app_data::AppData;
use crate::providers::AcademicCalendar;
use crate::stores::{SectionStore, UserStore};
use crate::types::db::section::{self, GradeLevel};
use crate::types::db::user;
use crate::types::internal::section::NewSection;
use crate::types::internal::user::{NewUser, RoleDetails, StaffDetails};

pub const TEST_PEPPER: &str = "test-pepper-for-unit-tests";

/// In-memory SQLite database with every migration applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn setup_test_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    Arc::new(AppData::with_pepper(db, TEST_PEPPER.to_string()))
}

pub fn sample_new_user(email: &str, details: RoleDetails) -> NewUser {
    NewUser {
        email: email.to_string(),
        password: "pass1234".to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        birth_date: NaiveDate::from_ymd_opt(2010, 5, 17).expect("valid date"),
        gender_identity: None,
        pronouns: None,
        photo_url: None,
        details,
    }
}

/// Active section with the given code and grade level
pub async fn create_test_section(db: &DatabaseConnection, section_code: &str, grade_level: GradeLevel) -> section::Model {
    let new_section = NewSection {
        section_code: section_code.to_string(),
        grade_level,
        is_active: true,
    };

    SectionStore::new()
        .insert(db, &new_section)
        .await
        .expect("Failed to create test section")
}

/// Student currently in `grade`
pub async fn create_test_student(db: &DatabaseConnection, email: &str, grade: i32) -> user::Model {
    let grad_year = AcademicCalendar::current().grad_year_for(grade);
    let new_user = sample_new_user(email, RoleDetails::Student { grad_year });

    UserStore::new()
        .insert(db, &new_user, "test-hash".to_string())
        .await
        .expect("Failed to create test student")
        .user
}

pub async fn create_test_teacher(db: &DatabaseConnection, email: &str) -> user::Model {
    let new_user = sample_new_user(email, RoleDetails::Teacher(StaffDetails::default()));

    UserStore::new()
        .insert(db, &new_user, "test-hash".to_string())
        .await
        .expect("Failed to create test teacher")
        .user
}
