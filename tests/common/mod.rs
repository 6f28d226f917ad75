// Common helpers for HTTP-level integration tests
#![allow(dead_code)]

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::test::{TestClient, TestForm, TestFormField, TestResponse};
use poem::Endpoint;
use sea_orm::Database;
use serde_json::{json, Value};

use schoolyard_backend::api::build_routes;
use schoolyard_backend::providers::AcademicCalendar;
use schoolyard_backend::AppData;

pub const TEST_PEPPER: &str = "integration-test-pepper";

/// Full route tree over a fresh, migrated in-memory database
pub async fn test_client() -> TestClient<impl Endpoint> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let app_data = Arc::new(AppData::with_pepper(db, TEST_PEPPER.to_string()));
    TestClient::new(build_routes(app_data, "http://localhost:3000/api"))
}

pub async fn json_body(resp: TestResponse) -> Value {
    resp.0
        .into_body()
        .into_json::<Value>()
        .await
        .expect("Response body is not JSON")
}

/// Multipart form carrying `content` as the `file` field
pub fn csv_form(content: &str) -> TestForm {
    TestForm::new().field(
        TestFormField::bytes(content.as_bytes().to_vec())
            .name("file")
            .filename("upload.csv")
            .content_type("text/csv"),
    )
}

pub async fn create_section<E: Endpoint>(cli: &TestClient<E>, section_code: &str, grade_level: &str) -> i64 {
    let resp = cli
        .post("/api/sections")
        .body_json(&json!({
            "sectionCode": section_code,
            "gradeLevel": grade_level,
            "isActive": true,
        }))
        .send()
        .await;
    resp.assert_status(poem::http::StatusCode::CREATED);

    json_body(resp).await["id"].as_i64().expect("section id")
}

/// Register a student who is currently in `grade`
pub async fn register_student<E: Endpoint>(cli: &TestClient<E>, email: &str, grade: i32) -> i64 {
    let grad_year = AcademicCalendar::current().grad_year_for(grade);
    let resp = cli
        .post("/api/users/register")
        .body_json(&json!({
            "email": email,
            "password": "pass1234",
            "firstName": "Stu",
            "lastName": "Dent",
            "birthDate": "2012-03-04",
            "userType": "student",
            "studentDetails": { "gradYear": grad_year },
        }))
        .send()
        .await;
    resp.assert_status(poem::http::StatusCode::CREATED);

    json_body(resp).await["id"].as_i64().expect("user id")
}

pub async fn register_teacher<E: Endpoint>(cli: &TestClient<E>, email: &str) -> i64 {
    let resp = cli
        .post("/api/users/register")
        .body_json(&json!({
            "email": email,
            "password": "pass1234",
            "firstName": "Tea",
            "lastName": "Cher",
            "birthDate": "1980-07-21",
            "userType": "teacher",
            "teacherDetails": { "yearsExp": 10, "bio": "Math" },
        }))
        .send()
        .await;
    resp.assert_status(poem::http::StatusCode::CREATED);

    json_body(resp).await["id"].as_i64().expect("user id")
}

/// Ids of the students currently rostered in a section
pub async fn roster_of<E: Endpoint>(cli: &TestClient<E>, section_id: i64) -> Vec<i64> {
    let resp = cli.get(format!("/api/sections/{}", section_id)).send().await;
    resp.assert_status_is_ok();

    let body = json_body(resp).await;
    let mut ids: Vec<i64> = body["students"]
        .as_array()
        .expect("students array")
        .iter()
        .filter_map(|s| s["id"].as_i64())
        .collect();
    ids.sort_unstable();
    ids
}
