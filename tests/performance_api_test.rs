mod common;

use poem::http::StatusCode;
use poem::test::TestClient;
use poem::Endpoint;
use serde_json::json;

use common::{json_body, register_student, register_teacher, test_client};

async fn create_type<E: Endpoint>(cli: &TestClient<E>, name: &str, unit: &str) -> i64 {
    let resp = cli
        .post("/api/fitness-metrics/performance-types")
        .body_json(&json!({ "name": name, "unit": unit }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    json_body(resp).await["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_performance_type_lifecycle() {
    let cli = test_client().await;
    let sit_ups = create_type(&cli, "Sit-ups", "reps").await;
    create_type(&cli, "Mile run", "seconds").await;

    let resp = cli
        .post("/api/fitness-metrics/performance-types")
        .body_json(&json!({ "name": "Sit-ups" }))
        .send()
        .await;
    resp.assert_status(StatusCode::CONFLICT);
    assert_eq!(json_body(resp).await["error"], "duplicate_performance_type");

    let listed = json_body(cli.get("/api/fitness-metrics/performance-types").send().await).await;
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Mile run", "Sit-ups"]);

    let resp = cli
        .patch(format!("/api/fitness-metrics/performance-types/{}", sit_ups))
        .body_json(&json!({ "name": "Curl-ups", "unit": "" }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let updated = json_body(resp).await;
    assert_eq!(updated["name"], "Curl-ups");
    assert!(updated["unit"].is_null());

    cli.delete(format!("/api/fitness-metrics/performance-types/{}", sit_ups))
        .send()
        .await
        .assert_status_is_ok();
    let resp = cli
        .delete(format!("/api/fitness-metrics/performance-types/{}", sit_ups))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["error"], "performance_type_not_found");
}

#[tokio::test]
async fn test_performance_test_is_assigned_once_per_student() {
    let cli = test_client().await;
    let teacher_id = register_teacher(&cli, "coach@school.edu").await;
    let student_id = register_student(&cli, "ana@school.edu", 7).await;
    let mile = create_type(&cli, "Mile run", "seconds").await;

    let assignment = json!({
        "performanceTypeId": mile,
        "teacherUserId": teacher_id,
        "studentUserId": student_id,
        "dateAssigned": "2025-04-01",
    });

    let resp = cli
        .post("/api/fitness-metrics/performance-tests")
        .body_json(&assignment)
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    let created = json_body(resp).await;
    assert_eq!(created["dateAssigned"], "2025-04-01");

    let resp = cli
        .post("/api/fitness-metrics/performance-tests")
        .body_json(&assignment)
        .send()
        .await;
    resp.assert_status(StatusCode::CONFLICT);
    assert_eq!(json_body(resp).await["error"], "performance_test_already_assigned");

    let listed = json_body(
        cli.get(format!("/api/fitness-metrics/performance-tests/student/{}", student_id))
            .send()
            .await,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    cli.delete(format!("/api/fitness-metrics/performance-tests/{}", created["id"]))
        .send()
        .await
        .assert_status_is_ok();
    cli.post("/api/fitness-metrics/performance-tests")
        .body_json(&assignment)
        .send()
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_assignment_requires_a_student_subject() {
    let cli = test_client().await;
    let teacher_id = register_teacher(&cli, "coach@school.edu").await;
    let mile = create_type(&cli, "Mile run", "seconds").await;

    let resp = cli
        .post("/api/fitness-metrics/performance-tests")
        .body_json(&json!({
            "performanceTypeId": mile,
            "teacherUserId": teacher_id,
            "studentUserId": teacher_id,
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["error"], "student_not_found");
}

#[tokio::test]
async fn test_performance_grade_lifecycle() {
    let cli = test_client().await;
    let teacher_id = register_teacher(&cli, "coach@school.edu").await;
    let student_id = register_student(&cli, "ana@school.edu", 8).await;
    let push_ups = create_type(&cli, "Push-ups", "reps").await;

    let grade = |date: &str, value: f64| {
        json!({
            "performanceTypeId": push_ups,
            "teacherUserId": teacher_id,
            "studentUserId": student_id,
            "dateTaken": date,
            "grade": value,
        })
    };

    let resp = cli
        .post("/api/fitness-metrics/performance-grades")
        .body_json(&grade("2025-01-15", 18.0))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    let first_id = json_body(resp).await["id"].as_i64().unwrap();

    cli.post("/api/fitness-metrics/performance-grades")
        .body_json(&grade("2025-03-15", 25.0))
        .send()
        .await
        .assert_status(StatusCode::CREATED);

    let listed = json_body(
        cli.get(format!("/api/fitness-metrics/performance-grades/student/{}", student_id))
            .send()
            .await,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
    assert_eq!(listed[0]["dateTaken"], "2025-03-15");

    let resp = cli
        .patch(format!("/api/fitness-metrics/performance-grades/{}", first_id))
        .body_json(&json!({ "grade": 20.0 }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let updated = json_body(resp).await;
    assert_eq!(updated["grade"], 20.0);
    assert_eq!(updated["dateTaken"], "2025-01-15");

    cli.delete(format!("/api/fitness-metrics/performance-grades/{}", first_id))
        .send()
        .await
        .assert_status_is_ok();
    let resp = cli
        .get(format!("/api/fitness-metrics/performance-grades/{}", first_id))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["error"], "performance_grade_not_found");
}

#[tokio::test]
async fn test_grade_for_unknown_type_is_not_found() {
    let cli = test_client().await;
    let teacher_id = register_teacher(&cli, "coach@school.edu").await;
    let student_id = register_student(&cli, "ana@school.edu", 8).await;

    let resp = cli
        .post("/api/fitness-metrics/performance-grades")
        .body_json(&json!({
            "performanceTypeId": 99,
            "teacherUserId": teacher_id,
            "studentUserId": student_id,
            "dateTaken": "2025-01-15",
            "grade": 12.0,
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["error"], "performance_type_not_found");
}

#[tokio::test]
async fn test_invalid_grade_returns_422() {
    let cli = test_client().await;

    let resp = cli
        .post("/api/fitness-metrics/performance-grades")
        .body_json(&json!({ "dateTaken": "2025-1-5", "grade": -2.0 }))
        .send()
        .await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(resp).await;
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(
        fields,
        vec!["performanceTypeId", "teacherUserId", "studentUserId", "dateTaken", "grade"]
    );
}
