mod common;

use poem::http::StatusCode;
use serde_json::json;

use common::{create_section, csv_form, json_body, register_student, roster_of, test_client};

#[tokio::test]
async fn test_roster_students_accepts_whole_batch() {
    let cli = test_client().await;
    let section_id = create_section(&cli, "2024-01", "8").await;
    let ana = register_student(&cli, "ana@school.edu", 8).await;
    let bo = register_student(&cli, "bo@school.edu", 8).await;

    let resp = cli
        .post(format!("/api/sections/{}/roster-students", section_id))
        .body_json(&json!({ "studentUserIds": [ana, bo] }))
        .send()
        .await;
    resp.assert_status_is_ok();

    let body = json_body(resp).await;
    assert_eq!(body["rosteredStudents"].as_array().unwrap().len(), 2);
    assert_eq!(roster_of(&cli, section_id).await, vec![ana, bo]);
}

#[tokio::test]
async fn test_roster_rejection_is_all_or_nothing() {
    let cli = test_client().await;
    let section_id = create_section(&cli, "2024-01", "8").await;
    let eighth = register_student(&cli, "ana@school.edu", 8).await;
    let ninth = register_student(&cli, "bo@school.edu", 9).await;

    let resp = cli
        .post(format!("/api/sections/{}/roster-students", section_id))
        .body_json(&json!({ "studentUserIds": [eighth, ninth, eighth, 4040] }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let body = json_body(resp).await;
    assert_eq!(body["duplicateIds"], json!([eighth]));
    assert_eq!(body["notExistingStudents"], json!([4040]));
    assert_eq!(body["incorrectGradeLevel"], json!([ninth]));
    assert_eq!(body["alreadyRosteredStudents"], json!([]));

    assert!(roster_of(&cli, section_id).await.is_empty());
}

#[tokio::test]
async fn test_already_rostered_student_is_rejected() {
    let cli = test_client().await;
    let first = create_section(&cli, "2024-01", "8").await;
    let second = create_section(&cli, "2024-02", "8").await;
    let ana = register_student(&cli, "ana@school.edu", 8).await;

    cli.post(format!("/api/sections/{}/roster-students", first))
        .body_json(&json!({ "studentUserIds": [ana] }))
        .send()
        .await
        .assert_status_is_ok();

    let resp = cli
        .post(format!("/api/sections/{}/roster-students", second))
        .body_json(&json!({ "studentUserIds": [ana] }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["alreadyRosteredStudents"], json!([ana]));
}

#[tokio::test]
async fn test_empty_student_list_returns_422() {
    let cli = test_client().await;
    let section_id = create_section(&cli, "2024-01", "8").await;

    let resp = cli
        .post(format!("/api/sections/{}/roster-students", section_id))
        .body_json(&json!({ "studentUserIds": [] }))
        .send()
        .await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(resp).await["errors"][0]["field"], "studentUserIds");
}

#[tokio::test]
async fn test_roster_csv_upload() {
    let cli = test_client().await;
    let section_id = create_section(&cli, "2024-01", "8").await;
    let ana = register_student(&cli, "ana@school.edu", 8).await;
    let bo = register_student(&cli, "bo@school.edu", 8).await;

    let content = "email,sectionCode\nana@school.edu,2024-01\nBO@school.edu,2024-01\n";
    let resp = cli
        .post(format!("/api/sections/{}/roster-students-upload-csv", section_id))
        .multipart(csv_form(content))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);

    let body = json_body(resp).await;
    assert_eq!(body["rosteredStudents"].as_array().unwrap().len(), 2);
    assert_eq!(roster_of(&cli, section_id).await, vec![ana, bo]);
}

#[tokio::test]
async fn test_roster_csv_reports_problem_rows() {
    let cli = test_client().await;
    let section_id = create_section(&cli, "2024-01", "8").await;
    create_section(&cli, "2024-02", "8").await;
    register_student(&cli, "ana@school.edu", 8).await;

    let content = "email,sectionCode\n\
                   ana@school.edu,2024-01\n\
                   ,2024-01\n\
                   ana@school.edu,2099-99\n\
                   ana@school.edu,2024-02\n";
    let resp = cli
        .post(format!("/api/sections/{}/roster-students-upload-csv", section_id))
        .multipart(csv_form(content))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let body = json_body(resp).await;
    assert_eq!(body["missingEmailSectionCode"][0]["line"], 3);
    assert_eq!(body["notExistingSections"][0]["sectionCode"], "2099-99");
    assert_eq!(body["mismatchedSections"][0]["line"], 5);

    assert!(roster_of(&cli, section_id).await.is_empty());
}

#[tokio::test]
async fn test_unroster_reports_skipped_ids() {
    let cli = test_client().await;
    let section_id = create_section(&cli, "2024-01", "8").await;
    let ana = register_student(&cli, "ana@school.edu", 8).await;
    let bo = register_student(&cli, "bo@school.edu", 8).await;

    cli.post(format!("/api/sections/{}/roster-students", section_id))
        .body_json(&json!({ "studentUserIds": [ana] }))
        .send()
        .await
        .assert_status_is_ok();

    let resp = cli
        .delete(format!("/api/sections/{}/unroster-students", section_id))
        .body_json(&json!({ "studentUserIds": [ana, bo] }))
        .send()
        .await;
    resp.assert_status_is_ok();

    let body = json_body(resp).await;
    assert_eq!(body["unrosteredStudents"][0]["studentUserId"], ana);
    assert_eq!(body["skippedStudentUserIds"], json!([bo]));
    assert!(roster_of(&cli, section_id).await.is_empty());
}

#[tokio::test]
async fn test_transfer_moves_students() {
    let cli = test_client().await;
    let from = create_section(&cli, "2024-01", "8").await;
    let to = create_section(&cli, "2024-02", "8").await;
    let ana = register_student(&cli, "ana@school.edu", 8).await;

    cli.post(format!("/api/sections/{}/roster-students", from))
        .body_json(&json!({ "studentUserIds": [ana] }))
        .send()
        .await
        .assert_status_is_ok();

    let resp = cli
        .post("/api/sections/transfer-students")
        .body_json(&json!({ "fromSectionId": from, "toSectionId": to, "studentUserIds": [ana] }))
        .send()
        .await;
    resp.assert_status_is_ok();

    let body = json_body(resp).await;
    assert_eq!(body["transferredStudents"][0]["sectionId"], to);
    assert!(roster_of(&cli, from).await.is_empty());
    assert_eq!(roster_of(&cli, to).await, vec![ana]);
}

#[tokio::test]
async fn test_transfer_rejects_students_outside_source() {
    let cli = test_client().await;
    let from = create_section(&cli, "2024-01", "8").await;
    let to = create_section(&cli, "2024-02", "8").await;
    let ana = register_student(&cli, "ana@school.edu", 8).await;

    let resp = cli
        .post("/api/sections/transfer-students")
        .body_json(&json!({ "fromSectionId": from, "toSectionId": to, "studentUserIds": [ana] }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["notInSourceSection"], json!([ana]));
}

#[tokio::test]
async fn test_transfer_into_inactive_section_is_refused() {
    let cli = test_client().await;
    let from = create_section(&cli, "2024-01", "8").await;
    let to = create_section(&cli, "2024-02", "8").await;
    let ana = register_student(&cli, "ana@school.edu", 8).await;

    cli.post(format!("/api/sections/{}/roster-students", from))
        .body_json(&json!({ "studentUserIds": [ana] }))
        .send()
        .await
        .assert_status_is_ok();
    cli.patch(format!("/api/sections/{}", to))
        .body_json(&json!({ "isActive": false }))
        .send()
        .await
        .assert_status_is_ok();

    let resp = cli
        .post("/api/sections/transfer-students")
        .body_json(&json!({ "fromSectionId": from, "toSectionId": to, "studentUserIds": [ana] }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "section_inactive");
    assert_eq!(roster_of(&cli, from).await, vec![ana]);
}
