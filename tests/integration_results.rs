mod common;

use axum::http::StatusCode;
use common::{bulk_request, get_json, send_empty, send_json, setup_test_app};
use serde_json::json;

#[tokio::test]
async fn bulk_entry_grades_and_ranks_the_batch() {
    let (app, _store) = setup_test_app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/results/bulk",
        bulk_request(
            "Class 10 - A",
            "UNIT_TEST_1",
            "Mathematics",
            100.0,
            &[
                ("S001", "Alice", "01", 80.0),
                ("S002", "Bob", "02", 80.0),
                ("S003", "Carol", "03", 65.0),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 3);

    // Sorted by marks descending; equal marks share a rank and the next
    // distinct mark takes its 1-based position.
    assert_eq!(results[0]["student_id"], "S001");
    assert_eq!(results[0]["class_rank"], 1);
    assert_eq!(results[0]["percentage"], 80.0);
    assert_eq!(results[0]["grade"], "B1");
    assert_eq!(results[0]["grade_point"], 8.0);
    assert_eq!(results[0]["is_passed"], true);
    assert_eq!(results[0]["is_published"], false);

    assert_eq!(results[1]["student_id"], "S002");
    assert_eq!(results[1]["class_rank"], 1);

    assert_eq!(results[2]["student_id"], "S003");
    assert_eq!(results[2]["class_rank"], 3);
    assert_eq!(results[2]["grade"], "B2");
    assert_eq!(results[2]["grade_point"], 7.0);
}

#[tokio::test]
async fn resubmitting_a_batch_replaces_the_previous_one() {
    let (app, _store) = setup_test_app();

    let first = bulk_request(
        "Class 10 - A",
        "UNIT_TEST_1",
        "Mathematics",
        100.0,
        &[("S001", "Alice", "01", 40.0), ("S002", "Bob", "02", 50.0)],
    );
    let (status, _) = send_json(&app, "POST", "/api/results/bulk", first).await;
    assert_eq!(status, StatusCode::OK);

    // Corrected marks for the same key: no duplicates, ranks flip.
    let corrected = bulk_request(
        "Class 10 - A",
        "UNIT_TEST_1",
        "Mathematics",
        100.0,
        &[("S001", "Alice", "01", 90.0), ("S002", "Bob", "02", 50.0)],
    );
    let (status, _) = send_json(&app, "POST", "/api/results/bulk", corrected).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(
        &app,
        "/api/results/class/Class%2010%20-%20A/year/2024-25?exam_type=UNIT_TEST_1&subject=Mathematics",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["student_id"], "S001");
    assert_eq!(results[0]["marks_obtained"], 90.0);
    assert_eq!(results[0]["class_rank"], 1);
    assert_eq!(results[1]["student_id"], "S002");
    assert_eq!(results[1]["class_rank"], 2);
}

#[tokio::test]
async fn bulk_entry_with_no_entries_is_unprocessable() {
    let (app, _store) = setup_test_app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/results/bulk",
        json!({
            "class_name": "Class 10 - A",
            "exam_type": "UNIT_TEST_1",
            "academic_year": "2024-25",
            "subject": "Mathematics",
            "max_marks": 100.0,
            "entered_by": "teacher-01",
            "entries": [],
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("Validation failed"));
}

#[tokio::test]
async fn duplicate_student_in_a_batch_is_rejected_before_storing() {
    let (app, _store) = setup_test_app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/results/bulk",
        bulk_request(
            "Class 10 - A",
            "UNIT_TEST_1",
            "Mathematics",
            100.0,
            &[("S001", "Alice", "01", 80.0), ("S001", "Alice", "01", 85.0)],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("S001"));

    // Nothing was stored for the key.
    let (_, body) = get_json(
        &app,
        "/api/results/class/Class%2010%20-%20A/year/2024-25?subject=Mathematics",
    )
    .await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_exam_type_is_rejected_at_the_boundary() {
    let (app, _store) = setup_test_app();

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/results/bulk",
        bulk_request(
            "Class 10 - A",
            "FINALS",
            "Mathematics",
            100.0,
            &[("S001", "Alice", "01", 80.0)],
        ),
    )
    .await;

    // Serde refuses the enum value before any handler logic runs.
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn class_sheet_is_ordered_and_filterable() {
    let (app, _store) = setup_test_app();

    send_json(
        &app,
        "POST",
        "/api/results/bulk",
        bulk_request(
            "Class 10 - A",
            "UNIT_TEST_1",
            "Science",
            100.0,
            &[("S001", "Alice", "01", 70.0), ("S002", "Bob", "02", 90.0)],
        ),
    )
    .await;
    send_json(
        &app,
        "POST",
        "/api/results/bulk",
        bulk_request(
            "Class 10 - A",
            "UNIT_TEST_1",
            "Mathematics",
            100.0,
            &[("S001", "Alice", "01", 85.0), ("S002", "Bob", "02", 65.0)],
        ),
    )
    .await;

    let (status, body) =
        get_json(&app, "/api/results/class/Class%2010%20-%20A/year/2024-25").await;
    assert_eq!(status, StatusCode::OK);

    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 4);
    // Subjects in order, rank order within each subject.
    assert_eq!(results[0]["subject"], "Mathematics");
    assert_eq!(results[0]["student_id"], "S001");
    assert_eq!(results[1]["subject"], "Mathematics");
    assert_eq!(results[1]["student_id"], "S002");
    assert_eq!(results[2]["subject"], "Science");
    assert_eq!(results[2]["student_id"], "S002");
    assert_eq!(results[3]["subject"], "Science");
    assert_eq!(results[3]["student_id"], "S001");

    let (status, body) = get_json(
        &app,
        "/api/results/class/Class%2010%20-%20A/year/2024-25?subject=Science",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn student_results_can_be_narrowed_to_a_year() {
    let (app, _store) = setup_test_app();

    send_json(
        &app,
        "POST",
        "/api/results/bulk",
        bulk_request(
            "Class 10 - A",
            "UNIT_TEST_1",
            "Mathematics",
            100.0,
            &[("S001", "Alice", "01", 80.0)],
        ),
    )
    .await;

    let (status, body) = get_json(&app, "/api/results/student/S001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) =
        get_json(&app, "/api/results/student/S001?academic_year=2023-24").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn updating_marks_regrades_and_reranks_the_group() {
    let (app, _store) = setup_test_app();

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/results/bulk",
        bulk_request(
            "Class 10 - A",
            "UNIT_TEST_1",
            "Mathematics",
            100.0,
            &[("S001", "Alice", "01", 90.0), ("S002", "Bob", "02", 70.0)],
        ),
    )
    .await;
    let bob_id = body.as_array().unwrap()[1]["id"].as_str().unwrap().to_string();

    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/results/{bob_id}"),
        json!({ "marks_obtained": 95.0, "teacher_remarks": "Big improvement" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["percentage"], 95.0);
    assert_eq!(updated["grade"], "A1");
    assert_eq!(updated["class_rank"], 1);
    assert_eq!(updated["teacher_remarks"], "Big improvement");

    // Alice dropped to second place.
    let (_, body) = get_json(
        &app,
        "/api/results/class/Class%2010%20-%20A/year/2024-25?subject=Mathematics",
    )
    .await;
    let results = body.as_array().unwrap();
    assert_eq!(results[0]["student_id"], "S002");
    assert_eq!(results[1]["student_id"], "S001");
    assert_eq!(results[1]["class_rank"], 2);
}

#[tokio::test]
async fn updating_a_missing_result_is_not_found() {
    let (app, _store) = setup_test_app();

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/results/{}", uuid::Uuid::new_v4()),
        json!({ "marks_obtained": 50.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_result_reranks_the_remainder() {
    let (app, _store) = setup_test_app();

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/results/bulk",
        bulk_request(
            "Class 10 - A",
            "UNIT_TEST_1",
            "Mathematics",
            100.0,
            &[
                ("S001", "Alice", "01", 90.0),
                ("S002", "Bob", "02", 80.0),
                ("S003", "Carol", "03", 70.0),
            ],
        ),
    )
    .await;
    let alice_id = body.as_array().unwrap()[0]["id"].as_str().unwrap().to_string();

    let (status, _) = send_empty(&app, "DELETE", &format!("/api/results/{alice_id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get_json(
        &app,
        "/api/results/class/Class%2010%20-%20A/year/2024-25?subject=Mathematics",
    )
    .await;
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["student_id"], "S002");
    assert_eq!(results[0]["class_rank"], 1);
    assert_eq!(results[1]["student_id"], "S003");
    assert_eq!(results[1]["class_rank"], 2);
}

#[tokio::test]
async fn deleting_a_missing_result_is_not_found() {
    let (app, _store) = setup_test_app();

    let (status, _) =
        send_empty(&app, "DELETE", &format!("/api/results/{}", uuid::Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
