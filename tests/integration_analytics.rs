mod common;

use axum::http::StatusCode;
use common::{bulk_request, get_json, send_json, setup_test_app};

#[tokio::test]
async fn empty_class_gets_the_zero_valued_object() {
    let (app, _store) = setup_test_app();

    let (status, body) = get_json(
        &app,
        "/api/results/analytics/class/Class%2010%20-%20A/year/2024-25",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["class_name"], "Class 10 - A");
    assert_eq!(body["total_students"], 0);
    assert_eq!(body["class_average"], 0.0);
    assert_eq!(body["pass_percentage"], 0.0);
    assert!(body["subject_heatmap"].as_array().unwrap().is_empty());
    assert!(body["at_risk_students"].as_array().unwrap().is_empty());
    assert!(body["recognition"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn class_summary_and_heatmap_cover_every_subject() {
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
            &[("S001", "Alice", "01", 90.0), ("S002", "Bob", "02", 40.0)],
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
            "Science",
            100.0,
            &[("S001", "Alice", "01", 90.0), ("S002", "Bob", "02", 90.0)],
        ),
    )
    .await;

    let (status, body) = get_json(
        &app,
        "/api/results/analytics/class/Class%2010%20-%20A/year/2024-25?exam_type=UNIT_TEST_1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["total_students"], 2);
    // Alice averages 90, Bob 65.
    assert_eq!(body["class_average"], 77.5);
    assert_eq!(body["highest_percentage"], 90.0);
    assert_eq!(body["lowest_percentage"], 65.0);
    // Both students passed every subject (40 is a D).
    assert_eq!(body["pass_percentage"], 100.0);

    let heatmap = body["subject_heatmap"].as_array().unwrap();
    assert_eq!(heatmap.len(), 2);
    assert_eq!(heatmap[0]["subject"], "Mathematics");
    assert_eq!(heatmap[0]["class_average"], 65.0);
    assert_eq!(heatmap[0]["performance"], "AVERAGE");
    assert_eq!(heatmap[0]["pass_percentage"], 100.0);
    assert_eq!(heatmap[1]["subject"], "Science");
    assert_eq!(heatmap[1]["class_average"], 90.0);
    assert_eq!(heatmap[1]["performance"], "EXCELLENT");
}

#[tokio::test]
async fn failed_subjects_flag_critical_risk() {
    let (app, _store) = setup_test_app();

    send_json(
        &app,
        "POST",
        "/api/results/bulk",
        bulk_request(
            "Class 10 - A",
            "ANNUAL",
            "Mathematics",
            100.0,
            &[("S001", "Alice", "01", 30.0), ("S002", "Bob", "02", 85.0)],
        ),
    )
    .await;

    let (status, body) = get_json(
        &app,
        "/api/results/analytics/class/Class%2010%20-%20A/year/2024-25?exam_type=ANNUAL",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let at_risk = body["at_risk_students"].as_array().unwrap();
    assert_eq!(at_risk.len(), 1);
    assert_eq!(at_risk[0]["student_id"], "S001");
    assert_eq!(at_risk[0]["risk_level"], "CRITICAL");
    assert_eq!(at_risk[0]["failed_subjects"][0], "Mathematics");
    assert_eq!(at_risk[0]["overall_percentage"], 30.0);
}

#[tokio::test]
async fn steep_drop_against_the_previous_exam_flags_a_warning() {
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
    send_json(
        &app,
        "POST",
        "/api/results/bulk",
        bulk_request(
            "Class 10 - A",
            "UNIT_TEST_2",
            "Mathematics",
            100.0,
            &[("S001", "Alice", "01", 60.0)],
        ),
    )
    .await;

    let (_, body) = get_json(
        &app,
        "/api/results/analytics/class/Class%2010%20-%20A/year/2024-25?exam_type=UNIT_TEST_2",
    )
    .await;

    // 60 is a pass and above the low-average line; only the 20-point drop
    // versus UNIT_TEST_1 flags her.
    let at_risk = body["at_risk_students"].as_array().unwrap();
    assert_eq!(at_risk.len(), 1);
    assert_eq!(at_risk[0]["student_id"], "S001");
    assert_eq!(at_risk[0]["risk_level"], "WARNING");
    assert_eq!(at_risk[0]["dropping_subjects"][0], "Mathematics");
    assert!(at_risk[0]["failed_subjects"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn at_risk_list_is_sorted_worst_first() {
    let (app, _store) = setup_test_app();

    send_json(
        &app,
        "POST",
        "/api/results/bulk",
        bulk_request(
            "Class 10 - A",
            "ANNUAL",
            "Mathematics",
            100.0,
            &[
                ("S001", "Alice", "01", 45.0),
                ("S002", "Bob", "02", 20.0),
                ("S003", "Carol", "03", 95.0),
            ],
        ),
    )
    .await;

    let (_, body) = get_json(
        &app,
        "/api/results/analytics/class/Class%2010%20-%20A/year/2024-25?exam_type=ANNUAL",
    )
    .await;

    let at_risk = body["at_risk_students"].as_array().unwrap();
    assert_eq!(at_risk.len(), 2);
    assert_eq!(at_risk[0]["student_id"], "S002");
    assert_eq!(at_risk[0]["risk_level"], "CRITICAL");
    assert_eq!(at_risk[1]["student_id"], "S001");
    assert_eq!(at_risk[1]["risk_level"], "WARNING");
}

#[tokio::test]
async fn recognition_board_names_topper_improved_and_consistent() {
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
            &[("S001", "Alice", "01", 70.0), ("S002", "Bob", "02", 85.0)],
        ),
    )
    .await;
    send_json(
        &app,
        "POST",
        "/api/results/bulk",
        bulk_request(
            "Class 10 - A",
            "UNIT_TEST_2",
            "Mathematics",
            100.0,
            &[("S001", "Alice", "01", 82.0), ("S002", "Bob", "02", 86.0)],
        ),
    )
    .await;

    let (_, body) = get_json(
        &app,
        "/api/results/analytics/class/Class%2010%20-%20A/year/2024-25?exam_type=UNIT_TEST_2",
    )
    .await;

    let recognition = body["recognition"].as_array().unwrap();
    assert_eq!(recognition.len(), 2);

    assert_eq!(recognition[0]["category"], "CLASS_TOPPER");
    assert_eq!(recognition[0]["student_name"], "Bob");
    assert_eq!(recognition[0]["detail"], "86.00%");

    // Alice gained 12 points against UNIT_TEST_1, Bob only 1.
    assert_eq!(recognition[1]["category"], "MOST_IMPROVED");
    assert_eq!(recognition[1]["student_name"], "Alice");
    assert_eq!(recognition[1]["detail"], "+12.00% improvement");
}

#[tokio::test]
async fn most_consistent_needs_at_least_two_records() {
    let (app, _store) = setup_test_app();

    // Whole-year view: Alice swings, Bob barely moves, Carol sat one exam.
    send_json(
        &app,
        "POST",
        "/api/results/bulk",
        bulk_request(
            "Class 10 - A",
            "UNIT_TEST_1",
            "Mathematics",
            100.0,
            &[
                ("S001", "Alice", "01", 95.0),
                ("S002", "Bob", "02", 80.0),
                ("S003", "Carol", "03", 88.0),
            ],
        ),
    )
    .await;
    send_json(
        &app,
        "POST",
        "/api/results/bulk",
        bulk_request(
            "Class 10 - A",
            "UNIT_TEST_2",
            "Mathematics",
            100.0,
            &[("S001", "Alice", "01", 55.0), ("S002", "Bob", "02", 81.0)],
        ),
    )
    .await;

    let (_, body) = get_json(
        &app,
        "/api/results/analytics/class/Class%2010%20-%20A/year/2024-25",
    )
    .await;

    let recognition = body["recognition"].as_array().unwrap();
    let consistent = recognition
        .iter()
        .find(|e| e["category"] == "MOST_CONSISTENT")
        .expect("most consistent entry");
    assert_eq!(consistent["student_name"], "Bob");
    assert_eq!(consistent["detail"], "std dev 0.50");
}
