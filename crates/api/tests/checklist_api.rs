//! HTTP-level tests for the status catalog and checklist progress.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_campaign, get, put_json};
use serde_json::json;
use sqlx::PgPool;

/// Id of the seeded status with the given name.
async fn status_id(pool: &PgPool, name: &str) -> i64 {
    let json = body_json(get(build_test_app(pool.clone()), "/api/v1/statuses").await).await;
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == name)
        .and_then(|s| s["id"].as_i64())
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_catalog_is_sorted_by_name(pool: PgPool) {
    let json = body_json(get(build_test_app(pool), "/api/v1/statuses").await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Abandonnes", "Actes notables"]);
    assert_eq!(json["data"][1]["checkboxCount"], 8);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_untouched_statuses_read_as_empty(pool: PgPool) {
    let id = create_campaign(&pool, "Fresh").await;

    let json = body_json(get(build_test_app(pool), &format!("/api/v1/campaigns/{id}/statuses")).await).await;
    for row in json["data"].as_array().unwrap() {
        assert_eq!(row["checkedBoxes"], "");
        assert!(row["campaignStatusId"].is_null());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_out_of_range_box_rejected(pool: PgPool) {
    let id = create_campaign(&pool, "Range").await;
    let status = status_id(&pool, "Actes notables").await;
    let uri = format!("/api/v1/campaigns/{id}/statuses/{status}");

    let response = put_json(build_test_app(pool.clone()), &uri, json!({ "checkedBoxes": "1,3,9" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    // Nothing was written.
    let json = body_json(get(build_test_app(pool), &format!("/api/v1/campaigns/{id}/statuses")).await).await;
    let row = json["data"].as_array().unwrap().iter().find(|r| r["id"] == status).unwrap().clone();
    assert!(row["campaignStatusId"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_checked_boxes_is_idempotent(pool: PgPool) {
    let id = create_campaign(&pool, "Idempotent").await;
    let status = status_id(&pool, "Actes notables").await;
    let uri = format!("/api/v1/campaigns/{id}/statuses/{status}");

    let first = body_json(put_json(build_test_app(pool.clone()), &uri, json!({ "checkedBoxes": "1,3" })).await).await;
    let second = body_json(put_json(build_test_app(pool.clone()), &uri, json!({ "checkedBoxes": "1,3" })).await).await;
    assert_eq!(first["data"]["id"], second["data"]["id"]);
    assert_eq!(second["data"]["checkedBoxes"], "1,3");

    let json = body_json(get(build_test_app(pool), &format!("/api/v1/campaigns/{id}/statuses")).await).await;
    let row = json["data"].as_array().unwrap().iter().find(|r| r["id"] == status).unwrap().clone();
    assert_eq!(row["checkedBoxes"], "1,3");
    assert_eq!(row["campaignStatusId"], first["data"]["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_tokens_are_ignored(pool: PgPool) {
    let id = create_campaign(&pool, "Tokens").await;
    let status = status_id(&pool, "Abandonnes").await;

    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/campaigns/{id}/statuses/{status}"),
        json!({ "checkedBoxes": "2, x,,1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_oversized_box_number_rejected(pool: PgPool) {
    let id = create_campaign(&pool, "Oversized").await;
    let status = status_id(&pool, "Actes notables").await;

    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/campaigns/{id}/statuses/{status}"),
        json!({ "checkedBoxes": "1,99999999999999999999" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_status_404(pool: PgPool) {
    let id = create_campaign(&pool, "Missing").await;
    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/campaigns/{id}/statuses/999999"),
        json!({ "checkedBoxes": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
