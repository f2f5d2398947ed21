//! HTTP-level tests for saves and restore.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_campaign, create_character, delete, get, post_empty,
    post_json, put_json,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_returns_health_to_saved_value(pool: PgPool) {
    let id = create_campaign(&pool, "Restore").await;
    let iunis = create_character(&pool, id, "Iunis", "Ana").await;
    let iunis_uri = format!("/api/v1/campaigns/{id}/characters/{}", iunis["id"]);

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/campaigns/{id}/saves"),
        json!({
            "name": "Before the bog",
            "characters": [{
                "characterType": "Iunis", "playerName": "Ana",
                "food": 2, "wealth": 0, "experience": 1, "magic": 0,
                "energy": 6, "health": 5, "terror": 0, "locationNumber": 104
            }]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let save = body_json(response).await["data"].clone();
    assert_eq!(save["characters"][0]["locationNumber"], 104);

    put_json(build_test_app(pool.clone()), &iunis_uri, json!({ "health": 1, "playerName": "Renamed" })).await;

    let response = post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/campaigns/{id}/saves/{}/restore", save["id"]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await["data"].clone();
    assert_eq!(report["success"], true);
    assert_eq!(report["restoredFrom"], "Before the bog");
    assert_eq!(report["restored"][0]["matched"], 1);

    let json = body_json(get(build_test_app(pool), &format!("/api/v1/campaigns/{id}/characters")).await).await;
    let live = &json["data"][0];
    assert_eq!(live["health"], 5);
    assert_eq!(live["food"], 2);
    assert_eq!(live["playerName"], "Renamed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_without_characters_captures_roster(pool: PgPool) {
    let id = create_campaign(&pool, "Capture").await;
    create_character(&pool, id, "Elgan", "Cy").await;
    create_character(&pool, id, "Osbert", "Di").await;

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/campaigns/{id}/saves"),
        json!({ "name": "auto" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let save = body_json(response).await["data"].clone();
    let characters = save["characters"].as_array().unwrap();
    assert_eq!(characters.len(), 2);
    assert_eq!(characters[0]["characterType"], "Elgan");
    assert_eq!(characters[1]["energy"], 7);
    assert!(characters[0]["locationNumber"].is_null());

    // An explicit empty list is an empty save.
    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/campaigns/{id}/saves"),
        json!({ "name": "empty", "characters": [] }),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["characters"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_is_independent_of_later_edits(pool: PgPool) {
    let id = create_campaign(&pool, "Immutable").await;
    let character = create_character(&pool, id, "Gerdwyn", "Bo").await;
    post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/campaigns/{id}/saves"),
        json!({ "name": "snap" }),
    )
    .await;

    put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/campaigns/{id}/characters/{}", character["id"]),
        json!({ "health": 1 }),
    )
    .await;

    let json = body_json(get(build_test_app(pool), &format!("/api/v1/campaigns/{id}/saves")).await).await;
    assert_eq!(json["data"][0]["characters"][0]["health"], 8);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_save_name_rejected(pool: PgPool) {
    let id = create_campaign(&pool, "Names").await;
    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/campaigns/{id}/saves"),
        json!({ "name": "  ", "characters": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_saves_listed_newest_first(pool: PgPool) {
    let id = create_campaign(&pool, "Order").await;
    for name in ["first", "second", "third"] {
        post_json(
            build_test_app(pool.clone()),
            &format!("/api/v1/campaigns/{id}/saves"),
            json!({ "name": name, "characters": [] }),
        )
        .await;
    }

    let json = body_json(get(build_test_app(pool), &format!("/api/v1/campaigns/{id}/saves")).await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["third", "second", "first"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_reports_unmatched_archetypes(pool: PgPool) {
    let id = create_campaign(&pool, "Unmatched").await;
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/campaigns/{id}/saves"),
        json!({
            "name": "ghost",
            "characters": [{
                "characterType": "Osbert", "playerName": "Gone",
                "food": 1, "wealth": 1, "experience": 1, "magic": 1,
                "energy": 1, "health": 1, "terror": 1
            }]
        }),
    )
    .await;
    let save_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_empty(
        build_test_app(pool),
        &format!("/api/v1/campaigns/{id}/saves/{save_id}/restore"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await["data"].clone();
    assert_eq!(report["restored"][0]["characterType"], "Osbert");
    assert_eq!(report["restored"][0]["matched"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_delete_and_restore_check_ownership(pool: PgPool) {
    let mine = create_campaign(&pool, "Mine").await;
    let theirs = create_campaign(&pool, "Theirs").await;
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/campaigns/{mine}/saves"),
        json!({ "name": "s", "characters": [] }),
    )
    .await;
    let save_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/campaigns/{theirs}/saves/{save_id}/restore"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/campaigns/{theirs}/saves/{save_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/campaigns/{mine}/saves/{save_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_empty(
        build_test_app(pool),
        &format!("/api/v1/campaigns/{mine}/saves/{save_id}/restore"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
