//! HTTP-level integration tests for the presentation-wide slot pool and
//! the bulk rename ("apply everywhere") operation.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, patch_json, post_json};
use sqlx::PgPool;

const USER_A: &str = "11111111-2222-4333-8444-555555555555";
const USER_B: &str = "99999999-8888-4777-8666-555555555555";

async fn create_presentation(pool: &PgPool, name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let created = body_json(
        post_json(app, "/presentations", serde_json::json!({"name": name})).await,
    )
    .await;
    created["id"].as_i64().unwrap()
}

async fn create_formation(pool: &PgPool, presentation_id: i64, name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/scenes",
            serde_json::json!({
                "presentation_id": presentation_id,
                "kind": "formation",
                "name": name,
            }),
        )
        .await,
    )
    .await;
    created["id"].as_i64().unwrap()
}

/// The two lowest-sorted seeded element types.
async fn two_element_types(pool: &PgPool) -> (i64, i64) {
    let app = build_test_app(pool.clone());
    let list = body_json(get(app, "/element_types").await).await;
    let list = list.as_array().unwrap();
    (
        list[0]["id"].as_i64().unwrap(),
        list[1]["id"].as_i64().unwrap(),
    )
}

/// Place an element in a fresh slot, optionally named/assigned.
async fn place(
    pool: &PgPool,
    scene_id: i64,
    type_id: i64,
    display_name: Option<&str>,
    assigned: Option<&str>,
) -> i64 {
    let mut body = serde_json::json!({
        "scene_id": scene_id,
        "element_type_id": type_id,
        "position_x": 50.0,
        "position_y": 50.0,
    });
    if let Some(name) = display_name {
        body["display_name"] = serde_json::json!(name);
    }
    if let Some(user) = assigned {
        body["assigned_user_id"] = serde_json::json!(user);
    }

    let app = build_test_app(pool.clone());
    let resp = post_json(app, "/scene_elements", body).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Test: the pool lists each (type, name) pair once, skipping unnamed slots
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pool_lists_distinct_named_slots(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Pool").await;
    let scene_a = create_formation(&pool, presentation_id, "A").await;
    let scene_b = create_formation(&pool, presentation_id, "B").await;
    let (type_id, _) = two_element_types(&pool).await;

    // "Lead" appears in both scenes (two distinct groups), plus one
    // "Backup" and one anonymous slot.
    place(&pool, scene_a, type_id, Some("Lead"), None).await;
    place(&pool, scene_b, type_id, Some("Lead"), None).await;
    place(&pool, scene_a, type_id, Some("Backup"), None).await;
    place(&pool, scene_b, type_id, None, None).await;

    let app = build_test_app(pool);
    let entries = body_json(get(app, &format!("/presentations/{presentation_id}/pool")).await).await;
    let entries = entries.as_array().unwrap();

    assert_eq!(entries.len(), 2, "duplicates collapse, unnamed slots are skipped");
    assert_eq!(entries[0]["display_name"], "Backup");
    assert_eq!(entries[1]["display_name"], "Lead");
    assert_eq!(entries[0]["element_type_id"], type_id);
    assert!(entries[0]["element_type_name"].is_string());
}

// ---------------------------------------------------------------------------
// Test: bulk rename rewrites every matching slot across scenes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_rename_across_scenes(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Rename").await;
    let scene_a = create_formation(&pool, presentation_id, "A").await;
    let scene_b = create_formation(&pool, presentation_id, "B").await;
    let (type_id, other_type) = two_element_types(&pool).await;

    let lead_a = place(&pool, scene_a, type_id, Some("Lead"), Some(USER_A)).await;
    let lead_b = place(&pool, scene_b, type_id, Some("Lead"), None).await;
    let backup = place(&pool, scene_a, type_id, Some("Backup"), None).await;
    // Same name on a different element type must not match.
    let other_lead = place(&pool, scene_b, other_type, Some("Lead"), None).await;

    let app = build_test_app(pool.clone());
    let resp = patch_json(
        app,
        &format!("/presentations/{presentation_id}/element-names"),
        serde_json::json!({
            "element_type_id": type_id,
            "old_display_name": "Lead",
            "new_display_name": "Principal",
            "new_assigned_user_id": USER_B,
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let outcome = body_json(resp).await;
    assert_eq!(outcome["updated_count"], 2);

    // Both matched slots now carry the new name and the new assignee.
    for id in [lead_a, lead_b] {
        let app = build_test_app(pool.clone());
        let element = body_json(get(app, &format!("/scene_elements/{id}")).await).await;
        assert_eq!(element["display_name"], "Principal");
        assert_eq!(element["assigned_user_id"], USER_B);
    }

    // Unmatched slots are untouched.
    let app = build_test_app(pool.clone());
    let element = body_json(get(app, &format!("/scene_elements/{backup}")).await).await;
    assert_eq!(element["display_name"], "Backup");

    let app = build_test_app(pool);
    let element = body_json(get(app, &format!("/scene_elements/{other_lead}")).await).await;
    assert_eq!(element["display_name"], "Lead");
}

// ---------------------------------------------------------------------------
// Test: a null new assignee clears the assignee on matched slots
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_rename_clears_assignee_with_null(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Clear").await;
    let scene_id = create_formation(&pool, presentation_id, "A").await;
    let (type_id, _) = two_element_types(&pool).await;

    let element = place(&pool, scene_id, type_id, Some("Lead"), Some(USER_A)).await;

    let app = build_test_app(pool.clone());
    let resp = patch_json(
        app,
        &format!("/presentations/{presentation_id}/element-names"),
        serde_json::json!({
            "element_type_id": type_id,
            "old_display_name": "Lead",
            "new_display_name": "Soloist",
            "new_assigned_user_id": null,
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let app = build_test_app(pool);
    let fetched = body_json(get(app, &format!("/scene_elements/{element}")).await).await;
    assert_eq!(fetched["display_name"], "Soloist");
    assert!(fetched["assigned_user_id"].is_null());
}

// ---------------------------------------------------------------------------
// Test: no match is a successful no-op with updated_count 0
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_rename_without_matches(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "NoMatch").await;
    create_formation(&pool, presentation_id, "A").await;
    let (type_id, _) = two_element_types(&pool).await;

    let app = build_test_app(pool);
    let resp = patch_json(
        app,
        &format!("/presentations/{presentation_id}/element-names"),
        serde_json::json!({
            "element_type_id": type_id,
            "old_display_name": "Nobody",
            "new_display_name": "Still Nobody",
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["updated_count"], 0);
}

// ---------------------------------------------------------------------------
// Test: rename validations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_rename_validations(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Guards").await;
    let (type_id, _) = two_element_types(&pool).await;

    // Blank names are rejected.
    let app = build_test_app(pool.clone());
    let resp = patch_json(
        app,
        &format!("/presentations/{presentation_id}/element-names"),
        serde_json::json!({
            "element_type_id": type_id,
            "old_display_name": "  ",
            "new_display_name": "X",
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Unknown element type.
    let app = build_test_app(pool.clone());
    let resp = patch_json(
        app,
        &format!("/presentations/{presentation_id}/element-names"),
        serde_json::json!({
            "element_type_id": 999999,
            "old_display_name": "Lead",
            "new_display_name": "X",
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Unknown presentation.
    let app = build_test_app(pool);
    let resp = patch_json(
        app,
        "/presentations/999999/element-names",
        serde_json::json!({
            "element_type_id": type_id,
            "old_display_name": "Lead",
            "new_display_name": "X",
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
