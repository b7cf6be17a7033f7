//! HTTP-level integration tests for scene CRUD and scene ordering.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, patch_json, post_json};
use sqlx::PgPool;

async fn create_presentation(pool: &PgPool, name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let created = body_json(
        post_json(app, "/presentations", serde_json::json!({"name": name})).await,
    )
    .await;
    created["id"].as_i64().unwrap()
}

async fn create_scene(pool: &PgPool, presentation_id: i64, kind: &str, name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let resp = post_json(
        app,
        "/scenes",
        serde_json::json!({
            "presentation_id": presentation_id,
            "kind": kind,
            "name": name,
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Test: scenes append to the end of the presentation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_scene_appends_position(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Ordering").await;

    let app = build_test_app(pool.clone());
    let first = body_json(
        post_json(
            app,
            "/scenes",
            serde_json::json!({
                "presentation_id": presentation_id,
                "kind": "formation",
                "name": "Opening",
            }),
        )
        .await,
    )
    .await;
    assert_eq!(first["position"], 0);
    assert_eq!(first["kind"], "formation");

    let app = build_test_app(pool);
    let second = body_json(
        post_json(
            app,
            "/scenes",
            serde_json::json!({
                "presentation_id": presentation_id,
                "kind": "transition",
                "name": "Walk-off",
            }),
        )
        .await,
    )
    .await;
    assert_eq!(second["position"], 1);
    assert_eq!(second["kind"], "transition");
}

// ---------------------------------------------------------------------------
// Test: create validations (missing presentation, blank name)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_scene_requires_existing_presentation(pool: PgPool) {
    let app = build_test_app(pool);
    let resp = post_json(
        app,
        "/scenes",
        serde_json::json!({
            "presentation_id": 999999,
            "kind": "formation",
            "name": "Orphan",
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = body_json(resp).await;
    assert_eq!(json["name"], "NotFoundError");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_scene_rejects_blank_name(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Naming").await;

    let app = build_test_app(pool);
    let resp = post_json(
        app,
        "/scenes",
        serde_json::json!({
            "presentation_id": presentation_id,
            "kind": "formation",
            "name": "  ",
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: PATCH updates name, clears description with explicit null
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_scene_clears_description_with_null(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Editing").await;

    let app = build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/scenes",
            serde_json::json!({
                "presentation_id": presentation_id,
                "kind": "formation",
                "name": "Verse",
                "description": "tight diamond",
            }),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["description"], "tight diamond");

    // A patch without the field leaves it untouched.
    let app = build_test_app(pool.clone());
    let renamed = body_json(
        patch_json(
            app,
            &format!("/scenes/{id}"),
            serde_json::json!({"name": "Verse 2"}),
        )
        .await,
    )
    .await;
    assert_eq!(renamed["name"], "Verse 2");
    assert_eq!(renamed["description"], "tight diamond");

    // An explicit null clears it.
    let app = build_test_app(pool);
    let cleared = body_json(
        patch_json(
            app,
            &format!("/scenes/{id}"),
            serde_json::json!({"description": null}),
        )
        .await,
    )
    .await;
    assert!(cleared["description"].is_null());
}

// ---------------------------------------------------------------------------
// Test: list returns scenes in position order
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_scenes_in_position_order(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Setlist").await;
    create_scene(&pool, presentation_id, "formation", "One").await;
    create_scene(&pool, presentation_id, "transition", "Two").await;
    create_scene(&pool, presentation_id, "formation", "Three").await;

    let app = build_test_app(pool);
    let list = body_json(get(app, &format!("/presentations/{presentation_id}/scenes")).await).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["One", "Two", "Three"]);
}

// ---------------------------------------------------------------------------
// Test: reorder rewrites every position in one call
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_scenes(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Reorder").await;
    let a = create_scene(&pool, presentation_id, "formation", "A").await;
    let b = create_scene(&pool, presentation_id, "transition", "B").await;
    let c = create_scene(&pool, presentation_id, "formation", "C").await;

    let app = build_test_app(pool.clone());
    let resp = patch_json(
        app,
        &format!("/presentations/{presentation_id}/scenes"),
        serde_json::json!({"scene_ids": [c, a, b]}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let reordered = body_json(resp).await;
    let ids: Vec<i64> = reordered
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![c, a, b]);

    // Positions are contiguous from zero in the new order.
    let positions: Vec<i64> = reordered
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, vec![0, 1, 2]);

    // The new order persists.
    let app = build_test_app(pool);
    let list = body_json(get(app, &format!("/presentations/{presentation_id}/scenes")).await).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

// ---------------------------------------------------------------------------
// Test: reorder must list every scene exactly once
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_rejects_incomplete_or_foreign_sets(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Strict").await;
    let a = create_scene(&pool, presentation_id, "formation", "A").await;
    let b = create_scene(&pool, presentation_id, "transition", "B").await;

    let other_presentation = create_presentation(&pool, "Other").await;
    let foreign = create_scene(&pool, other_presentation, "formation", "X").await;

    // Duplicate id.
    let app = build_test_app(pool.clone());
    let resp = patch_json(
        app,
        &format!("/presentations/{presentation_id}/scenes"),
        serde_json::json!({"scene_ids": [a, a]}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Missing id (subset).
    let app = build_test_app(pool.clone());
    let resp = patch_json(
        app,
        &format!("/presentations/{presentation_id}/scenes"),
        serde_json::json!({"scene_ids": [a]}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Id from another presentation.
    let app = build_test_app(pool.clone());
    let resp = patch_json(
        app,
        &format!("/presentations/{presentation_id}/scenes"),
        serde_json::json!({"scene_ids": [a, foreign]}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Nothing moved: original order intact.
    let app = build_test_app(pool);
    let list = body_json(get(app, &format!("/presentations/{presentation_id}/scenes")).await).await;
    let ids: Vec<i64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![a, b]);
}

// ---------------------------------------------------------------------------
// Test: deleting a scene cascades to its content
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_scene(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Cleanup").await;
    let id = create_scene(&pool, presentation_id, "formation", "Doomed").await;

    let app = build_test_app(pool.clone());
    let resp = delete(app, &format!("/scenes/{id}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["id"], id);

    let app = build_test_app(pool);
    let resp = get(app, &format!("/scenes/{id}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
