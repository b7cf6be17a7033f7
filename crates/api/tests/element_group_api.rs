//! HTTP-level integration tests for element groups (shared slots):
//! assignee management, the assignee cap, merging, and cascade deletes.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, patch_json, post_json};
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

async fn element_type_id(pool: &PgPool) -> i64 {
    let app = build_test_app(pool.clone());
    let list = body_json(get(app, "/element_types").await).await;
    list.as_array().unwrap()[0]["id"].as_i64().unwrap()
}

/// Place an element in a fresh named slot, returning (element_id, group_id).
async fn place_named(pool: &PgPool, scene_id: i64, type_id: i64, name: &str, x: f64) -> (i64, i64) {
    let app = build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/scene_elements",
            serde_json::json!({
                "scene_id": scene_id,
                "element_type_id": type_id,
                "position_x": x,
                "position_y": 50.0,
                "display_name": name,
            }),
        )
        .await,
    )
    .await;
    (
        created["id"].as_i64().unwrap(),
        created["group_id"].as_i64().unwrap(),
    )
}

/// Place an element into an existing group, returning its element id.
async fn place_in_group(pool: &PgPool, scene_id: i64, type_id: i64, group_id: i64, x: f64) -> i64 {
    let app = build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/scene_elements",
            serde_json::json!({
                "scene_id": scene_id,
                "element_type_id": type_id,
                "position_x": x,
                "position_y": 50.0,
                "group_id": group_id,
            }),
        )
        .await,
    )
    .await;
    created["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Test: PATCH replaces the assignee set, deduplicating first
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_group_deduplicates_assignees(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Assignees").await;
    let scene_id = create_formation(&pool, presentation_id, "Opening").await;
    let type_id = element_type_id(&pool).await;
    let (_, group_id) = place_named(&pool, scene_id, type_id, "Duo", 10.0).await;

    // USER_A appears twice; the set collapses to two members.
    let app = build_test_app(pool.clone());
    let resp = patch_json(
        app,
        &format!("/element_groups/{group_id}"),
        serde_json::json!({"assignees": [USER_A, USER_B, USER_A]}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let updated = body_json(resp).await;
    let assignees = updated["assignees"].as_array().unwrap();
    assert_eq!(assignees.len(), 2);

    let app = build_test_app(pool);
    let fetched = body_json(get(app, &format!("/element_groups/{group_id}")).await).await;
    assert_eq!(fetched["assignees"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Test: the assignee cap counts distinct users, not raw entries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_group_enforces_assignee_cap(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Cap").await;
    let scene_id = create_formation(&pool, presentation_id, "Opening").await;
    let type_id = element_type_id(&pool).await;
    let (_, group_id) = place_named(&pool, scene_id, type_id, "Crowd", 10.0).await;

    // Eleven distinct users exceed the default cap of ten.
    let too_many: Vec<String> = (0..11)
        .map(|i| format!("00000000-0000-4000-8000-0000000000{i:02}"))
        .collect();

    let app = build_test_app(pool.clone());
    let resp = patch_json(
        app,
        &format!("/element_groups/{group_id}"),
        serde_json::json!({"assignees": too_many}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["name"], "ValidationError");

    // Ten distinct users (one duplicated) pass, because duplicates
    // collapse before the cap check.
    let mut ten_with_dup: Vec<String> = (0..10)
        .map(|i| format!("00000000-0000-4000-8000-0000000000{i:02}"))
        .collect();
    ten_with_dup.push(ten_with_dup[0].clone());

    let app = build_test_app(pool.clone());
    let resp = patch_json(
        app,
        &format!("/element_groups/{group_id}"),
        serde_json::json!({"assignees": ten_with_dup}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["assignees"].as_array().unwrap().len(), 10);
}

// ---------------------------------------------------------------------------
// Test: explicit null clears the display name
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_group_clears_display_name(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Naming").await;
    let scene_id = create_formation(&pool, presentation_id, "Opening").await;
    let type_id = element_type_id(&pool).await;
    let (_, group_id) = place_named(&pool, scene_id, type_id, "Named", 10.0).await;

    let app = build_test_app(pool);
    let cleared = body_json(
        patch_json(
            app,
            &format!("/element_groups/{group_id}"),
            serde_json::json!({"display_name": null}),
        )
        .await,
    )
    .await;
    assert!(cleared["display_name"].is_null());
}

// ---------------------------------------------------------------------------
// Test: merge folds the source slot into the target
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_merge_groups(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Merging").await;
    let scene_id = create_formation(&pool, presentation_id, "Opening").await;
    let type_id = element_type_id(&pool).await;

    let (keep_element, target) = place_named(&pool, scene_id, type_id, "Keep", 10.0).await;
    let (fold_a, source) = place_named(&pool, scene_id, type_id, "Fold", 50.0).await;
    let fold_b = place_in_group(&pool, scene_id, type_id, source, 90.0).await;

    let app = build_test_app(pool.clone());
    let resp = post_json(
        app,
        "/element_groups/merge",
        serde_json::json!({"target_group_id": target, "source_group_id": source}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let outcome = body_json(resp).await;
    assert_eq!(outcome["elements_moved"], 2);

    // All three elements now share the target slot and its name.
    for id in [keep_element, fold_a, fold_b] {
        let app = build_test_app(pool.clone());
        let element = body_json(get(app, &format!("/scene_elements/{id}")).await).await;
        assert_eq!(element["group_id"], target);
        assert_eq!(element["display_name"], "Keep");
    }

    // The source group is gone.
    let app = build_test_app(pool);
    let resp = get(app, &format!("/element_groups/{source}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: merge guards (self-merge, cross-scene, missing groups)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_merge_group_into_itself_is_rejected(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "SelfMerge").await;
    let scene_id = create_formation(&pool, presentation_id, "Opening").await;
    let type_id = element_type_id(&pool).await;
    let (element_id, group_id) = place_named(&pool, scene_id, type_id, "Solo", 10.0).await;

    let app = build_test_app(pool.clone());
    let resp = post_json(
        app,
        "/element_groups/merge",
        serde_json::json!({"target_group_id": group_id, "source_group_id": group_id}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Nothing was mutated.
    let app = build_test_app(pool.clone());
    let group = get(app, &format!("/element_groups/{group_id}")).await;
    assert_eq!(group.status(), StatusCode::OK);

    let app = build_test_app(pool);
    let element = body_json(get(app, &format!("/scene_elements/{element_id}")).await).await;
    assert_eq!(element["group_id"], group_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_merge_across_scenes_is_rejected(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "CrossScene").await;
    let scene_a = create_formation(&pool, presentation_id, "A").await;
    let scene_b = create_formation(&pool, presentation_id, "B").await;
    let type_id = element_type_id(&pool).await;

    let (_, target) = place_named(&pool, scene_a, type_id, "Here", 10.0).await;
    let (_, source) = place_named(&pool, scene_b, type_id, "There", 10.0).await;

    let app = build_test_app(pool);
    let resp = post_json(
        app,
        "/element_groups/merge",
        serde_json::json!({"target_group_id": target, "source_group_id": source}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_merge_with_missing_group_returns_404(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Missing").await;
    let scene_id = create_formation(&pool, presentation_id, "Opening").await;
    let type_id = element_type_id(&pool).await;
    let (_, group_id) = place_named(&pool, scene_id, type_id, "Real", 10.0).await;

    let app = build_test_app(pool.clone());
    let resp = post_json(
        app,
        "/element_groups/merge",
        serde_json::json!({"target_group_id": group_id, "source_group_id": 999999}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let app = build_test_app(pool);
    let resp = post_json(
        app,
        "/element_groups/merge",
        serde_json::json!({"target_group_id": 999999, "source_group_id": group_id}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: deleting a group takes its elements with it
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_group_cascades_to_elements(pool: PgPool) {
    let presentation_id = create_presentation(&pool, "Cascade").await;
    let scene_id = create_formation(&pool, presentation_id, "Opening").await;
    let type_id = element_type_id(&pool).await;

    let (first, group_id) = place_named(&pool, scene_id, type_id, "Doomed", 10.0).await;
    let second = place_in_group(&pool, scene_id, type_id, group_id, 90.0).await;

    let app = build_test_app(pool.clone());
    let resp = delete(app, &format!("/element_groups/{group_id}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["id"], group_id);

    for id in [first, second] {
        let app = build_test_app(pool.clone());
        let resp = get(app, &format!("/scene_elements/{id}")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
