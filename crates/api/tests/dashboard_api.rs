mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn dashboard_requires_auth(pool: PgPool) {
    let (app, _media) = common::build_test_app(pool);

    let response = common::get(&app, "/api/v1/dashboard").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn dashboard_shows_own_uploads_totals_and_reviews(pool: PgPool) {
    let (app, _media) = common::build_test_app(pool);
    let (alice, _) = common::signup(&app, "alice").await;
    let (bob, _) = common::signup(&app, "bob").await;

    // Alice uploads two notes, Bob one.
    let note_a = common::upload_note_ok(&app, &alice, "DSA", "CSE", "2", "DSA").await;
    let note_b = common::upload_note_ok(&app, &alice, "OS", "CSE", "3", "OS").await;
    let note_bob = common::upload_note_ok(&app, &bob, "Thermo", "MECH", "2", "Thermal").await;

    // Bob downloads Alice's first note three times, her second once.
    let dl_a = format!("/api/v1/notes/{note_a}/download");
    for _ in 0..3 {
        common::get_auth(&app, &dl_a, &bob).await;
    }
    common::get_auth(&app, &format!("/api/v1/notes/{note_b}/download"), &bob).await;

    // Alice reviews Bob's note.
    common::post_json_auth(
        &app,
        &format!("/api/v1/notes/{note_bob}/reviews"),
        &alice,
        json!({ "rating": 4, "comment": "nice" }),
    )
    .await;

    let response = common::get_auth(&app, "/api/v1/dashboard", &alice).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &common::body_json(response).await["data"];
    assert_eq!(data["total_uploads"], 2);
    assert_eq!(data["total_downloads"], 4);

    // Only Alice's own uploads, newest first.
    let notes = data["notes"].as_array().unwrap().clone();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["title"], "OS");
    assert_eq!(notes[1]["title"], "DSA");

    // Her reviews carry the reviewed note's title.
    let reviews = data["reviews"].as_array().unwrap().clone();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["note_title"], "Thermo");
    assert_eq!(reviews[0]["rating"], 4);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn fresh_user_dashboard_is_empty(pool: PgPool) {
    let (app, _media) = common::build_test_app(pool);
    let (token, _) = common::signup(&app, "newbie").await;

    let data = &common::body_json(common::get_auth(&app, "/api/v1/dashboard", &token).await)
        .await["data"];
    assert_eq!(data["total_uploads"], 0);
    assert_eq!(data["total_downloads"], 0);
    assert_eq!(data["notes"].as_array().unwrap().len(), 0);
    assert_eq!(data["reviews"].as_array().unwrap().len(), 0);
}
