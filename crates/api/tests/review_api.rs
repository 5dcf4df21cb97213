mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn submitting_a_review_creates_it(pool: PgPool) {
    let (app, _media) = common::build_test_app(pool);
    let (uploader, _) = common::signup(&app, "uploader").await;
    let (reader, reader_id) = common::signup(&app, "reader").await;

    let note_id = common::upload_note_ok(&app, &uploader, "DSA", "CSE", "2", "DSA").await;

    let response = common::post_json_auth(
        &app,
        &format!("/api/v1/notes/{note_id}/reviews"),
        &reader,
        json!({ "rating": 5, "comment": "very helpful" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::body_json(response).await;
    assert_eq!(body["data"]["rating"], 5);
    assert_eq!(body["data"]["comment"], "very helpful");
    assert_eq!(body["data"]["user_id"].as_i64().unwrap(), reader_id);
    assert!(body.get("warning").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_review_returns_warning_and_changes_nothing(pool: PgPool) {
    let (app, _media) = common::build_test_app(pool);
    let (uploader, _) = common::signup(&app, "uploader").await;
    let (reader, _) = common::signup(&app, "reader").await;

    let note_id = common::upload_note_ok(&app, &uploader, "DSA", "CSE", "2", "DSA").await;
    let uri = format!("/api/v1/notes/{note_id}/reviews");

    let first = common::post_json_auth(&app, &uri, &reader, json!({ "rating": 3 })).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = common::post_json_auth(&app, &uri, &reader, json!({ "rating": 5 })).await;
    assert_eq!(second.status(), StatusCode::OK);

    let body = common::body_json(second).await;
    assert_eq!(body["warning"], "You have already reviewed this note.");
    assert!(body["data"].is_null());

    // The original review survives unchanged.
    let detail =
        common::body_json(common::get(&app, &format!("/api/v1/notes/{note_id}")).await).await;
    let reviews = detail["data"]["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["rating"], 3);
    assert_eq!(detail["data"]["note"]["review_count"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rating_must_be_between_one_and_five(pool: PgPool) {
    let (app, _media) = common::build_test_app(pool);
    let (uploader, _) = common::signup(&app, "uploader").await;
    let (reader, _) = common::signup(&app, "reader").await;

    let note_id = common::upload_note_ok(&app, &uploader, "DSA", "CSE", "2", "DSA").await;
    let uri = format!("/api/v1/notes/{note_id}/reviews");

    for bad in [0, 6, -1] {
        let response =
            common::post_json_auth(&app, &uri, &reader, json!({ "rating": bad })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "rating {bad}");
        let body = common::body_json(response).await;
        assert_eq!(body["code"], "RATING_OUT_OF_RANGE");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn review_requires_auth(pool: PgPool) {
    let (app, _media) = common::build_test_app(pool);
    let (uploader, _) = common::signup(&app, "uploader").await;
    let note_id = common::upload_note_ok(&app, &uploader, "DSA", "CSE", "2", "DSA").await;

    let response = common::post_json(
        &app,
        &format!("/api/v1/notes/{note_id}/reviews"),
        json!({ "rating": 4 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reviewing_unknown_note_is_404(pool: PgPool) {
    let (app, _media) = common::build_test_app(pool);
    let (reader, _) = common::signup(&app, "reader").await;

    let response = common::post_json_auth(
        &app,
        "/api/v1/notes/4242/reviews",
        &reader,
        json!({ "rating": 4 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn average_rating_aggregates_all_reviews(pool: PgPool) {
    let (app, _media) = common::build_test_app(pool);
    let (uploader, _) = common::signup(&app, "uploader").await;
    let (alice, _) = common::signup(&app, "alice").await;
    let (bob, _) = common::signup(&app, "bob").await;

    let note_id = common::upload_note_ok(&app, &uploader, "DSA", "CSE", "2", "DSA").await;
    let uri = format!("/api/v1/notes/{note_id}/reviews");

    common::post_json_auth(&app, &uri, &alice, json!({ "rating": 3 })).await;
    common::post_json_auth(&app, &uri, &bob, json!({ "rating": 5 })).await;

    let detail =
        common::body_json(common::get(&app, &format!("/api/v1/notes/{note_id}")).await).await;
    let note = &detail["data"]["note"];
    assert_eq!(note["review_count"], 2);
    assert!((note["average_rating"].as_f64().unwrap() - 4.0).abs() < f64::EPSILON);

    // Reviews are listed newest first with their author's username.
    let reviews = detail["data"]["reviews"].as_array().unwrap();
    assert_eq!(reviews[0]["username"], "bob");
    assert_eq!(reviews[1]["username"], "alice");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_a_note_cascades_its_reviews(pool: PgPool) {
    let (app, _media) = common::build_test_app(pool.clone());
    let (uploader, _) = common::signup(&app, "uploader").await;
    let (reader, _) = common::signup(&app, "reader").await;

    let note_id = common::upload_note_ok(&app, &uploader, "DSA", "CSE", "2", "DSA").await;
    common::post_json_auth(
        &app,
        &format!("/api/v1/notes/{note_id}/reviews"),
        &reader,
        json!({ "rating": 4 }),
    )
    .await;

    let response =
        common::delete_auth(&app, &format!("/api/v1/notes/{note_id}"), &uploader).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}
