//! Direct tests of the error-to-response mapping, independent of any route.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

use campusnotes_api::error::AppError;
use campusnotes_core::error::CoreError;

async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn not_found_renders_404_with_entity_and_id() {
    let (status, body) = render(AppError::Core(CoreError::NotFound {
        entity: "Note",
        id: 42,
    }))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["error"], "Note with id 42 not found");
}

#[tokio::test]
async fn file_too_large_renders_400() {
    let (status, body) = render(AppError::Core(CoreError::FileTooLarge {
        size_bytes: 11 * 1024 * 1024,
    }))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "FILE_TOO_LARGE");
}

#[tokio::test]
async fn invalid_file_type_renders_400() {
    let (status, body) =
        render(AppError::Core(CoreError::InvalidFileType("docx".into()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_FILE_TYPE");
}

#[tokio::test]
async fn rating_out_of_range_renders_400() {
    let (status, body) = render(AppError::Core(CoreError::RatingOutOfRange(9))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "RATING_OUT_OF_RANGE");
}

#[tokio::test]
async fn forbidden_renders_403() {
    let (status, body) = render(AppError::Core(CoreError::Forbidden("no".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn download_failed_renders_500_with_prefixed_message() {
    let (status, body) =
        render(AppError::DownloadFailed("No such file or directory".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "DOWNLOAD_FAILED");
    assert_eq!(
        body["error"],
        "Error downloading file: No such file or directory"
    );
}

#[tokio::test]
async fn row_not_found_renders_404() {
    let (status, body) = render(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn internal_error_is_sanitized() {
    let (status, body) =
        render(AppError::InternalError("secret connection string".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_ERROR");
    assert_eq!(body["error"], "An internal error occurred");
}
