//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router or
//! database is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use scrapyard_api::error::AppError;
use scrapyard_core::error::CoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "BrokenCar",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "BrokenCar with id 42 not found");
}

#[tokio::test]
async fn permission_denied_returns_403() {
    let err = AppError::Core(CoreError::PermissionDenied { permission: "create" });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "PERMISSION_DENIED");
    assert_eq!(json["error"], "Permission denied: create permission required");
}

#[tokio::test]
async fn unauthorized_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("Missing Authorization header".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing Authorization header");
}

#[tokio::test]
async fn input_errors_return_400_with_distinct_codes() {
    let cases = [
        (CoreError::MissingRequiredField("color"), "MISSING_REQUIRED_FIELD"),
        (CoreError::InvalidIdentifier("abc".into()), "INVALID_IDENTIFIER"),
        (CoreError::InvalidSortColumn("password".into()), "INVALID_SORT_COLUMN"),
        (CoreError::Validation("year out of range".into()), "VALIDATION_ERROR"),
    ];

    for (core, code) in cases {
        let (status, json) = error_to_response(AppError::Core(core)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{code}");
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], code);
    }
}

#[tokio::test]
async fn missing_field_message_names_the_field() {
    let (_, json) =
        error_to_response(AppError::Core(CoreError::MissingRequiredField("modelId"))).await;

    assert_eq!(json["error"], "Missing required field: modelId");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn driver_error_returns_500_without_driver_text() {
    let err = AppError::Database(sqlx::Error::Protocol("unexpected message 0x44".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "DATABASE_ERROR");
    assert_eq!(json["error"], "Database error");
}

#[tokio::test]
async fn unmatched_route_and_method_use_the_envelope() {
    let (status, json) = error_to_response(AppError::RouteNotFound("/nope".into())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "No route for /nope");

    let (status, json) = error_to_response(AppError::MethodNotAllowed {
        method: "PATCH".into(),
        path: "/api/v1/broken-cars/list".into(),
    })
    .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["code"], "METHOD_NOT_ALLOWED");
    assert_eq!(json["error"], "Method PATCH not allowed for /api/v1/broken-cars/list");
}
