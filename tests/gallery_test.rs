//! Integration tests for serving and re-displaying stored images.

mod common;

use axum::http::StatusCode;
use common::fixtures;
use common::*;
use pretty_assertions::assert_eq;

async fn app_with_image() -> (TestApp, String) {
    let app = TestApp::new();
    let response = app.upload(&fixtures::jpeg_photo(48, 32)).await;
    assert_redirect_home(&response);
    app.wait_for_frames(1).await;
    let name = app.store().list().unwrap().remove(0).name;
    (app, name)
}

#[tokio::test]
async fn test_serve_stored_image() {
    let (app, name) = app_with_image().await;

    let response = app.get(&format!("/img/{name}")).await;
    assert_png(&response);
    assert_eq!(response.body, app.store().read(&name).unwrap());
}

#[tokio::test]
async fn test_serve_missing_image() {
    let app = TestApp::new();

    let response = app.get("/img/img_1.png").await;
    assert_status(&response, StatusCode::NOT_FOUND);
    assert_json_status(&response, 404);
}

#[tokio::test]
async fn test_serve_rejects_traversal() {
    let app = TestApp::new();

    let response = app.get("/img/..%2Fconfig.png").await;
    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_json_status(&response, 400);
}

#[tokio::test]
async fn test_reload_pushes_stored_image() {
    let (app, name) = app_with_image().await;

    let response = app.post_form("/reload", &format!("filename={name}")).await;
    assert_status(&response, StatusCode::NO_CONTENT);

    let frames = app.wait_for_frames(2).await;
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1], frames[0]);
}

#[tokio::test]
async fn test_reload_missing_image() {
    let app = TestApp::new();

    let response = app.post_form("/reload", "filename=img_1.png").await;
    assert_status(&response, StatusCode::NOT_FOUND);
    assert!(app.sink.frames().is_empty());
}

#[tokio::test]
async fn test_reload_invalid_name() {
    let app = TestApp::new();

    let response = app.post_form("/reload", "filename=..%2F..%2Fetc%2Fpasswd").await;
    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_json_status(&response, 400);
}

#[tokio::test]
async fn test_reload_without_filename() {
    let app = TestApp::new();

    let response = app.post_form("/reload", "").await;
    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_json_status(&response, 400);
}
