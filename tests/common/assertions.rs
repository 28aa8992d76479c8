//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use std::io::Cursor;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );

    // Check Content-Type header
    assert_eq!(
        response.header("content-type"),
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert the upload redirected back to the dashboard
pub fn assert_redirect_home(response: &TestResponse) {
    assert_status(response, StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), Some("/"));
}

/// Assert JSON error body has expected status field
pub fn assert_json_status(response: &TestResponse, expected_status: u16) {
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected_status as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected_status,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message");
}

/// Decoded 8-bit indexed PNG
pub struct IndexedPng {
    pub width: u32,
    pub height: u32,
    pub palette: Vec<u8>,
    pub indices: Vec<u8>,
}

/// Decode bytes that must be an 8-bit indexed PNG
pub fn decode_indexed_png(bytes: &[u8]) -> IndexedPng {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().expect("Invalid PNG header");

    let palette = reader
        .info()
        .palette
        .as_ref()
        .expect("Indexed PNG must carry a PLTE chunk")
        .to_vec();
    let mut indices = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut indices).expect("Invalid PNG data");
    indices.truncate(info.buffer_size());

    assert_eq!(info.color_type, png::ColorType::Indexed);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);

    IndexedPng {
        width: info.width,
        height: info.height,
        palette,
        indices,
    }
}
