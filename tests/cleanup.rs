mod common;

use std::fs::File;
use std::io::Write;

use clipdrop::{CleanupMode, CleanupRequest, ClipdropClient, ClipdropError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

#[tokio::test]
async fn test_cleanup_with_local_files() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cleanup/v1"))
        .respond_with(common::image_response(b"cleaned image data", "image/jpeg", 120, 1))
        .mount(&server)
        .await;

    let client = ClipdropClient::new_with_url("test_api_key".to_string(), &server.uri()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("clean.jpeg");
    File::create(&image_path).unwrap().write_all(b"dummy image").unwrap();
    let mask_path = dir.path().join("clean-mask.png");
    File::create(&mask_path).unwrap().write_all(b"dummy mask").unwrap();

    let response = client
        .cleanup(&CleanupRequest {
            image_file: image_path,
            mask_file: mask_path,
            mode: CleanupMode::Quality,
        })
        .await
        .unwrap();

    assert_eq!(response.image, b"cleaned image data");
    assert_eq!(response.extension, "jpeg");
    assert_eq!(response.remaining_credits, Some(120));
    assert_eq!(response.credits_consumed, Some(1));
}

#[tokio::test]
async fn test_cleanup_missing_input_file() {
    // The request never reaches the network: opening the image fails first.
    let client =
        ClipdropClient::new_with_url("test_api_key".to_string(), "http://127.0.0.1:1").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let err = client
        .cleanup(&CleanupRequest {
            image_file: dir.path().join("no-such-image.jpeg"),
            mask_file: dir.path().join("no-such-mask.png"),
            mode: CleanupMode::Fast,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClipdropError::IoError(_)));
}
