mod common;

use std::fs::File;
use std::io::Write;

use clipdrop::{ClipdropClient, ClipdropError, RemoveBackgroundRequest};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_remove_background_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/remove-background/v1"))
        .respond_with(common::image_response(b"subject only", "image/png", 42, 1))
        .mount(&server)
        .await;

    let client = ClipdropClient::new_with_url("test_api_key".to_string(), &server.uri()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("photo.jpeg");
    File::create(&image_path).unwrap().write_all(b"dummy image").unwrap();

    let response = client
        .remove_background(&RemoveBackgroundRequest {
            image_file: image_path,
        })
        .await
        .unwrap();

    assert_eq!(response.image, b"subject only");
    assert_eq!(response.extension, "png");
}

#[tokio::test]
async fn test_missing_content_type_blocks_save() {
    let server = MockServer::start().await;

    // A success response with no content type yields an empty extension,
    // which must block the save instead of producing an extensionless file.
    Mock::given(method("POST"))
        .and(path("/remove-background/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"raw bytes".to_vec()))
        .mount(&server)
        .await;

    let client = ClipdropClient::new_with_url("test_api_key".to_string(), &server.uri()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("photo.jpeg");
    File::create(&image_path).unwrap().write_all(b"dummy image").unwrap();

    let response = client
        .remove_background(&RemoveBackgroundRequest {
            image_file: image_path,
        })
        .await
        .unwrap();
    assert_eq!(response.extension, "");

    let out_dir = dir.path().join("images");
    let err = response
        .save(&out_dir, "RemoveBackground")
        .await
        .unwrap_err();

    assert!(matches!(err, ClipdropError::MissingExtension));
    assert!(!out_dir.exists());
}
