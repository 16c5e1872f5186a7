mod common;

use clipdrop::{ClipdropClient, ClipdropError, TextToImageRequest};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_text_to_image_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/text-to-image/v1"))
        .respond_with(common::image_response(b"fake png bytes", "image/png", 995, 5))
        .mount(&server)
        .await;

    let client = ClipdropClient::new_with_url("test_api_key".to_string(), &server.uri()).unwrap();

    let response = client
        .text_to_image(&TextToImageRequest {
            prompt: "shot of vaporwave fashion dog in miami".to_string(),
        })
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.image, b"fake png bytes");
    assert_eq!(response.extension, "png");
    assert_eq!(response.remaining_credits, Some(995));
    assert_eq!(response.credits_consumed, Some(5));
    assert_eq!(response.error, None);
}

#[tokio::test]
async fn test_text_to_image_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/text-to-image/v1"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid API key" })),
        )
        .mount(&server)
        .await;

    let client = ClipdropClient::new_with_url("bad_api_key".to_string(), &server.uri()).unwrap();

    let err = client
        .text_to_image(&TextToImageRequest {
            prompt: "a delicious hamburger".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        ClipdropError::ApiError { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid API key");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_text_to_image_non_json_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/text-to-image/v1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = ClipdropClient::new_with_url("test_api_key".to_string(), &server.uri()).unwrap();

    let err = client
        .text_to_image(&TextToImageRequest {
            prompt: "a delicious hamburger".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        ClipdropError::ApiError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
