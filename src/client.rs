use crate::error::ClipdropError;
use crate::types::{
    ApiErrorBody, CleanupRequest, ImageResponse, ImageUpscaleRequest,
    PortraitDepthEstimationRequest, PortraitSurfaceNormalsRequest, ReimagineRequest,
    RemoveBackgroundRequest, RemoveTextRequest, ReplaceBackgroundRequest, SketchToImageRequest,
    TextInpaintingRequest, TextToImageRequest, UncropRequest,
};
use reqwest::header::{HeaderMap, HeaderName, CONTENT_TYPE};
use reqwest::multipart;
use std::env;
use std::path::Path;
use tokio::fs::File;
use tokio_util::codec::{BytesCodec, FramedRead};
use url::Url;

const DEFAULT_API_URL: &str = "https://clipdrop-api.co/";

const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");
const REMAINING_CREDITS_HEADER: &str = "x-remaining-credits";
const CREDITS_CONSUMED_HEADER: &str = "x-credits-consumed";

/// The main client for interacting with the ClipDrop API.
///
/// It holds the shared `reqwest::Client` and the base URL for all API requests.
/// It is designed to be cloneable and safe to share across threads.
#[derive(Clone)]
pub struct ClipdropClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ClipdropClient {
    /// Creates a new `ClipdropClient`.
    ///
    /// This method initializes the client with an API key. It first checks for the `api_key`
    /// parameter. If it's `None`, it falls back to the `CLIPDROP_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// - `ClipdropError::MissingApiKey` if the API key is not provided in either way.
    /// - `ClipdropError::RequestFailed` if the internal HTTP client fails to build.
    /// - `ClipdropError::UrlParseFailed` if the default API URL is invalid.
    pub fn new(api_key: Option<String>) -> Result<Self, ClipdropError> {
        let api_key = api_key
            .or_else(|| env::var("CLIPDROP_API_KEY").ok())
            .ok_or(ClipdropError::MissingApiKey)?;
        Self::new_with_url(api_key, DEFAULT_API_URL)
    }

    /// Creates a new `ClipdropClient` with a custom base URL.
    ///
    /// This is useful for testing or for connecting to a different API endpoint.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The API key for authentication.
    /// * `base_url` - The base URL for the API (e.g., for a mock server).
    ///
    /// # Errors
    ///
    /// - `ClipdropError::RequestFailed` if the internal HTTP client fails to build.
    /// - `ClipdropError::UrlParseFailed` if the provided `base_url` is invalid.
    pub fn new_with_url(api_key: String, base_url: &str) -> Result<Self, ClipdropError> {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key.parse().unwrap());

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Generates an image from a text prompt.
    ///
    /// # Arguments
    ///
    /// * `request` - The prompt describing the image to generate.
    ///
    /// # Returns
    ///
    /// An [`ImageResponse`] containing the generated image bytes.
    pub async fn text_to_image(
        &self,
        request: &TextToImageRequest,
    ) -> Result<ImageResponse, ClipdropError> {
        let form = multipart::Form::new().text("prompt", request.prompt.clone());
        self.send_form("text-to-image/v1", form).await
    }

    /// Extends an image beyond its original borders.
    ///
    /// Sides whose extend value is 0 are left untouched.
    pub async fn uncrop(&self, request: &UncropRequest) -> Result<ImageResponse, ClipdropError> {
        let form = multipart::Form::new()
            .part("image_file", file_part(&request.image_file).await?)
            .text("extend_left", request.extend_left.to_string())
            .text("extend_right", request.extend_right.to_string())
            .text("extend_up", request.extend_up.to_string())
            .text("extend_down", request.extend_down.to_string());
        self.send_form("uncrop/v1", form).await
    }

    /// Regenerates the masked region of an image from a text prompt.
    ///
    /// # Arguments
    ///
    /// * `request` - The image, its mask, and the prompt for the masked region.
    pub async fn text_inpainting(
        &self,
        request: &TextInpaintingRequest,
    ) -> Result<ImageResponse, ClipdropError> {
        let form = multipart::Form::new()
            .part("image_file", file_part(&request.image_file).await?)
            .part("mask_file", file_part(&request.mask_file).await?)
            .text("text_prompt", request.text_prompt.clone());
        self.send_form("text-inpainting/v1", form).await
    }

    /// Renders a sketch into a finished image guided by a prompt.
    pub async fn sketch_to_image(
        &self,
        request: &SketchToImageRequest,
    ) -> Result<ImageResponse, ClipdropError> {
        let form = multipart::Form::new()
            .part("sketch_file", file_part(&request.sketch_file).await?)
            .text("prompt", request.prompt.clone());
        self.send_form("sketch-to-image/v1/sketch-to-image", form).await
    }

    /// Replaces the background of an image with a scene generated from a prompt.
    pub async fn replace_background(
        &self,
        request: &ReplaceBackgroundRequest,
    ) -> Result<ImageResponse, ClipdropError> {
        let form = multipart::Form::new()
            .part("image_file", file_part(&request.image_file).await?)
            .text("prompt", request.prompt.clone());
        self.send_form("replace-background/v1", form).await
    }

    /// Erases text from an image.
    pub async fn remove_text(
        &self,
        request: &RemoveTextRequest,
    ) -> Result<ImageResponse, ClipdropError> {
        let form = multipart::Form::new()
            .part("image_file", file_part(&request.image_file).await?);
        self.send_form("remove-text/v1", form).await
    }

    /// Removes the background of an image, keeping the subject.
    pub async fn remove_background(
        &self,
        request: &RemoveBackgroundRequest,
    ) -> Result<ImageResponse, ClipdropError> {
        let form = multipart::Form::new()
            .part("image_file", file_part(&request.image_file).await?);
        self.send_form("remove-background/v1", form).await
    }

    /// Generates a variation of an existing image.
    pub async fn reimagine(
        &self,
        request: &ReimagineRequest,
    ) -> Result<ImageResponse, ClipdropError> {
        let form = multipart::Form::new()
            .part("image_file", file_part(&request.image_file).await?);
        self.send_form("reimagine/v1/reimagine", form).await
    }

    /// Estimates surface normals for a portrait image.
    ///
    /// The returned image encodes the normal map.
    pub async fn portrait_surface_normals(
        &self,
        request: &PortraitSurfaceNormalsRequest,
    ) -> Result<ImageResponse, ClipdropError> {
        let form = multipart::Form::new()
            .part("image_file", file_part(&request.image_file).await?);
        self.send_form("portrait-surface-normals/v1", form).await
    }

    /// Estimates a depth map for a portrait image.
    pub async fn portrait_depth_estimation(
        &self,
        request: &PortraitDepthEstimationRequest,
    ) -> Result<ImageResponse, ClipdropError> {
        let form = multipart::Form::new()
            .part("image_file", file_part(&request.image_file).await?);
        self.send_form("portrait-depth-estimation/v1", form).await
    }

    /// Upscales an image to the requested resolution.
    ///
    /// # Arguments
    ///
    /// * `request` - The image and the target width and height in pixels.
    pub async fn image_upscale(
        &self,
        request: &ImageUpscaleRequest,
    ) -> Result<ImageResponse, ClipdropError> {
        let form = multipart::Form::new()
            .part("image_file", file_part(&request.image_file).await?)
            .text("target_width", request.target_width.to_string())
            .text("target_height", request.target_height.to_string());
        self.send_form("image-upscaling/v1/upscale", form).await
    }

    /// Erases the masked region of an image and fills it from the surroundings.
    ///
    /// # Arguments
    ///
    /// * `request` - The image, its mask, and the cleanup mode.
    pub async fn cleanup(&self, request: &CleanupRequest) -> Result<ImageResponse, ClipdropError> {
        let form = multipart::Form::new()
            .part("image_file", file_part(&request.image_file).await?)
            .part("mask_file", file_part(&request.mask_file).await?)
            .text("mode", request.mode.as_str());
        self.send_form("cleanup/v1", form).await
    }

    /// Posts a multipart form to `endpoint` and decodes the image response.
    async fn send_form(
        &self,
        endpoint: &str,
        form: multipart::Form,
    ) -> Result<ImageResponse, ClipdropError> {
        let url = self.base_url.join(endpoint)?;
        tracing::debug!(%url, "sending request");

        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = serde_json::from_slice::<ApiErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(ClipdropError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let headers = response.headers().clone();
        let extension = extension_from_content_type(&headers);
        let remaining_credits = header_u64(&headers, REMAINING_CREDITS_HEADER);
        let credits_consumed = header_u64(&headers, CREDITS_CONSUMED_HEADER);

        let image = response.bytes().await?.to_vec();
        tracing::debug!(
            bytes = image.len(),
            extension = %extension,
            ?remaining_credits,
            "image received"
        );

        Ok(ImageResponse {
            image,
            extension,
            success: true,
            remaining_credits,
            credits_consumed,
            error: None,
        })
    }
}

/// Builds a streamed multipart part from a local file.
///
/// The part's file name is taken from the path and its MIME type is guessed
/// from the extension.
async fn file_part(path: &Path) -> Result<multipart::Part, ClipdropError> {
    let file = File::open(path).await?;
    let stream = FramedRead::new(file, BytesCodec::new());
    let file_body = reqwest::Body::wrap_stream(stream);

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            ClipdropError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Could not determine file name",
            ))
        })?
        .to_string();

    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    Ok(multipart::Part::stream(file_body)
        .file_name(file_name)
        .mime_str(&mime_type)?)
}

/// Derives the image extension from the `Content-Type` subtype, e.g.
/// `image/png` becomes "png". Returns an empty string when the header is
/// missing or malformed.
fn extension_from_content_type(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .and_then(|ct| ct.split('/').nth(1))
        .map(|ext| ext.trim().to_string())
        .unwrap_or_default()
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.parse().ok()
}
