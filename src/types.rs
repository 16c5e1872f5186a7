use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::ClipdropError;

/// A request to generate an image from a text prompt.
#[derive(Debug, Clone, Default)]
pub struct TextToImageRequest {
    /// A text description of the image to generate.
    pub prompt: String,
}

/// A request to extend an image beyond its original borders.
///
/// Each extend field is the number of pixels to add on that side, in the
/// range -2048 to 2048. Negative values crop instead of extending. Fields
/// left at their `Default` of 0 leave that side untouched.
#[derive(Debug, Clone, Default)]
pub struct UncropRequest {
    /// The path to the local image file to extend.
    pub image_file: PathBuf,
    pub extend_left: i32,
    pub extend_right: i32,
    pub extend_up: i32,
    pub extend_down: i32,
}

/// A request to regenerate a masked region of an image from a text prompt.
#[derive(Debug, Clone, Default)]
pub struct TextInpaintingRequest {
    /// The path to the local image file to edit.
    pub image_file: PathBuf,
    /// The path to the mask file. White pixels mark the region to repaint.
    pub mask_file: PathBuf,
    /// A text description of what the masked region should become.
    pub text_prompt: String,
}

/// A request to render a sketch into a finished image guided by a prompt.
#[derive(Debug, Clone, Default)]
pub struct SketchToImageRequest {
    /// The path to the local sketch file.
    pub sketch_file: PathBuf,
    /// A text description of the desired rendering.
    pub prompt: String,
}

/// A request to replace the background of an image with a generated scene.
#[derive(Debug, Clone, Default)]
pub struct ReplaceBackgroundRequest {
    /// The path to the local image file whose subject is kept.
    pub image_file: PathBuf,
    /// A text description of the new background.
    pub prompt: String,
}

/// A request to erase text from an image.
#[derive(Debug, Clone, Default)]
pub struct RemoveTextRequest {
    pub image_file: PathBuf,
}

/// A request to remove the background of an image.
#[derive(Debug, Clone, Default)]
pub struct RemoveBackgroundRequest {
    pub image_file: PathBuf,
}

/// A request to generate a variation of an existing image.
#[derive(Debug, Clone, Default)]
pub struct ReimagineRequest {
    pub image_file: PathBuf,
}

/// A request to estimate surface normals for a portrait image.
#[derive(Debug, Clone, Default)]
pub struct PortraitSurfaceNormalsRequest {
    pub image_file: PathBuf,
}

/// A request to estimate a depth map for a portrait image.
#[derive(Debug, Clone, Default)]
pub struct PortraitDepthEstimationRequest {
    pub image_file: PathBuf,
}

/// A request to upscale an image to a target resolution.
#[derive(Debug, Clone, Default)]
pub struct ImageUpscaleRequest {
    /// The path to the local image file to upscale.
    pub image_file: PathBuf,
    /// The requested output width in pixels.
    pub target_width: u32,
    /// The requested output height in pixels.
    pub target_height: u32,
}

/// A request to erase a masked region of an image and fill it in.
#[derive(Debug, Clone, Default)]
pub struct CleanupRequest {
    /// The path to the local image file to clean up.
    pub image_file: PathBuf,
    /// The path to the mask file. White pixels mark the region to erase.
    pub mask_file: PathBuf,
    /// The speed/quality trade-off for the fill.
    pub mode: CleanupMode,
}

/// The speed/quality trade-off for a cleanup request.
///
/// `Fast` is the API default and may leave artifacts in the filled region;
/// `Quality` is slower but produces a better result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupMode {
    #[default]
    Fast,
    Quality,
}

impl CleanupMode {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            CleanupMode::Fast => "fast",
            CleanupMode::Quality => "quality",
        }
    }
}

/// (Internal) The JSON body the API returns on a non-success status.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub(crate) error: String,
}

/// The image returned by a successful endpoint call.
#[derive(Debug, Clone)]
pub struct ImageResponse {
    /// The raw bytes of the returned image.
    pub image: Vec<u8>,
    /// The image file extension, derived from the response content type
    /// (e.g. "png", "jpeg", "webp"). Empty if the response carried none.
    pub extension: String,
    /// Whether the call completed with a success status.
    pub success: bool,
    /// The credits left on the account, from the `x-remaining-credits` header.
    pub remaining_credits: Option<u64>,
    /// The credits this call consumed, from the `x-credits-consumed` header.
    pub credits_consumed: Option<u64>,
    /// An error message reported alongside the image, if any.
    pub error: Option<String>,
}

impl ImageResponse {
    /// Computes the output path for this image inside `dir`, named
    /// `<unix-seconds>-<tag>.<extension>`.
    ///
    /// # Errors
    ///
    /// `ClipdropError::MissingExtension` if the response has no extension,
    /// in which case nothing should be written.
    pub fn output_path<P: AsRef<Path>>(
        &self,
        dir: P,
        tag: &str,
        unix_seconds: i64,
    ) -> Result<PathBuf, ClipdropError> {
        if self.extension.is_empty() {
            return Err(ClipdropError::MissingExtension);
        }
        Ok(dir
            .as_ref()
            .join(format!("{}-{}.{}", unix_seconds, tag, self.extension)))
    }

    /// Writes the image bytes into `dir` under the name
    /// `<unix_seconds>-<tag>.<extension>`, creating the directory if needed.
    ///
    /// # Returns
    ///
    /// The path of the newly written file.
    pub async fn save_at<P: AsRef<Path>>(
        &self,
        dir: P,
        tag: &str,
        unix_seconds: i64,
    ) -> Result<PathBuf, ClipdropError> {
        let file_path = self.output_path(&dir, tag, unix_seconds)?;

        fs::create_dir_all(dir.as_ref()).await?;

        let mut file = fs::File::create(&file_path).await?;
        file.write_all(&self.image).await?;

        tracing::debug!(path = %file_path.display(), bytes = self.image.len(), "image saved");
        Ok(file_path)
    }

    /// Writes the image bytes into `dir`, stamped with the current Unix time.
    ///
    /// This is a convenience wrapper around [`ImageResponse::save_at`].
    pub async fn save<P: AsRef<Path>>(&self, dir: P, tag: &str) -> Result<PathBuf, ClipdropError> {
        self.save_at(dir, tag, chrono::Utc::now().timestamp()).await
    }
}
