//! An unofficial Rust SDK for the ClipDrop image editing API.
//!
//! This SDK provides a convenient, asynchronous interface for the ClipDrop
//! platform's image endpoints: text-to-image generation, uncropping,
//! inpainting, background removal and replacement, upscaling, portrait
//! depth and surface estimation, reimagining, and cleanup.
//! It handles request encoding, error handling, and saving returned images,
//! allowing you to focus on your application's core logic.
//!
//! ## Features
//! - One typed request struct and client method per API endpoint.
//! - Asynchronous API for non-blocking operations.
//! - Streamed multipart uploads of local image and mask files.
//! - Credit accounting read from the API's response headers.
//! - Helpers for saving returned images under timestamped names.
//! - Typed error handling for robust applications.

mod client;
mod error;
mod types;

pub use client::ClipdropClient;
pub use error::ClipdropError;
pub use types::{
    CleanupMode, CleanupRequest, ImageResponse, ImageUpscaleRequest,
    PortraitDepthEstimationRequest, PortraitSurfaceNormalsRequest, ReimagineRequest,
    RemoveBackgroundRequest, RemoveTextRequest, ReplaceBackgroundRequest, SketchToImageRequest,
    TextInpaintingRequest, TextToImageRequest, UncropRequest,
};
