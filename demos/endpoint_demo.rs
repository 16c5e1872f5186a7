//! This demo exercises the ClipDrop endpoint wrappers one at a time.
//!
//! It initializes a `ClipdropClient`, invokes the selected endpoint with
//! sample inputs from `./resource/`, and saves the returned image into
//! `./images/` under a `<unix-seconds>-<OperationTag>.<ext>` name. The
//! operation defaults to `UnCrop`; pass a tag on the command line to run a
//! different one.
//!
//! To run this demo, you must have the `CLIPDROP_API_KEY` environment
//! variable set, and the sample images must exist under `./resource/`.
//!
//! Usage: `cargo run --example endpoint_demo -- Cleanup`

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clipdrop::{
    CleanupMode, CleanupRequest, ClipdropClient, ClipdropError, ImageResponse,
    ImageUpscaleRequest, PortraitDepthEstimationRequest, PortraitSurfaceNormalsRequest,
    ReimagineRequest, RemoveBackgroundRequest, RemoveTextRequest, ReplaceBackgroundRequest,
    SketchToImageRequest, TextInpaintingRequest, TextToImageRequest, UncropRequest,
};

const RESOURCE_DIR: &str = "./resource";
const OUTPUT_DIR: &str = "./images";

/// The operation run when no tag is given on the command line.
const DEFAULT_OPERATION: Operation = Operation::UnCrop;

/// One tag per ClipDrop endpoint wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    TextToImage,
    UnCrop,
    TextInpainting,
    SketchToImage,
    ReplaceBackground,
    RemoveText,
    RemoveBackground,
    Reimagine,
    PortraitSurface,
    PortraitDepth,
    ImageUpscale,
    Cleanup,
}

impl Operation {
    fn tag(self) -> &'static str {
        match self {
            Operation::TextToImage => "TextToImage",
            Operation::UnCrop => "UnCrop",
            Operation::TextInpainting => "TextInpainting",
            Operation::SketchToImage => "SketchToImage",
            Operation::ReplaceBackground => "ReplaceBackground",
            Operation::RemoveText => "RemoveText",
            Operation::RemoveBackground => "RemoveBackground",
            Operation::Reimagine => "Reimagine",
            Operation::PortraitSurface => "PortraitSurface",
            Operation::PortraitDepth => "PortraitDepth",
            Operation::ImageUpscale => "ImageUpscale",
            Operation::Cleanup => "Cleanup",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Operation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TextToImage" => Ok(Operation::TextToImage),
            "UnCrop" => Ok(Operation::UnCrop),
            "TextInpainting" => Ok(Operation::TextInpainting),
            "SketchToImage" => Ok(Operation::SketchToImage),
            "ReplaceBackground" => Ok(Operation::ReplaceBackground),
            "RemoveText" => Ok(Operation::RemoveText),
            "RemoveBackground" => Ok(Operation::RemoveBackground),
            "Reimagine" => Ok(Operation::Reimagine),
            "PortraitSurface" => Ok(Operation::PortraitSurface),
            "PortraitDepth" => Ok(Operation::PortraitDepth),
            "ImageUpscale" => Ok(Operation::ImageUpscale),
            "Cleanup" => Ok(Operation::Cleanup),
            other => Err(anyhow::anyhow!("unknown operation tag: {}", other)),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file if it exists.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    // The client reads the `CLIPDROP_API_KEY` environment variable.
    let client = ClipdropClient::new(None)?;

    // Pick the operation from the command line, or fall back to the default.
    let operation = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => DEFAULT_OPERATION,
    };

    println!("Running {} against the ClipDrop API...", operation);

    // The call runs in its own task so that a panic inside the endpoint code
    // surfaces here as a reported failure instead of tearing the demo down.
    let response = match tokio::spawn(run_operation(client, operation)).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            eprintln!("{} failed: {}", operation, e);
            return Ok(());
        }
        Err(e) => {
            eprintln!("{} aborted: {}", operation, e);
            return Ok(());
        }
    };

    let path = match response.save(OUTPUT_DIR, operation.tag()).await {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Saving the {} result failed: {}", operation, e);
            return Ok(());
        }
    };

    println!("Image saved to {}", path.display());
    println!("-> success: {}", response.success);
    if let Some(remaining) = response.remaining_credits {
        println!("-> remaining credits: {}", remaining);
    }
    if let Some(consumed) = response.credits_consumed {
        println!("-> credits consumed: {}", consumed);
    }
    println!("-> extension: {}", response.extension);
    if let Some(error) = &response.error {
        println!("-> error: {}", error);
    }

    Ok(())
}

fn resource(name: &str) -> PathBuf {
    PathBuf::from(RESOURCE_DIR).join(name)
}

/// Invokes the endpoint wrapper matching `operation` with sample inputs.
async fn run_operation(
    client: ClipdropClient,
    operation: Operation,
) -> Result<ImageResponse, ClipdropError> {
    match operation {
        Operation::TextToImage => {
            client
                .text_to_image(&TextToImageRequest {
                    prompt: "shot of vaporwave fashion dog in miami".to_string(),
                })
                .await
        }
        Operation::UnCrop => {
            client
                .uncrop(&UncropRequest {
                    image_file: resource("reimagine_1024x1024.jpg"),
                    // Up to 2048 pixels per side; negative values crop.
                    extend_left: -700,
                    ..Default::default()
                })
                .await
        }
        Operation::TextInpainting => {
            client
                .text_inpainting(&TextInpaintingRequest {
                    image_file: resource("text-inpainting.jpeg"),
                    mask_file: resource("text-inpainting-mask.png"),
                    text_prompt: "A woman with a red scarf".to_string(),
                })
                .await
        }
        Operation::SketchToImage => {
            client
                .sketch_to_image(&SketchToImageRequest {
                    sketch_file: resource("sketch-to-image_1024x1024.png"),
                    prompt: "an owl on a branch, cinematic".to_string(),
                })
                .await
        }
        Operation::ReplaceBackground => {
            client
                .replace_background(&ReplaceBackgroundRequest {
                    image_file: resource("replace-background.jpg"),
                    prompt: "a cozy marble kitchen with wine glasses".to_string(),
                })
                .await
        }
        Operation::RemoveText => {
            client
                .remove_text(&RemoveTextRequest {
                    image_file: resource("remove-text-2_923x693.png"),
                })
                .await
        }
        Operation::RemoveBackground => {
            client
                .remove_background(&RemoveBackgroundRequest {
                    image_file: resource("remove-background.jpeg"),
                })
                .await
        }
        Operation::Reimagine => {
            client
                .reimagine(&ReimagineRequest {
                    image_file: resource("reimagine_1024x1024.jpg"),
                })
                .await
        }
        Operation::PortraitSurface => {
            client
                .portrait_surface_normals(&PortraitSurfaceNormalsRequest {
                    image_file: resource("reimagine_1024x1024.jpg"),
                })
                .await
        }
        Operation::PortraitDepth => {
            client
                .portrait_depth_estimation(&PortraitDepthEstimationRequest {
                    image_file: resource("reimagine_1024x1024.jpg"),
                })
                .await
        }
        Operation::ImageUpscale => {
            client
                .image_upscale(&ImageUpscaleRequest {
                    image_file: resource("image-upscaling.png"),
                    target_width: 4096,
                    target_height: 4096,
                })
                .await
        }
        Operation::Cleanup => {
            client
                .cleanup(&CleanupRequest {
                    image_file: resource("clean.jpeg"),
                    mask_file: resource("clean-mask.png"),
                    mode: CleanupMode::Quality,
                })
                .await
        }
    }
}
