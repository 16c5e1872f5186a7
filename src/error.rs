#[derive(Debug, thiserror::Error)]
pub enum ClipdropError {
    #[error("API key is missing. Please provide it or set the CLIPDROP_API_KEY environment variable.")]
    MissingApiKey,
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Failed to parse API response: {0}")]
    ResponseParseFailed(#[from] serde_json::Error),
    #[error("API request failed with status {status}: {message}")]
    ApiError { status: u16, message: String },
    #[error("URL parsing failed: {0}")]
    UrlParseFailed(#[from] url::ParseError),
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Response carried no image file extension")]
    MissingExtension,
}
