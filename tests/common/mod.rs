use wiremock::ResponseTemplate;

/// Builds a successful image response carrying the given bytes, content type,
/// and the API's credit accounting headers.
pub fn image_response(
    bytes: &[u8],
    content_type: &str,
    remaining_credits: u64,
    credits_consumed: u64,
) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_bytes(bytes.to_vec())
        .insert_header("content-type", content_type)
        .insert_header("x-remaining-credits", remaining_credits.to_string().as_str())
        .insert_header("x-credits-consumed", credits_consumed.to_string().as_str())
}
