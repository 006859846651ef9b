use crate::format::generate_export_filename;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, info};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const DATA_URL_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Receipt not found")]
    MissingTarget,
    #[error("Download library not loaded. Please refresh the page and try again.")]
    RasterizerUnavailable,
    #[error("Failed to download receipt. Please try again.")]
    Rasterize(#[source] RasterizeError),
    #[error("invalid receipt selector {0:?}")]
    InvalidSelector(String),
}

#[derive(Debug, Error)]
pub enum RasterizeError {
    #[error("image is not a png data url")]
    NotDataUrl,
    #[error("image payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("image payload is not a png")]
    NotPng,
}

/// Turns the serialized receipt node into PNG bytes.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, node_html: &str) -> Result<Vec<u8>, RasterizeError>;
}

/// An image already rasterized by `html-to-image` on the page and submitted
/// as a data URL.
#[derive(Debug, Clone)]
pub struct SubmittedImage {
    data_url: String,
}

impl SubmittedImage {
    /// `None` for a missing or blank payload, i.e. the library never ran.
    pub fn from_request(image: Option<String>) -> Option<Self> {
        image
            .filter(|data_url| !data_url.trim().is_empty())
            .map(|data_url| Self { data_url })
    }
}

#[async_trait]
impl Rasterizer for SubmittedImage {
    async fn rasterize(&self, _node_html: &str) -> Result<Vec<u8>, RasterizeError> {
        let payload = self
            .data_url
            .trim()
            .strip_prefix(DATA_URL_PREFIX)
            .ok_or(RasterizeError::NotDataUrl)?;
        let bytes = STANDARD.decode(payload)?;
        if !bytes.starts_with(PNG_SIGNATURE) {
            return Err(RasterizeError::NotPng);
        }
        Ok(bytes)
    }
}

#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ExportedImage {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// Outer HTML of the first element matching `selector`.
pub fn find_node(page_html: &str, selector: &str) -> Result<String, ExportError> {
    let parsed = Selector::parse(selector)
        .map_err(|_| ExportError::InvalidSelector(selector.to_string()))?;
    let document = Html::parse_document(page_html);
    document
        .select(&parsed)
        .next()
        .map(|node| node.html())
        .ok_or(ExportError::MissingTarget)
}

pub async fn export_receipt_as_image(
    page_html: &str,
    selector: &str,
    rasterizer: Option<&dyn Rasterizer>,
    prefix: &str,
) -> Result<ExportedImage, ExportError> {
    let node_html = find_node(page_html, selector)?;
    let rasterizer = rasterizer.ok_or(ExportError::RasterizerUnavailable)?;

    debug!(bytes = node_html.len(), "rasterizing receipt node");
    let bytes = rasterizer
        .rasterize(&node_html)
        .await
        .map_err(ExportError::Rasterize)?;

    let filename = generate_export_filename(prefix, "png");
    info!(%filename, size = bytes.len(), "exported receipt image");
    Ok(ExportedImage { filename, bytes })
}
