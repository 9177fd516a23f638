//! Image retrieval and transport encoding.
//!
//! The caller supplies an arbitrary HTTP(S) URL; the fetched bytes are
//! base64-encoded and shipped to the inference API as an inline data URL.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use thiserror::Error;

/// A fetched image, base64-encoded for transport.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    base64: String,
}

impl EncodedImage {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            base64: STANDARD.encode(bytes),
        }
    }

    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// Inline data URL as the inference API expects it.
    pub fn data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.base64)
    }
}

#[derive(Debug, Error)]
#[error("failed to fetch image: {0}")]
pub struct ImageError(pub String);

#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch the image at `url` and encode it for transport.
    async fn fetch_encoded(&self, url: &str) -> Result<EncodedImage, ImageError>;
}

/// Fetcher backed by a plain HTTP GET.
#[derive(Clone, Default)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch_encoded(&self, url: &str) -> Result<EncodedImage, ImageError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ImageError(e.to_string()))?
            .error_for_status()
            .map_err(|e| ImageError(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageError(e.to_string()))?;

        Ok(EncodedImage::from_bytes(&bytes))
    }
}
