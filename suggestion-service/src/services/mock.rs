//! Mock capability implementations for testing.
//!
//! Each mock records how often it was called so tests can assert that a
//! rejected request never reached a downstream collaborator.

use crate::dtos::Language;
use crate::services::image::{EncodedImage, ImageError, ImageFetcher};
use crate::services::openrouter::{ProviderError, SuggestionProvider};
use crate::services::quota::{QuotaError, QuotaGate};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock suggestion provider with a canned outcome.
pub struct MockSuggestionProvider {
    outcome: Outcome,
    calls: AtomicUsize,
}

enum Outcome {
    Text(String),
    Empty,
    Failing(String),
}

impl MockSuggestionProvider {
    pub fn returning(text: &str) -> Self {
        Self {
            outcome: Outcome::Text(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Provider that answers successfully but with no generated text.
    pub fn empty() -> Self {
        Self {
            outcome: Outcome::Empty,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Outcome::Failing(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SuggestionProvider for MockSuggestionProvider {
    async fn suggest(
        &self,
        _image: &EncodedImage,
        _language: Language,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Text(text) => Ok(text.clone()),
            Outcome::Empty => Err(ProviderError::Empty),
            Outcome::Failing(message) => Err(ProviderError::Api(message.clone())),
        }
    }
}

/// Mock image fetcher.
pub struct MockImageFetcher {
    fails: bool,
    calls: AtomicUsize,
}

impl MockImageFetcher {
    pub fn succeeding() -> Self {
        Self {
            fails: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fails: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageFetcher for MockImageFetcher {
    async fn fetch_encoded(&self, url: &str) -> Result<EncodedImage, ImageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fails {
            return Err(ImageError(format!("connection refused: {}", url)));
        }
        Ok(EncodedImage::from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]))
    }
}

/// Mock quota gate with independently configurable check and increment
/// behavior.
pub struct MockQuotaGate {
    allow: bool,
    check_fails: bool,
    increment_fails: bool,
    check_calls: AtomicUsize,
    increment_calls: AtomicUsize,
}

impl MockQuotaGate {
    pub fn allowing() -> Self {
        Self::new(true, false, false)
    }

    pub fn denying() -> Self {
        Self::new(false, false, false)
    }

    /// Gate whose check itself errors (distinct from a denial).
    pub fn check_failing() -> Self {
        Self::new(true, true, false)
    }

    /// Gate that allows the request but fails to record it.
    pub fn increment_failing() -> Self {
        Self::new(true, false, true)
    }

    fn new(allow: bool, check_fails: bool, increment_fails: bool) -> Self {
        Self {
            allow,
            check_fails,
            increment_fails,
            check_calls: AtomicUsize::new(0),
            increment_calls: AtomicUsize::new(0),
        }
    }

    pub fn check_calls(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }

    pub fn increment_calls(&self) -> usize {
        self.increment_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuotaGate for MockQuotaGate {
    async fn can_request(&self, _user_id: &str, _access_token: &str) -> Result<bool, QuotaError> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        if self.check_fails {
            return Err(QuotaError("rpc unavailable".to_string()));
        }
        Ok(self.allow)
    }

    async fn increment(&self, _user_id: &str, _access_token: &str) -> Result<(), QuotaError> {
        self.increment_calls.fetch_add(1, Ordering::SeqCst);
        if self.increment_fails {
            return Err(QuotaError("rpc unavailable".to_string()));
        }
        Ok(())
    }
}
