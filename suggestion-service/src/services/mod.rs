pub mod image;
pub mod mock;
pub mod openrouter;
pub mod quota;

pub use image::{EncodedImage, HttpImageFetcher, ImageError, ImageFetcher};
pub use openrouter::{OpenRouterClient, ProviderError, SuggestionProvider};
pub use quota::{QuotaError, QuotaGate, SupabaseQuotaGate};
