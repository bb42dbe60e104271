//! Website text extraction adapters.

mod http_text_extractor;
mod mock_extractor;

pub use http_text_extractor::HttpTextExtractor;
pub use mock_extractor::MockTextExtractor;
