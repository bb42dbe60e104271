//! Ports: interfaces to external collaborators.

mod content_generator;
mod quiz_repository;
mod text_extractor;

pub use content_generator::{
    ContentGenerator, GenerationRequest, GeneratorError, Message, MessageRole,
};
pub use quiz_repository::QuizRepository;
pub use text_extractor::{ExtractedContent, ScrapeError, TextExtractor};
