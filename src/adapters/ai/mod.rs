//! Content generator adapters.

mod anthropic_generator;
mod mock_generator;

pub use anthropic_generator::AnthropicGenerator;
pub use mock_generator::MockGenerator;
