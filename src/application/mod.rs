//! Application layer: brand analysis, the generation orchestrator, the
//! pipeline sequencer, persistence assembly, and response submission.

mod analyse;
mod assembly;
mod orchestrator;
mod pipeline;
mod respond;

pub use analyse::{AnalyseBrandCommand, AnalyseBrandHandler};
pub use assembly::{AssembledQuiz, QuizAssembler};
pub use orchestrator::{GenerationError, StageRunner};
pub use pipeline::GenerationPipeline;
pub use respond::{SubmitResponseCommand, SubmitResponseHandler, SubmitResponseResult};
