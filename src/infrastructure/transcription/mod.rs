//! Speech-to-text adapters

mod gemini;
mod openai;

pub use gemini::GeminiTranscriber;
pub use openai::OpenAiTranscriber;
