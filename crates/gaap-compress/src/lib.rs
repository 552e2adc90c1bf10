//! Message compression through a remote language model

pub mod compressor;
mod prompts;
pub mod summarizer;

pub use compressor::{MessageCompressor, COMPRESS_MAX_TOKENS, COMPRESS_TIMEOUT};
pub use prompts::{compress_prompt, title_prompt};
pub use summarizer::{extract_text, HttpSummarizer, SummaryRequest, Summarizer, ANTHROPIC_VERSION};
