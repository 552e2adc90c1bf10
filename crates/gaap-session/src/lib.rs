//! Session titles: transcript scanning, the on-disk title cache and the
//! generator that ties them to the remote summarizer

pub mod cache;
mod digest;
pub mod generator;
mod transcript;

pub use cache::{evict_oldest, CacheEntry, CacheMap, SessionTitleCache, MAX_CACHE_ENTRIES};
pub use digest::{content_hash, fallback_title};
pub use generator::{clean_title, TitleGenerator, TITLE_MAX_TOKENS, TITLE_TIMEOUT};
pub use transcript::{first_user_message, session_id};
