//! OpenAI provider implementation
//!
//! Chat-completions client and the completion provider built on it.

pub mod client;
pub mod completion;
pub mod types;

pub use client::OpenAIClient;
pub use completion::OpenAICompletionProvider;
