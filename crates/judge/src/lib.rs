//! Remote review judgement via a hosted text-generation API
//!
//! The alternate verdict path: instead of the local classifier, raw review
//! text is wrapped in a fixed instructional prompt, sent to a hosted model
//! and the generated text is returned verbatim for the caller to display.
//!
//! Modules:
//! - `config`: Environment-driven connection settings
//! - `client`: The generateContent client and prompt template
//! - `errors`: Judgement error taxonomy

pub mod client;
pub mod config;
pub mod errors;

pub use client::{build_prompt, RemoteJudge};
pub use config::JudgeConfig;
pub use errors::JudgeError;
