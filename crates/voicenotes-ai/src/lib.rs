//! AI gateway for VoiceNotes.
//!
//! Adapts the two domain capabilities the server needs, turning an audio file
//! into text and turning a transcription into a business report, onto an
//! external provider.
//!
//! # Example
//!
//! ```rust,ignore
//! use voicenotes_ai::{AiGateway, OpenAiConfig, OpenAiGateway};
//!
//! let gateway = OpenAiGateway::new(OpenAiConfig::openai_from_env()?)?;
//! let text = gateway.transcribe_audio(Path::new("memo.webm")).await?;
//! let report = gateway.generate_business_report(&text).await?;
//! ```

pub mod error;
pub mod gateway;
pub mod openai;

pub use error::{AiError, Result};
pub use gateway::{AiGateway, BUSINESS_REPORT_PROMPT, SharedGateway};
#[cfg(any(test, feature = "testing"))]
pub use gateway::{MockGateway, TranscribeCall};
pub use openai::{OpenAiConfig, OpenAiGateway, create_shared_gateway};
