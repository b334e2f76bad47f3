//! AI gateway: prompt building, the Gemini `generateContent` client, and the
//! degrade-gracefully wrapper that always hands back a usable payload.

pub mod client;
pub mod error;
pub mod gateway;
pub mod prompts;

pub use client::{AiConfig, GeminiClient, ModelClient};
pub use error::{FailureKind, ModelError};
pub use gateway::{AiGateway, AiOutcome};
