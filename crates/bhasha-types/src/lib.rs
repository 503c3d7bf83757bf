//! # bhasha-types
//!
//! Core type definitions for the bhasha pipeline client.
//!
//! Every other bhasha crate depends on this one. It contains:
//!
//! - **[`error`]** -- [`ApiError`], the single error type returned by every
//!   adapter operation
//! - **[`pipeline`]** -- pipeline tasks and requests, with their wire format
//! - **[`result`]** -- the normalized [`PipelineResult`]
//! - **[`metadata`]** -- pipeline discovery requests and responses
//! - **[`feedback`]** -- user feedback payloads
//! - **[`language`]** -- the languages offered by the front-end
//! - **[`config`]** -- endpoint, service and storage configuration
//! - **[`secret`]** -- [`SecretString`] for tokens and API keys

pub mod config;
pub mod error;
pub mod feedback;
pub mod language;
pub mod metadata;
pub mod pipeline;
pub mod result;
pub mod secret;

pub use error::{ApiError, ConfigError, Result};
pub use pipeline::{Modality, PipelineInput, PipelineRequest, PipelineTask, TaskType, VoiceGender};
pub use result::PipelineResult;
pub use secret::SecretString;
