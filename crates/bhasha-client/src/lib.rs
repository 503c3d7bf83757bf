//! # bhasha-client
//!
//! Client for the Bhashini speech/text pipeline.
//!
//! - [`CredentialStore`] holds the bearer token, persisted write-through
//! - [`PipelineClient`] is the HTTP adapter: one method per operation,
//!   explicit token, normalized [`PipelineResult`](bhasha_types::PipelineResult)
//! - [`BhashaService`] adds token injection and local input checks
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bhasha_client::{BhashaService, CredentialStore};
//! use bhasha_platform::storage::FileStorage;
//! use bhasha_types::config::Config;
//!
//! # async fn example() -> bhasha_types::Result<()> {
//! let config = Config::default();
//! let creds = Arc::new(CredentialStore::load(FileStorage::new(
//!     config.storage.credential_path(),
//! )));
//! creds.set("my-bearer-token")?;
//!
//! let service = BhashaService::from_config(config, creds)?;
//! let hindi = service.translate("Good morning", "en", "hi").await?;
//! println!("{hindi}");
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod client;
pub mod credential;
pub mod extract;
pub mod service;

pub use client::{MetadataAuth, PipelineClient};
pub use credential::CredentialStore;
pub use service::{BhashaService, SpeechToSpeechOutput};
