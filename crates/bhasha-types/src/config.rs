//! Configuration schema.
//!
//! Every field has a default, so an empty JSON object (or no config file
//! at all) yields a working configuration pointed at the public
//! endpoints. Fields accept both `snake_case` and `camelCase` names.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::secret::SecretString;

pub const DEFAULT_INFERENCE_URL: &str =
    "https://dhruva-api.bhashini.gov.in/services/inference/pipeline";
pub const DEFAULT_METADATA_URL: &str =
    "https://meity-auth.ulcacontrib.org/ulca/apis/v0/model/getModelsPipeline";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_TRANSLATION_SERVICE_ID: &str = "ai4bharat/indictrans-v2-all-gpu--t4";
pub const DEFAULT_ASR_SERVICE_ID: &str = "ai4bharat/conformer-hi-gpu--t4";
pub const DEFAULT_TTS_SERVICE_ID: &str = "ai4bharat/indic-tts-coqui-indo_aryan-gpu--t4";

/// Key under which the bearer token is persisted.
pub const TOKEN_STORAGE_KEY: &str = "bhashini_auth_token";

// ── Root config ──────────────────────────────────────────────────────────

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote endpoints and transport settings.
    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// Model service ids attached to pipeline tasks.
    #[serde(default)]
    pub services: ServiceConfig,

    /// Legacy ULCA credentials for the metadata endpoint.
    #[serde(default, alias = "metadataAuth")]
    pub metadata_auth: Option<MetadataAuthConfig>,

    /// Where credentials are persisted.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Reject values that would make every request fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoints.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "endpoints.timeout_secs must be greater than zero".into(),
            ));
        }
        for (name, url) in [
            ("endpoints.inference_url", &self.endpoints.inference_url),
            ("endpoints.metadata_url", &self.endpoints.metadata_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be an http(s) URL, got '{url}'"
                )));
            }
        }
        Ok(())
    }
}

// ── Endpoints ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Pipeline inference URL (also receives feedback).
    #[serde(default = "default_inference_url", alias = "inferenceUrl")]
    pub inference_url: String,

    /// Pipeline metadata URL.
    #[serde(default = "default_metadata_url", alias = "metadataUrl")]
    pub metadata_url: String,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs", alias = "timeoutSecs")]
    pub timeout_secs: u64,
}

impl EndpointConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            inference_url: default_inference_url(),
            metadata_url: default_metadata_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_inference_url() -> String {
    DEFAULT_INFERENCE_URL.into()
}

fn default_metadata_url() -> String {
    DEFAULT_METADATA_URL.into()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// ── Services ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_translation_service")]
    pub translation: String,

    #[serde(default = "default_asr_service")]
    pub asr: String,

    /// Only attached to the synthesis stage of speech-to-speech.
    #[serde(default = "default_tts_service")]
    pub tts: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            translation: default_translation_service(),
            asr: default_asr_service(),
            tts: default_tts_service(),
        }
    }
}

fn default_translation_service() -> String {
    DEFAULT_TRANSLATION_SERVICE_ID.into()
}

fn default_asr_service() -> String {
    DEFAULT_ASR_SERVICE_ID.into()
}

fn default_tts_service() -> String {
    DEFAULT_TTS_SERVICE_ID.into()
}

// ── Metadata auth ────────────────────────────────────────────────────────

/// `userID` / `ulcaApiKey` header pair for the metadata endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataAuthConfig {
    #[serde(default, alias = "userId", alias = "userID")]
    pub user_id: Option<String>,

    #[serde(default, alias = "ulcaApiKey")]
    pub ulca_api_key: SecretString,
}

// ── Storage ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding persisted credentials. `~/` is expanded.
    #[serde(default = "default_credential_dir", alias = "credentialDir")]
    pub credential_dir: String,
}

impl StorageConfig {
    /// The credential directory with a leading `~/` expanded.
    pub fn credential_path(&self) -> PathBuf {
        if let Some(rest) = self.credential_dir.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(rest);
        }
        PathBuf::from(&self.credential_dir)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            credential_dir: default_credential_dir(),
        }
    }
}

fn default_credential_dir() -> String {
    "~/.bhasha/credentials".into()
}
