//! User-facing operations on top of [`PipelineClient`].
//!
//! [`BhashaService`] pulls the token from the shared [`CredentialStore`],
//! rejects missing input locally (before any request is sent) and unpacks
//! the normalized [`PipelineResult`] into per-operation outputs.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use bhasha_types::config::Config;
use bhasha_types::feedback::FeedbackPayload;
use bhasha_types::metadata::{PipelineMetadata, PipelineQuestion};
use bhasha_types::{ApiError, Result, TaskType, VoiceGender};

use crate::audio::check_audio;
use crate::client::{MetadataAuth, PipelineClient};
use crate::credential::CredentialStore;

pub const TOKEN_REQUIRED: &str = "Please set your Authorization Token first";
pub const TRANSLATE_TEXT_REQUIRED: &str = "Please enter text to translate";
pub const TRANSLITERATE_TEXT_REQUIRED: &str = "Please enter text to transliterate";
pub const AUDIO_REQUIRED: &str = "Please record audio first";
pub const TTS_TEXT_REQUIRED: &str = "Please enter text to convert to speech";

/// What a speech-to-speech call produced. Empty fields mean that stage
/// returned nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeechToSpeechOutput {
    pub transcript: String,
    pub translation: String,
    pub audio: Option<Vec<u8>>,
}

/// Token-aware front door to the pipeline.
#[derive(Debug)]
pub struct BhashaService {
    client: PipelineClient,
    credentials: Arc<CredentialStore>,
}

impl BhashaService {
    pub fn new(client: PipelineClient, credentials: Arc<CredentialStore>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Build the HTTP client from `config` and wrap it.
    pub fn from_config(config: Config, credentials: Arc<CredentialStore>) -> Result<Self> {
        Ok(Self::new(PipelineClient::new(config)?, credentials))
    }

    pub fn client(&self) -> &PipelineClient {
        &self.client
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    fn token(&self) -> Result<String> {
        let token = self.credentials.token();
        if token.expose().trim().is_empty() {
            return Err(ApiError::Validation(TOKEN_REQUIRED.into()));
        }
        Ok(token.expose().to_string())
    }

    /// Translate text. Returns an empty string when the service answered
    /// without a usable translation.
    pub async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        require_text(text, TRANSLATE_TEXT_REQUIRED)?;
        let token = self.token()?;
        let result = self.client.translate(text, source, target, &token).await?;
        Ok(result.text(0).unwrap_or_default().to_string())
    }

    pub async fn transliterate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        require_text(text, TRANSLITERATE_TEXT_REQUIRED)?;
        let token = self.token()?;
        let result = self
            .client
            .transliterate(text, source, target, &token)
            .await?;
        Ok(result.text(0).unwrap_or_default().to_string())
    }

    /// Transcribe base64 audio.
    pub async fn recognize_speech(&self, audio_base64: &str, source: &str) -> Result<String> {
        require_text(audio_base64, AUDIO_REQUIRED)?;
        let token = self.token()?;
        check_audio(audio_base64)?;
        let result = self
            .client
            .recognize_speech(audio_base64, source, &token)
            .await?;
        Ok(result.text(0).unwrap_or_default().to_string())
    }

    /// Synthesize speech. `None` when the response carried no audio.
    pub async fn synthesize_speech(
        &self,
        text: &str,
        language: &str,
        gender: VoiceGender,
    ) -> Result<Option<Vec<u8>>> {
        require_text(text, TTS_TEXT_REQUIRED)?;
        let token = self.token()?;
        let result = self
            .client
            .synthesize_speech(text, language, gender, &token)
            .await?;
        Ok(result.audio_clips.into_iter().next())
    }

    pub async fn speech_to_speech(
        &self,
        audio_base64: &str,
        source: &str,
        target: &str,
        gender: VoiceGender,
    ) -> Result<SpeechToSpeechOutput> {
        require_text(audio_base64, AUDIO_REQUIRED)?;
        let token = self.token()?;
        check_audio(audio_base64)?;
        let result = self
            .client
            .speech_to_speech(audio_base64, source, target, gender, &token)
            .await?;

        let mut texts = result.texts.into_iter();
        Ok(SpeechToSpeechOutput {
            transcript: texts.next().unwrap_or_default(),
            translation: texts.next().unwrap_or_default(),
            audio: result.audio_clips.into_iter().next(),
        })
    }

    /// Fetch metadata with the stored bearer token.
    pub async fn fetch_pipeline_metadata(
        &self,
        task_type: TaskType,
        source: &str,
        target: Option<&str>,
    ) -> Result<PipelineMetadata> {
        let token = self.token()?;
        self.client
            .fetch_pipeline_metadata(task_type, source, target, &token)
            .await
    }

    /// Fetch metadata with the legacy ULCA credentials from config.
    pub async fn fetch_pipeline_metadata_legacy(
        &self,
        task_type: TaskType,
        source: &str,
        target: Option<&str>,
    ) -> Result<PipelineMetadata> {
        let Some(legacy) = self.client.config().metadata_auth.as_ref() else {
            return Err(ApiError::Validation(
                "metadata_auth is not configured".into(),
            ));
        };
        let auth = MetadataAuth::Ulca {
            user_id: legacy.user_id.clone(),
            api_key: legacy.ulca_api_key.clone(),
        };
        self.client
            .fetch_pipeline_metadata_with(task_type, source, target, &auth)
            .await
    }

    /// The standard questions about a pipeline; `None` when the metadata
    /// does not describe an inference endpoint.
    pub async fn pipeline_questions(
        &self,
        task_type: TaskType,
        source: &str,
        target: Option<&str>,
    ) -> Result<Option<Vec<PipelineQuestion>>> {
        let metadata = self.fetch_pipeline_metadata(task_type, source, target).await?;
        Ok(metadata.questions())
    }

    pub async fn submit_feedback(&self, payload: &FeedbackPayload) -> Result<Value> {
        payload.validate()?;
        let token = self.token()?;
        let ack = self.client.submit_feedback(payload, &token).await?;
        info!(rating = payload.rating, "feedback submitted");
        Ok(ack)
    }
}

fn require_text(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(message.into()));
    }
    Ok(())
}
