//! The pipeline adapter: HTTP calls to the inference and metadata endpoints.
//!
//! [`PipelineClient`] builds the task chain for each operation, posts it
//! with the caller's token in the `Authorization` header, and normalizes
//! the answer through [`crate::extract`]. It never retries. Every failure
//! is mapped onto one [`ApiError`] bucket:
//!
//! | What happened                          | Variant    | `status_code()` |
//! |----------------------------------------|------------|-----------------|
//! | non-2xx response                       | `Remote`   | HTTP status     |
//! | sent, but no (complete) response       | `Network`  | `0`             |
//! | request could not be built             | `Local`    | `-1`            |

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use bhasha_types::config::Config;
use bhasha_types::error::NO_RESPONSE_MESSAGE;
use bhasha_types::feedback::{FeedbackPayload, default_user_agent};
use bhasha_types::metadata::{MetadataQuery, PipelineMetadata};
use bhasha_types::{
    ApiError, PipelineInput, PipelineRequest, PipelineResult, PipelineTask, Result, SecretString,
    TaskType, VoiceGender,
};

use crate::extract::normalize;

/// Credentials accepted by the metadata endpoint.
#[derive(Debug, Clone)]
pub enum MetadataAuth {
    /// `Authorization: <token>`.
    Bearer(SecretString),
    /// Legacy ULCA headers: `userID` (when known) plus `ulcaApiKey`.
    Ulca {
        user_id: Option<String>,
        api_key: SecretString,
    },
}

impl MetadataAuth {
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        match self {
            MetadataAuth::Bearer(token) => {
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    header_value(token.expose())?,
                );
            }
            MetadataAuth::Ulca { user_id, api_key } => {
                let key = api_key.expose().trim();
                if key.is_empty() {
                    return Err(ApiError::Validation("ULCA API key is not set".into()));
                }
                if let Some(user) = user_id.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
                    headers.insert(HeaderName::from_static("userid"), header_value(user)?);
                }
                headers.insert(HeaderName::from_static("ulcaapikey"), header_value(key)?);
            }
        }
        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    let mut v = HeaderValue::from_str(value)
        .map_err(|e| ApiError::Local(format!("invalid header value: {e}")))?;
    v.set_sensitive(true);
    Ok(v)
}

/// `Authorization: <token>`, verbatim. Blank tokens are the caller's to reject.
fn bearer_headers(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(reqwest::header::AUTHORIZATION, header_value(token)?);
    Ok(headers)
}

/// HTTP adapter for the speech/text pipeline.
pub struct PipelineClient {
    config: Config,
    http: reqwest::Client,
}

impl PipelineClient {
    /// Build a client whose every request is bounded by
    /// `config.endpoints.timeout_secs`.
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.endpoints.timeout())
            .user_agent(default_user_agent())
            .build()
            .map_err(|e| ApiError::Local(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run an arbitrary validated pipeline and normalize its output.
    pub async fn run(&self, request: &PipelineRequest, token: &str) -> Result<PipelineResult> {
        let headers = bearer_headers(token)?;
        let tasks = request.task_types();
        debug!(
            tasks = ?tasks,
            url = %self.config.endpoints.inference_url,
            "sending pipeline request"
        );

        let body = self
            .post_json(&self.config.endpoints.inference_url, request, headers)
            .await?;
        Ok(normalize(&tasks, &body))
    }

    /// Text translation. `texts[0]` holds the translation.
    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        token: &str,
    ) -> Result<PipelineResult> {
        let task = PipelineTask::Translation {
            source_language: source_language.into(),
            target_language: target_language.into(),
            service_id: self.config.services.translation.clone(),
        };
        let request = PipelineRequest::new(vec![task], PipelineInput::Text(text.into()))?;
        self.run(&request, token).await
    }

    /// Script conversion. `texts[0]` holds the transliteration.
    pub async fn transliterate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        token: &str,
    ) -> Result<PipelineResult> {
        let task = PipelineTask::Transliteration {
            source_language: source_language.into(),
            target_language: target_language.into(),
        };
        let request = PipelineRequest::new(vec![task], PipelineInput::Text(text.into()))?;
        self.run(&request, token).await
    }

    /// Speech recognition on base64 audio. `texts[0]` holds the transcript.
    pub async fn recognize_speech(
        &self,
        audio_base64: &str,
        source_language: &str,
        token: &str,
    ) -> Result<PipelineResult> {
        let task = PipelineTask::Asr {
            source_language: source_language.into(),
            service_id: self.config.services.asr.clone(),
        };
        let request =
            PipelineRequest::new(vec![task], PipelineInput::Audio(audio_base64.into()))?;
        self.run(&request, token).await
    }

    /// Speech synthesis. `audio_clips[0]` holds the decoded audio.
    pub async fn synthesize_speech(
        &self,
        text: &str,
        source_language: &str,
        gender: VoiceGender,
        token: &str,
    ) -> Result<PipelineResult> {
        let task = PipelineTask::Tts {
            source_language: source_language.into(),
            gender,
            service_id: None,
        };
        let request = PipelineRequest::new(vec![task], PipelineInput::Text(text.into()))?;
        self.run(&request, token).await
    }

    /// ASR, translation and TTS in one call.
    ///
    /// `texts` is `[transcript, translation]` and `audio_clips` holds the
    /// synthesized speech when that stage produced any. Missing stages
    /// leave gaps rather than failing the call.
    pub async fn speech_to_speech(
        &self,
        audio_base64: &str,
        source_language: &str,
        target_language: &str,
        gender: VoiceGender,
        token: &str,
    ) -> Result<PipelineResult> {
        let services = &self.config.services;
        let tasks = vec![
            PipelineTask::Asr {
                source_language: source_language.into(),
                service_id: services.asr.clone(),
            },
            PipelineTask::Translation {
                source_language: source_language.into(),
                target_language: target_language.into(),
                service_id: services.translation.clone(),
            },
            PipelineTask::Tts {
                source_language: target_language.into(),
                gender,
                service_id: Some(services.tts.clone()),
            },
        ];
        let request = PipelineRequest::new(tasks, PipelineInput::Audio(audio_base64.into()))?;
        self.run(&request, token).await
    }

    /// Pipeline discovery with a bearer token.
    pub async fn fetch_pipeline_metadata(
        &self,
        task_type: TaskType,
        source_language: &str,
        target_language: Option<&str>,
        token: &str,
    ) -> Result<PipelineMetadata> {
        let auth = MetadataAuth::Bearer(SecretString::new(token));
        self.fetch_pipeline_metadata_with(task_type, source_language, target_language, &auth)
            .await
    }

    /// Pipeline discovery with explicit credentials.
    ///
    /// A success body that is not a metadata object yields an empty record.
    pub async fn fetch_pipeline_metadata_with(
        &self,
        task_type: TaskType,
        source_language: &str,
        target_language: Option<&str>,
        auth: &MetadataAuth,
    ) -> Result<PipelineMetadata> {
        let headers = auth.headers()?;
        let query = MetadataQuery::new(task_type, source_language, target_language);
        debug!(
            task = %task_type,
            url = %self.config.endpoints.metadata_url,
            "fetching pipeline metadata"
        );

        let body = self
            .post_json(&self.config.endpoints.metadata_url, &query, headers)
            .await?;

        Ok(serde_json::from_value(body).unwrap_or_else(|e| {
            warn!(error = %e, "metadata response has an unexpected shape");
            PipelineMetadata::default()
        }))
    }

    /// Post user feedback. Returns the acknowledgement body as sent by
    /// the service (`Null` when it was empty).
    pub async fn submit_feedback(&self, payload: &FeedbackPayload, token: &str) -> Result<Value> {
        let headers = bearer_headers(token)?;
        debug!(
            rating = payload.rating,
            topic = ?payload.api_used,
            "submitting feedback"
        );
        self.post_json(&self.config.endpoints.inference_url, payload, headers)
            .await
    }

    /// POST a JSON body and return the parsed JSON response.
    ///
    /// An unparseable success body is logged and returned as `Null`.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        headers: HeaderMap,
    ) -> Result<Value> {
        let response = self
            .http
            .post(url)
            .headers(headers)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            warn!(error = %e, %status, "response body could not be read");
            ApiError::Network(NO_RESPONSE_MESSAGE.into())
        })?;

        if !status.is_success() {
            warn!(%status, url, "pipeline request failed");
            return Err(ApiError::remote(status.as_u16(), &text));
        }

        debug!(%status, bytes = text.len(), "pipeline response received");

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!(error = %e, "success response is not JSON");
            Value::Null
        }))
    }
}

/// Map a `send()` failure to the local or network bucket.
fn classify_send_error(e: reqwest::Error) -> ApiError {
    if e.is_builder() {
        warn!(error = %e, "request could not be constructed");
        return ApiError::Local(e.to_string());
    }
    if e.is_timeout() {
        warn!(error = %e, "request timed out");
    } else {
        warn!(error = %e, "no response received");
    }
    ApiError::Network(NO_RESPONSE_MESSAGE.into())
}

impl std::fmt::Debug for PipelineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineClient")
            .field("inference_url", &self.config.endpoints.inference_url)
            .field("metadata_url", &self.config.endpoints.metadata_url)
            .field("timeout_secs", &self.config.endpoints.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_header_is_raw_token() {
        let headers = bearer_headers("tok-1").unwrap();
        assert_eq!(headers[reqwest::header::AUTHORIZATION], "tok-1");
        assert!(headers[reqwest::header::AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn control_characters_in_token_are_local_error() {
        let err = bearer_headers("bad\ntoken").unwrap_err();
        assert_eq!(err.status_code(), -1);
        assert!(matches!(err, ApiError::Local(_)));
    }

    #[test]
    fn ulca_headers_with_and_without_user() {
        let auth = MetadataAuth::Ulca {
            user_id: Some("user-7".into()),
            api_key: SecretString::new("ulca-key"),
        };
        let headers = auth.headers().unwrap();
        assert_eq!(headers["userID"], "user-7");
        assert_eq!(headers["ulcaApiKey"], "ulca-key");
        assert!(headers.get(reqwest::header::AUTHORIZATION).is_none());

        let auth = MetadataAuth::Ulca {
            user_id: None,
            api_key: SecretString::new("ulca-key"),
        };
        let headers = auth.headers().unwrap();
        assert!(headers.get("userID").is_none());
        assert_eq!(headers["ulcaApiKey"], "ulca-key");
    }

    #[test]
    fn ulca_requires_key() {
        let auth = MetadataAuth::Ulca {
            user_id: Some("u".into()),
            api_key: SecretString::default(),
        };
        assert!(auth.headers().unwrap_err().is_validation());
    }

    #[test]
    fn debug_shows_endpoints_only() {
        let client = PipelineClient::new(Config::default()).unwrap();
        let dbg = format!("{client:?}");
        assert!(dbg.contains("dhruva-api.bhashini.gov.in"));
        assert!(dbg.contains("timeout_secs: 30"));
    }

    #[tokio::test]
    async fn invalid_url_is_local_error() {
        let mut config = Config::default();
        config.endpoints.inference_url = "not a url".into();
        let client = PipelineClient::new(config).unwrap();

        let err = client.translate("hi", "en", "hi", "tok").await.unwrap_err();
        assert_eq!(err.status_code(), -1);
    }
}
