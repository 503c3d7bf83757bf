//! User feedback payloads.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const RATING_REQUIRED: &str = "Please provide a rating";
pub const FEEDBACK_REQUIRED: &str = "Please provide feedback text";

/// Which feature the feedback is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackTopic {
    Translation,
    Transliteration,
    Asr,
    Tts,
    SpeechToSpeech,
    PipelineQuestions,
    General,
}

impl FeedbackTopic {
    pub const ALL: [FeedbackTopic; 7] = [
        FeedbackTopic::Translation,
        FeedbackTopic::Transliteration,
        FeedbackTopic::Asr,
        FeedbackTopic::Tts,
        FeedbackTopic::SpeechToSpeech,
        FeedbackTopic::PipelineQuestions,
        FeedbackTopic::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackTopic::Translation => "translation",
            FeedbackTopic::Transliteration => "transliteration",
            FeedbackTopic::Asr => "asr",
            FeedbackTopic::Tts => "tts",
            FeedbackTopic::SpeechToSpeech => "speech-to-speech",
            FeedbackTopic::PipelineQuestions => "pipeline-questions",
            FeedbackTopic::General => "general",
        }
    }
}

impl fmt::Display for FeedbackTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackTopic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| format!("unknown feedback topic '{wanted}'"))
    }
}

/// Feedback as posted to the service.
///
/// Serialized field names are camelCase (`apiUsed`, `userAgent`);
/// `timestamp` is RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPayload {
    pub rating: u8,
    pub feedback: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_used: Option<FeedbackTopic>,
    pub timestamp: DateTime<Utc>,
    pub user_agent: String,
}

impl FeedbackPayload {
    /// Build a validated payload stamped with the current time.
    ///
    /// `rating` must be 1 to 5 and `feedback` must contain non-whitespace.
    pub fn new(rating: u8, feedback: impl Into<String>) -> Result<Self, ApiError> {
        let payload = Self {
            rating,
            feedback: feedback.into(),
            email: String::new(),
            api_used: None,
            timestamp: Utc::now(),
            user_agent: default_user_agent(),
        };
        payload.validate()?;
        Ok(payload)
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_topic(mut self, topic: FeedbackTopic) -> Self {
        self.api_used = Some(topic);
        self
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ApiError::Validation(RATING_REQUIRED.into()));
        }
        if self.feedback.trim().is_empty() {
            return Err(ApiError::Validation(FEEDBACK_REQUIRED.into()));
        }
        Ok(())
    }
}

/// `bhasha/<version>`.
pub fn default_user_agent() -> String {
    format!("bhasha/{}", env!("CARGO_PKG_VERSION"))
}
