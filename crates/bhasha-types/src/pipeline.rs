//! Pipeline tasks, inputs and requests.
//!
//! A [`PipelineRequest`] is an ordered chain of one to three
//! [`PipelineTask`]s applied to a single [`PipelineInput`]. Each task
//! consumes the output of the previous one, so the chain is checked for
//! modality agreement when the request is built.
//!
//! Serializing a request produces the exact body the inference endpoint
//! expects:
//!
//! ```json
//! {
//!   "pipelineTasks": [
//!     { "taskType": "translation",
//!       "config": { "language": { "sourceLanguage": "en", "targetLanguage": "hi" },
//!                   "serviceId": "ai4bharat/indictrans-v2-all-gpu--t4" } }
//!   ],
//!   "inputData": { "input": [ { "source": "Hello" } ] }
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::ApiError;

/// Maximum number of tasks the remote pipeline accepts in one request.
pub const MAX_TASKS: usize = 3;

/// The kind of work a pipeline stage performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Translation,
    Transliteration,
    Asr,
    Tts,
}

impl TaskType {
    /// Wire name of the task.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Translation => "translation",
            TaskType::Transliteration => "transliteration",
            TaskType::Asr => "asr",
            TaskType::Tts => "tts",
        }
    }

    /// What the task reads.
    pub fn input_modality(&self) -> Modality {
        match self {
            TaskType::Asr => Modality::Audio,
            _ => Modality::Text,
        }
    }

    /// What the task produces.
    pub fn output_modality(&self) -> Modality {
        match self {
            TaskType::Tts => Modality::Audio,
            _ => Modality::Text,
        }
    }

    /// Whether the language config carries a target language.
    pub fn needs_target_language(&self) -> bool {
        matches!(self, TaskType::Translation | TaskType::Transliteration)
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "translation" => Ok(TaskType::Translation),
            "transliteration" => Ok(TaskType::Transliteration),
            "asr" => Ok(TaskType::Asr),
            "tts" => Ok(TaskType::Tts),
            other => Err(format!(
                "unknown task type '{other}' (expected translation, transliteration, asr or tts)"
            )),
        }
    }
}

/// Text or audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Text,
    Audio,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::Text => f.write_str("text"),
            Modality::Audio => f.write_str("audio"),
        }
    }
}

/// Voice used for speech synthesis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    #[default]
    Female,
    Male,
}

impl VoiceGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceGender::Female => "female",
            VoiceGender::Male => "male",
        }
    }
}

impl fmt::Display for VoiceGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoiceGender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" => Ok(VoiceGender::Female),
            "male" => Ok(VoiceGender::Male),
            other => Err(format!("unknown voice '{other}' (expected female or male)")),
        }
    }
}

/// The `language` block of a task config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageConfig {
    pub source_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
}

impl LanguageConfig {
    pub fn source(source: impl Into<String>) -> Self {
        Self {
            source_language: source.into(),
            target_language: None,
        }
    }

    pub fn pair(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source_language: source.into(),
            target_language: Some(target.into()),
        }
    }
}

/// One stage of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineTask {
    Translation {
        source_language: String,
        target_language: String,
        service_id: String,
    },
    Transliteration {
        source_language: String,
        target_language: String,
    },
    Asr {
        source_language: String,
        service_id: String,
    },
    Tts {
        source_language: String,
        gender: VoiceGender,
        /// Standalone synthesis lets the service pick a model.
        service_id: Option<String>,
    },
}

impl PipelineTask {
    pub fn task_type(&self) -> TaskType {
        match self {
            PipelineTask::Translation { .. } => TaskType::Translation,
            PipelineTask::Transliteration { .. } => TaskType::Transliteration,
            PipelineTask::Asr { .. } => TaskType::Asr,
            PipelineTask::Tts { .. } => TaskType::Tts,
        }
    }

    fn wire(&self) -> WireTask<'_> {
        let (language, service_id, gender) = match self {
            PipelineTask::Translation {
                source_language,
                target_language,
                service_id,
            } => (
                LanguageConfig::pair(source_language, target_language),
                Some(service_id.as_str()),
                None,
            ),
            PipelineTask::Transliteration {
                source_language,
                target_language,
            } => (
                LanguageConfig::pair(source_language, target_language),
                None,
                None,
            ),
            PipelineTask::Asr {
                source_language,
                service_id,
            } => (
                LanguageConfig::source(source_language),
                Some(service_id.as_str()),
                None,
            ),
            PipelineTask::Tts {
                source_language,
                gender,
                service_id,
            } => (
                LanguageConfig::source(source_language),
                service_id.as_deref(),
                Some(*gender),
            ),
        };

        WireTask {
            task_type: self.task_type(),
            config: WireTaskConfig {
                language,
                service_id,
                gender,
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTask<'a> {
    task_type: TaskType,
    config: WireTaskConfig<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTaskConfig<'a> {
    language: LanguageConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    service_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gender: Option<VoiceGender>,
}

impl Serialize for PipelineTask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.wire().serialize(serializer)
    }
}

/// The payload fed to the first task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineInput {
    /// UTF-8 source text.
    Text(String),
    /// Base64-encoded audio bytes.
    Audio(String),
}

impl PipelineInput {
    pub fn modality(&self) -> Modality {
        match self {
            PipelineInput::Text(_) => Modality::Text,
            PipelineInput::Audio(_) => Modality::Audio,
        }
    }
}

#[derive(Serialize)]
struct SourceItem<'a> {
    source: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioItem<'a> {
    audio_content: &'a str,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WireInput<'a> {
    Text { input: [SourceItem<'a>; 1] },
    Audio { audio: [AudioItem<'a>; 1] },
}

impl Serialize for PipelineInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            PipelineInput::Text(text) => WireInput::Text {
                input: [SourceItem { source: text }],
            },
            PipelineInput::Audio(audio) => WireInput::Audio {
                audio: [AudioItem {
                    audio_content: audio,
                }],
            },
        };
        wire.serialize(serializer)
    }
}

/// A validated chain of tasks plus its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRequest {
    pipeline_tasks: Vec<PipelineTask>,
    input_data: PipelineInput,
}

impl PipelineRequest {
    /// Build a request, checking task count and modality chaining.
    ///
    /// Every task must read what the previous stage produces (the input
    /// itself, for the first task), so ASR can only consume audio and
    /// nothing but ASR can follow TTS.
    pub fn new(tasks: Vec<PipelineTask>, input: PipelineInput) -> Result<Self, ApiError> {
        if tasks.is_empty() {
            return Err(ApiError::Validation(
                "a pipeline needs at least one task".into(),
            ));
        }
        if tasks.len() > MAX_TASKS {
            return Err(ApiError::Validation(format!(
                "a pipeline accepts at most {MAX_TASKS} tasks, got {}",
                tasks.len()
            )));
        }

        let mut current = input.modality();
        for (idx, task) in tasks.iter().enumerate() {
            let kind = task.task_type();
            if kind.input_modality() != current {
                return Err(ApiError::Validation(format!(
                    "task {} ({kind}) expects {} input but receives {current}",
                    idx + 1,
                    kind.input_modality()
                )));
            }
            current = kind.output_modality();
        }

        Ok(Self {
            pipeline_tasks: tasks,
            input_data: input,
        })
    }

    pub fn tasks(&self) -> &[PipelineTask] {
        &self.pipeline_tasks
    }

    pub fn task_types(&self) -> Vec<TaskType> {
        self.pipeline_tasks.iter().map(PipelineTask::task_type).collect()
    }

    pub fn input(&self) -> &PipelineInput {
        &self.input_data
    }
}
