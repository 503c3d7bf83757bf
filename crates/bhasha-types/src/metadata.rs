//! Pipeline discovery: the metadata query and its (loosely typed) answer.
//!
//! The metadata endpoint describes which languages and service models a
//! pipeline supports and where to send inference calls. Only the fields
//! this crate reads are typed; everything else is kept in `extra`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::DEFAULT_INFERENCE_URL;
use crate::language::language_names;
use crate::pipeline::{LanguageConfig, TaskType};
use crate::secret::SecretString;

/// Body sent to the metadata endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataQuery {
    pipeline_tasks: Vec<MetadataTask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct MetadataTask {
    task_type: TaskType,
    config: MetadataTaskConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct MetadataTaskConfig {
    language: LanguageConfig,
}

impl MetadataQuery {
    /// Query for a single task. The target language is only sent for
    /// translation and transliteration.
    pub fn new(task_type: TaskType, source_language: &str, target_language: Option<&str>) -> Self {
        let language = match target_language {
            Some(target) if task_type.needs_target_language() => {
                LanguageConfig::pair(source_language, target)
            }
            _ => LanguageConfig::source(source_language),
        };
        Self {
            pipeline_tasks: vec![MetadataTask {
                task_type,
                config: MetadataTaskConfig { language },
            }],
        }
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The `inferenceApiKey` block: header name plus value to call inference with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceApiKey {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: SecretString,
}

/// The `pipelineInferenceAPIEndPoint` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceEndpoint {
    #[serde(default)]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub inference_api_key: Option<InferenceApiKey>,
    #[serde(default)]
    pub schema: Option<Value>,
    #[serde(default)]
    pub is_multilingual_enabled: Option<bool>,
    #[serde(default)]
    pub is_sync_api: Option<bool>,
}

/// Metadata record returned by the discovery endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pipeline_response_config: Vec<Value>,
    #[serde(default)]
    pub feedback_url: Option<String>,
    #[serde(default, rename = "pipelineInferenceAPIEndPoint")]
    pub inference_endpoint: Option<InferenceEndpoint>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// What a [`PipelineQuestion`] answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Endpoint,
    Authorization,
    Languages,
    TaskConfig,
}

/// A question/answer pair derived from metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineQuestion {
    pub kind: QuestionKind,
    pub question: &'static str,
    pub answer: String,
}

impl PipelineMetadata {
    /// Language codes listed in the record.
    ///
    /// Entries may be plain strings or objects with a `sourceLanguage`
    /// field; anything else is skipped.
    pub fn language_codes(&self) -> Vec<String> {
        self.languages
            .iter()
            .filter_map(|entry| match entry {
                Value::String(code) => Some(code.clone()),
                Value::Object(obj) => obj
                    .get("sourceLanguage")
                    .and_then(Value::as_str)
                    .map(String::from),
                _ => None,
            })
            .collect()
    }

    /// Service ids offered under `pipelineResponseConfig[*].config[*].serviceId`.
    pub fn service_ids(&self) -> Vec<String> {
        self.pipeline_response_config
            .iter()
            .filter_map(|task| task.get("config").and_then(Value::as_array))
            .flatten()
            .filter_map(|cfg| cfg.get("serviceId").and_then(Value::as_str))
            .map(String::from)
            .collect()
    }

    /// The four standard questions about this pipeline.
    ///
    /// Returns `None` when the record has no inference endpoint block,
    /// since nothing meaningful can be said about it. The endpoint answer
    /// is `callbackUrl` rather than the `inferenceApiKey` value, so the
    /// key never ends up on screen.
    pub fn questions(&self) -> Option<Vec<PipelineQuestion>> {
        let endpoint = self.inference_endpoint.as_ref()?;

        let url = endpoint
            .callback_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(DEFAULT_INFERENCE_URL)
            .to_string();

        let codes = self.language_codes();
        let languages = if codes.is_empty() {
            format!("{} and more", language_names())
        } else {
            codes.join(", ")
        };

        let schema = endpoint
            .schema
            .clone()
            .unwrap_or_else(|| Value::Object(Default::default()));
        let schema = serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".into());

        Some(vec![
            PipelineQuestion {
                kind: QuestionKind::Endpoint,
                question: "What is the pipeline inference API endpoint?",
                answer: url,
            },
            PipelineQuestion {
                kind: QuestionKind::Authorization,
                question: "What is the authorization method?",
                answer: "Bearer Token in Authorization header".into(),
            },
            PipelineQuestion {
                kind: QuestionKind::Languages,
                question: "What are the supported languages?",
                answer: languages,
            },
            PipelineQuestion {
                kind: QuestionKind::TaskConfig,
                question: "What is the task configuration?",
                answer: schema,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_includes_target_for_translation() {
        let q = MetadataQuery::new(TaskType::Translation, "en", Some("hi"));
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({"pipelineTasks": [{
                "taskType": "translation",
                "config": {"language": {"sourceLanguage": "en", "targetLanguage": "hi"}}
            }]})
        );
    }

    #[test]
    fn query_drops_target_for_asr() {
        let q = MetadataQuery::new(TaskType::Asr, "hi", Some("en"));
        let v = serde_json::to_value(&q).unwrap();
        assert_eq!(
            v["pipelineTasks"][0]["config"]["language"],
            json!({"sourceLanguage": "hi"})
        );
    }

    #[test]
    fn parses_realistic_record() {
        let meta: PipelineMetadata = serde_json::from_value(json!({
            "languages": [{"sourceLanguage": "hi", "targetLanguageList": ["en"]}, "ta"],
            "pipelineResponseConfig": [{
                "taskType": "asr",
                "config": [{"serviceId": "ai4bharat/conformer-hi-gpu--t4"}]
            }],
            "feedbackUrl": "https://example.invalid/feedback",
            "pipelineInferenceAPIEndPoint": {
                "callbackUrl": "https://dhruva.example/pipeline",
                "inferenceApiKey": {"name": "Authorization", "value": "k-123"},
                "isMultilingualEnabled": true,
                "isSyncApi": true
            },
            "unexpected": 1
        }))
        .unwrap();

        assert_eq!(meta.language_codes(), vec!["hi", "ta"]);
        assert_eq!(meta.service_ids(), vec!["ai4bharat/conformer-hi-gpu--t4"]);
        let key = meta
            .inference_endpoint
            .as_ref()
            .and_then(|e| e.inference_api_key.as_ref())
            .unwrap();
        assert_eq!(key.value.expose(), "k-123");
        assert_eq!(meta.extra.get("unexpected"), Some(&json!(1)));
    }

    #[test]
    fn null_fields_keep_the_record() {
        let meta: PipelineMetadata = serde_json::from_value(json!({
            "languages": null,
            "pipelineResponseConfig": null,
            "feedbackUrl": null,
            "pipelineInferenceAPIEndPoint": {
                "callbackUrl": "https://x/cb",
                "inferenceApiKey": {"name": null, "value": null},
                "schema": null
            }
        }))
        .unwrap();

        assert!(meta.languages.is_empty());
        assert!(meta.service_ids().is_empty());
        let key = meta
            .inference_endpoint
            .as_ref()
            .and_then(|e| e.inference_api_key.as_ref())
            .unwrap();
        assert!(key.value.is_empty());

        let qs = meta.questions().unwrap();
        assert_eq!(qs[0].answer, "https://x/cb");
        assert!(qs[2].answer.ends_with("and more"));
        assert_eq!(qs[3].answer, "{}");
    }

    #[test]
    fn questions_none_without_endpoint_block() {
        let meta: PipelineMetadata = serde_json::from_value(json!({"languages": ["hi"]})).unwrap();
        assert!(meta.questions().is_none());
    }

    #[test]
    fn questions_fall_back_to_defaults() {
        let meta: PipelineMetadata =
            serde_json::from_value(json!({"pipelineInferenceAPIEndPoint": {}})).unwrap();
        let qs = meta.questions().unwrap();
        assert_eq!(qs.len(), 4);
        assert_eq!(qs[0].answer, DEFAULT_INFERENCE_URL);
        assert_eq!(qs[1].answer, "Bearer Token in Authorization header");
        assert!(qs[2].answer.ends_with("Punjabi and more"));
        assert_eq!(qs[3].answer, "{}");
    }

    #[test]
    fn questions_use_record_values() {
        let meta: PipelineMetadata = serde_json::from_value(json!({
            "languages": ["hi", "en"],
            "pipelineInferenceAPIEndPoint": {
                "callbackUrl": "https://dhruva.example/pipeline",
                "schema": {"modelProcessingType": {"type": "streaming"}}
            }
        }))
        .unwrap();
        let qs = meta.questions().unwrap();
        assert_eq!(qs[0].kind, QuestionKind::Endpoint);
        assert_eq!(qs[0].answer, "https://dhruva.example/pipeline");
        assert_eq!(qs[2].answer, "hi, en");
        assert!(qs[3].answer.contains("\"streaming\""));
        assert!(qs[3].answer.contains('\n'));
    }
}
