//! Response normalization.
//!
//! The inference service has been observed to return logically identical
//! results in differently shaped bodies. Each result field therefore has
//! an ordered table of probes; the first probe yielding a non-empty value
//! wins. Supporting a newly observed shape means appending a row.
//!
//! Probes are positional: for a multi-task pipeline, position `i` of
//! `pipelineResponse` holds the output of task `i`. Shapes without a
//! `pipelineResponse` wrapper only ever describe a single task, so they
//! are only consulted at position 0.

use serde_json::Value;
use tracing::{trace, warn};

use bhasha_types::result::NO_USABLE_OUTPUT;
use bhasha_types::{PipelineResult, TaskType};

use crate::audio::decode_audio;

/// A text probe: `(body, position, output field)` to an optional string.
type TextProbe = for<'a> fn(&'a Value, usize, &str) -> Option<&'a str>;

/// An audio probe: `(body, position)` to an optional base64 string.
type AudioProbe = for<'a> fn(&'a Value, usize) -> Option<&'a str>;

const TEXT_PROBES: &[(&str, TextProbe)] = &[
    ("pipelineResponse[i].output[0].<field>", staged_output_field),
    ("output[0].<field>", root_output_field),
    ("output[0].text", root_output_text),
    ("data.output", data_output),
    ("data.text", data_text),
];

const AUDIO_PROBES: &[(&str, AudioProbe)] = &[
    ("pipelineResponse[i].audio[0].audioContent", staged_audio),
    ("pipelineResponse[i].output[0].audioContent", staged_output_audio),
    ("pipelineResponse[i].audioContent", staged_audio_content),
    ("audio[0].audioContent", root_audio),
];

fn staged_output_field<'a>(body: &'a Value, pos: usize, field: &str) -> Option<&'a str> {
    stage(body, pos)?.get("output")?.get(0)?.get(field)?.as_str()
}

fn root_output_field<'a>(body: &'a Value, pos: usize, field: &str) -> Option<&'a str> {
    first_only(pos)?;
    body.get("output")?.get(0)?.get(field)?.as_str()
}

fn root_output_text<'a>(body: &'a Value, pos: usize, _field: &str) -> Option<&'a str> {
    first_only(pos)?;
    body.get("output")?.get(0)?.get("text")?.as_str()
}

fn data_output<'a>(body: &'a Value, pos: usize, _field: &str) -> Option<&'a str> {
    first_only(pos)?;
    body.get("data")?.get("output")?.as_str()
}

fn data_text<'a>(body: &'a Value, pos: usize, _field: &str) -> Option<&'a str> {
    first_only(pos)?;
    body.get("data")?.get("text")?.as_str()
}

fn staged_audio(body: &Value, pos: usize) -> Option<&str> {
    stage(body, pos)?.get("audio")?.get(0)?.get("audioContent")?.as_str()
}

fn staged_output_audio(body: &Value, pos: usize) -> Option<&str> {
    stage(body, pos)?.get("output")?.get(0)?.get("audioContent")?.as_str()
}

fn staged_audio_content(body: &Value, pos: usize) -> Option<&str> {
    stage(body, pos)?.get("audioContent")?.as_str()
}

fn root_audio(body: &Value, pos: usize) -> Option<&str> {
    first_only(pos)?;
    body.get("audio")?.get(0)?.get("audioContent")?.as_str()
}

fn stage(body: &Value, pos: usize) -> Option<&Value> {
    body.get("pipelineResponse")?.get(pos)
}

fn first_only(pos: usize) -> Option<()> {
    (pos == 0).then_some(())
}

/// Output field carrying the text a task produces.
fn text_field(task: TaskType) -> Option<&'static str> {
    match task {
        TaskType::Asr => Some("source"),
        TaskType::Translation | TaskType::Transliteration => Some("target"),
        TaskType::Tts => None,
    }
}

/// Text produced by the task at `pos`, if any probe finds some.
pub fn extract_text(body: &Value, pos: usize, field: &str) -> Option<String> {
    TEXT_PROBES.iter().find_map(|(shape, probe)| {
        let hit = probe(body, pos, field).filter(|s| !s.is_empty())?;
        trace!(shape, pos, "text matched");
        Some(hit.to_string())
    })
}

/// Decoded audio produced by the task at `pos`.
///
/// A value that is not valid base64 is logged and skipped, and the next
/// probe is tried.
pub fn extract_audio(body: &Value, pos: usize) -> Option<Vec<u8>> {
    AUDIO_PROBES.iter().find_map(|(shape, probe)| {
        let encoded = probe(body, pos).filter(|s| !s.trim().is_empty())?;
        match decode_audio(encoded) {
            Ok(bytes) if !bytes.is_empty() => {
                trace!(shape, pos, bytes = bytes.len(), "audio matched");
                Some(bytes)
            }
            Ok(_) => None,
            Err(e) => {
                warn!(shape, pos, error = %e, "undecodable audio content, skipping");
                None
            }
        }
    })
}

/// Normalize a response body for the given task chain.
///
/// Never fails: a body matching no known shape yields an empty result.
pub fn normalize(tasks: &[TaskType], body: &Value) -> PipelineResult {
    let mut result = PipelineResult::default();

    for (pos, task) in tasks.iter().enumerate() {
        match text_field(*task) {
            Some(field) => {
                result
                    .texts
                    .push(extract_text(body, pos, field).unwrap_or_default());
            }
            None => {
                if let Some(clip) = extract_audio(body, pos) {
                    result.audio_clips.push(clip);
                }
            }
        }
    }

    if result.is_empty() {
        warn!(tasks = tasks.len(), "{}", NO_USABLE_OUTPUT);
    }
    result
}
