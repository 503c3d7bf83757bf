//! Normalized pipeline output.

/// Message reported when a response parsed but none of the known shapes
/// yielded anything for the requested tasks.
pub const NO_USABLE_OUTPUT: &str = "No usable output found in the pipeline response";

/// What a pipeline call produced, independent of the response shape.
///
/// `texts` holds one entry per text-producing task, in task order, with an
/// empty string where the stage returned nothing. `audio_clips` holds the
/// decoded bytes of every audio clip that was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineResult {
    pub texts: Vec<String>,
    pub audio_clips: Vec<Vec<u8>>,
}

impl PipelineResult {
    /// True when no text and no audio was extracted.
    pub fn is_empty(&self) -> bool {
        self.texts.iter().all(String::is_empty) && self.audio_clips.is_empty()
    }

    /// Text of the `idx`-th text-producing task, if non-empty.
    pub fn text(&self, idx: usize) -> Option<&str> {
        self.texts
            .get(idx)
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }
}
