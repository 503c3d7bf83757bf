//! `bhasha asr` / `bhasha tts` / `bhasha s2s` -- speech pipelines.
//!
//! Audio moves through files: recordings are read from disk and base64
//! encoded for transport, synthesized audio is decoded and written out.
//!
//! # Examples
//!
//! ```text
//! bhasha asr recording.wav --lang hi
//! bhasha tts "नमस्ते" --lang hi --voice male -o greeting.wav
//! bhasha s2s question.wav --from en --to ta -o answer.wav
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use bhasha_client::audio::encode_audio;
use bhasha_platform::Platform;
use bhasha_types::VoiceGender;
use bhasha_types::config::Config;
use bhasha_types::result::NO_USABLE_OUTPUT;

use super::{build_service, language_code, text_or_stdin};

#[derive(Args)]
pub struct AsrArgs {
    /// Audio file to transcribe.
    pub audio: PathBuf,

    /// Spoken language code.
    #[arg(short, long, default_value = "hi")]
    pub lang: String,
}

#[derive(Args)]
pub struct TtsArgs {
    /// Text to speak (read from stdin when omitted or `-`).
    pub text: Option<String>,

    /// Language code of the text.
    #[arg(short, long, default_value = "hi")]
    pub lang: String,

    /// Voice: female or male.
    #[arg(long, default_value = "female")]
    pub voice: VoiceGender,

    /// Output WAV file.
    #[arg(short, long, default_value = "speech.wav")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct S2sArgs {
    /// Audio file with the source speech.
    pub audio: PathBuf,

    /// Spoken language code.
    #[arg(short = 'f', long = "from", default_value = "en")]
    pub source: String,

    /// Language to speak the translation in.
    #[arg(short = 't', long = "to", default_value = "hi")]
    pub target: String,

    /// Voice: female or male.
    #[arg(long, default_value = "female")]
    pub voice: VoiceGender,

    /// Output WAV file.
    #[arg(short, long, default_value = "translated_speech.wav")]
    pub output: PathBuf,
}

async fn read_audio<P: Platform>(platform: &P, path: &Path) -> anyhow::Result<String> {
    let bytes = platform
        .fs()
        .read_bytes(path)
        .await
        .with_context(|| format!("failed to read audio file {}", path.display()))?;
    Ok(encode_audio(&bytes))
}

async fn write_audio<P: Platform>(platform: &P, path: &Path, audio: &[u8]) -> anyhow::Result<()> {
    platform
        .fs()
        .write_bytes(path, audio)
        .await
        .with_context(|| format!("failed to write audio file {}", path.display()))?;
    println!("Saved {} bytes of audio to {}", audio.len(), path.display());
    Ok(())
}

pub async fn asr<P: Platform>(args: AsrArgs, platform: &P, config: Config) -> anyhow::Result<()> {
    let audio = read_audio(platform, &args.audio).await?;
    let service = build_service(config)?;

    let transcript = service
        .recognize_speech(&audio, &language_code(&args.lang))
        .await
        .context("speech recognition failed")?;

    if transcript.is_empty() {
        eprintln!("{NO_USABLE_OUTPUT}");
    } else {
        println!("{transcript}");
    }
    Ok(())
}

pub async fn tts<P: Platform>(args: TtsArgs, platform: &P, config: Config) -> anyhow::Result<()> {
    let text = text_or_stdin(args.text)?;
    let service = build_service(config)?;

    let audio = service
        .synthesize_speech(&text, &language_code(&args.lang), args.voice)
        .await
        .context("speech synthesis failed")?;

    match audio {
        Some(bytes) => write_audio(platform, &args.output, &bytes).await,
        None => {
            eprintln!("{NO_USABLE_OUTPUT}");
            Ok(())
        }
    }
}

pub async fn s2s<P: Platform>(args: S2sArgs, platform: &P, config: Config) -> anyhow::Result<()> {
    let audio = read_audio(platform, &args.audio).await?;
    let service = build_service(config)?;

    let out = service
        .speech_to_speech(
            &audio,
            &language_code(&args.source),
            &language_code(&args.target),
            args.voice,
        )
        .await
        .context("speech-to-speech failed")?;

    let show = |label: &str, value: &str| {
        if value.is_empty() {
            println!("{label}: (none)");
        } else {
            println!("{label}: {value}");
        }
    };
    show("Recognized", &out.transcript);
    show("Translated", &out.translation);

    match out.audio {
        Some(bytes) => write_audio(platform, &args.output, &bytes).await,
        None => {
            eprintln!("No synthesized audio in the response");
            Ok(())
        }
    }
}
