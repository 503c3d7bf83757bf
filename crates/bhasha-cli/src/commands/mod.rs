//! CLI command implementations for `bhasha`.
//!
//! - [`token`] -- credential store management.
//! - [`text`] -- translation and transliteration.
//! - [`speech`] -- ASR, TTS and speech-to-speech.
//! - [`questions`] -- pipeline discovery.
//! - [`feedback`] -- feedback submission.
//! - [`languages`] -- language table.
//! - [`config_cmd`] -- configuration display.

pub mod config_cmd;
pub mod feedback;
pub mod languages;
pub mod questions;
pub mod speech;
pub mod text;
pub mod token;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use bhasha_client::{BhashaService, CredentialStore};
use bhasha_platform::Platform;
use bhasha_platform::config_loader;
use bhasha_platform::storage::FileStorage;
use bhasha_types::config::Config;
use bhasha_types::language::find_language;

/// Load configuration from an explicit path or via discovery.
///
/// An explicit path must exist. Without one, `BHASHA_CONFIG` and then
/// `~/.bhasha/config.json` are tried, falling back to defaults.
pub async fn load_config<P: Platform>(
    platform: &P,
    config_override: Option<&str>,
) -> anyhow::Result<Config> {
    let raw = match config_override {
        Some(path_str) => {
            let path = Path::new(path_str);
            if !platform.fs().exists(path).await {
                anyhow::bail!("config file not found: {path_str}");
            }
            config_loader::load_config_file(platform.fs(), path).await?
        }
        None => config_loader::load_config_raw(platform.fs(), platform.env()).await?,
    };

    let config: Config = serde_json::from_value(raw).context("invalid configuration")?;
    config.validate()?;
    Ok(config)
}

/// Credential store persisted under `config.storage`.
pub fn open_credentials(config: &Config) -> Arc<CredentialStore> {
    let dir = config.storage.credential_path();
    tracing::debug!(dir = %dir.display(), "opening credential store");
    Arc::new(CredentialStore::load(FileStorage::new(dir)))
}

/// Service wired to the persisted credential store.
pub fn build_service(config: Config) -> anyhow::Result<BhashaService> {
    let creds = open_credentials(&config);
    Ok(BhashaService::from_config(config, creds)?)
}

/// Normalize a language code, warning when it is outside the curated list.
pub fn language_code(code: &str) -> String {
    let code = code.trim().to_ascii_lowercase();
    if find_language(&code).is_none() {
        tracing::warn!(code = %code, "language is not in the supported list, sending as-is");
    }
    code
}

/// Text from the positional argument, or stdin when absent or `-`.
pub fn text_or_stdin(arg: Option<String>) -> anyhow::Result<String> {
    match arg {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read text from stdin")?;
            Ok(buf.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhasha_platform::NativePlatform;

    #[tokio::test]
    async fn explicit_missing_config_is_error() {
        let platform = NativePlatform::new();
        let err = load_config(&platform, Some("/tmp/.bhasha-test-missing-config.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[tokio::test]
    async fn explicit_config_is_loaded_and_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"endpoints":{"timeoutSecs":12}}"#).unwrap();

        let platform = NativePlatform::new();
        let config = load_config(&platform, path.to_str()).await.unwrap();
        assert_eq!(config.endpoints.timeout_secs, 12);

        std::fs::write(&path, r#"{"endpoints":{"timeoutSecs":0}}"#).unwrap();
        assert!(load_config(&platform, path.to_str()).await.is_err());
    }

    #[test]
    fn language_codes_are_lowercased() {
        assert_eq!(language_code(" HI "), "hi");
        assert_eq!(language_code("fr"), "fr");
    }

    #[test]
    fn explicit_text_is_used_verbatim() {
        assert_eq!(text_or_stdin(Some(" hello ".into())).unwrap(), " hello ");
    }
}
