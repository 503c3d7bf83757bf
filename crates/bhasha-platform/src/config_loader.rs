//! Configuration file discovery and loading.
//!
//! Discovery order:
//! 1. `BHASHA_CONFIG` environment variable (path to a JSON file).
//! 2. `~/.bhasha/config.json`
//! 3. Nothing found: an empty JSON object, i.e. all defaults.
//!
//! Keys are normalized from camelCase to snake_case before returning.

use std::path::PathBuf;

use bhasha_types::ConfigError;
use serde_json::Value;

use crate::env::Environment;
use crate::fs::FileSystem;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "BHASHA_CONFIG";

/// Find the config file to load, if any.
///
/// An explicit `BHASHA_CONFIG` path is returned as-is; the home-directory
/// candidate is only returned when it exists.
pub fn discover_config_path(env: &dyn Environment, home_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = env.get_var(CONFIG_ENV_VAR).filter(|p| !p.trim().is_empty()) {
        return Some(PathBuf::from(path));
    }

    let candidate = home_dir?.join(".bhasha").join("config.json");
    candidate.exists().then_some(candidate)
}

/// Load the raw, key-normalized config JSON.
///
/// A discovered path that does not exist is logged and treated as "no
/// config". Read and parse failures are errors.
pub async fn load_config_raw(
    fs: &dyn FileSystem,
    env: &dyn Environment,
) -> Result<Value, ConfigError> {
    let Some(path) = discover_config_path(env, fs.home_dir()) else {
        tracing::debug!("no config file found, using defaults");
        return Ok(Value::Object(serde_json::Map::new()));
    };

    load_config_file(fs, &path).await
}

/// Load and normalize a specific config file.
pub async fn load_config_file(
    fs: &dyn FileSystem,
    path: &std::path::Path,
) -> Result<Value, ConfigError> {
    if !fs.exists(path).await {
        tracing::warn!(path = %path.display(), "config path does not exist, using defaults");
        return Ok(Value::Object(serde_json::Map::new()));
    }

    tracing::debug!(path = %path.display(), "loading config file");
    let contents = fs
        .read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

    let value: Value = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    Ok(normalize_keys(value))
}

/// Convert camelCase object keys to snake_case, recursively.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (camel_to_snake(&k), normalize_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

/// Convert one camelCase identifier to snake_case.
///
/// Acronym runs stay together: `userID` becomes `user_id` and
/// `pipelineAPIEndpoint` becomes `pipeline_api_endpoint`.
///
/// ```
/// # use bhasha_platform::config_loader::camel_to_snake;
/// assert_eq!(camel_to_snake("inferenceUrl"), "inference_url");
/// assert_eq!(camel_to_snake("userID"), "user_id");
/// assert_eq!(camel_to_snake("credential_dir"), "credential_dir");
/// ```
pub fn camel_to_snake(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.extend(ch.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    use crate::fs::NativeFileSystem;

    struct MockEnv {
        vars: HashMap<String, String>,
    }

    impl MockEnv {
        fn new() -> Self {
            Self {
                vars: HashMap::new(),
            }
        }

        fn with_var(mut self, key: &str, value: &str) -> Self {
            self.vars.insert(key.into(), value.into());
            self
        }
    }

    impl Environment for MockEnv {
        fn get_var(&self, name: &str) -> Option<String> {
            self.vars.get(name).cloned()
        }
    }

    #[test]
    fn camel_to_snake_cases() {
        assert_eq!(camel_to_snake("timeoutSecs"), "timeout_secs");
        assert_eq!(camel_to_snake("ulcaApiKey"), "ulca_api_key");
        assert_eq!(camel_to_snake("userID"), "user_id");
        assert_eq!(camel_to_snake("pipelineAPIEndpoint"), "pipeline_api_endpoint");
        assert_eq!(camel_to_snake("asr"), "asr");
        assert_eq!(camel_to_snake(""), "");
    }

    #[test]
    fn normalize_nested_keys() {
        let input = json!({
            "endpoints": {"inferenceUrl": "http://x", "timeoutSecs": 3},
            "metadataAuth": {"userID": "u"},
            "list": [{"credentialDir": "/tmp"}]
        });
        assert_eq!(
            normalize_keys(input),
            json!({
                "endpoints": {"inference_url": "http://x", "timeout_secs": 3},
                "metadata_auth": {"user_id": "u"},
                "list": [{"credential_dir": "/tmp"}]
            })
        );
    }

    #[test]
    fn env_var_takes_precedence() {
        let env = MockEnv::new().with_var(CONFIG_ENV_VAR, "/etc/bhasha.json");
        let found = discover_config_path(&env, Some(PathBuf::from("/home/someone")));
        assert_eq!(found, Some(PathBuf::from("/etc/bhasha.json")));
    }

    #[test]
    fn home_candidate_only_when_present() {
        let home = tempfile::tempdir().unwrap();
        let env = MockEnv::new();
        assert_eq!(discover_config_path(&env, Some(home.path().into())), None);

        let cfg_dir = home.path().join(".bhasha");
        std::fs::create_dir_all(&cfg_dir).unwrap();
        std::fs::write(cfg_dir.join("config.json"), "{}").unwrap();
        assert_eq!(
            discover_config_path(&env, Some(home.path().into())),
            Some(cfg_dir.join("config.json"))
        );
    }

    #[test]
    fn no_home_no_env() {
        assert_eq!(discover_config_path(&MockEnv::new(), None), None);
    }

    #[tokio::test]
    async fn load_explicit_file_normalizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{"endpoints":{"timeoutSecs":7}}"#).unwrap();

        let env = MockEnv::new().with_var(CONFIG_ENV_VAR, path.to_str().unwrap());
        let value = load_config_raw(&NativeFileSystem, &env).await.unwrap();
        assert_eq!(value, json!({"endpoints": {"timeout_secs": 7}}));
    }

    #[tokio::test]
    async fn missing_explicit_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let value = load_config_file(&NativeFileSystem, &path).await.unwrap();
        assert_eq!(value, json!({}));
    }

    #[tokio::test]
    async fn invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_config_file(&NativeFileSystem, &path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
