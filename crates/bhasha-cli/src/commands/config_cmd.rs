//! `bhasha config` -- display resolved configuration.
//!
//! # Examples
//!
//! ```text
//! bhasha config show
//! bhasha config path
//! ```

use bhasha_platform::Platform;
use bhasha_platform::config_loader::discover_config_path;
use bhasha_types::config::Config;

/// Print the resolved configuration as JSON. Secret values serialize empty.
pub fn config_show(config: &Config) {
    match serde_json::to_string_pretty(config) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("error: failed to serialize config: {e}"),
    }
}

/// Print the config file in use and the credential directory.
pub fn config_path<P: Platform>(platform: &P, config_override: Option<&str>, config: &Config) {
    let source = match config_override {
        Some(path) => path.to_string(),
        None => discover_config_path(platform.env(), platform.fs().home_dir())
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none, using defaults)".into()),
    };
    println!("Config file:     {source}");
    println!(
        "Credential dir:  {}",
        config.storage.credential_path().display()
    );
}
