//! `bhasha translate` / `bhasha transliterate` -- text pipelines.
//!
//! # Examples
//!
//! ```text
//! bhasha translate "Good morning" --from en --to hi
//! echo "namaste" | bhasha transliterate --from en --to hi
//! ```

use anyhow::Context;
use clap::Args;

use bhasha_types::config::Config;
use bhasha_types::result::NO_USABLE_OUTPUT;

use super::{build_service, language_code, text_or_stdin};

/// Arguments shared by the text commands.
#[derive(Args)]
pub struct TextArgs {
    /// Input text (read from stdin when omitted or `-`).
    pub text: Option<String>,

    /// Source language code.
    #[arg(short = 'f', long = "from", default_value = "en")]
    pub source: String,

    /// Target language code.
    #[arg(short = 't', long = "to", default_value = "hi")]
    pub target: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    Translate,
    Transliterate,
}

pub async fn run(mode: TextMode, args: TextArgs, config: Config) -> anyhow::Result<()> {
    let text = text_or_stdin(args.text)?;
    let source = language_code(&args.source);
    let target = language_code(&args.target);
    let service = build_service(config)?;

    let output = match mode {
        TextMode::Translate => service
            .translate(&text, &source, &target)
            .await
            .context("translation failed")?,
        TextMode::Transliterate => service
            .transliterate(&text, &source, &target)
            .await
            .context("transliteration failed")?,
    };

    if output.is_empty() {
        eprintln!("{NO_USABLE_OUTPUT}");
    } else {
        println!("{output}");
    }
    Ok(())
}
