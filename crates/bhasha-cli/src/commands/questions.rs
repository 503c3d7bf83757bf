//! `bhasha questions` -- ask the discovery endpoint about a pipeline.
//!
//! # Examples
//!
//! ```text
//! bhasha questions --task translation --from en --to hi
//! bhasha questions --task asr --from ta --json
//! bhasha questions --task tts --from hi --legacy
//! ```

use anyhow::Context;
use clap::Args;

use bhasha_types::TaskType;
use bhasha_types::config::Config;

use super::{build_service, language_code};

#[derive(Args)]
pub struct QuestionsArgs {
    /// Task type: translation, transliteration, asr or tts.
    #[arg(long, default_value = "translation")]
    pub task: TaskType,

    /// Source language code.
    #[arg(short = 'f', long = "from", default_value = "en")]
    pub source: String,

    /// Target language code (translation and transliteration only).
    #[arg(short = 't', long = "to", default_value = "hi")]
    pub target: String,

    /// Authenticate with the ULCA credentials from config instead of the token.
    #[arg(long)]
    pub legacy: bool,

    /// Print the raw metadata record instead of the questions.
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: QuestionsArgs, config: Config) -> anyhow::Result<()> {
    let service = build_service(config)?;
    let source = language_code(&args.source);
    let target = language_code(&args.target);
    let target = args.task.needs_target_language().then_some(target.as_str());

    let metadata = if args.legacy {
        service
            .fetch_pipeline_metadata_legacy(args.task, &source, target)
            .await
    } else {
        service
            .fetch_pipeline_metadata(args.task, &source, target)
            .await
    }
    .context("metadata request failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
        return Ok(());
    }

    let Some(questions) = metadata.questions() else {
        anyhow::bail!("Failed to retrieve pipeline questions");
    };

    for (idx, q) in questions.iter().enumerate() {
        println!("{}. {}", idx + 1, q.question);
        for line in q.answer.lines() {
            println!("   {line}");
        }
        println!();
    }
    Ok(())
}
