//! `bhasha` -- command-line client for the Bhashini speech/text pipeline.
//!
//! Subcommands:
//!
//! - `bhasha token` -- set, show, clear or check the stored bearer token.
//! - `bhasha translate` / `bhasha transliterate` -- text pipelines.
//! - `bhasha asr` / `bhasha tts` / `bhasha s2s` -- speech pipelines.
//! - `bhasha questions` -- pipeline discovery.
//! - `bhasha feedback` -- send a rating and comment.
//! - `bhasha languages` -- list selectable languages.
//! - `bhasha config` -- show the resolved configuration.

use clap::{Parser, Subcommand};

use bhasha_platform::NativePlatform;

mod commands;

/// Bhashini speech and text pipeline CLI.
#[derive(Parser)]
#[command(name = "bhasha", about = "Bhashini speech and text pipeline CLI", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (overrides BHASHA_CONFIG and ~/.bhasha/config.json).
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored authorization token.
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Translate text between languages.
    Translate(commands::text::TextArgs),

    /// Convert text into another script.
    Transliterate(commands::text::TextArgs),

    /// Transcribe an audio file.
    Asr(commands::speech::AsrArgs),

    /// Synthesize speech from text into a WAV file.
    Tts(commands::speech::TtsArgs),

    /// Recognize, translate and re-synthesize speech in one call.
    S2s(commands::speech::S2sArgs),

    /// Show what the discovery endpoint says about a pipeline.
    Questions(commands::questions::QuestionsArgs),

    /// Send feedback about a feature.
    Feedback(commands::feedback::FeedbackArgs),

    /// List the selectable languages.
    Languages,

    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Store a token (prompts without echo when omitted).
    Set {
        /// The bearer token.
        token: Option<String>,
    },
    /// Print a masked form of the stored token.
    Show {
        /// Print the full token.
        #[arg(long)]
        reveal: bool,
    },
    /// Remove the stored token.
    Clear,
    /// Report whether a token is stored.
    Status,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the resolved configuration as JSON (secrets blanked).
    Show,
    /// Print which config file and credential directory are in use.
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let platform = NativePlatform::new();
    let config = commands::load_config(&platform, cli.config.as_deref()).await?;

    match cli.command {
        Commands::Token { action } => {
            let creds = commands::open_credentials(&config);
            match action {
                TokenAction::Set { token } => commands::token::token_set(&creds, token)?,
                TokenAction::Show { reveal } => commands::token::token_show(&creds, reveal),
                TokenAction::Clear => commands::token::token_clear(&creds),
                TokenAction::Status => commands::token::token_status(&creds),
            }
        }
        Commands::Translate(args) => {
            commands::text::run(commands::text::TextMode::Translate, args, config).await?;
        }
        Commands::Transliterate(args) => {
            commands::text::run(commands::text::TextMode::Transliterate, args, config).await?;
        }
        Commands::Asr(args) => commands::speech::asr(args, &platform, config).await?,
        Commands::Tts(args) => commands::speech::tts(args, &platform, config).await?,
        Commands::S2s(args) => commands::speech::s2s(args, &platform, config).await?,
        Commands::Questions(args) => commands::questions::run(args, config).await?,
        Commands::Feedback(args) => commands::feedback::run(args, config).await?,
        Commands::Languages => commands::languages::list(),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::config_show(&config),
            ConfigAction::Path => {
                commands::config_cmd::config_path(&platform, cli.config.as_deref(), &config)
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_translate_with_languages() {
        let cli = Cli::try_parse_from(["bhasha", "translate", "Hello", "--from", "en", "--to", "ta"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Translate(_)));
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bhasha", "languages", "--verbose", "--config", "/tmp/c.json",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("/tmp/c.json"));
    }

    #[test]
    fn parse_token_set_without_value() {
        let cli = Cli::try_parse_from(["bhasha", "token", "set"]).unwrap();
        match cli.command {
            Commands::Token {
                action: TokenAction::Set { token },
            } => assert!(token.is_none()),
            _ => panic!("expected token set"),
        }
    }

    #[test]
    fn parse_tts_voice() {
        assert!(Cli::try_parse_from(["bhasha", "tts", "नमस्ते", "--voice", "male"]).is_ok());
        assert!(Cli::try_parse_from(["bhasha", "tts", "x", "--voice", "robot"]).is_err());
    }

    #[test]
    fn parse_questions_task() {
        assert!(Cli::try_parse_from(["bhasha", "questions", "--task", "asr", "--from", "hi"]).is_ok());
        assert!(Cli::try_parse_from(["bhasha", "questions", "--task", "ocr"]).is_err());
    }

    #[test]
    fn parse_feedback_requires_rating() {
        assert!(Cli::try_parse_from(["bhasha", "feedback", "great"]).is_err());
        assert!(
            Cli::try_parse_from(["bhasha", "feedback", "great", "--rating", "5", "--topic", "tts"])
                .is_ok()
        );
    }

    #[test]
    fn missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["bhasha"]).is_err());
    }
}
