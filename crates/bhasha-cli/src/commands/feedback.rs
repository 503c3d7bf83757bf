//! `bhasha feedback` -- rate a feature and leave a comment.
//!
//! # Examples
//!
//! ```text
//! bhasha feedback "Translations are accurate" --rating 5 --topic translation
//! bhasha feedback "Voice sounds robotic" --rating 2 --topic tts --email me@example.com
//! ```

use anyhow::Context;
use clap::Args;

use bhasha_types::config::Config;
use bhasha_types::feedback::{FeedbackPayload, FeedbackTopic};

use super::build_service;

#[derive(Args)]
pub struct FeedbackArgs {
    /// Feedback text.
    pub message: String,

    /// Rating from 1 to 5.
    #[arg(short, long)]
    pub rating: u8,

    /// Feature the feedback is about.
    #[arg(long)]
    pub topic: Option<FeedbackTopic>,

    /// Contact address (optional).
    #[arg(long)]
    pub email: Option<String>,
}

/// Build the payload from arguments; validation happens here.
pub fn payload_from(args: FeedbackArgs) -> anyhow::Result<FeedbackPayload> {
    let mut payload = FeedbackPayload::new(args.rating, args.message)?;
    if let Some(topic) = args.topic {
        payload = payload.with_topic(topic);
    }
    if let Some(email) = args.email {
        payload = payload.with_email(email);
    }
    Ok(payload)
}

pub async fn run(args: FeedbackArgs, config: Config) -> anyhow::Result<()> {
    let payload = payload_from(args)?;
    let service = build_service(config)?;
    service
        .submit_feedback(&payload)
        .await
        .context("failed to submit feedback")?;
    println!("Thank you for your feedback!");
    Ok(())
}
