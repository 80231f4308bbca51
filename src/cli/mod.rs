// Command-line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::pipeline::Reply;

/// Moodbot - friendly chatbot that also guesses how you feel
#[derive(Debug, Parser)]
#[command(name = "moodbot", version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.moodbot/config.toml when present)
    #[arg(long, env = "MOODBOT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Chat dataset CSV (columns: input, chatbot)
    #[arg(long, global = true)]
    pub chat_data: Option<PathBuf>,

    /// Emotion dataset CSV (columns: input, emotion)
    #[arg(long, global = true)]
    pub emotion_data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the web UI
    Serve {
        /// Bind address, e.g. 127.0.0.1:8501
        #[arg(long)]
        bind: Option<String>,
    },

    /// Classify one message and print the reply and emotion
    Ask {
        /// Message text
        #[arg(required = true)]
        text: Vec<String>,
    },
}

impl Cli {
    /// Apply command-line overrides on top of file/default config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.chat_data {
            config.data.chat.path = path.clone();
        }
        if let Some(path) = &self.emotion_data {
            config.data.emotion.path = path.clone();
        }
        if let Commands::Serve { bind: Some(bind) } = &self.command {
            config.server.bind_address = bind.clone();
        }
    }
}

/// Terminal rendering of one reply for `moodbot ask`
pub fn format_reply(reply: &Reply) -> String {
    let describe = |r: &crate::patterns::Resolution| match r.score() {
        Some(score) => format!("{} (best match score {})", r.source().as_str(), score),
        None => r.source().as_str().to_string(),
    };

    format!(
        "Bot: {}\n  via {}\nEmotion: {}\n  via {}",
        reply.reply.label(),
        describe(&reply.reply),
        reply.emotion.label().to_uppercase(),
        describe(&reply.emotion)
    )
}
