// Moodbot - Friendly chatbot with emotion detection
// Main entry point

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use moodbot::cli::{format_reply, Cli, Commands};
use moodbot::config::load_config;
use moodbot::pipeline::BotContext;
use moodbot::server::ChatServer;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    moodbot::logging::init(cli.verbose);

    let mut config = load_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    // Both models are fitted before anything is served; a bad dataset stops here
    let data = config.data.clone();
    let training = config.training;
    let loaded = tokio::task::spawn_blocking(move || BotContext::load(&data, &training)).await?;
    let context = match loaded {
        Ok(context) => Arc::new(context),
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Serve { .. } => {
            let server = ChatServer::new(context, config.palette, config.server);
            server.serve().await?;
        }
        Commands::Ask { text } => {
            let reply = context.respond(&text.join(" "));
            println!("{}", format_reply(&reply));
        }
    }

    Ok(())
}
