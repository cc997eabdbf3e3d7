use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use photoprompt::{Config, MediaConfig, Studio};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "photoprompt")]
#[command(about = "Generate photos and optimize text with Workers AI")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate an image from a text prompt.
    Photo {
        #[arg(value_name = "PROMPT")]
        prompt: String,
    },
    /// Rewrite text to be clearer and more engaging.
    Optimize {
        #[arg(value_name = "PROMPT")]
        prompt: String,
    },
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{} not set", name))
}

fn config_from_env() -> Result<Config> {
    dotenvy::dotenv().ok();

    let mut config = Config::new(
        required_var("CLOUDFLARE_API_KEY")?,
        required_var("CLOUDFLARE_ACCOUNT_ID")?,
    );

    if let Ok(model) = env::var("IMAGE_MODEL") {
        config = config.with_image_model(model);
    }
    if let Ok(model) = env::var("CHAT_MODEL") {
        config = config.with_chat_model(model);
    }

    match (
        env::var("CLOUDINARY_CLOUD_NAME"),
        env::var("CLOUDINARY_API_KEY"),
        env::var("CLOUDINARY_API_SECRET"),
    ) {
        (Ok(cloud_name), Ok(api_key), Ok(api_secret)) => {
            Ok(config.with_media(MediaConfig::new(cloud_name, api_key, api_secret)))
        }
        _ => {
            info!("Cloudinary credentials not set; images will be returned inline");
            Ok(config)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photoprompt=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();
    let studio = Studio::new(config_from_env()?)?;

    let (output, success) = match args.command {
        Command::Photo { prompt } => {
            let result = studio.generate_photo(&prompt).await;
            (serde_json::to_string_pretty(&result)?, result.success)
        }
        Command::Optimize { prompt } => {
            let result = studio.optimize_text(&prompt).await;
            (serde_json::to_string_pretty(&result)?, result.success)
        }
    };

    println!("{}", output);

    if !success {
        error!("Request failed");
        std::process::exit(1);
    }
    Ok(())
}
