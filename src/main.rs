use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fridgechef_cli::config::Config;
use fridgechef_cli::core::{DietaryFilter, Session};
use fridgechef_cli::gateway::{self, ImagePayload};
use fridgechef_cli::narrator::{CommandNarrator, Narrator, NullNarrator};
use fridgechef_cli::shell;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    env!("FRIDGECHEF_VERSION_SUFFIX"),
    " (",
    env!("FRIDGECHEF_GIT_HASH"),
    " ",
    env!("FRIDGECHEF_BUILD_TIME"),
    ")"
);

#[derive(Parser)]
#[command(name = "fridgechef")]
#[command(author, version, long_version = LONG_VERSION)]
#[command(about = "Fridgechef - photograph your fridge, get recipes, cook them with voice guidance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a fridge photo and cook through the suggested recipes
    Analyze {
        /// Path to the photo (jpeg, png, webp or gif)
        image: PathBuf,

        /// Inference gateway to use (gemini, sim)
        #[arg(short, long)]
        gateway: Option<String>,

        /// Model to use (e.g. gemini-2.0-flash-exp)
        #[arg(short, long)]
        model: Option<String>,

        /// Initial dietary filter (all, vegetarian, vegan, keto, gluten-free)
        #[arg(short, long)]
        filter: Option<String>,

        /// Disable voice narration of cooking steps
        #[arg(long)]
        no_narration: bool,
    },

    /// Show the resolved configuration and its file path
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "fridgechef_cli=debug"
    } else {
        "fridgechef_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Analyze {
            image,
            gateway: gateway_arg,
            model,
            filter,
            no_narration,
        } => {
            let config = Config::load().unwrap_or_default();

            let gateway_name =
                gateway_arg.unwrap_or_else(|| config.gateway.default_gateway.clone());
            let gateway: Arc<dyn gateway::RecipeGateway> =
                Arc::from(gateway::create_gateway(&gateway_name, model.as_deref(), &config)?);

            let narrator: Arc<dyn Narrator> = if no_narration || !config.narrator.enabled {
                Arc::new(NullNarrator)
            } else {
                let mut n = CommandNarrator::new().with_voice(config.narrator.voice.clone());
                if let Some(command) = &config.narrator.command {
                    n = n.with_command(command);
                }
                Arc::new(n)
            };

            let mut session = Session::new(gateway, narrator);

            if let Some(filter) = filter {
                let filter: DietaryFilter =
                    filter.parse().map_err(|e: String| anyhow::anyhow!(e))?;
                session.set_dietary_filter(filter);
            }

            let payload = ImagePayload::from_path(&image)?;
            println!("Analyzing {} via {}...", image.display(), gateway_name);

            if let Err(e) = session.submit_image(&payload).await {
                eprintln!("Failed to analyze image. Please try again.");
                return Err(e.into());
            }

            shell::run(&mut session)?;
        }
        Commands::Config => {
            let config = Config::load().unwrap_or_default();
            println!("# {}", Config::config_path()?.display());
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
