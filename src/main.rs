use clap::{Parser, Subcommand};
use log::{debug, info};
use std::path::PathBuf;

use pantry_chef::endpoint::{function, server};
use pantry_chef::render::{render_html, render_ingredient_list_text, render_text};
use pantry_chef::{load_config, ChefSession, RecipeClient, RecipeService};

#[derive(Parser)]
#[command(name = "pantry-chef", version, about = "Recipe suggestions from the ingredients you have")]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the standalone recipe server
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Handle one serverless function event read as JSON from stdin
    Function,
    /// Ask the recipe endpoint for a recipe
    Cook {
        /// Recipe endpoint URL, overriding the configured one
        #[arg(long)]
        api_url: Option<String>,
        /// Print an HTML fragment instead of plain text
        #[arg(long)]
        html: bool,
        /// Ingredients, each argument may hold several separated by commas
        #[arg(required = true)]
        ingredients: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let service = RecipeService::from_config(&config)?;
            server::serve(&config.server, service).await?;
        }
        Command::Function => {
            let service = RecipeService::from_config(&config)?;
            debug!("Handling function event for {}", function::FUNCTION_PATH);
            let output = function::run_once(&service, tokio::io::stdin()).await?;
            println!("{}", output);
        }
        Command::Cook {
            api_url,
            html,
            ingredients,
        } => {
            if let Some(api_url) = api_url {
                config.client.api_base_url = api_url;
            }

            let mut session = ChefSession::new(RecipeClient::new(&config.client)?);
            for input in &ingredients {
                session.store.submit(input);
            }

            eprint!("{}", render_ingredient_list_text(&session.store));
            eprintln!("{}", session.store.readiness_hint());
            info!("Preparing recipe...");

            let recipe = session.request_recipe().await?;
            if html {
                print!("{}", render_html(recipe));
            } else {
                print!("{}", render_text(recipe));
            }
        }
    }

    Ok(())
}
