// command line interface

use crate::config::Config;
use crate::console::{Console, Level};
use crate::core::Ai;
use crate::{actions, chat};
use clap::{Parser, Subcommand};
use miette::Result;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recap", about = "Record, replay, and chat about desktop sessions")]
struct Cli {
    /// api key for the completion service
    #[arg(long, short = 'k', global = true)]
    api_key: Option<String>,

    /// base url of the completion service
    #[arg(long, env = "RECAP_BASE_URL", global = true)]
    base_url: Option<String>,

    /// directory holding recorded data
    #[arg(long, short = 'd', env = "RECAP_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// skip the topic warnings before each reply
    #[arg(long)]
    no_gate: bool,

    /// disable styled output
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// upload the recorded data to the configured server
    Export,

    /// copy a recordings database into the data directory
    Import { path: PathBuf },

    /// delete all recorded data
    Clear {
        /// don't ask first
        #[arg(long, short)]
        yes: bool,
    },

    /// show recorded replays
    List {
        /// raw json for scripts
        #[arg(long)]
        json: bool,
    },

    /// open the latest replay in the external visualizer
    Visualize,

    /// replay the latest recording
    Replay {
        /// replay strategy to use
        #[arg(long, default_value = "naive")]
        strategy: String,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.data_dir);
    let mut console = Console::stdout(!cli.plain, config.dark_mode);

    match cli.command {
        Some(Commands::Export) => Ok(actions::export(&config, &mut console).await?),

        Some(Commands::Import { path }) => Ok(actions::import(&config, &path, &mut console)?),

        Some(Commands::Clear { yes }) => {
            if !yes && !confirm("delete all recorded data?")? {
                console.log(Level::Info, "nothing deleted");
                return Ok(());
            }
            Ok(actions::clear(&config, &mut console).await?)
        }

        Some(Commands::List { json }) => Ok(actions::list(&config, json, &mut console).await?),

        Some(Commands::Visualize) => Ok(actions::visualize(&config, &mut console).await?),

        Some(Commands::Replay { strategy }) => {
            Ok(actions::replay(&config, &strategy, &mut console).await?)
        }

        None => {
            // chat mode: reader thread + chat task over a queue
            let ai = Ai::new(cli.api_key, cli.base_url, config.chat_model.clone())?;
            console.log(Level::Info, &format!("model: {}", ai.model()));
            let lines = chat::stdin_lines();
            let mut chat = chat::Chat::new(ai, console, !cli.no_gate);
            chat.run(lines).await;
            Ok(())
        }
    }
}

fn confirm(question: &str) -> Result<bool> {
    use std::io::Write;

    print!("{question} [y/N] ");
    std::io::stdout().flush().map_err(crate::Error::Io)?;

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .map_err(crate::Error::Io)?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
