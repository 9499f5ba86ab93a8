//! websum CLI - webpage summarisation with a local LLM
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use websum::ui::TerminalRenderer;
use websum::{Config, Summarizer};

#[derive(Parser)]
#[command(name = "websum")]
#[command(author, version, about = "Summarise a webpage with a local LLM", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Path to a websum.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a webpage by URL
    #[command(alias = "summarize")]
    Summarise {
        /// URL to summarise
        url: String,
        /// Show raw extracted text instead of summary
        #[arg(long)]
        raw: bool,
        #[command(flatten)]
        agent: AgentArgs,
    },
    /// Print the messages that would be sent to the model
    Prompt {
        /// URL to build the prompt for
        url: String,
        #[command(flatten)]
        agent: AgentArgs,
    },
    /// Print the resolved configuration
    Config {
        #[command(flatten)]
        agent: AgentArgs,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Per-invocation overrides of the `[agent]` config section
#[derive(Args)]
struct AgentArgs {
    /// Model to summarise with
    #[arg(long)]
    model: Option<String>,
    /// Output format requested from the model (e.g. markdown)
    #[arg(long)]
    language: Option<String>,
    /// Ollama server address
    #[arg(long)]
    host: Option<String>,
}

impl AgentArgs {
    fn apply(self, mut config: Config) -> Config {
        if let Some(model) = self.model {
            config.agent.model = model;
        }
        if let Some(language) = self.language {
            config.agent.language = language;
        }
        config.with_host_override(self.host)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Summarise { url, raw, agent } => {
            let config = agent.apply(Config::load(cli.config.as_deref())?);
            let summarizer = Summarizer::from_config(config.agent)?;

            if raw {
                // Just show raw extracted text
                let page = summarizer.extract_page(&url).await?;
                println!("=== {} ===\n", page.title);
                println!("{}", page.text);
                println!("\n--- Extracted {} characters ---", page.char_count());
            } else {
                eprintln!("Summarising {} with {}...", url, summarizer.config().model);
                let mut renderer = TerminalRenderer::stdout();
                summarizer.display_summary(&url, &mut renderer).await?;
            }
        }
        Commands::Prompt { url, agent } => {
            let config = agent.apply(Config::load(cli.config.as_deref())?);
            let summarizer = Summarizer::from_config(config.agent)?;
            for message in summarizer.messages(&url).await? {
                println!("--- {:?} ---", message.role);
                println!("{}\n", message.content);
            }
        }
        Commands::Config { agent } => {
            let config = agent.apply(Config::load(cli.config.as_deref())?);
            print!("{}", toml::to_string(&config)?);
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "websum", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Log to stderr so summaries on stdout stay pipeable. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
