//! CLI module for Triad
//!
//! Provides command-line interface parsing and handling for the triad-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod client;
pub mod init;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Triad - Ask/Study/Plan Agent Server
///
/// Named agents answering in three modes, each with its own call history.
#[derive(Parser, Debug)]
#[command(
    name = "triad-server",
    version,
    about = "Triad - Ask/Study/Plan Agent Server",
    long_about = "Named agents answering prompts in ask, study and plan modes,\n\
                  each keeping an in-memory history of its calls.\n\n\
                  Run without arguments to start the server, or use 'init' to scaffold a config.",
    after_help = "EXAMPLES:\n    \
                  triad-server init                      # Write triad.toml and .env.example\n    \
                  triad-server                           # Start the server\n    \
                  triad-server --config my.toml          # Use a custom config file\n    \
                  triad-server client ask t1 \"2+2?\"      # Query a running server"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "triad.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// LLM provider written into a scaffolded config
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InitProvider {
    Openai,
    Ollama,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new Triad project with configuration files
    ///
    /// Creates triad.toml and .env.example in the target directory.
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files without prompting
        #[arg(short, long)]
        force: bool,

        /// LLM provider to configure
        #[arg(long, value_enum, default_value = "openai")]
        provider: InitProvider,

        /// Host address for the server
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port for the server
        #[arg(long, default_value = "8000")]
        port: u16,
    },

    /// Show configuration information
    Config {
        /// Show the full configuration
        #[arg(short = 'f', long)]
        full: bool,

        /// Validate the configuration file
        #[arg(long)]
        validate: bool,
    },

    /// Talk to a running server
    Client {
        /// Base URL of the server
        #[arg(
            short,
            long,
            env = "TRIAD_URL",
            default_value = "http://localhost:8000"
        )]
        url: String,

        #[command(subcommand)]
        command: ClientCommands,
    },
}

/// HTTP client subcommands
#[derive(Subcommand, Debug)]
pub enum ClientCommands {
    /// Create a named agent
    Create {
        /// Name of the agent
        name: String,

        /// Agent type (template or completion); server default when omitted
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },

    /// List agent names
    List,

    /// Show details for a specific agent
    Info {
        /// Name of the agent
        name: String,
    },

    /// Delete an agent
    Delete {
        /// Name of the agent
        name: String,
    },

    /// Ask for a direct answer
    Ask {
        /// Name of the agent
        name: String,
        /// Prompt text
        prompt: String,
    },

    /// Request an in-depth analysis
    Study {
        /// Name of the agent
        name: String,
        /// Prompt text
        prompt: String,

        /// Extra background for the analysis
        #[arg(long)]
        context: Option<String>,
    },

    /// Request an action plan
    Plan {
        /// Name of the agent
        name: String,
        /// Prompt text
        prompt: String,

        /// A goal for the plan (repeatable)
        #[arg(short, long = "goal")]
        goals: Vec<String>,
    },

    /// Show an agent's history
    History {
        /// Name of the agent
        name: String,
    },

    /// Clear an agent's history
    ClearHistory {
        /// Name of the agent
        name: String,
    },

    /// Check server health
    Health,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
