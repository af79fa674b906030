//! Init command implementation
//!
//! Scaffolds a Triad project: `triad.toml` plus an `.env.example` listing the
//! environment variables the server reads.

use super::InitProvider;
use super::output::Output;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug, PartialEq, Eq)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// Project already exists (triad.toml found)
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// LLM provider to configure
    pub provider: InitProvider,
    /// Host address for the server
    pub host: String,
    /// Port for the server
    pub port: u16,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing Triad Project");

    let base_path = &config.path;
    if !base_path.exists() {
        if let Err(e) = fs::create_dir_all(base_path) {
            output.error(&format!("Failed to create {}: {}", base_path.display(), e));
            return InitResult::Error(e.to_string());
        }
    }

    let config_path = base_path.join("triad.toml");
    if config_path.exists() && !config.force {
        output.warning("triad.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    let toml_content = generate_triad_toml(&config);
    if let Err(e) = write_file(&config_path, &toml_content, config.force) {
        output.error(&format!("Failed to create triad.toml: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", "triad.toml");

    let env_example_path = base_path.join(".env.example");
    if let Err(e) = write_file(&env_example_path, &generate_env_example(), config.force) {
        output.error(&format!("Failed to create .env.example: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("env", ".env.example");

    output.complete("Triad project initialized successfully!");

    output.header("Next Steps");
    output.newline();
    if config.provider == InitProvider::Openai {
        output.info("1. Set your API key (only needed for completion agents):");
        output.command("cp .env.example .env");
        output.command("# Edit .env and set OPENAI_API_KEY");
    } else {
        output.info("1. Start Ollama (if not running):");
        output.command("ollama serve");
    }
    output.newline();

    output.info("2. Start the server:");
    output.command("triad-server");

    output.hint(&format!(
        "Server will be available at http://{}:{}",
        config.host, config.port
    ));

    InitResult::Success
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(()); // Skip existing files unless force is true
    }
    fs::write(path, content)
}

fn generate_triad_toml(config: &InitConfig) -> String {
    let (provider, model) = match config.provider {
        InitProvider::Openai => ("openai", "gpt-3.5-turbo"),
        InitProvider::Ollama => ("ollama", "llama3.2"),
    };

    format!(
        r#"# Triad Configuration
# ===================
# Generated by: triad-server init
#
# API_HOST and API_PORT in the environment override [server] host/port.

[server]
host = "{host}"
port = {port}
log_level = "info"
# "pretty" or "json"
log_format = "pretty"
cors = true
body_limit_bytes = 1048576

[llm]
# "openai" (any OpenAI-compatible endpoint) or "ollama"
provider = "{provider}"
model = "{model}"
temperature = 0.7
max_tokens = 1024
api_key_env = "OPENAI_API_KEY"
api_base = "https://api.openai.com/v1"
ollama_url = "http://localhost:11434"
timeout_secs = 60

[agents]
# Used for implicit creation and when a create request names no type.
# "template" or "completion"
default_kind = "template"
"#,
        host = config.host,
        port = config.port,
        provider = provider,
        model = model,
    )
}

fn generate_env_example() -> String {
    r#"# Triad environment variables
# Copy to .env and fill in.

# Completion provider key (name set by llm.api_key_env)
OPENAI_API_KEY=

# Optional bind overrides
# API_HOST=0.0.0.0
# API_PORT=8000

# Log filter, takes precedence over server.log_level
# RUST_LOG=info,triad=debug
"#
    .to_string()
}
