use anyhow::{Context, Result, bail};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use triad::cli::client::ApiClient;
use triad::cli::init::{self, InitConfig, InitResult};
use triad::cli::output::Output;
use triad::cli::{Cli, Commands};
use triad::llm::{CompletionBackend, GenerationSettings, Provider};
use triad::utils::toml_config::{LogFormat, ProviderKind, TriadConfig};
use triad::{AgentRegistry, AppState, api};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match cli.command {
        None => run_server(&cli).await,

        Some(Commands::Init {
            ref path,
            force,
            provider,
            ref host,
            port,
        }) => {
            let config = InitConfig {
                path: path.clone(),
                force,
                provider,
                host: host.clone(),
                port,
            };
            match init::run(config, &output) {
                InitResult::Success => Ok(()),
                InitResult::AlreadyExists => bail!("triad.toml already exists (use --force)"),
                InitResult::Error(e) => bail!("init failed: {}", e),
            }
        }

        Some(Commands::Config { full, validate }) => show_config(&cli, full, validate, &output),

        Some(Commands::Client {
            ref url,
            ref command,
        }) => {
            let client = ApiClient::new(url.as_str())?;
            let value = client.execute(command).await?;
            output.json(&value);
            Ok(())
        }
    }
}

async fn run_server(cli: &Cli) -> Result<()> {
    let config = TriadConfig::load_with_env(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    init_logging(&config, cli.verbose);
    if !cli.config.exists() {
        warn!(path = %cli.config.display(), "Configuration file not found, using defaults");
    }

    let registry = build_registry(&config)?;
    let addr = config.bind_address();
    let state = AppState::new(config, registry);
    let app = api::create_router(state.clone());

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        %addr,
        default_agent_type = %state.registry.default_kind(),
        completion = state.registry.supports_completion(),
        "Triad server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!(agents = state.registry.len(), "Server stopped");
    Ok(())
}

fn init_logging(config: &TriadConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.server.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match config.server.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}

/// Wire the configured provider into the registry.
///
/// A provider that cannot be built only disables completion agents, unless
/// completion is the default kind, in which case the builder rejects it.
fn build_registry(config: &TriadConfig) -> Result<AgentRegistry> {
    let api_key = config.api_key(|key| std::env::var(key).ok());
    if config.llm.provider == ProviderKind::OpenAI && api_key.is_none() {
        warn!(
            env = %config.llm.api_key_env,
            "No API key set; completion agents will report provider errors"
        );
    }

    let provider = Provider::from_config(&config.llm, api_key);
    let mut builder = AgentRegistry::builder().with_default_kind(config.agents.default_kind);

    match provider.create_client() {
        Ok(client) => {
            info!(
                provider = provider.name(),
                model = %config.llm.model,
                "Completion provider ready"
            );
            builder = builder.with_completion_backend(CompletionBackend::new(
                client,
                GenerationSettings::from_config(&config.llm),
            ));
        }
        Err(e) => warn!(
            provider = provider.name(),
            error = %e,
            "Completion provider unavailable, only template agents can be created"
        ),
    }

    Ok(builder.build()?)
}

fn show_config(cli: &Cli, full: bool, validate: bool, output: &Output) -> Result<()> {
    let mut config = TriadConfig::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    config.apply_env_overrides(|key| std::env::var(key).ok())?;

    output.header("Configuration");
    output.kv("file", &cli.config.display().to_string());
    output.kv("exists", &cli.config.exists().to_string());
    output.kv("bind", &config.bind_address());
    output.kv("default agent type", config.agents.default_kind.as_str());
    output.kv("llm model", &config.llm.model);

    if full {
        output.newline();
        let rendered =
            toml::to_string_pretty(&config).context("Failed to render configuration")?;
        println!("{}", rendered);
    }

    if validate {
        match config.validate_with(|key| std::env::var(key).ok()) {
            Ok(()) => output.success("Configuration is valid"),
            Err(e) => {
                output.error(&e.to_string());
                bail!("configuration is invalid");
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
