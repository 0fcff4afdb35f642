mod worker;

use anyhow::Result;
use clap::{Parser, Subcommand};
use folio_core::config::REQUIRED_ENV;
use folio_core::{AgentConfig, EventBus, RoomEvent, Settings, ToolRegistry};
use folio_data::{PortfolioQueries, PortfolioSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;
use worker::AgentWorker;

#[derive(Parser)]
#[command(
    name = "folio-agent",
    about = "Voice assistant worker for a portfolio website",
    version,
    author
)]
struct Cli {
    /// Path to settings file (default: ~/.config/folio-agent/config.toml)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the worker against a stream of room events (default)
    Run {
        /// Read events from a JSON-lines file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,
    },

    /// Invoke a single portfolio tool and print its output
    Query {
        /// Tool name, e.g. getExperience
        tool: String,
        /// Tool arguments as a JSON object
        #[arg(long)]
        args: Option<String>,
    },

    /// Print the portfolio briefing handed to the language model
    Briefing {
        /// Print the full system instructions instead
        #[arg(long)]
        full: bool,
    },

    /// List the registered portfolio tools
    Tools {
        /// Print tool schemas in OpenAI function format
        #[arg(long)]
        schemas: bool,
    },

    /// Verify environment and settings without starting the worker
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env.local wins over .env; neither overrides the real environment.
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();

    // Set up tracing. RUST_LOG takes precedence over the configured level.
    let settings_level = Settings::resolve_env(cli.settings.as_deref())
        .map(|s| s.log_level)
        .unwrap_or_else(|_| "info".into());
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else if let Ok(directives) = std::env::var("RUST_LOG") {
        EnvFilter::new(directives)
    } else {
        EnvFilter::new(settings_level)
    };
    let fmt = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if cli.log_json {
        fmt.json().init();
    } else {
        fmt.init();
    }

    match cli.command {
        Some(Commands::Run { script }) => run_worker(cli.settings.as_deref(), script).await,
        Some(Commands::Query { tool, args }) => {
            query_tool(cli.settings.as_deref(), &tool, args.as_deref()).await
        }
        Some(Commands::Briefing { full }) => print_briefing(cli.settings.as_deref(), full).await,
        Some(Commands::Tools { schemas }) => list_tools(cli.settings.as_deref(), schemas).await,
        Some(Commands::Check) => check_config(cli.settings.as_deref()),
        None => run_worker(cli.settings.as_deref(), None).await,
    }
}

async fn run_worker(settings_path: Option<&Path>, script: Option<PathBuf>) -> Result<()> {
    let config = AgentConfig::from_env_with_settings(settings_path)?;
    let worker = Arc::new(
        AgentWorker::new(config)
            .await?
            .with_reconnect(|| tracing::info!("Reconnect scheduled")),
    );

    let bus = EventBus::new();
    let events = bus.subscribe();
    let handle = tokio::spawn({
        let worker = Arc::clone(&worker);
        async move { worker.run(events).await }
    });

    match script {
        Some(path) => feed_script(&bus, &path).await?,
        None => feed_stdin(&bus).await?,
    }
    drop(bus);
    handle.await?;

    let sessions = worker.monitor().sessions();
    let total_cost: f64 = sessions
        .iter()
        .map(|s| s.api_usage.total.estimated_cost)
        .sum();
    println!(
        "{} session(s), ${:.4} estimated API cost",
        sessions.len(),
        total_cost
    );
    Ok(())
}

async fn feed_script(bus: &EventBus, path: &Path) -> Result<()> {
    let contents = tokio::fs::read_to_string(path).await?;
    for line in contents.lines() {
        publish_line(bus, line);
    }
    Ok(())
}

async fn feed_stdin(bus: &EventBus) -> Result<()> {
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        publish_line(bus, &line);
    }
    Ok(())
}

/// One room event per line, JSON encoded. Blank lines and `#` comments
/// are skipped; malformed lines are logged and dropped.
fn publish_line(bus: &EventBus, line: &str) {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return;
    }
    match serde_json::from_str::<RoomEvent>(line) {
        Ok(event) => {
            if bus.publish(event).is_err() {
                tracing::warn!("No subscribers for event");
            }
        }
        Err(e) => tracing::warn!("Skipping malformed event line: {e}"),
    }
}

async fn load_queries(settings_path: Option<&Path>) -> Result<PortfolioQueries> {
    let settings = Settings::resolve_env(settings_path)?;
    let source = PortfolioSource::new(
        settings.portfolio_api_url.clone(),
        settings.portfolio_data_path.clone(),
    );
    Ok(PortfolioQueries::new(source.load().await))
}

async fn build_registry(settings_path: Option<&Path>) -> Result<ToolRegistry> {
    let queries = load_queries(settings_path).await?;
    let mut registry = ToolRegistry::new();
    folio_tools::register_all(&mut registry, &queries)?;
    Ok(registry)
}

async fn query_tool(settings_path: Option<&Path>, tool: &str, args: Option<&str>) -> Result<()> {
    let registry = build_registry(settings_path).await?;
    let arguments: serde_json::Value = match args {
        Some(raw) => serde_json::from_str(raw)?,
        None => serde_json::Value::Null,
    };
    let output = registry
        .execute(tool, &uuid::Uuid::new_v4().to_string(), arguments)
        .await;
    println!("{}", output.content);
    if output.is_error {
        std::process::exit(1);
    }
    Ok(())
}

async fn print_briefing(settings_path: Option<&Path>, full: bool) -> Result<()> {
    let queries = load_queries(settings_path).await?;
    if full {
        println!("{}", worker::agent_instructions(&queries));
    } else {
        println!("{}", queries.briefing());
    }
    Ok(())
}

async fn list_tools(settings_path: Option<&Path>, schemas: bool) -> Result<()> {
    let registry = build_registry(settings_path).await?;
    if schemas {
        let tools = folio_core::schemas_to_openai_tools(&registry.schemas());
        println!("{}", serde_json::to_string_pretty(&tools)?);
    } else {
        for schema in registry.schemas() {
            println!("{}: {}", schema.name, schema.description);
        }
    }
    Ok(())
}

fn check_config(settings_path: Option<&Path>) -> Result<()> {
    match AgentConfig::from_env_with_settings(settings_path) {
        Ok(config) => {
            println!("Configuration OK");
            println!("LiveKit URL: {}", config.livekit.url);
            println!("LLM model: {}", config.settings.llm_model);
            println!("STT model: {}", config.settings.stt_model);
            println!("TTS voice: {}", config.settings.tts_voice);
            match &config.settings.portfolio_api_url {
                Some(url) => println!("Portfolio API: {url}"),
                None => println!("Portfolio API: not configured"),
            }
            match &config.settings.portfolio_data_path {
                Some(path) => println!("Portfolio data file: {}", path.display()),
                None => println!("Portfolio data file: not configured"),
            }
            println!("\nSettings:\n{}", toml::to_string_pretty(&config.settings)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Required: {}", REQUIRED_ENV.join(", "));
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_events_reach_subscribers() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("events.jsonl");
        std::fs::write(
            &path,
            "# smoke script\n\n\
             {\"type\":\"session_started\",\"room\":\"r1\"}\n\
             {\"type\":\"user_message\",\"room\":\"r1\"}\n\
             not json\n",
        )
        .unwrap();

        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        feed_script(&bus, &path).await.unwrap();

        assert!(matches!(
            rx.recv().await.unwrap(),
            RoomEvent::SessionStarted { .. }
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            RoomEvent::UserMessage { .. }
        ));
        // The malformed line never made it onto the bus.
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_cli_parses_run_with_script() {
        let cli = Cli::parse_from(["folio-agent", "run", "--script", "events.jsonl"]);
        match cli.command {
            Some(Commands::Run { script }) => {
                assert_eq!(script.as_deref(), Some(Path::new("events.jsonl")));
            }
            _ => panic!("expected run subcommand"),
        }
    }

    #[test]
    fn test_cli_parses_query_args_as_flag() {
        let cli = Cli::parse_from([
            "folio-agent",
            "query",
            "getExperience",
            "--args",
            r#"{"company":"Healthtrip"}"#,
        ]);
        match cli.command {
            Some(Commands::Query { tool, args }) => {
                assert_eq!(tool, "getExperience");
                assert_eq!(args.as_deref(), Some(r#"{"company":"Healthtrip"}"#));
            }
            _ => panic!("expected query subcommand"),
        }

        let cli = Cli::parse_from(["folio-agent", "query", "getContactInfo"]);
        match cli.command {
            Some(Commands::Query { args, .. }) => assert!(args.is_none()),
            _ => panic!("expected query subcommand"),
        }
    }

    #[test]
    fn test_cli_global_flags_apply_after_subcommand() {
        let cli = Cli::parse_from(["folio-agent", "tools", "--schemas", "--verbose"]);
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Tools { schemas }) => assert!(schemas),
            _ => panic!("expected tools subcommand"),
        }
    }
}
