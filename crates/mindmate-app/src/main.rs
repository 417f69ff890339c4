//! MindMate - command-line front-end.
//!
//! Runs the HTTP API, an interactive chat on stdin, or a one-shot classifier.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mindmate_core::generator::DEFAULT_GEMINI_MODEL;
use mindmate_core::{Conversation, EngineConfig, GeneratorBackend, SupportEngine};
use mindmate_server::{AppState, Server, ServerConfig, DEFAULT_HOST, DEFAULT_PORT};

/// MindMate - mental health support companion
#[derive(Parser, Debug)]
#[command(name = "mindmate")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// API key for the external text generator
    #[arg(long, global = true, env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Generator model name
    #[arg(long, global = true, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    model: String,

    /// Engine config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Run the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Chat interactively on stdin
    Chat,

    /// Classify one message and print the result as JSON
    Classify {
        /// Message text
        text: String,
    },
}

/// One line of REPL input.
#[derive(Debug, PartialEq)]
enum ReplInput<'a> {
    Empty,
    Quit,
    Message(&'a str),
}

impl<'a> ReplInput<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "" => ReplInput::Empty,
            "/quit" | "/exit" => ReplInput::Quit,
            text => ReplInput::Message(text),
        }
    }
}

/// Get the logs directory path.
fn logs_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "mindmate", "MindMate").map(|dirs| dirs.data_dir().join("logs"))
}

/// Initialize logging with file rotation.
///
/// Console output goes to stderr and is only enabled for `serve` or with
/// `--debug`, so chat and JSON output on stdout stay clean.
fn init_logging(args: &Args) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_level = if args.debug { "debug" } else { &args.log_level };
    let console = args.debug || matches!(args.command, Command::Serve { .. });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "mindmate={0},mindmate_core={0},mindmate_server={0},warn",
            log_level
        ))
    });

    if let Some(log_dir) = logs_dir() {
        if std::fs::create_dir_all(&log_dir).is_ok() {
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .max_log_files(5)
                .filename_prefix("mindmate")
                .filename_suffix("log")
                .build(&log_dir)
                .ok();

            if let Some(appender) = file_appender {
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);

                if console {
                    tracing_subscriber::registry()
                        .with(env_filter)
                        .with(fmt::layer().with_writer(std::io::stderr))
                        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
                        .init();
                } else {
                    tracing_subscriber::registry()
                        .with(env_filter)
                        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
                        .init();
                }

                tracing::info!("Logging to {:?}", log_dir);
                return Some(guard);
            }
        }
    }

    // Fallback: console logging only
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::warn!("File logging unavailable, using console only");
    None
}

/// Builds the engine from the config file and generator flags.
fn build_engine(args: &Args) -> anyhow::Result<SupportEngine> {
    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading engine config from {:?}", path);
            EngineConfig::load(path)
                .with_context(|| format!("failed to load engine config {:?}", path))?
        }
        None => EngineConfig::default(),
    };

    let generator = GeneratorBackend::from_api_key(args.api_key.as_deref(), &args.model);
    tracing::info!(generator = generator.name(), "Generator backend selected");

    Ok(SupportEngine::new(config, generator))
}

async fn run_server(engine: SupportEngine, host: &str, port: u16) -> anyhow::Result<()> {
    let config = ServerConfig::default().with_host(host).with_port(port);
    let server = Server::with_state(config, AppState::new(engine))
        .context("failed to configure API server")?;
    println!("MindMate API listening on http://{}", server.addr());
    server.run().await?;
    Ok(())
}

async fn run_chat(engine: SupportEngine) -> anyhow::Result<()> {
    let mut conversation = Conversation::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("MindMate is here to listen. Type /quit to leave.");
    println!("If you are in danger, call 988 or 911 right now.\n");

    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match ReplInput::parse(&line) {
            ReplInput::Empty => println!("Please type something."),
            ReplInput::Quit => break,
            ReplInput::Message(text) => {
                let reply = engine.respond_in(&mut conversation, text).await;
                println!("\nMindMate: {}", reply.response_text);
                println!("[crisis level: {}]\n", reply.crisis_level);
            }
        }
    }

    tracing::info!(
        session_id = %conversation.session_id,
        turns = conversation.len(),
        peak_crisis_level = %conversation.peak_crisis_level(),
        "Chat session ended"
    );
    println!("Take care of yourself. Goodbye.");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Keep the guard alive for the duration of the program
    let _log_guard = init_logging(&args);

    let engine = build_engine(&args)?;

    match &args.command {
        Command::Serve { host, port } => run_server(engine, host, *port).await,
        Command::Chat => run_chat(engine).await,
        Command::Classify { text } => {
            let result = engine.classify(text);
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repl_input() {
        assert_eq!(ReplInput::parse(""), ReplInput::Empty);
        assert_eq!(ReplInput::parse("   \n"), ReplInput::Empty);
        assert_eq!(ReplInput::parse("/quit"), ReplInput::Quit);
        assert_eq!(ReplInput::parse(" /exit "), ReplInput::Quit);
        assert_eq!(
            ReplInput::parse("  I feel sad \n"),
            ReplInput::Message("I feel sad")
        );
    }

    #[test]
    fn test_serve_defaults() {
        let args = Args::try_parse_from(["mindmate", "serve"]).unwrap();
        assert_eq!(
            args.command,
            Command::Serve {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT
            }
        );
        assert_eq!(args.log_level, "info");
        assert!(!args.debug);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "mindmate",
            "classify",
            "I want to die",
            "--model",
            "gemini-pro",
            "--debug",
        ])
        .unwrap();

        assert_eq!(
            args.command,
            Command::Classify {
                text: "I want to die".to_string()
            }
        );
        assert_eq!(args.model, "gemini-pro");
        assert!(args.debug);
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Args::try_parse_from(["mindmate"]).is_err());
    }

    #[test]
    fn test_build_engine_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(&path, r#"{"risk": {"escalation_threshold": 0.5}}"#).unwrap();

        let args = Args {
            command: Command::Chat,
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            config: Some(path),
            debug: false,
            log_level: "info".to_string(),
        };
        let engine = build_engine(&args).unwrap();
        assert_eq!(engine.generator_name(), "template");
    }

    #[test]
    fn test_build_engine_rejects_bad_config() {
        let args = Args {
            command: Command::Chat,
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            config: Some(PathBuf::from("/nonexistent/mindmate.json")),
            debug: false,
            log_level: "info".to_string(),
        };
        assert!(build_engine(&args).is_err());
    }
}
