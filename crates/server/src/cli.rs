//! CLI argument parsing and subcommand dispatch.

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use triage_core::{AssessmentRequest, Config, EngineMode, VitalSigns};

use crate::router::build_router;
use crate::state::AppState;

/// Manchester triage classification service.
#[derive(Parser, Debug)]
#[command(name = "triage", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP service.
    Serve {
        /// Override the configured bind host.
        #[arg(long)]
        host: Option<String>,
        /// Override the configured port.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Classify a vital-signs JSON document and print the outcome.
    Classify {
        /// Path to the document, or `-` for stdin.
        #[arg(default_value = "-")]
        input: String,
        /// Engine to use instead of the configured one (rules, remote, compare).
        #[arg(long)]
        engine: Option<String>,
    },
    /// Print the active configuration with secrets removed.
    Config,
}

pub async fn dispatch(cli: Cli, mut config: Config) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(&config).await
        }
        Command::Classify { input, engine } => {
            if let Some(engine) = engine {
                config.engine.mode = engine.parse::<EngineMode>().map_err(anyhow::Error::msg)?;
            }
            classify(&config, &input).await
        }
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config.redacted_summary())?);
            Ok(())
        }
    }
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    config.log_summary();
    let state = Arc::new(AppState::from_config(config)?);
    let app = build_router(state, &config.server.cors_origin);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn classify(config: &Config, input: &str) -> anyhow::Result<()> {
    let raw = read_input(input)?;
    let vitals: VitalSigns =
        serde_json::from_str(&raw).with_context(|| format!("parsing vital signs from {}", input))?;

    let state = AppState::from_config(config)?;
    let outcome = state.selector.assess(&AssessmentRequest::new(vitals)).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {}", input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["triage", "classify"]).unwrap();
        match cli.command {
            Command::Classify { input, engine } => {
                assert_eq!(input, "-");
                assert!(engine.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from(["triage", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Command::Serve { host, port } => {
                assert!(host.is_none());
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn a_subcommand_is_required() {
        assert!(Cli::try_parse_from(["triage"]).is_err());
    }
}
