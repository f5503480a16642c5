use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use secure_config_client::{ClientConfig, ConfigClient};
use secure_config_core::{render_json, render_view, ViewState, ViewStateHolder};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "secure-config")]
#[command(about = "Fetch a runtime API key and display the protected configuration", long_about = None)]
struct Cli {
    /// Backend base URL serving /config.json and /api/config
    /// [default: $SECURE_CONFIG_BASE_URL or http://localhost:8000]
    #[arg(long)]
    base_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Output::View)]
    output: Output,

    /// Disable colored error output
    #[arg(long)]
    no_color: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Full page: header, status or config table, footer
    View,
    /// Only the protected config as JSON
    Json,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stdout().is_terminal();

    let config = cli
        .base_url
        .as_deref()
        .map(ClientConfig::with_base_url)
        .unwrap_or_else(ClientConfig::from_env);
    let client = ConfigClient::new(config);
    let holder = ViewStateHolder::new();

    let final_state = match cli.output {
        Output::View => {
            let rx = holder.subscribe();
            let mut stdout = io::stdout();
            let (rendered, state) = tokio::join!(
                render_changes(rx, color, &mut stdout),
                holder.load(&client)
            );
            rendered?;
            state
        }
        Output::Json => holder.load(&client).await,
    };

    if cli.output == Output::Json {
        match (&final_state.data, &final_state.error) {
            (Some(config), _) => println!("{}", render_json(config)),
            (None, Some(error)) => eprintln!("Error: {}", error),
            (None, None) => {}
        }
    }

    if final_state.error.is_some() {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

/// Re-renders the page on every distinct state until the load settles.
async fn render_changes<W: Write>(
    mut rx: tokio::sync::watch::Receiver<ViewState>,
    color: bool,
    out: &mut W,
) -> io::Result<()> {
    let mut last = rx.borrow_and_update().clone();
    writeln!(out, "{}\n", render_view(&last, color))?;

    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        if state != last {
            writeln!(out, "{}\n", render_view(&state, color))?;
        }
        if !state.loading {
            break;
        }
        last = state;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use secure_config_core::{ConfigError, ConfigSource, ProtectedConfig};

    use super::*;

    struct FixedSource(fn() -> secure_config_core::Result<ProtectedConfig>);

    #[async_trait]
    impl ConfigSource for FixedSource {
        async fn fetch_config(&self) -> secure_config_core::Result<ProtectedConfig> {
            (self.0)()
        }
    }

    async fn render_load(source: FixedSource) -> String {
        let holder = ViewStateHolder::new();
        let rx = holder.subscribe();
        let mut out = Vec::new();

        let (rendered, _) = tokio::join!(
            render_changes(rx, false, &mut out),
            holder.load(&source)
        );
        rendered.unwrap();

        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_render_changes_prints_loading_then_result() {
        let out = render_load(FixedSource(|| {
            Ok(ProtectedConfig {
                is_enabled: Some(false),
                ..Default::default()
            })
        }))
        .await;

        assert_eq!(out.matches("Secure Config Demo").count(), 2);
        assert_eq!(out.matches("Loading configuration...").count(), 1);

        let loading = out.find("Loading configuration...").unwrap();
        let values = out.find("Configuration Values").unwrap();
        assert!(loading < values);
        assert!(out.contains("| Enabled         | false"));
    }

    #[tokio::test]
    async fn test_render_changes_prints_error_box() {
        let out = render_load(FixedSource(|| Err(ConfigError::MissingKey))).await;

        assert_eq!(out.matches("Secure Config Demo").count(), 2);
        let final_page = out.rsplit("Secure Config Demo").next().unwrap();
        assert!(final_page.contains("Error: Failed to load configuration: No API key found"));
        assert!(!final_page.contains("Loading configuration..."));
        assert!(!final_page.contains("Details"));
    }
}
