use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod commands;
mod config;
mod models;
mod services;
mod utils;

#[cfg(test)]
mod test_support;

use api::mindicador::MindicadorClient;
use cli::{Cli, Command};
use commands::Session;
use config::AppConfig;
use services::chart_service::PlottersCanvas;

fn build_session(config: &AppConfig) -> Result<Session, String> {
    let client = MindicadorClient::new(&config.api_url, config.http_timeout)
        .map_err(|e| e.to_string())?;
    let canvas = PlottersCanvas::new(config.chart_width, config.chart_height);
    Ok(Session::new(client, Arc::new(canvas), config.chart_path.clone()))
}

/// Read one command per line until EOF or `quit`
async fn run_interactive(session: &mut Session) {
    println!("💱 divisa - type `help` for commands, `quit` to leave");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("divisa> ");
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        if !commands::handle_line(session, &line).await {
            break;
        }
    }

    if let Some(chart) = &session.chart {
        info!("Leaving chart at {}", chart.path().display());
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Logs go to stderr so stdout only carries results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("divisa=info".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap()))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(chart) = cli.chart {
        config.chart_path = chart;
    }

    let mut session = match build_session(&config) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to start: {}", e);
            eprintln!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("Using {} (chart: {})", session.client.base_url(), session.chart_path.display());

    match cli.command {
        Some(Command::Convert { value, divisa }) => {
            match commands::convert::execute(&mut session, &[value.as_str(), divisa.as_str()]).await {
                Ok(reply) => {
                    println!("{}", reply);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    warn!("Conversion failed: {}", e);
                    eprintln!("❌ {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Some(Command::List) => {
            println!("{}", commands::list::execute());
            ExitCode::SUCCESS
        }
        None => {
            run_interactive(&mut session).await;
            ExitCode::SUCCESS
        }
    }
}
