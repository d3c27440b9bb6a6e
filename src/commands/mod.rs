pub mod convert;
pub mod help;
pub mod list;

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::mindicador::MindicadorClient;
use crate::services::chart_service::{ChartCanvas, ChartHandle, ChartTarget};

/// State carried between submissions: the API client, where charts are
/// drawn, and the chart currently alive.
pub struct Session {
    pub client: MindicadorClient,
    pub canvas: Arc<dyn ChartCanvas + Send + Sync>,
    pub chart_path: PathBuf,
    pub chart: Option<ChartHandle>,
}

impl Session {
    pub fn new(
        client: MindicadorClient,
        canvas: Arc<dyn ChartCanvas + Send + Sync>,
        chart_path: PathBuf,
    ) -> Self {
        Self {
            client,
            canvas,
            chart_path,
            chart: None,
        }
    }

    pub fn chart_target(&self) -> ChartTarget<'_> {
        ChartTarget {
            canvas: &*self.canvas,
            path: &self.chart_path,
        }
    }
}

/// What a submitted line asks the session to do next
#[derive(Debug, PartialEq)]
pub enum Reply {
    Text(String),
    Nothing,
    Quit,
}

/// Parse and run one submitted line
pub async fn dispatch(session: &mut Session, line: &str) -> Result<Reply, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = parts.split_first() else {
        return Ok(Reply::Nothing);
    };

    let text = match command.to_lowercase().as_str() {
        "convert" | "c" | "$convert" => convert::execute(session, args).await?,
        "list" | "ls" | "$list" => list::execute(),
        "help" | "?" | "$help" => help::execute(),
        "quit" | "exit" | "q" => return Ok(Reply::Quit),
        _ => return Err(format!("Unknown command '{}'. Type `help` for usage.", command)),
    };

    Ok(Reply::Text(text))
}

/// Run a line and print its outcome. Returns `false` once the session should end.
pub async fn handle_line(session: &mut Session, line: &str) -> bool {
    match dispatch(session, line).await {
        Ok(Reply::Text(text)) => {
            println!("{}", text);
            true
        }
        Ok(Reply::Nothing) => true,
        Ok(Reply::Quit) => false,
        Err(e) => {
            tracing::debug!("Command '{}' failed: {}", line.trim(), e);
            eprintln!("❌ {}", e);
            true
        }
    }
}
