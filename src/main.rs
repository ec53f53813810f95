//! graph-batch - issue Graph API reads as batched calls
//!
//! Every PATH is requested concurrently, so the reads coalesce into as few
//! composite calls as the batch size allows.

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use graph_batch::utils::logging::init_tracing;
use graph_batch::{ApiRequest, Config, GraphBatchClient, SubResponse};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "graph-batch", version, about)]
struct Cli {
    /// YAML configuration file; environment variables are used when absent
    #[arg(short, long, env = "GRAPH_BATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Override the maximum batch size
    #[arg(long)]
    max_batch_size: Option<usize>,

    /// Override the batch window in milliseconds
    #[arg(long)]
    window_ms: Option<u64>,

    /// Paths relative to the API root, e.g. `me?fields=id,name`
    #[arg(required = true)]
    paths: Vec<String>,
}

impl Cli {
    async fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path).await?,
            None => Config::from_env()?,
        };

        if self.json_logs {
            config.logging.json = true;
        }
        if let Some(size) = self.max_batch_size {
            config.batch = config.batch.with_max_batch_size(size);
        }
        if let Some(window) = self.window_ms {
            config.batch = config.batch.with_batch_window(Duration::from_millis(window));
        }
        config.validate()?;
        Ok(config)
    }
}

fn render(path: &str, result: graph_batch::Result<SubResponse>) -> (Value, bool) {
    match result {
        Ok(response) => {
            let body = response
                .body
                .as_deref()
                .map(|b| serde_json::from_str(b).unwrap_or_else(|_| Value::String(b.to_string())))
                .unwrap_or(Value::Null);
            let ok = response.is_success();
            (json!({"path": path, "status": response.code, "body": body}), ok)
        }
        Err(e) => (json!({"path": path, "error": e.to_string()}), false),
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = cli.load_config().await?;
    init_tracing(&config.logging)?;

    let client = GraphBatchClient::new(config).context("failed to create client")?;
    client.start().await?;

    let calls = cli
        .paths
        .iter()
        .map(|path| client.call_raw(ApiRequest::get(path.as_str())));
    let results = futures::future::join_all(calls).await;

    let mut all_ok = true;
    for (path, result) in cli.paths.iter().zip(results) {
        let (line, ok) = render(path, result);
        all_ok &= ok;
        println!("{}", line);
    }

    client.stop().await?;
    let stats = client.stats();
    info!(calls = stats.accepted, batches = stats.batches, "done");
    Ok(all_ok)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
