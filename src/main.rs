//! toolbridge - command-line front end for the invocation engine.
//!
//! - `toolbridge list [--toolkit ID]`: print the built-in descriptors
//! - `toolbridge invoke --toolkit ID --action NAME [--params JSON]`: run one
//!   invocation against the configured executor and print its `data`

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use toolbridge_core::{Config, DescriptorRegistry, Error, HttpTransport, ToolEngine};

#[derive(Debug, Parser)]
#[command(name = "toolbridge", version, about = "Invoke remote toolkit actions")]
struct Cli {
    /// JSON config file; environment variables override its values.
    #[arg(long, env = "TOOLBRIDGE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List registered tool descriptors.
    List {
        #[arg(long)]
        toolkit: Option<String>,
    },
    /// Invoke one action and print its result data.
    Invoke {
        #[arg(long)]
        toolkit: String,
        #[arg(long)]
        action: String,
        /// Parameters as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let report = serde_json::json!({ "ok": false, "error": err.to_json() });
            eprintln!("{}", report);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, Error> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.apply_env()?;

    toolbridge_core::observability::init_tracing(&config.observability);

    match cli.command {
        Command::List { toolkit } => {
            let registry = DescriptorRegistry::builtin()?;
            Ok(registry.summary(toolkit.as_deref()))
        }
        Command::Invoke {
            toolkit,
            action,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| Error::validation(format!("--params is not valid JSON: {}", e)))?;

            let transport = HttpTransport::new(&config.transport)?;
            tracing::info!(endpoint = transport.url(), "invoking {}/{}", toolkit, action);

            let engine = ToolEngine::with_builtin_tools(Arc::new(transport))?;
            let data = engine.invoke(&toolkit, &action, params).await?;
            Ok(serde_json::to_string_pretty(&data)?)
        }
    }
}
