//! Triagem — email triage server.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use triagem_core::TriagemConfig;
use triagem_ingest::{EmailInput, UploadedFile};
use triagem_llm::LLMConfig;
use triagem_server::{build_router, pipeline, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials and settings may live in a local .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "--classify" | "classify" => {
                if args.len() < 3 {
                    eprintln!("Usage: triagem classify <file.txt|file.pdf>");
                    std::process::exit(1);
                }
                let code = classify_file(&PathBuf::from(&args[2])).await?;
                std::process::exit(code);
            }
            "--help" | "-h" | "help" => {
                println!("Triagem — email triage server");
                println!();
                println!("Usage: triagem [command]");
                println!();
                println!("Commands:");
                println!("  (none)                   Start the server");
                println!("  classify <file>          Classify a local .txt or .pdf email");
                println!("  help                     Show this help message");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'triagem help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    // Normal server startup
    let config = TriagemConfig::from_env()?;
    let port = config.port;
    info!("Classification strategy: {}", config.strategy);

    let state = Arc::new(AppState::from_config(config, LLMConfig::from_env()));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Triagem server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Run the pipeline on a local file and print the JSON result.
/// Returns the process exit code.
async fn classify_file(path: &Path) -> anyhow::Result<i32> {
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string();

    let config = TriagemConfig::from_env()?;
    let state = AppState::from_config(config, LLMConfig::from_env());
    let input = EmailInput::File(UploadedFile::new(name, bytes));

    match pipeline::run(&state, input).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(0)
        }
        Err(e) => {
            eprintln!("{}", e);
            Ok(1)
        }
    }
}
