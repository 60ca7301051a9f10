//! headerkind: content-type, accept and path traversal checks over HTTP.

use std::sync::Arc;

use headerkind_core::HeaderKindConfig;
use headerkind_server::{build_router, cli, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!("headerkind: HTTP header classification server");
    println!();
    println!("Usage: headerkind [command]");
    println!();
    println!("Commands:");
    println!("  (none)                   Start the server");
    println!("  check-path <path>        Report whether a path contains traversal");
    println!("  help                     Show this help message");
    println!();
    println!("Environment:");
    println!("  PORT                          Listen port (default 3003)");
    println!("  HEADERKIND_BIND               Bind address (default 0.0.0.0)");
    println!("  HEADERKIND_MAX_DECODE_ROUNDS  Percent-decoding rounds (default 4)");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = HeaderKindConfig::from_env();
    let args: Vec<String> = std::env::args().collect();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "check-path" => {
                let (message, code) = cli::check_path(args.get(2).map(String::as_str), &config);
                if code == cli::EXIT_USAGE {
                    eprintln!("{message}");
                } else {
                    println!("{message}");
                }
                std::process::exit(code);
            }
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'headerkind help' for usage.", args[1]);
                std::process::exit(cli::EXIT_USAGE);
            }
        }
    }

    let addr = config.addr();
    let state = Arc::new(AppState::new(config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("headerkind server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
