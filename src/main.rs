//! Git Log API - structured git history over HTTP
//!
//! # Usage
//! ```bash
//! gitlog-api                          # Start server on 127.0.0.1:5000
//! gitlog-api --port 8080              # Start on another port
//! gitlog-api status                   # Check if running
//! gitlog-api kill                     # Stop running instance
//! gitlog-api check --repo ~/project   # Probe a running server
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitlog_api::config::ServerArgs;
use gitlog_api::git::GitLogCommand;
use gitlog_api::pidfile::{self, PidInfo};
use gitlog_api::{create_router, probe, AppState, HistoryService};

/// Git Log API - serve parsed git history as JSON
#[derive(Parser)]
#[command(name = "gitlog-api")]
#[command(about = "Serve graph-annotated git history as structured JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    server: ServerArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Check if gitlog-api is currently running
    Status,
    /// Stop the running gitlog-api instance
    Kill,
    /// Call every endpoint of a running server and report the results
    Check {
        /// Base URL of the server
        #[arg(long, default_value = "http://127.0.0.1:5000")]
        url: String,

        /// Repository to query (defaults to the current directory)
        #[arg(long)]
        repo: Option<PathBuf>,

        /// Maximum number of commits to request
        #[arg(long)]
        max_count: Option<u32>,
    },
}

fn handle_status() {
    let path = pidfile::default_path();
    match pidfile::read(&path) {
        Some(info) if pidfile::is_process_running(info.pid) => {
            println!("✓ gitlog-api is running");
            println!("  PID: {}", info.pid);
            println!("  URL: {}", info.url());
        }
        Some(_) => {
            println!("✗ gitlog-api is not running (stale PID file)");
            pidfile::remove(&path);
        }
        None => println!("✗ gitlog-api is not running"),
    }
}

fn handle_kill() {
    let path = pidfile::default_path();
    match pidfile::read(&path) {
        Some(info) if pidfile::is_process_running(info.pid) => {
            if pidfile::terminate(info.pid) {
                println!("✓ Stopped gitlog-api (PID {})", info.pid);
                pidfile::remove(&path);
            } else {
                println!("✗ Failed to stop gitlog-api (PID {})", info.pid);
            }
        }
        Some(_) => {
            println!("✗ gitlog-api is not running (stale PID file)");
            pidfile::remove(&path);
        }
        None => println!("✗ gitlog-api is not running"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Status) => {
            handle_status();
            return Ok(());
        }
        Some(Commands::Kill) => {
            handle_kill();
            return Ok(());
        }
        Some(Commands::Check {
            url,
            repo,
            max_count,
        }) => {
            let passed =
                tokio::task::spawn_blocking(move || probe::run(&url, repo, max_count)).await?;
            if !passed {
                std::process::exit(1);
            }
            return Ok(());
        }
        None => {}
    }

    let server = cli.server;
    server.validate()?;

    let pid_path = pidfile::default_path();
    if let Some(info) = pidfile::read(&pid_path) {
        if pidfile::is_process_running(info.pid) {
            eprintln!("✗ gitlog-api is already running (PID {})", info.pid);
            eprintln!("  URL: {}", info.url());
            eprintln!();
            eprintln!("Run 'gitlog-api kill' to stop it first.");
            std::process::exit(1);
        }
        pidfile::remove(&pid_path);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let command = GitLogCommand::new(server.git_bin.clone(), server.git_timeout());
    let service = HistoryService::new(command, server.access_policy())?;
    let state = AppState::new(service);
    let shutdown_token = state.shutdown.clone();

    let app = create_router(state)
        .layer(server.cors_layer()?)
        .layer(TraceLayer::new_for_http());

    let addr = server.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to {}: {}", addr, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    let pid_info = PidInfo::current(addr.clone());
    pidfile::write(&pid_path, &pid_info)?;

    println!();
    println!("  Git Log API");
    println!();
    println!("  Server:      {}", pid_info.url());
    println!("  Git timeout: {}s", server.git_timeout_secs);
    if server.max_commits > 0 {
        println!("  Max commits: {}", server.max_commits);
    }
    if !server.allowed_paths.is_empty() {
        let allowed: Vec<String> = server
            .allowed_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        println!("  Allowed:     {}", allowed.join(", "));
    }
    println!();
    println!("  Endpoints:");
    println!("    POST /api/git-log          - Parsed history and statistics");
    println!("    POST /api/repository-info  - Repository metadata");
    println!("    GET  /api/health           - Health check");
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    let shutdown = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        println!("\n  Shutting down...");
        shutdown_token.cancel();
        pidfile::remove(&pidfile::default_path());
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
