//! Parley terminal client.
//!
//! # Usage
//!
//! ```bash
//! # Connect on startup
//! parley --server ws://localhost:8080/ws --token "$TOKEN"
//!
//! # Start idle, connect later with /connect
//! PARLEY_TOKEN=secret parley
//! ```

use std::{
    io::{self, BufRead, Write},
    thread,
};

use clap::Parser;
use parley_app::{Command, Runtime};
use parley_cli::{CliError, Input, LineParser, Renderer, WsDriver};
use parley_client::TransportConfig;
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Parley chat client
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(about = "Line-oriented client for Parley chat servers")]
#[command(version)]
struct Args {
    /// WebSocket endpoint to connect to on startup
    #[arg(short, long)]
    server: Option<String>,

    /// Auth token presented during the handshake
    #[arg(short, long, env = "PARLEY_TOKEN", default_value = "", hide_env_values = true)]
    token: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Outbound frames buffered before new ones are dropped
    #[arg(long, default_value_t = TransportConfig::default().outbound_capacity)]
    outbound_capacity: usize,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    Ok(run(args).await?)
}

async fn run(args: Args) -> Result<(), CliError> {
    let config =
        TransportConfig { outbound_capacity: args.outbound_capacity, ..Default::default() };
    let (runtime, handle) = Runtime::new(WsDriver::new(config));
    let runtime = tokio::spawn(runtime.run());

    if let Some(endpoint) = args.server {
        handle.submit(Command::Connect { endpoint, auth_token: args.token.clone() }).await;
    }

    let parser = LineParser::new(args.token);
    let mut snapshots = handle.subscribe();
    let mut renderer = Renderer::new(snapshots.borrow_and_update().clone());
    let mut lines = spawn_stdin_reader();
    let mut out = io::stdout();

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line.transpose()? else { break };
                let session = snapshots.borrow().clone();
                match parser.parse(&line, &session) {
                    Ok(Some(Input::Command(command))) => {
                        if !handle.submit(command).await {
                            break;
                        }
                    },
                    Ok(Some(Input::Quit)) => break,
                    Ok(None) => {},
                    Err(e) => writeln!(out, "! {e}")?,
                }
            },
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let session = snapshots.borrow_and_update().clone();
                for line in renderer.render(&session) {
                    writeln!(out, "{line}")?;
                }
            },
        }
    }

    drop(handle);
    let session = runtime.await?;
    tracing::debug!(channels = session.channels().len(), "session ended");
    Ok(())
}

/// Lines from stdin, read on a dedicated thread.
fn spawn_stdin_reader() -> mpsc::Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel(16);
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}
