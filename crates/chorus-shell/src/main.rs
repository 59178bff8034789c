//! chorus-shell: headless driver for the CHORUS iframe session cache.
//!
//! Replays navigation commands from a script file or stdin against a cache
//! built from the TOML config, printing one JSON line per command. With
//! `--watch`, edits to the config file resize the cache and refresh the
//! webapp table without a restart.

mod command;
mod host;

use std::path::PathBuf;
use std::sync::Arc;

use chorus_common::{ChorusError, Event, EventBus};
use chorus_config::{toml_loader, ChorusConfig, ReloadManager};
use chorus_iframe::{ConfigResolver, IframeSessionCache};
use clap::Parser;
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::host::Host;

#[derive(Parser)]
#[command(name = "chorus-shell", about = "Drive the CHORUS iframe session cache")]
struct Args {
    /// Config file. Defaults to the platform config directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `cache.capacity` from the config.
    #[arg(long)]
    capacity: Option<usize>,

    /// Read commands from this file instead of stdin.
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Reload the config file when it changes.
    #[arg(short, long)]
    watch: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("chorus-shell: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ChorusError> {
    let path = match args.config.clone() {
        Some(path) => path,
        None => toml_loader::default_config_path()?,
    };

    let (config, mut reloads) = if args.watch {
        let (config, rx) = ReloadManager::start(path.clone()).await;
        (config, Some(rx))
    } else if args.config.is_some() {
        (chorus_config::load_config_from(&path)?, None)
    } else {
        (chorus_config::load_config()?, None)
    };

    init_tracing(&config);
    info!(config = %path.display(), watch = args.watch, "chorus-shell starting");

    let bus = EventBus::new(config.cache.event_buffer as usize);
    spawn_event_logger(bus.subscribe());

    let resolver = Arc::new(ConfigResolver::from_config(&config));
    let cache = IframeSessionCache::from_config(&config.cache, resolver.clone())?
        .with_events(bus.clone());
    if let Some(capacity) = args.capacity {
        cache.set_capacity(capacity)?;
    }
    let cache = Arc::new(cache);
    let mut host = Host::new(cache.clone(), resolver);

    let reader: Box<dyn AsyncBufRead + Unpin + Send> = match &args.script {
        Some(script) => Box::new(BufReader::new(tokio::fs::File::open(script).await?)),
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                line_no += 1;
                match Command::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(command)) => match host.execute(command).await {
                        Ok(output) => println!("{output}"),
                        Err(e) => {
                            warn!(line = line_no, error = %e, "command failed");
                            println!("{}", json!({ "line": line_no, "error": e.to_string() }));
                        }
                    },
                    Err(e) => {
                        warn!(line = line_no, error = %e, "invalid command");
                        println!("{}", json!({ "line": line_no, "error": e.to_string() }));
                    }
                }
            }
            config = next_config(&mut reloads) => {
                match host.apply_config(&config) {
                    Ok(evicted) => {
                        bus.publish(Event::ConfigReloaded);
                        let plan = host.render();
                        println!("{}", json!({ "reloaded": true, "evicted": evicted, "render": plan }));
                    }
                    Err(e) => warn!(error = %e, "failed to apply reloaded config"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    println!("{}", json!({ "frames": cache.frames() }));
    bus.publish(Event::Shutdown);
    info!(frames = cache.len(), "chorus-shell exiting");
    Ok(())
}

fn init_tracing(config: &ChorusConfig) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_directive().into()),
        )
        .init();
}

fn spawn_event_logger(mut rx: broadcast::Receiver<Event>) {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(Event::Shutdown) => break,
                Ok(event) => debug!(?event, "cache event"),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("event logger lagged by {n} events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

/// Next config published by the reload manager. Never resolves when not
/// watching, or once the manager has stopped.
async fn next_config(reloads: &mut Option<watch::Receiver<ChorusConfig>>) -> ChorusConfig {
    loop {
        match reloads {
            Some(rx) => {
                if rx.changed().await.is_ok() {
                    return rx.borrow_and_update().clone();
                }
            }
            None => std::future::pending::<()>().await,
        }
        *reloads = None;
    }
}
