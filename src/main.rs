//! Now-playing bridge driver
//!
//! Runs the bridge against stdin: one notification record per line, in the
//! textual `\0Music\0...` form. Pushes go to a logging stand-in sink, which
//! makes the binary useful for exercising the whole pipeline without the
//! target application's automation object installed.
//!
//! The OS-level listener that receives the real broadcast delivers payloads
//! to [`Bridge::handle_raw`] the same way this loop does.

use anyhow::{Context, Result};
use listening_now::sink::LogSink;
use listening_now::{config, Bridge};
use log::{info, warn};
use std::io::BufRead;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cfg = match config::default_config_path() {
        Some(path) => config::load_or_default(&path)?,
        None => {
            warn!("no config directory on this platform; using defaults");
            config::Config::default()
        }
    };
    info!(
        "starting bridge: template {:?}, watchdog {} min",
        cfg.display_template, cfg.watchdog_interval_mins
    );

    let mut bridge = Bridge::new(&cfg, Box::new(LogSink))?;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.is_empty() {
            continue;
        }
        if let Some(outcome) = bridge.handle_notification(&line) {
            info!("event handled: {outcome:?}");
        }
    }

    info!("input closed, shutting down");
    bridge.shutdown();
    Ok(())
}
