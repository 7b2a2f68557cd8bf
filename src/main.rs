//! tool-output-tui - a terminal viewer for pre-generated tool output files
//!
//! A mapper document names the view for each tool; selecting a file loads it
//! in the background and renders it with that view. Built on the component
//! architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod error;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::{Cli, Config};
use crate::services::DirectorySource;
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::fs::{self, File};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(&cli);

    let log_path = cli.log_file.clone().or_else(Config::default_log_path);
    if let Some(path) = log_path.as_deref() {
        if let Err(err) = init_logging(path) {
            eprintln!("Logging disabled: {:#}", err);
        }
    }

    if cli.save_config {
        if let Err(err) = config.save() {
            warn!(error = %err, "could not save config");
        }
    }

    info!(dir = %config.tool_output_dir, page_size = config.page_size, "starting");

    let source = Arc::new(DirectorySource::new(&config.tool_output_dir));
    let mut app = App::new(&config, source, cli.host_output.clone());
    app.init()?;

    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file; the terminal belongs to the UI. On error nothing is
/// installed and the app runs without logging.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("could not create log directory {}", parent.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("could not open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tool_output_tui=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(err) = app.draw(frame, frame.area()) {
                warn!(error = %err, "draw failed");
            }
        })?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            // No event before the tick timeout
            None => Some(Action::Tick),
        };

        // Actions may produce a follow-up action
        let mut current = action;
        while let Some(a) = current {
            current = app.update(a)?;
        }
    }

    info!("exiting");
    Ok(())
}
