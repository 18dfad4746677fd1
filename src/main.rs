// src/main.rs
use anyhow::Result;
use std::io;
use std::process::ExitCode;

mod analysis;
mod app;
mod cli;
mod config;
mod error;
mod file;
mod state;
mod ui;
mod utils;

use cli::Command;
use config::Settings;
use state::{AppState, Screen};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    match cli::parse_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{}", cli::USAGE);
            Ok(())
        }
        Command::Dashboard { dataset } => {
            let settings = Settings::load()?.with_dataset(dataset);
            let mut state = AppState::new(settings);

            // A missing dataset is shown in the window instead of aborting
            if let Err(e) = state.reload_dataset() {
                log::warn!("{}", e);
                state.error_message = Some(e.to_string());
            }

            app::run_dashboard(state)
        }
        Command::Batch { file, dataset, plot } => {
            let settings = Settings::load()?;
            let (store, charts) = {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                cli::run_batch(&settings, &file, dataset, &mut out)?
            };

            if !plot {
                return Ok(());
            }

            let mut state = AppState::new(settings);
            if let Some(source) = store.source() {
                state.settings.dataset = source.to_path_buf();
            }
            state.set_store(store);
            for chart in charts {
                state.push_chart(chart);
            }
            if !state.charts.is_empty() {
                state.selected_chart = Some(0);
            }
            state.current_screen = Screen::Analysis;

            app::run_dashboard(state)
        }
    }
}
