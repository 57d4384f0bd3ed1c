//! Element Quiz - chemical element flashcard and quiz TUI
//!
//! One screen, three modes: flash cards, free-text answers, and multiple
//! choice, with per-element mistake tracking.

mod config;
mod elements;
mod models;
mod quiz;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use models::Order;
use ui::App;

// ══════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ══════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "elquiz")]
#[command(author, version, about = "Chemical element flashcard and quiz TUI", long_about = None)]
struct Args {
    /// JSON file with a custom element set
    #[arg(short, long)]
    elements: Option<PathBuf>,

    /// Start with the element order shuffled
    #[arg(short, long)]
    shuffle: bool,
}

// ══════════════════════════════════════════════════════════════════════════
// Main Entry Point
// ══════════════════════════════════════════════════════════════════════════

fn main() -> Result<()> {
    let args = Args::parse();

    let element_set = match args.elements {
        Some(ref path) => elements::load_set(path)?,
        None => elements::default_set(),
    };

    let config = config::Config::load().unwrap_or_default();

    let order = if args.shuffle || config.start_shuffled {
        Order::Shuffled
    } else {
        Order::Fixed
    };

    run_tui(element_set, config, order)
}

fn run_tui(element_set: Vec<models::Element>, config: config::Config, order: Order) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(element_set, config, order);

    // Run main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        return Err(err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| app.render(frame))?;
        app.handle_events()?;
    }
    Ok(())
}
