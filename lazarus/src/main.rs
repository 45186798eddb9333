//! lazarus: terminal client for the Legacy Lazarus refactoring agent.
//!
//! Entry point for the `lazarus` binary. Wires together logging, config, the
//! terminal lifecycle (`tui`), the unified event bus (`event`), the highlight
//! worker (`highlight`), and rendering (`ui`). Run orchestration itself lives
//! in `lazarus-core`.
//!
//! # Startup sequence
//!
//! 1. File logging, then config. Both happen before terminal init so a bad
//!    config never leaves the terminal in raw mode.
//! 2. `install_panic_hook()` before `init_tui()`.
//! 3. `register_sigterm()`; the flag is polled on a 50 ms heartbeat.
//! 4. `init_tui()`, then the event task, run bridge, and highlight worker.
//!
//! `restore_tui()` runs once after the event loop exits. Inside the loop only
//! the draw call uses `?`, and its error is caught before reaching `restore_tui`.

mod app;
mod config;
mod event;
mod highlight;
mod logging;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;

use lazarus_core::backend::HttpBackend;
use lazarus_core::pacing::Pacing;

use crate::event::AppEvent;
use crate::ui::keybindings::{handle_key, KeyAction};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    logging::init_logging(std::path::Path::new(".lazarus"))?;
    let cfg = config::load_config(&config::config_path());
    let theme = theme::Theme::from_name(&cfg.theme);
    let pacing = Pacing::from(&cfg.pacing);
    let backend = HttpBackend::new(&cfg.backend.base_url);
    let legacy_file = cfg.backend.legacy_file.clone();
    tracing::info!(base_url = backend.base_url(), %legacy_file, "lazarus starting");

    let mut state = app::AppState::new();

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let run_tx = event::run_event_bridge(handler.tx.clone());
    let highlight_tx = highlight::spawn_worker(handler.tx.clone())?;
    let mut rx = handler.rx;

    let mut loop_result = Ok(());

    'event_loop: loop {
        tokio::select! {
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(AppEvent::Render) => {
                        let draw = terminal.draw(|frame| {
                            ui::render(frame, &mut state, &theme, backend.base_url())
                        });
                        if let Err(e) = draw {
                            loop_result = Err(e);
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Tick) => state.tick(),
                    Some(AppEvent::Key(key)) => match handle_key(key, &mut state) {
                        KeyAction::Quit => break 'event_loop,
                        KeyAction::Activate => {
                            state.activate(backend.clone(), pacing, &legacy_file, run_tx.clone());
                        }
                        KeyAction::Continue => {}
                    },
                    Some(AppEvent::Run(run_event)) => {
                        if state.apply_run_event(run_event) {
                            let _ = highlight_tx.send(state.highlight_request(&legacy_file));
                        }
                    }
                    Some(AppEvent::Highlighted(payload)) => state.apply_highlight(*payload),
                    Some(AppEvent::Resize) => {}
                    None => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    state.shutdown();
    tui::restore_tui()?;
    tracing::info!("lazarus exiting");
    loop_result
}
