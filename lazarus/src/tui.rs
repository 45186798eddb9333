//! Terminal lifecycle management for lazarus.
//!
//! The TUI renders to stderr so stdout stays free for shell pipelines. Log
//! output goes to a file (see `logging.rs`) because the alternate screen owns
//! the terminal while the app is running.

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use signal_hook::consts::SIGTERM;
use signal_hook::flag::register;
use std::io::{stderr, BufWriter, Stderr};
use std::panic;
use std::sync::{atomic::AtomicBool, Arc};

/// CrosstermBackend over a buffered stderr writer.
pub type Tui = Terminal<CrosstermBackend<BufWriter<Stderr>>>;

/// Enables raw mode and enters the alternate screen.
///
/// Call [`restore_tui`] on every exit path.
pub fn init_tui() -> std::io::Result<Tui> {
    let mut out = BufWriter::new(stderr());
    enable_raw_mode()?;
    execute!(out, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(out))
}

/// Leaves the alternate screen and disables raw mode. Idempotent.
///
/// ratatui does not restore the terminal on `Drop`, so this must run on every
/// exit path, including the panic hook.
pub fn restore_tui() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(stderr(), LeaveAlternateScreen)?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before the panic message
/// prints, then chains to the previous hook.
///
/// Must be called before [`init_tui`].
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_tui();
        tracing::error!(%panic_info, "panic");
        original_hook(panic_info);
    }));
}

/// Registers a SIGTERM handler that flips the returned flag.
///
/// The main loop polls the flag on its heartbeat.
pub fn register_sigterm() -> std::io::Result<Arc<AtomicBool>> {
    let term = Arc::new(AtomicBool::new(false));
    register(SIGTERM, Arc::clone(&term))?;
    Ok(term)
}
