//! Syntax highlighting for the code panels.
//!
//! syntect state is expensive to build, so it lives on one background
//! `std::thread` for the life of the app. The UI sends [`types::HighlightRequest`]s
//! over a crossbeam channel and receives `AppEvent::Highlighted` back.
pub mod types;
pub mod worker;

use crossbeam_channel::Sender;
use tokio::sync::mpsc::UnboundedSender;

use crate::event::AppEvent;
use types::HighlightRequest;

/// Starts the highlight worker thread and returns its request sender.
///
/// The thread exits when the returned sender is dropped.
pub fn spawn_worker(event_tx: UnboundedSender<AppEvent>) -> std::io::Result<Sender<HighlightRequest>> {
    let (tx, rx) = crossbeam_channel::unbounded();
    std::thread::Builder::new()
        .name("lazarus-highlight".to_owned())
        .spawn(move || worker::highlight_worker_loop(rx, event_tx))?;
    Ok(tx)
}
