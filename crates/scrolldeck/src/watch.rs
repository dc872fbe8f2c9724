use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};

/// Watches the deck file and reports debounced changes, waking the UI so a
/// reload doesn't wait for the next input event.
pub struct DeckWatcher {
    rx: mpsc::Receiver<()>,
    _debouncer: Debouncer<RecommendedWatcher>,
}

impl DeckWatcher {
    pub fn new(path: &Path, ctx: eframe::egui::Context) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let mut debouncer = new_debouncer(
            Duration::from_millis(250),
            move |result: DebounceEventResult| {
                if result.is_ok() {
                    let _ = tx.send(());
                    ctx.request_repaint();
                }
            },
        )?;
        debouncer.watcher().watch(path, RecursiveMode::NonRecursive)?;
        Ok(Self {
            rx,
            _debouncer: debouncer,
        })
    }

    /// Drain pending notifications; true if the file changed since last call.
    pub fn changed(&self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}
