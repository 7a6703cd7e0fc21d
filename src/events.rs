//! Keyboard handling for the terminal interface.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

/// Time each poll waits for input before checking again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Blocks until the user presses a key that dismisses the final frame.
///
/// The terminal interface keeps the solved maze on screen until then, since the search itself
/// finishes without any input.
pub(crate) fn wait_for_quit() -> Result<()> {
    loop {
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if is_quit_key(key) {
                    return Ok(());
                }
            }
        }
    }
}

/// Whether a key event dismisses the final frame.
///
/// Only presses count, so that terminals reporting releases do not quit twice.
pub(crate) fn is_quit_key(key: KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter)
}
