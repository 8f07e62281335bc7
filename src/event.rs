use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Next key press within `timeout`. Releases, repeats, resizes and mouse
/// input are skipped.
pub fn next_key_event(timeout: Duration) -> color_eyre::Result<Option<KeyEvent>> {
    while event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}
