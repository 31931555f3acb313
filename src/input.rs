use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::heading::Heading;

/// High-level input events consumed by the shell loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShellInput {
    Heading(Heading),
    Restart,
    Quit,
}

/// Waits up to `timeout` for a key press and maps it to a shell input.
///
/// Returns `Ok(None)` on timeout and for keys the game does not use.
pub fn poll_input(timeout: Duration) -> io::Result<Option<ShellInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) => Ok(map_key(key)),
        _ => Ok(None),
    }
}

/// How long the shell may wait for input before it has to tick or redraw.
///
/// While running this is the time left until the next tick. A finished game
/// never ticks again, so the shell waits a full interval between redraws.
#[must_use]
pub fn poll_timeout(
    tick_interval: Duration,
    since_last_tick: Duration,
    finished: bool,
) -> Duration {
    if finished {
        return tick_interval;
    }
    tick_interval.saturating_sub(since_last_tick)
}

/// Maps arrows, WASD and HJKL to headings, plus restart and quit keys.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<ShellInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(ShellInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => ShellInput::Heading(Heading::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => ShellInput::Heading(Heading::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => ShellInput::Heading(Heading::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => ShellInput::Heading(Heading::Right),
        KeyCode::Char('r' | 'R') | KeyCode::Enter => ShellInput::Restart,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => ShellInput::Quit,
        _ => return None,
    };
    Some(input)
}
