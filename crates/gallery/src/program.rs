//! Terminal event loop.
//!
//! Sets the terminal up, feeds key presses to the [`App`] and redraws on
//! every event or tick. The terminal is restored when the session ends,
//! on early returns, and from a panic hook so an aborting panic still
//! leaves a usable shell.

use std::io::{self, Stdout, Write};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use tracing::{debug, info};

use crate::app::App;
use crate::messages::Key;

/// Errors that can occur while running the interactive session.
#[derive(thiserror::Error, Debug)]
pub enum ProgramError {
    /// Raw mode could not be enabled.
    #[error("failed to enable raw mode: {0}")]
    RawMode(#[source] io::Error),

    /// Reading terminal events failed.
    #[error("failed to read terminal events: {0}")]
    EventPoll(#[source] io::Error),

    /// Drawing a frame failed.
    #[error("failed to draw frame: {0}")]
    Render(#[source] io::Error),
}

/// Restores the terminal when dropped.
struct TerminalGuard {
    stdout: Stdout,
    alt_screen: bool,
}

impl TerminalGuard {
    fn new(alt_screen: bool) -> Result<Self, ProgramError> {
        enable_raw_mode().map_err(ProgramError::RawMode)?;
        let mut guard = Self {
            stdout: io::stdout(),
            alt_screen,
        };
        if alt_screen {
            execute!(guard.stdout, EnterAlternateScreen).map_err(ProgramError::Render)?;
        }
        execute!(guard.stdout, Hide).map_err(ProgramError::Render)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, Show);
        if self.alt_screen {
            let _ = execute!(self.stdout, LeaveAlternateScreen);
        }
        let _ = disable_raw_mode();
    }
}

static PANIC_HOOK: OnceLock<()> = OnceLock::new();

/// Chains a terminal reset in front of the existing panic hook.
///
/// Release builds abort on panic, so the guard's `Drop` never runs there.
fn install_panic_hook() {
    PANIC_HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            previous(info);
        }));
    });
}

fn restore_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
    let _ = stdout.flush();
}

/// Converts a crossterm key event, ignoring keys the gallery has no use for.
#[must_use]
pub fn key_from_event(event: KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return Some(Key::Interrupt);
    }
    Some(match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        _ => return None,
    })
}

fn draw(out: &mut impl Write, app: &App, width: u16, height: u16) -> io::Result<()> {
    let frame = app.view(usize::from(width), usize::from(height));
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    for (row, line) in frame.split('\n').take(usize::from(height)).enumerate() {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        queue!(out, MoveTo(0, row), Print(line))?;
    }
    out.flush()
}

/// Runs the interactive session until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, read or drawn to.
pub fn run(app: &mut App, tick: Duration, alt_screen: bool) -> Result<(), ProgramError> {
    install_panic_hook();
    let mut guard = TerminalGuard::new(alt_screen)?;
    let (mut width, mut height) = terminal::size().map_err(ProgramError::Render)?;
    info!(width, height, "interactive session started");

    let mut last_tick = Instant::now();
    draw(&mut guard.stdout, app, width, height).map_err(ProgramError::Render)?;

    while !app.should_quit() {
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout).map_err(ProgramError::EventPoll)? {
            match event::read().map_err(ProgramError::EventPoll)? {
                Event::Key(key_event) => {
                    if let Some(key) = key_from_event(key_event) {
                        app.handle_key(key);
                    }
                }
                Event::Resize(w, h) => {
                    debug!(width = w, height = h, "terminal resized");
                    width = w;
                    height = h;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            app.tick(last_tick.elapsed());
            last_tick = Instant::now();
        }

        draw(&mut guard.stdout, app, width, height).map_err(ProgramError::Render)?;
    }

    info!("interactive session finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn converts_navigation_keys() {
        assert_eq!(
            key_from_event(press(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(Key::Char('j'))
        );
        assert_eq!(
            key_from_event(press(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Key::BackTab)
        );
        assert_eq!(
            key_from_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Key::Interrupt)
        );
        assert_eq!(key_from_event(press(KeyCode::F(1), KeyModifiers::NONE)), None);
    }

    #[test]
    fn ignores_releases() {
        let mut event = press(KeyCode::Enter, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(key_from_event(event), None);
    }

    #[test]
    fn panic_hook_installs_once() {
        install_panic_hook();
        install_panic_hook();
        assert!(PANIC_HOOK.get().is_some());
    }

    #[test]
    fn frame_is_drawn_line_by_line() {
        let config = crate::config::Config {
            seed: Some(1),
            today: chrono::NaiveDate::from_ymd_opt(2025, 8, 7),
            ..crate::config::Config::default()
        };
        let app = App::new(&config)
            .unwrap()
            .with_theme(crate::theme::Theme::plain());
        let mut out = Vec::new();
        draw(&mut out, &app, 60, 12).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Widget Gallery"));
        assert!(text.contains("> DualSlider"));
    }
}
