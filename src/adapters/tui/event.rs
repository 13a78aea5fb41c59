use color_eyre::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use std::time::Duration;

use crate::application::AppResult;
use crate::domain::{ContactSubmission, Project};

#[derive(Debug, Clone)]
pub enum AppEvent {
    // Navigation
    Quit,
    CloseModal,
    Reload,

    // Scrolling
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollTop,
    ScrollBottom,

    // Focus
    NextFocus,
    PreviousFocus,
    Activate,

    // Input handling
    Character(char),
    Backspace,

    // Store results, tagged with the page mount they were issued for
    ProjectsLoaded {
        generation: u64,
        result: AppResult<Vec<Project>>,
    },
    ProjectLoaded {
        generation: u64,
        result: AppResult<Option<Project>>,
    },
    ContactSubmitted {
        generation: u64,
        result: AppResult<ContactSubmission>,
    },

    // Other
    Tick,
}

#[derive(Default)]
pub struct EventHandler {
    should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Wait up to `timeout` for terminal input.
    pub fn next_event(&mut self, timeout: Duration) -> Result<AppEvent> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                    Ok(self.handle_key_event(key_event))
                }
                Event::Mouse(mouse_event) => Ok(Self::handle_mouse_event(mouse_event)),
                _ => Ok(AppEvent::Tick),
            }
        } else {
            Ok(AppEvent::Tick)
        }
    }

    fn handle_mouse_event(mouse_event: MouseEvent) -> AppEvent {
        match mouse_event.kind {
            MouseEventKind::ScrollDown => AppEvent::ScrollDown,
            MouseEventKind::ScrollUp => AppEvent::ScrollUp,
            _ => AppEvent::Tick,
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) -> AppEvent {
        match key_event {
            // Global quit with Ctrl+C
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => {
                self.should_quit = true;
                AppEvent::Quit
            }

            KeyEvent {
                code: KeyCode::Char('r'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => AppEvent::Reload,

            KeyEvent {
                code: KeyCode::Esc, ..
            } => AppEvent::CloseModal,

            KeyEvent {
                code: KeyCode::Tab,
                modifiers: KeyModifiers::NONE,
                ..
            } => AppEvent::NextFocus,

            KeyEvent {
                code: KeyCode::BackTab,
                ..
            } => AppEvent::PreviousFocus,

            KeyEvent {
                code: KeyCode::Enter,
                ..
            } => AppEvent::Activate,

            KeyEvent {
                code: KeyCode::Down,
                ..
            } => AppEvent::ScrollDown,

            KeyEvent {
                code: KeyCode::Up, ..
            } => AppEvent::ScrollUp,

            KeyEvent {
                code: KeyCode::Char('u'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
            | KeyEvent {
                code: KeyCode::PageUp,
                ..
            } => AppEvent::PageUp,

            KeyEvent {
                code: KeyCode::Char('d'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
            | KeyEvent {
                code: KeyCode::PageDown,
                ..
            } => AppEvent::PageDown,

            KeyEvent {
                code: KeyCode::Home,
                ..
            } => AppEvent::ScrollTop,

            KeyEvent {
                code: KeyCode::End, ..
            } => AppEvent::ScrollBottom,

            // Letters stay characters; the app decides whether they are
            // commands or form input
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::NONE,
                ..
            } => AppEvent::Character(c),

            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::SHIFT,
                ..
            } => AppEvent::Character(c.to_uppercase().next().unwrap_or(c)),

            KeyEvent {
                code: KeyCode::Backspace,
                ..
            } => AppEvent::Backspace,

            _ => AppEvent::Tick,
        }
    }
}
