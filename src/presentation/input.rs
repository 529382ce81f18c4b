use crate::application::App;
use crate::domain::NavKey;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use std::collections::VecDeque;
use std::io;

/// Device-independent input delivered to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Navigate(NavKey),
    Click { column: u16, row: u16 },
    Clear,
    Quit,
    Redraw,
}

/// Capability that turns raw input into [`InputEvent`]s, one at a time.
///
/// `Ok(None)` means the source is exhausted.
pub trait KeySource {
    fn next_event(&mut self) -> io::Result<Option<InputEvent>>;
}

/// Reads keyboard, mouse and resize events from the terminal.
#[derive(Debug, Default)]
pub struct TerminalKeySource;

impl TerminalKeySource {
    pub fn new() -> Self {
        Self
    }

    pub fn map_key(code: KeyCode) -> InputEvent {
        match code {
            KeyCode::Up | KeyCode::Char('k') => InputEvent::Navigate(NavKey::Up),
            KeyCode::Down | KeyCode::Char('j') => InputEvent::Navigate(NavKey::Down),
            KeyCode::Left | KeyCode::Char('h') => InputEvent::Navigate(NavKey::Left),
            KeyCode::Right | KeyCode::Char('l') => InputEvent::Navigate(NavKey::Right),
            KeyCode::Esc => InputEvent::Clear,
            KeyCode::Char('q') => InputEvent::Quit,
            _ => InputEvent::Navigate(NavKey::None),
        }
    }

    pub fn map_event(event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(Self::map_key(key.code)),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                Some(InputEvent::Click {
                    column: mouse.column,
                    row: mouse.row,
                })
            }
            Event::Resize(_, _) => Some(InputEvent::Redraw),
            _ => None,
        }
    }
}

impl KeySource for TerminalKeySource {
    fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        loop {
            if let Some(input) = Self::map_event(event::read()?) {
                return Ok(Some(input));
            }
        }
    }
}

/// Replays a fixed sequence of events.
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeySource {
    events: VecDeque<InputEvent>,
}

impl ScriptedKeySource {
    pub fn new<I>(events: I) -> Self
    where
        I: IntoIterator<Item = InputEvent>,
    {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Parses a comma separated key list such as `down,right,right`.
    pub fn from_keys(list: &str) -> Result<Self, String> {
        let keys = list
            .split(',')
            .filter(|key| !key.trim().is_empty())
            .map(|key| key.parse::<NavKey>().map(InputEvent::Navigate))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(keys))
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl KeySource for ScriptedKeySource {
    fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        Ok(self.events.pop_front())
    }
}

pub struct InputHandler;

impl InputHandler {
    /// Applies one event to the app. Returns `false` when the app should exit.
    pub fn handle_event(app: &mut App, event: InputEvent) -> bool {
        match event {
            InputEvent::Navigate(key) => {
                app.navigate(key);
            }
            InputEvent::Click { column, row } => {
                app.click(column, row);
            }
            InputEvent::Clear => app.clear_selection(),
            InputEvent::Quit => return false,
            InputEvent::Redraw => {}
        }
        true
    }

    /// Feeds events from `source` until it is exhausted or asks to quit.
    pub fn drain(app: &mut App, source: &mut dyn KeySource) -> io::Result<()> {
        while let Some(event) = source.next_event()? {
            if !Self::handle_event(app, event) {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CellPath, Selection, TableStyle};
    use crate::infrastructure::GridRepository;
    use crate::presentation::styled_grid;
    use crossterm::event::{KeyEvent, KeyEventState, KeyModifiers, MouseEvent};

    fn weather_app() -> App {
        let style = TableStyle::default();
        App::new(styled_grid(GridRepository::default_grid(), &style), style)
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_map_key() {
        assert_eq!(TerminalKeySource::map_key(KeyCode::Up), InputEvent::Navigate(NavKey::Up));
        assert_eq!(TerminalKeySource::map_key(KeyCode::Char('j')), InputEvent::Navigate(NavKey::Down));
        assert_eq!(TerminalKeySource::map_key(KeyCode::Char('h')), InputEvent::Navigate(NavKey::Left));
        assert_eq!(TerminalKeySource::map_key(KeyCode::Right), InputEvent::Navigate(NavKey::Right));
        assert_eq!(TerminalKeySource::map_key(KeyCode::Esc), InputEvent::Clear);
        assert_eq!(TerminalKeySource::map_key(KeyCode::Char('q')), InputEvent::Quit);
        assert_eq!(TerminalKeySource::map_key(KeyCode::Tab), InputEvent::Navigate(NavKey::None));
    }

    #[test]
    fn test_map_event_ignores_releases() {
        assert_eq!(
            TerminalKeySource::map_event(key(KeyCode::Down, KeyEventKind::Press)),
            Some(InputEvent::Navigate(NavKey::Down))
        );
        assert_eq!(TerminalKeySource::map_event(key(KeyCode::Down, KeyEventKind::Release)), None);
    }

    #[test]
    fn test_map_event_mouse_and_resize() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            TerminalKeySource::map_event(click),
            Some(InputEvent::Click { column: 12, row: 4 })
        );

        let right_click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: 12,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(TerminalKeySource::map_event(right_click), None);
        assert_eq!(TerminalKeySource::map_event(Event::Resize(80, 24)), Some(InputEvent::Redraw));
    }

    #[test]
    fn test_scripted_source_from_keys() {
        let mut source = ScriptedKeySource::from_keys("down, right,,Up").unwrap();
        assert_eq!(source.remaining(), 3);
        assert_eq!(source.next_event().unwrap(), Some(InputEvent::Navigate(NavKey::Down)));
        assert_eq!(source.next_event().unwrap(), Some(InputEvent::Navigate(NavKey::Right)));
        assert_eq!(source.next_event().unwrap(), Some(InputEvent::Navigate(NavKey::Up)));
        assert_eq!(source.next_event().unwrap(), None);

        assert!(ScriptedKeySource::from_keys("down,jump").is_err());
    }

    #[test]
    fn test_drain_full_traversal() {
        let mut app = weather_app();
        let mut source =
            ScriptedKeySource::from_keys("down,right,right,right,down,down").unwrap();
        InputHandler::drain(&mut app, &mut source).unwrap();
        assert_eq!(app.selected(), Selection::Selected(CellPath::new(2, 3)));
    }

    #[test]
    fn test_drain_stops_at_quit() {
        let mut app = weather_app();
        let mut source = ScriptedKeySource::new([
            InputEvent::Navigate(NavKey::Up),
            InputEvent::Quit,
            InputEvent::Navigate(NavKey::Right),
        ]);
        InputHandler::drain(&mut app, &mut source).unwrap();
        assert_eq!(app.selected(), Selection::Selected(CellPath::new(2, 0)));
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_handle_event_clear_and_quit() {
        let mut app = weather_app();
        assert!(InputHandler::handle_event(&mut app, InputEvent::Navigate(NavKey::Left)));
        assert_eq!(app.selected(), Selection::Selected(CellPath::new(0, 3)));

        assert!(InputHandler::handle_event(&mut app, InputEvent::Clear));
        assert_eq!(app.selected(), Selection::Unselected);

        assert!(InputHandler::handle_event(&mut app, InputEvent::Redraw));
        assert!(!InputHandler::handle_event(&mut app, InputEvent::Quit));
    }
}
