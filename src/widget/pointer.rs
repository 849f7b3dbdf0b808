use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

/// Translate a terminal mouse event into the drag pointer signal.
///
/// The outer `Option` filters: `None` means the event is irrelevant to the
/// drag gesture and should not be fed to the controller at all. The inner
/// value is the signal itself — `Some(position)` while the left button is
/// held, `None` when it is released (gesture end).
pub fn drag_signal(event: &MouseEvent) -> Option<Option<Position>> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            Some(Some(Position::new(event.column, event.row)))
        }
        MouseEventKind::Up(MouseButton::Left) => Some(None),
        _ => None,
    }
}
