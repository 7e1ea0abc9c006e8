//! Keyboard sensor
//!
//! Turns key presses on a focused card into the same drag notifications the
//! pointer path produces. Arrow keys walk a cursor through the grid:
//! left/right step one card, up/down step one row of `columns` cards.

use crate::engine::DragEvent;
use dash_grid_types::{WidgetId, WidgetList};

/// Keys the sensor understands, already mapped from toolkit key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Pick up or drop (Space / Enter)
    Activate,
    Left,
    Right,
    Up,
    Down,
    /// Abort the drag (Escape)
    Cancel,
}

/// What the sensor wants the caller to do with a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorEvent {
    /// Forward to [`crate::DragAdapter::handle`]
    Drag(DragEvent),
    /// The keyboard cursor now rests on this widget
    Hover(WidgetId),
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    source: WidgetId,
    cursor: usize,
}

#[derive(Debug, Clone)]
pub struct KeyboardSensor {
    columns: usize,
    active: Option<ActiveDrag>,
}

impl KeyboardSensor {
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
            active: None,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Widget currently under the keyboard cursor
    pub fn cursor_target<'a>(&self, list: &'a WidgetList) -> Option<&'a WidgetId> {
        self.active
            .as_ref()
            .and_then(|drag| list.at(drag.cursor))
            .map(|w| &w.id)
    }

    /// Process a key press while `focused` has keyboard focus.
    ///
    /// Returns `None` when the key does nothing in the current state.
    pub fn handle_key(
        &mut self,
        key: KeyAction,
        focused: &WidgetId,
        list: &WidgetList,
    ) -> Option<SensorEvent> {
        let Some(drag) = self.active.as_mut() else {
            if key != KeyAction::Activate {
                return None;
            }
            let cursor = list.position(focused)?;
            self.active = Some(ActiveDrag {
                source: focused.clone(),
                cursor,
            });
            return Some(SensorEvent::Drag(DragEvent::Start {
                source: focused.clone(),
            }));
        };

        match key {
            KeyAction::Activate => {
                let target = list.at(drag.cursor).map(|w| w.id.clone());
                let source = drag.source.clone();
                self.active = None;
                Some(SensorEvent::Drag(DragEvent::End { source, target }))
            }
            KeyAction::Cancel => {
                let source = drag.source.clone();
                self.active = None;
                Some(SensorEvent::Drag(DragEvent::Cancel { source }))
            }
            KeyAction::Left | KeyAction::Right | KeyAction::Up | KeyAction::Down => {
                let next = step(drag.cursor, key, self.columns, list.len())?;
                drag.cursor = next;
                list.at(next).map(|w| SensorEvent::Hover(w.id.clone()))
            }
        }
    }

    /// Drop any in-progress keyboard drag without emitting an event
    pub fn reset(&mut self) {
        self.active = None;
    }
}

impl Default for KeyboardSensor {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Next cursor index for an arrow key, or `None` at the grid edge
fn step(cursor: usize, key: KeyAction, columns: usize, len: usize) -> Option<usize> {
    let next = match key {
        KeyAction::Left => cursor.checked_sub(1)?,
        KeyAction::Right => cursor + 1,
        KeyAction::Up => cursor.checked_sub(columns)?,
        KeyAction::Down => cursor + columns,
        KeyAction::Activate | KeyAction::Cancel => return None,
    };
    (next < len).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DragAdapter, DragOutcome};

    fn id(s: &str) -> WidgetId {
        WidgetId::from(s)
    }

    #[test]
    fn test_arrow_keys_ignored_while_idle() {
        let list = WidgetList::default();
        let mut sensor = KeyboardSensor::new(3);
        assert_eq!(sensor.handle_key(KeyAction::Right, &id("1"), &list), None);
        assert_eq!(sensor.handle_key(KeyAction::Cancel, &id("1"), &list), None);
        assert!(!sensor.is_active());
    }

    #[test]
    fn test_activate_unknown_focus_does_nothing() {
        let list = WidgetList::default();
        let mut sensor = KeyboardSensor::new(3);
        assert_eq!(sensor.handle_key(KeyAction::Activate, &id("x"), &list), None);
        assert!(!sensor.is_active());
    }

    #[test]
    fn test_grid_coordinates() {
        // Three columns: 1 2 3 / 4
        let list = WidgetList::default();
        let mut sensor = KeyboardSensor::new(3);

        assert_eq!(
            sensor.handle_key(KeyAction::Activate, &id("1"), &list),
            Some(SensorEvent::Drag(DragEvent::Start { source: id("1") }))
        );
        assert_eq!(sensor.handle_key(KeyAction::Left, &id("1"), &list), None);
        assert_eq!(sensor.handle_key(KeyAction::Up, &id("1"), &list), None);
        assert_eq!(
            sensor.handle_key(KeyAction::Down, &id("1"), &list),
            Some(SensorEvent::Hover(id("4")))
        );
        // Row below does not exist
        assert_eq!(sensor.handle_key(KeyAction::Down, &id("1"), &list), None);
        assert_eq!(sensor.handle_key(KeyAction::Right, &id("1"), &list), None);
        assert_eq!(
            sensor.handle_key(KeyAction::Up, &id("1"), &list),
            Some(SensorEvent::Hover(id("1")))
        );
        assert_eq!(
            sensor.handle_key(KeyAction::Right, &id("1"), &list),
            Some(SensorEvent::Hover(id("2")))
        );
        assert_eq!(sensor.cursor_target(&list), Some(&id("2")));
    }

    #[test]
    fn test_zero_columns_clamped() {
        let mut sensor = KeyboardSensor::new(0);
        assert_eq!(sensor.columns(), 1);
        sensor.set_columns(0);
        assert_eq!(sensor.columns(), 1);
    }

    #[test]
    fn test_column_change_mid_drag_changes_vertical_step() {
        let list = WidgetList::default();
        let mut sensor = KeyboardSensor::new(3);
        sensor.handle_key(KeyAction::Activate, &id("1"), &list);

        // Window narrowed to one column: Down is the next widget
        sensor.set_columns(1);
        assert!(sensor.is_active());
        assert_eq!(
            sensor.handle_key(KeyAction::Down, &id("1"), &list),
            Some(SensorEvent::Hover(id("2")))
        );

        // Widened to two: 2 -> 4
        sensor.set_columns(2);
        assert_eq!(
            sensor.handle_key(KeyAction::Down, &id("1"), &list),
            Some(SensorEvent::Hover(id("4")))
        );
    }

    #[test]
    fn test_keyboard_drop_reorders_through_adapter() {
        let mut adapter = DragAdapter::default();
        let mut sensor = KeyboardSensor::new(2);
        let focused = id("3");

        let keys = [KeyAction::Activate, KeyAction::Right, KeyAction::Up, KeyAction::Activate];
        let mut outcomes = Vec::new();
        for key in keys {
            match sensor.handle_key(key, &focused, adapter.list()) {
                Some(SensorEvent::Drag(event)) => outcomes.push(adapter.handle(event)),
                Some(SensorEvent::Hover(target)) => {
                    assert!(adapter.hover(&target).is_some());
                }
                None => {}
            }
        }

        // 1 2 / 3 4: from "3" right to "4", up to "2"
        assert_eq!(outcomes, vec![DragOutcome::Started, DragOutcome::Moved { from: 2, to: 1 }]);
        let titles: Vec<_> = adapter.list().iter().map(|w| w.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Revenue Chart", "Churn Rate", "Active Users", "Recent Signups"]
        );
    }

    #[test]
    fn test_cancel_emits_cancel() {
        let mut adapter = DragAdapter::default();
        let mut sensor = KeyboardSensor::new(2);

        let start = sensor.handle_key(KeyAction::Activate, &id("1"), adapter.list());
        if let Some(SensorEvent::Drag(event)) = start {
            adapter.handle(event);
        }
        sensor.handle_key(KeyAction::Down, &id("1"), adapter.list());

        let cancel = sensor.handle_key(KeyAction::Cancel, &id("1"), adapter.list());
        assert_eq!(cancel, Some(SensorEvent::Drag(DragEvent::Cancel { source: id("1") })));
        if let Some(SensorEvent::Drag(event)) = cancel {
            assert_eq!(adapter.handle(event), DragOutcome::Cancelled);
        }
        assert!(!sensor.is_active());
        assert_eq!(adapter.list(), &WidgetList::default());
    }
}
