//! Drag interaction adapter
//!
//! Owns the canonical [`WidgetList`] and is its only writer. Drag engines
//! feed it [`DragEvent`]s through [`DragAdapter::handle`]; a drop on a
//! different widget becomes a [`WidgetList::move_item`] call, and the new
//! order is pushed to every registered listener.

use crate::engine::{DragEngine, DragEvent};
use dash_grid_types::{Widget, WidgetId, WidgetList};
use log::{debug, info};

/// Callback receiving the widget order after a successful move
pub type OrderCallback = Box<dyn Fn(&[Widget])>;

/// Adapter state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { source: WidgetId },
}

/// What a notification did to the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// A drag began
    Started,
    /// The list was reordered
    Moved { from: usize, to: usize },
    /// Drag ended without a valid drop target
    Dropped,
    /// Drag was aborted by the engine
    Cancelled,
    /// The notification did not apply
    Ignored,
}

pub struct DragAdapter {
    list: WidgetList,
    state: DragState,
    listeners: Vec<OrderCallback>,
}

impl DragAdapter {
    pub fn new(list: WidgetList) -> Self {
        Self {
            list,
            state: DragState::Idle,
            listeners: Vec::new(),
        }
    }

    /// The canonical widget list
    pub fn list(&self) -> &WidgetList {
        &self.list
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Register every widget's region with the engine
    pub fn attach<E: DragEngine + ?Sized>(&self, engine: &mut E) {
        for widget in self.list.iter() {
            engine.register_draggable(&widget.id);
        }
    }

    /// Set a callback fired with the new order after every successful move
    pub fn connect_order_changed<F>(&mut self, callback: F)
    where
        F: Fn(&[Widget]) + 'static,
    {
        self.listeners.push(Box::new(callback));
    }

    /// Change a widget's title. Order is unaffected and listeners are not
    /// notified.
    pub fn set_title(&mut self, id: &WidgetId, title: impl Into<String>) -> bool {
        self.list.set_title(id, title)
    }

    /// Apply a drag notification
    pub fn handle(&mut self, event: DragEvent) -> DragOutcome {
        match event {
            DragEvent::Start { source } => self.start(source),
            DragEvent::End { source, target } => self.end(source, target),
            DragEvent::Cancel { source } => {
                debug!("Drag of {} cancelled", source);
                self.end(source, None);
                DragOutcome::Cancelled
            }
        }
    }

    /// Order hint while hovering `target` during a drag.
    ///
    /// Returns `None` when no drag is active. The canonical order is not
    /// touched until the drop.
    pub fn hover(&self, target: &WidgetId) -> Option<Vec<Widget>> {
        match &self.state {
            DragState::Dragging { source } => Some(self.list.preview_move(source, target)),
            DragState::Idle => None,
        }
    }

    fn start(&mut self, source: WidgetId) -> DragOutcome {
        if !self.list.contains(&source) {
            debug!("Ignoring drag start for unknown widget {}", source);
            return DragOutcome::Ignored;
        }
        if let DragState::Dragging { source: previous } = &self.state {
            debug!("Drag of {} replaced by {}", previous, source);
        }
        debug!("Drag started: {}", source);
        self.state = DragState::Dragging { source };
        DragOutcome::Started
    }

    fn end(&mut self, source: WidgetId, target: Option<WidgetId>) -> DragOutcome {
        // The engine's notification names the source; prefer our own record
        // if a drag is in progress.
        let source = match std::mem::take(&mut self.state) {
            DragState::Dragging { source: active } => {
                if active != source {
                    debug!("Drag end for {} while dragging {}", source, active);
                }
                active
            }
            DragState::Idle => source,
        };

        let Some(target) = target else {
            debug!("Drag of {} ended without a drop target", source);
            return DragOutcome::Dropped;
        };

        let from = self.list.position(&source);
        if !self.list.move_item(&source, &target) {
            return DragOutcome::Dropped;
        }

        let to = self.list.position(&source).unwrap_or_default();
        let from = from.unwrap_or_default();
        info!("Moved widget {} from {} to {}", source, from, to);

        let entries = self.list.entries();
        for listener in &self.listeners {
            listener(&entries);
        }
        DragOutcome::Moved { from, to }
    }
}

impl Default for DragAdapter {
    fn default() -> Self {
        Self::new(WidgetList::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn id(s: &str) -> WidgetId {
        WidgetId::from(s)
    }

    fn titles(widgets: &[Widget]) -> Vec<String> {
        widgets.iter().map(|w| w.title.clone()).collect()
    }

    #[derive(Default)]
    struct RecordingEngine {
        registered: Vec<WidgetId>,
    }

    impl DragEngine for RecordingEngine {
        fn register_draggable(&mut self, id: &WidgetId) {
            self.registered.push(id.clone());
        }
    }

    #[test]
    fn test_attach_registers_every_widget() {
        let adapter = DragAdapter::default();
        let mut engine = RecordingEngine::default();
        adapter.attach(&mut engine);
        assert_eq!(engine.registered, adapter.list().ids());
    }

    #[test]
    fn test_drop_on_other_widget_moves_and_notifies() {
        let mut adapter = DragAdapter::default();
        let emitted: Rc<RefCell<Vec<Vec<String>>>> = Rc::new(RefCell::new(Vec::new()));
        let emitted_clone = emitted.clone();
        adapter.connect_order_changed(move |widgets| {
            emitted_clone.borrow_mut().push(titles(widgets));
        });

        assert_eq!(adapter.handle(DragEvent::Start { source: id("3") }), DragOutcome::Started);
        assert!(adapter.is_dragging());

        let outcome = adapter.handle(DragEvent::End {
            source: id("3"),
            target: Some(id("2")),
        });
        assert_eq!(outcome, DragOutcome::Moved { from: 2, to: 1 });
        assert_eq!(adapter.state(), &DragState::Idle);

        let expected = vec!["Revenue Chart", "Churn Rate", "Active Users", "Recent Signups"];
        assert_eq!(titles(&adapter.list().entries()), expected);
        assert_eq!(emitted.borrow().as_slice(), &[expected]);
    }

    #[test]
    fn test_drop_without_target_leaves_order() {
        let mut adapter = DragAdapter::default();
        let calls = Rc::new(RefCell::new(0));
        let calls_clone = calls.clone();
        adapter.connect_order_changed(move |_| *calls_clone.borrow_mut() += 1);

        adapter.handle(DragEvent::Start { source: id("1") });
        let outcome = adapter.handle(DragEvent::End {
            source: id("1"),
            target: None,
        });

        assert_eq!(outcome, DragOutcome::Dropped);
        assert_eq!(adapter.list(), &WidgetList::default());
        assert_eq!(adapter.state(), &DragState::Idle);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_drop_on_self_or_unknown_is_ignored() {
        let mut adapter = DragAdapter::default();

        adapter.handle(DragEvent::Start { source: id("2") });
        let outcome = adapter.handle(DragEvent::End {
            source: id("2"),
            target: Some(id("2")),
        });
        assert_eq!(outcome, DragOutcome::Dropped);

        adapter.handle(DragEvent::Start { source: id("2") });
        let outcome = adapter.handle(DragEvent::End {
            source: id("2"),
            target: Some(id("nope")),
        });
        assert_eq!(outcome, DragOutcome::Dropped);
        assert_eq!(adapter.list(), &WidgetList::default());
    }

    #[test]
    fn test_cancel_returns_to_idle_without_moving() {
        let mut adapter = DragAdapter::default();
        adapter.handle(DragEvent::Start { source: id("1") });

        assert_eq!(adapter.handle(DragEvent::Cancel { source: id("1") }), DragOutcome::Cancelled);
        assert!(!adapter.is_dragging());
        assert_eq!(adapter.list(), &WidgetList::default());
    }

    #[test]
    fn test_start_for_unknown_widget_stays_idle() {
        let mut adapter = DragAdapter::default();
        assert_eq!(adapter.handle(DragEvent::Start { source: id("99") }), DragOutcome::Ignored);
        assert_eq!(adapter.state(), &DragState::Idle);
    }

    #[test]
    fn test_late_end_while_idle_still_validated() {
        let mut adapter = DragAdapter::default();

        let outcome = adapter.handle(DragEvent::End {
            source: id("1"),
            target: Some(id("4")),
        });
        assert_eq!(outcome, DragOutcome::Moved { from: 0, to: 3 });
        assert_eq!(
            titles(&adapter.list().entries()),
            vec!["Active Users", "Churn Rate", "Recent Signups", "Revenue Chart"]
        );

        // Repeating the stale notification with the same target is a self-move now
        let outcome = adapter.handle(DragEvent::End {
            source: id("1"),
            target: Some(id("1")),
        });
        assert_eq!(outcome, DragOutcome::Dropped);
    }

    #[test]
    fn test_hover_previews_without_committing() {
        let mut adapter = DragAdapter::default();
        assert!(adapter.hover(&id("1")).is_none());

        adapter.handle(DragEvent::Start { source: id("4") });
        let preview = adapter.hover(&id("1")).unwrap();
        assert_eq!(
            titles(&preview),
            vec!["Recent Signups", "Revenue Chart", "Active Users", "Churn Rate"]
        );
        assert_eq!(adapter.list(), &WidgetList::default());
    }

    #[test]
    fn test_set_title_does_not_reorder() {
        let mut adapter = DragAdapter::default();
        assert!(adapter.set_title(&id("4"), "New Signups"));
        assert_eq!(adapter.list().position(&id("4")), Some(3));
    }

    #[test]
    fn test_restart_replaces_source() {
        let mut adapter = DragAdapter::default();
        adapter.handle(DragEvent::Start { source: id("1") });
        assert_eq!(adapter.handle(DragEvent::Start { source: id("3") }), DragOutcome::Started);
        assert_eq!(adapter.state(), &DragState::Dragging { source: id("3") });

        let outcome = adapter.handle(DragEvent::End {
            source: id("3"),
            target: Some(id("2")),
        });
        assert_eq!(outcome, DragOutcome::Moved { from: 2, to: 1 });
    }

    #[test]
    fn test_end_with_mismatched_source_uses_active() {
        let mut adapter = DragAdapter::default();
        adapter.handle(DragEvent::Start { source: id("1") });
        adapter.handle(DragEvent::Start { source: id("3") });

        let outcome = adapter.handle(DragEvent::End {
            source: id("junk"),
            target: Some(id("2")),
        });
        assert_eq!(outcome, DragOutcome::Moved { from: 2, to: 1 });
        assert_eq!(adapter.list().ids(), vec![id("1"), id("3"), id("2"), id("4")]);
        assert_eq!(adapter.state(), &DragState::Idle);
    }
}
