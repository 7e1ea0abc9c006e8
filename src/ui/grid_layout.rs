//! Grid layout for dashboard cards with drag-and-drop reordering
//!
//! GTK supplies the drag machinery (`DragSource`, `DropTarget`,
//! `EventControllerKey`); this module only forwards what those controllers
//! report to the [`DragAdapter`] and repositions cards when the order changes.

use super::card::{Card, CardStyle};
use crate::config::GridConfig;
use dash_grid_core::{
    DragAdapter, DragEngine, DragEvent, DragOutcome, DragState, KeyAction, KeyboardSensor,
    SensorEvent,
};
use dash_grid_types::{Widget, WidgetId, WidgetList};
use gdk4::{DragAction, Key};
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{DragSource, DropTarget, EventControllerKey, Grid, GridLayoutChild, WidgetPaintable};
use log::{debug, info, warn};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Map a GDK key to a keyboard sensor action
fn key_action(key: Key) -> Option<KeyAction> {
    match key {
        Key::space | Key::Return | Key::KP_Enter => Some(KeyAction::Activate),
        Key::Left | Key::KP_Left => Some(KeyAction::Left),
        Key::Right | Key::KP_Right => Some(KeyAction::Right),
        Key::Up | Key::KP_Up => Some(KeyAction::Up),
        Key::Down | Key::KP_Down => Some(KeyAction::Down),
        Key::Escape => Some(KeyAction::Cancel),
        _ => None,
    }
}

/// Grid cell for a position in the order
fn cell_for_index(index: usize, columns: u32) -> (i32, i32) {
    let columns = columns.max(1) as usize;
    ((index % columns) as i32, (index / columns) as i32)
}

/// The dragged widget named by a drop payload, if the drop belongs to the
/// pointer drag in progress. Keyboard drags never end in a pointer drop.
fn dropped_source(
    payload: &str,
    dragging: Option<&WidgetId>,
    keyboard_active: bool,
) -> Option<WidgetId> {
    if keyboard_active {
        return None;
    }
    dragging.filter(|source| source.as_str() == payload).cloned()
}

/// A keyboard drag only outlives the notification that started it
fn settle_sensor(sensor: &mut KeyboardSensor, outcome: &DragOutcome) {
    if *outcome != DragOutcome::Started {
        sensor.reset();
    }
}

/// Grid layout manager
///
/// Owns the drag adapter (and through it the canonical widget list) and one
/// [`Card`] per widget. Cloning shares the same state.
#[derive(Clone)]
pub struct GridLayout {
    config: GridConfig,
    grid: Grid,
    columns: Rc<Cell<u32>>,
    cards: Rc<RefCell<HashMap<WidgetId, Card>>>,
    adapter: Rc<RefCell<DragAdapter>>,
    sensor: Rc<RefCell<KeyboardSensor>>,
}

impl GridLayout {
    /// Create a grid showing `list`, sized for a window `width` pixels wide,
    /// and wire every card for dragging
    pub fn new(config: GridConfig, list: WidgetList, width: i32) -> Self {
        let grid = Grid::new();
        grid.set_row_spacing(config.spacing.max(0) as u32);
        grid.set_column_spacing(config.spacing.max(0) as u32);
        grid.set_halign(gtk4::Align::Center);
        grid.set_valign(gtk4::Align::Start);
        grid.add_css_class("dashboard-grid");

        let cards: HashMap<WidgetId, Card> = list
            .iter()
            .map(|widget| (widget.id.clone(), Card::new(widget, &config)))
            .collect();

        let columns = config.columns_for_width(width);
        let mut layout = Self {
            config,
            grid,
            columns: Rc::new(Cell::new(columns)),
            cards: Rc::new(RefCell::new(cards)),
            adapter: Rc::new(RefCell::new(DragAdapter::new(list))),
            sensor: Rc::new(RefCell::new(KeyboardSensor::new(columns as usize))),
        };

        layout.place(&layout.adapter.borrow().list().entries());

        // Re-layout whenever a drop commits a new order
        let placer = layout.clone_for_placement();
        layout
            .adapter
            .borrow_mut()
            .connect_order_changed(move |widgets| placer.place(widgets));

        let adapter = layout.adapter.clone();
        adapter.borrow().attach(&mut layout);

        info!("Grid created with {} cards in {} columns", layout.cards.borrow().len(), columns);
        layout
    }

    /// The GTK widget to embed in a window
    pub fn widget(&self) -> gtk4::Widget {
        self.grid.clone().upcast()
    }

    /// Re-flow the cards for a new window width
    pub fn set_width(&self, width: i32) {
        let columns = self.config.columns_for_width(width);
        if self.columns.replace(columns) == columns {
            return;
        }
        info!("Window width {} -> {} columns", width, columns);
        self.sensor.borrow_mut().set_columns(columns as usize);

        // Keep a keyboard preview in place, re-flowed for the new columns
        let order = {
            let adapter = self.adapter.borrow();
            self.sensor
                .borrow()
                .cursor_target(adapter.list())
                .and_then(|target| adapter.hover(target))
                .unwrap_or_else(|| adapter.list().entries())
        };
        self.place(&order);
    }

    /// Current canonical order
    pub fn order(&self) -> Vec<Widget> {
        self.adapter.borrow().list().entries()
    }

    /// Set a callback for whenever a drop changes the order
    pub fn set_on_change<F>(&self, callback: F)
    where
        F: Fn(&[Widget]) + 'static,
    {
        self.adapter.borrow_mut().connect_order_changed(callback);
    }

    /// A copy sharing only what placement needs. The order listener lives
    /// inside the adapter, so it must not hold the adapter itself.
    fn clone_for_placement(&self) -> Placer {
        Placer {
            grid: self.grid.clone(),
            cards: self.cards.clone(),
            columns: self.columns.clone(),
        }
    }

    fn place(&self, order: &[Widget]) {
        self.clone_for_placement().place(order);
    }

    /// Restore the canonical order and clear every drag style
    fn reset(&self) {
        let order = self.order();
        self.place(&order);
        for card in self.cards.borrow().values() {
            card.set_style(CardStyle::Normal);
        }
    }

    /// Paint `source` as lifted and `target` as the drop target
    fn mark(&self, source: &WidgetId, target: Option<&WidgetId>) {
        for (id, card) in self.cards.borrow().iter() {
            let style = if id == source {
                CardStyle::Lifted
            } else if Some(id) == target {
                CardStyle::DropTarget
            } else {
                CardStyle::Normal
            };
            card.set_style(style);
        }
    }

    fn dispatch(&self, event: DragEvent) -> DragOutcome {
        let source = event.source().clone();
        let is_start = matches!(event, DragEvent::Start { .. });

        let outcome = self.adapter.borrow_mut().handle(event);
        debug!("Drag event for {} -> {:?}", source, outcome);
        settle_sensor(&mut self.sensor.borrow_mut(), &outcome);

        match outcome {
            DragOutcome::Started => self.mark(&source, None),
            DragOutcome::Ignored if is_start => {}
            _ => self.reset(),
        }
        outcome
    }

    fn dragging_source(&self) -> Option<WidgetId> {
        match self.adapter.borrow().state() {
            DragState::Dragging { source } => Some(source.clone()),
            DragState::Idle => None,
        }
    }

    fn focus_card(&self, id: &WidgetId) {
        if let Some(card) = self.cards.borrow().get(id) {
            card.frame().grab_focus();
        }
    }

    fn setup_drag_source(&self, card: &Card) {
        let drag_source = DragSource::new();
        drag_source.set_actions(DragAction::MOVE);

        let id_prepare = card.id().clone();
        drag_source.connect_prepare(move |_, _, _| {
            Some(gdk4::ContentProvider::for_value(&id_prepare.as_str().to_value()))
        });

        let layout_begin = self.clone();
        let id_begin = card.id().clone();
        let frame_begin = card.frame().clone();
        drag_source.connect_drag_begin(move |source, _| {
            // A pointer drag supersedes a keyboard drag in progress
            layout_begin.sensor.borrow_mut().reset();

            let icon = WidgetPaintable::new(Some(&frame_begin));
            source.set_icon(Some(&icon), 0, 0);

            layout_begin.dispatch(DragEvent::Start {
                source: id_begin.clone(),
            });
        });

        let layout_cancel = self.clone();
        let id_cancel = card.id().clone();
        drag_source.connect_drag_cancel(move |_, _, reason| {
            debug!("Drag of {} cancelled by GTK: {:?}", id_cancel, reason);
            if layout_cancel.adapter.borrow().is_dragging() {
                layout_cancel.dispatch(DragEvent::Cancel {
                    source: id_cancel.clone(),
                });
            }
            false
        });

        // Fires after a successful drop too; by then the adapter is idle
        let layout_end = self.clone();
        let id_end = card.id().clone();
        drag_source.connect_drag_end(move |_, _, _| {
            if layout_end.adapter.borrow().is_dragging() {
                layout_end.dispatch(DragEvent::End {
                    source: id_end.clone(),
                    target: None,
                });
            } else {
                layout_end.reset();
            }
        });

        card.frame().add_controller(drag_source);
    }

    fn setup_drop_target(&self, card: &Card) {
        let drop_target = DropTarget::new(glib::Type::STRING, DragAction::MOVE);

        let layout_enter = self.clone();
        let id_enter = card.id().clone();
        drop_target.connect_enter(move |_, _, _| {
            if layout_enter.sensor.borrow().is_active() {
                return DragAction::empty();
            }
            let Some(source) = layout_enter.dragging_source() else {
                return DragAction::empty();
            };
            layout_enter.mark(&source, Some(&id_enter));
            DragAction::MOVE
        });

        let layout_leave = self.clone();
        let id_leave = card.id().clone();
        drop_target.connect_leave(move |_| {
            if let Some(card) = layout_leave.cards.borrow().get(&id_leave) {
                if card.style() == CardStyle::DropTarget {
                    card.set_style(CardStyle::Normal);
                }
            }
        });

        let layout_drop = self.clone();
        let id_drop = card.id().clone();
        drop_target.connect_drop(move |_, value, _, _| {
            let payload = match value.get::<String>() {
                Ok(payload) => payload,
                Err(e) => {
                    warn!("Dropped value is not a widget id: {}", e);
                    return false;
                }
            };
            let dragging = layout_drop.dragging_source();
            let keyboard_active = layout_drop.sensor.borrow().is_active();
            let Some(source) = dropped_source(&payload, dragging.as_ref(), keyboard_active) else {
                debug!("Rejecting drop of {:?}: not the widget being dragged", payload);
                return false;
            };
            layout_drop.dispatch(DragEvent::End {
                source,
                target: Some(id_drop.clone()),
            });
            true
        });

        card.frame().add_controller(drop_target);
    }

    fn setup_keyboard(&self, card: &Card) {
        let key_controller = EventControllerKey::new();

        let layout = self.clone();
        let focused = card.id().clone();
        key_controller.connect_key_pressed(move |_, key, _, _| {
            let Some(action) = key_action(key) else {
                return glib::Propagation::Proceed;
            };

            let sensed = {
                let adapter = layout.adapter.borrow();
                layout
                    .sensor
                    .borrow_mut()
                    .handle_key(action, &focused, adapter.list())
            };

            match sensed {
                Some(SensorEvent::Drag(event)) => {
                    let source = event.source().clone();
                    layout.dispatch(event);
                    layout.focus_card(&source);
                    glib::Propagation::Stop
                }
                Some(SensorEvent::Hover(target)) => {
                    let preview = layout.adapter.borrow().hover(&target);
                    if let (Some(preview), Some(source)) = (preview, layout.dragging_source()) {
                        layout.place(&preview);
                        layout.mark(&source, Some(&target));
                    }
                    glib::Propagation::Stop
                }
                None => glib::Propagation::Proceed,
            }
        });

        card.frame().add_controller(key_controller);
    }
}

impl DragEngine for GridLayout {
    fn register_draggable(&mut self, id: &WidgetId) {
        let card = match self.cards.borrow().get(id) {
            Some(card) => card.clone(),
            None => {
                warn!("No card rendered for widget {}", id);
                return;
            }
        };
        self.setup_drag_source(&card);
        self.setup_drop_target(&card);
        self.setup_keyboard(&card);
        debug!("Registered draggable card {}", id);
    }
}

/// Positions cards in the grid; shared with the adapter's order listener
struct Placer {
    grid: Grid,
    cards: Rc<RefCell<HashMap<WidgetId, Card>>>,
    columns: Rc<Cell<u32>>,
}

impl Placer {
    fn place(&self, order: &[Widget]) {
        let cards = self.cards.borrow();
        for (index, widget) in order.iter().enumerate() {
            let Some(card) = cards.get(&widget.id) else {
                continue;
            };
            let (column, row) = cell_for_index(index, self.columns.get());
            let frame = card.frame();

            if frame.parent().is_none() {
                self.grid.attach(frame, column, row, 1, 1);
                continue;
            }

            // Move in place: unparenting a card mid-drag would end the drag
            if let Some(manager) = self.grid.layout_manager() {
                if let Ok(child) = manager.layout_child(frame).downcast::<GridLayoutChild>() {
                    child.set_column(column);
                    child.set_row(row);
                }
            }
        }
    }
}
