//! Ordered widget list - the single source of truth for render order

use crate::widget::{Widget, WidgetId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while building a widget list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetListError {
    #[error("duplicate widget id: {0}")]
    DuplicateId(WidgetId),
}

/// The widgets a dashboard starts with when no layout provides its own
pub fn default_seed() -> Vec<Widget> {
    vec![
        Widget::new("1", "Revenue Chart"),
        Widget::new("2", "Active Users"),
        Widget::new("3", "Churn Rate"),
        Widget::new("4", "Recent Signups"),
    ]
}

/// Ordered sequence of widgets.
///
/// Ids are unique and the length is fixed once the list is built: the only
/// mutation that touches order is [`WidgetList::move_item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Widget>", into = "Vec<Widget>")]
pub struct WidgetList {
    widgets: Vec<Widget>,
}

impl WidgetList {
    /// Build a list, rejecting repeated ids
    pub fn new(widgets: Vec<Widget>) -> Result<Self, WidgetListError> {
        let mut seen = HashSet::with_capacity(widgets.len());
        for widget in &widgets {
            if !seen.insert(&widget.id) {
                return Err(WidgetListError::DuplicateId(widget.id.clone()));
            }
        }
        Ok(Self { widgets })
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.iter()
    }

    /// Ids in current order
    pub fn ids(&self) -> Vec<WidgetId> {
        self.widgets.iter().map(|w| w.id.clone()).collect()
    }

    /// Snapshot of the `(id, title)` sequence handed to the render layer
    pub fn entries(&self) -> Vec<Widget> {
        self.widgets.clone()
    }

    pub fn get(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| &w.id == id)
    }

    /// Widget at a position in the current order
    pub fn at(&self, index: usize) -> Option<&Widget> {
        self.widgets.get(index)
    }

    pub fn position(&self, id: &WidgetId) -> Option<usize> {
        self.widgets.iter().position(|w| &w.id == id)
    }

    pub fn contains(&self, id: &WidgetId) -> bool {
        self.position(id).is_some()
    }

    /// Change a widget's display title. Order is unaffected.
    pub fn set_title(&mut self, id: &WidgetId, title: impl Into<String>) -> bool {
        match self.widgets.iter_mut().find(|w| &w.id == id) {
            Some(widget) => {
                widget.title = title.into();
                true
            }
            None => false,
        }
    }

    /// Move `source` to the position currently held by `target`.
    ///
    /// Widgets between the two positions shift by one; every other relative
    /// order is kept. Unknown ids or `source == target` leave the list
    /// untouched. Returns whether the order changed.
    pub fn move_item(&mut self, source: &WidgetId, target: &WidgetId) -> bool {
        match self.move_indices(source, target) {
            Some((from, to)) => {
                array_move(&mut self.widgets, from, to);
                true
            }
            None => false,
        }
    }

    /// The order the list would have after `move_item(source, target)`,
    /// without touching the list itself. Invalid moves yield the current
    /// order.
    pub fn preview_move(&self, source: &WidgetId, target: &WidgetId) -> Vec<Widget> {
        let mut preview = self.widgets.clone();
        if let Some((from, to)) = self.move_indices(source, target) {
            array_move(&mut preview, from, to);
        }
        preview
    }

    fn move_indices(&self, source: &WidgetId, target: &WidgetId) -> Option<(usize, usize)> {
        if source == target {
            log::debug!("Ignoring move of {} onto itself", source);
            return None;
        }
        let Some(from) = self.position(source) else {
            log::debug!("Ignoring move: unknown source widget {}", source);
            return None;
        };
        let Some(to) = self.position(target) else {
            log::debug!("Ignoring move: unknown target widget {}", target);
            return None;
        };
        Some((from, to))
    }
}

impl Default for WidgetList {
    fn default() -> Self {
        Self {
            widgets: default_seed(),
        }
    }
}

impl TryFrom<Vec<Widget>> for WidgetList {
    type Error = WidgetListError;

    fn try_from(widgets: Vec<Widget>) -> Result<Self, Self::Error> {
        Self::new(widgets)
    }
}

impl From<WidgetList> for Vec<Widget> {
    fn from(list: WidgetList) -> Self {
        list.widgets
    }
}

/// Remove the element at `from` and reinsert it at `to`
fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}
