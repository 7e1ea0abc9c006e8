//! Dashboard card widget

use crate::config::GridConfig;
use dash_grid_types::{Widget, WidgetId};
use gtk4::prelude::*;
use gtk4::{DrawingArea, Frame, Label, Overlay};
use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;

/// How a card is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardStyle {
    #[default]
    Normal,
    /// The card being dragged
    Lifted,
    /// The card currently under the drag
    DropTarget,
}

/// A focusable, drag-enabled card showing a widget title
#[derive(Clone)]
pub struct Card {
    id: WidgetId,
    frame: Frame,
    background_area: DrawingArea,
    style: Rc<Cell<CardStyle>>,
}

impl Card {
    pub fn new(widget: &Widget, config: &GridConfig) -> Self {
        let style = Rc::new(Cell::new(CardStyle::Normal));

        let background_area = DrawingArea::new();
        background_area.set_hexpand(true);
        background_area.set_vexpand(true);

        let corner_radius = config.corner_radius;
        let style_draw = style.clone();
        background_area.set_draw_func(move |_, cr, w, h| {
            if let Err(e) = draw_card_background(cr, w as f64, h as f64, corner_radius, style_draw.get()) {
                log::warn!("Failed to render card background: {}", e);
            }
        });

        let label = Label::new(Some(widget.title.as_str()));
        label.add_css_class("card-title");
        label.set_wrap(true);
        label.set_halign(gtk4::Align::Center);
        label.set_valign(gtk4::Align::Center);

        let overlay = Overlay::new();
        overlay.set_child(Some(&background_area));
        overlay.add_overlay(&label);

        let frame = Frame::new(None);
        frame.set_child(Some(&overlay));
        frame.set_size_request(config.card_width, config.card_height);
        frame.set_focusable(true);
        frame.add_css_class("widget-card");
        frame.set_tooltip_text(Some(widget.title.as_str()));
        frame.set_widget_name(widget.id.as_str());

        Self {
            id: widget.id.clone(),
            frame,
            background_area,
            style,
        }
    }

    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    /// The top-level GTK widget for this card
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn style(&self) -> CardStyle {
        self.style.get()
    }

    pub fn set_style(&self, style: CardStyle) {
        if self.style.replace(style) != style {
            self.background_area.queue_draw();
        }
    }
}

fn rounded_rect(cr: &cairo::Context, x: f64, y: f64, width: f64, height: f64, radius: f64) {
    let radius = radius.min(width / 2.0).min(height / 2.0).max(0.0);
    cr.new_path();
    if radius > 0.0 {
        cr.arc(x + radius, y + radius, radius, PI, 3.0 * PI / 2.0);
        cr.arc(x + width - radius, y + radius, radius, 3.0 * PI / 2.0, 0.0);
        cr.arc(x + width - radius, y + height - radius, radius, 0.0, PI / 2.0);
        cr.arc(x + radius, y + height - radius, radius, PI / 2.0, PI);
        cr.close_path();
    } else {
        cr.rectangle(x, y, width, height);
    }
}

/// Paint the card body: white rounded rectangle with a thin border,
/// a drop shadow when lifted, a dashed accent outline when targeted
fn draw_card_background(
    cr: &cairo::Context,
    width: f64,
    height: f64,
    radius: f64,
    style: CardStyle,
) -> Result<(), cairo::Error> {
    if style == CardStyle::Lifted {
        rounded_rect(cr, 2.0, 4.0, width - 2.0, height - 4.0, radius);
        cr.set_source_rgba(0.0, 0.0, 0.0, 0.12);
        cr.fill()?;
    }

    rounded_rect(cr, 0.5, 0.5, width - 3.0, height - 5.0, radius);
    match style {
        CardStyle::Lifted => cr.set_source_rgba(1.0, 1.0, 1.0, 0.85),
        _ => cr.set_source_rgb(1.0, 1.0, 1.0),
    }
    cr.fill_preserve()?;

    // gray-200 border
    cr.set_source_rgb(0.898, 0.906, 0.922);
    cr.set_line_width(1.0);
    cr.stroke()?;

    if style == CardStyle::DropTarget {
        rounded_rect(cr, 2.0, 2.0, width - 7.0, height - 9.0, radius);
        cr.set_source_rgb(0.231, 0.510, 0.965);
        cr.set_line_width(2.0);
        cr.set_dash(&[6.0, 4.0], 0.0);
        cr.stroke()?;
        cr.set_dash(&[], 0.0);
    }

    Ok(())
}
