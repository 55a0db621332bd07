//! Rendering for the demo host.
//!
//! Views paint from a [`ScheduleSnapshot`] plus the live gesture drafts,
//! register their day columns / cells as drop zones, and report what the
//! pointer is over. They never read raw button state; the app feeds that
//! to the gesture controller.

use std::time::Instant;

use egui::{Align2, Color32, CursorIcon, FontId, Painter, Rect, Rounding, Stroke};

use super::gesture::{GestureController, PointerTarget};
use super::settle::SettleScheduler;
use crate::models::appointment::Appointment;
use crate::services::schedule::ScheduleSnapshot;

pub mod grid_view;
pub mod month_view;
mod palette;

pub(crate) use palette::{project_color, SchedulerPalette};

pub(crate) struct ViewContext<'a> {
    pub snapshot: ScheduleSnapshot<'a>,
    pub gestures: &'a GestureController,
    pub settle: &'a SettleScheduler,
    pub now: Instant,
    pub palette: SchedulerPalette,
}

impl ViewContext<'_> {
    /// True if the card for `entry_id` is lifted off the grid by a move.
    fn is_lifted(&self, entry_id: i64) -> bool {
        self.gestures
            .move_draft()
            .map_or(false, |draft| draft.entry_id == entry_id)
            && self.gestures.drag_phase() == super::drag::DragPhase::Dragging
    }
}

/// What the pointer is over after a view has been laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewOutcome {
    pub target: Option<PointerTarget>,
    /// Cursor to show while hovering and no gesture is active
    pub hover_cursor: Option<CursorIcon>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CardStyle {
    Normal,
    /// Original position of a card being dragged
    Ghost,
    /// Recently changed
    Settling,
    /// Floating under the pointer
    Lifted,
}

/// Paint one appointment card.
pub(crate) fn paint_card(
    painter: &Painter,
    rect: Rect,
    appointment: &Appointment,
    palette: &SchedulerPalette,
    style: CardStyle,
) {
    let base = project_color(&appointment.project);
    let fill = match style {
        CardStyle::Ghost => base.linear_multiply(0.3),
        _ if appointment.completed => base.linear_multiply(0.55),
        _ => base,
    };
    let rect = rect.shrink2(egui::vec2(0.5, 1.0));
    painter.rect_filled(rect, Rounding::same(3.0), fill);

    match style {
        CardStyle::Settling => {
            painter.rect_stroke(rect, Rounding::same(3.0), Stroke::new(2.0, palette.settle_ring));
        }
        CardStyle::Lifted => {
            painter.rect_stroke(rect, Rounding::same(3.0), Stroke::new(1.5, Color32::WHITE));
        }
        _ => {}
    }

    if style == CardStyle::Ghost || rect.height() < 10.0 {
        return;
    }

    let title = if appointment.title.is_empty() {
        "(untitled)"
    } else {
        appointment.title.as_str()
    };
    let label = match appointment.issue_key.as_deref() {
        Some(key) if !key.is_empty() => format!("{} {}", key, title),
        _ => title.to_string(),
    };
    let painter = painter.with_clip_rect(rect.intersect(painter.clip_rect()));
    painter.text(
        rect.left_top() + egui::vec2(4.0, 2.0),
        Align2::LEFT_TOP,
        label,
        FontId::proportional(11.0),
        Color32::WHITE,
    );
    if rect.height() >= 30.0 {
        painter.text(
            rect.left_top() + egui::vec2(4.0, 16.0),
            Align2::LEFT_TOP,
            format!(
                "{} - {}  {:.2}h",
                appointment.start.format("%H:%M"),
                appointment.end.format("%H:%M"),
                appointment.elapsed_hours()
            ),
            FontId::proportional(10.0),
            Color32::from_rgba_unmultiplied(255, 255, 255, 200),
        );
    }
}

/// Paint the card following the pointer during a move, above everything.
pub(crate) fn paint_drag_overlay(ctx: &egui::Context, cx: &ViewContext<'_>) {
    let Some(draft) = cx.gestures.move_draft() else {
        return;
    };
    if !cx.is_lifted(draft.entry_id) {
        return;
    }
    let Some(appointment) = cx
        .snapshot
        .appointments
        .iter()
        .find(|appt| appt.id == draft.entry_id)
    else {
        return;
    };
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Tooltip,
        egui::Id::new("drag_overlay"),
    ));
    paint_card(
        &painter,
        draft.overlay_rect(),
        appointment,
        &cx.palette,
        CardStyle::Lifted,
    );
}

fn card_style(cx: &ViewContext<'_>, appointment: &Appointment) -> CardStyle {
    if cx.is_lifted(appointment.id) {
        CardStyle::Ghost
    } else if cx.settle.is_settling(appointment.id, cx.now) {
        CardStyle::Settling
    } else {
        CardStyle::Normal
    }
}
