// Entry Resize System
//
// Resizing a card by dragging its top or bottom edge.
// - Top handle: adjusts the start, end stays put
// - Bottom handle: adjusts the end, start stays put
// Resizing never crosses into another day.

use chrono::{NaiveDate, NaiveDateTime};
use egui::{Pos2, Rect, Vec2};

use crate::models::appointment::{at_minute, hours_between, Appointment};
use crate::models::timeline::TimelineConfig;

/// Which edge of the card is being dragged
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeHandle {
    /// Top edge - adjusts start time
    Top,
    /// Bottom edge - adjusts end time
    Bottom,
}

impl ResizeHandle {
    /// Cursor shown process-wide while this handle is dragged
    pub fn cursor_icon(&self) -> egui::CursorIcon {
        egui::CursorIcon::ResizeVertical
    }
}

/// Maximum height of a handle hit zone
pub const HANDLE_SIZE: f32 = 8.0;
/// Visual size of the handle circle
pub const HANDLE_VISUAL_SIZE: f32 = 6.0;

/// Hit zones for the resize handles of one card
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleRects {
    pub top: Rect,
    pub bottom: Rect,
}

impl HandleRects {
    /// Handle zones along the top and bottom edges of a card.
    ///
    /// Short cards get thinner zones so the body stays grabbable.
    pub fn for_card(card: Rect) -> Self {
        let zone_height = (card.height() / 4.0).clamp(2.0, HANDLE_SIZE);
        Self {
            top: Rect::from_min_size(card.min, Vec2::new(card.width(), zone_height)),
            bottom: Rect::from_min_size(
                Pos2::new(card.left(), card.bottom() - zone_height),
                Vec2::new(card.width(), zone_height),
            ),
        }
    }

    /// Check if a point hits a handle and return which one
    pub fn hit_test(&self, pos: Pos2) -> Option<ResizeHandle> {
        if self.top.contains(pos) {
            Some(ResizeHandle::Top)
        } else if self.bottom.contains(pos) {
            Some(ResizeHandle::Bottom)
        } else {
            None
        }
    }

    pub fn get(&self, handle: ResizeHandle) -> Rect {
        match handle {
            ResizeHandle::Top => self.top,
            ResizeHandle::Bottom => self.bottom,
        }
    }
}

/// In-progress resize
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeDraft {
    pub entry_id: i64,
    pub handle: ResizeHandle,
    /// Day the entry starts on; the resize stays within it
    pub date: NaiveDate,
    /// Pointer y at pointer-down
    pub start_y: f32,
    /// Start/end minutes when the gesture began
    pub baseline_start: i32,
    pub baseline_end: i32,
    /// Candidate start/end minutes under the current pointer
    pub start_minute: i32,
    pub end_minute: i32,
}

impl ResizeDraft {
    pub fn candidate_range(&self) -> (NaiveDateTime, NaiveDateTime) {
        (
            at_minute(self.date, self.start_minute),
            at_minute(self.date, self.end_minute),
        )
    }
}

/// A resize that changed the entry's range
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeCommit {
    pub entry_id: i64,
    pub new_start: NaiveDateTime,
    pub new_end: NaiveDateTime,
    /// Recomputed from the new duration, two decimals
    pub elapsed_hours: f64,
}

/// State machine for edge-drag resizing
#[derive(Debug, Default)]
pub struct ResizeController {
    draft: Option<ResizeDraft>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&ResizeDraft> {
        self.draft.as_ref()
    }

    /// Begin resizing from a pointer-down on a handle
    pub fn begin(&mut self, appointment: &Appointment, handle: ResizeHandle, pointer_y: f32) {
        let start = appointment.start_minute();
        let end = appointment.end_minute();
        self.draft = Some(ResizeDraft {
            entry_id: appointment.id,
            handle,
            date: appointment.date(),
            start_y: pointer_y,
            baseline_start: start,
            baseline_end: end,
            start_minute: start,
            end_minute: end,
        });
    }

    /// Recompute the moving edge from the pointer's vertical travel
    pub fn update(&mut self, pointer_y: f32, timeline: &TimelineConfig) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        let travel = pointer_y - draft.start_y;
        let delta_slots = if travel.is_finite() {
            (travel / timeline.slot_height()).round() as i32
        } else {
            0
        };
        if delta_slots == 0 {
            draft.start_minute = draft.baseline_start;
            draft.end_minute = draft.baseline_end;
            return;
        }
        let delta = delta_slots * timeline.block_size();
        let block = timeline.block_size();

        // An edge already outside the window may stay there; it is only
        // held back from travelling further out.
        match draft.handle {
            ResizeHandle::Top => {
                draft.start_minute = (draft.baseline_start + delta)
                    .max(timeline.day_start().min(draft.baseline_start))
                    .min(draft.baseline_end - block);
                draft.end_minute = draft.baseline_end;
            }
            ResizeHandle::Bottom => {
                draft.end_minute = (draft.baseline_end + delta)
                    .min(timeline.day_end().max(draft.baseline_end))
                    .max(draft.baseline_start + block);
                draft.start_minute = draft.baseline_start;
            }
        }
    }

    /// Finish the resize. Commits only if the range actually changed
    pub fn finish(&mut self, original: Option<&Appointment>) -> Option<ResizeCommit> {
        let draft = self.draft.take()?;

        let unchanged = original.map_or(
            draft.start_minute == draft.baseline_start && draft.end_minute == draft.baseline_end,
            |appt| {
                appt.start_minute() == draft.start_minute && appt.end_minute() == draft.end_minute
            },
        );
        if unchanged {
            log::debug!("Resize of appointment {} ended without change", draft.entry_id);
            return None;
        }

        let (new_start, new_end) = draft.candidate_range();
        Some(ResizeCommit {
            entry_id: draft.entry_id,
            new_start,
            new_end,
            elapsed_hours: hours_between(new_start, new_end),
        })
    }

    /// Cancel the resize operation. Returns true if something was cancelled
    pub fn cancel(&mut self) -> bool {
        self.draft.take().is_some()
    }
}

/// Draw resize handles on a card
pub fn draw_handles(
    painter: &egui::Painter,
    handles: &HandleRects,
    hovered_handle: Option<ResizeHandle>,
    color: egui::Color32,
) {
    for handle in [ResizeHandle::Top, ResizeHandle::Bottom] {
        let rect = handles.get(handle);
        let is_hovered = hovered_handle == Some(handle);
        // Position the visual circle at the edge, not center of hit zone
        let center = match handle {
            ResizeHandle::Top => Pos2::new(rect.center().x, rect.top() + HANDLE_VISUAL_SIZE / 2.0),
            ResizeHandle::Bottom => {
                Pos2::new(rect.center().x, rect.bottom() - HANDLE_VISUAL_SIZE / 2.0)
            }
        };
        let radius = if is_hovered {
            HANDLE_VISUAL_SIZE / 2.0 + 1.0
        } else {
            HANDLE_VISUAL_SIZE / 2.0
        };

        painter.circle_filled(
            center,
            radius,
            if is_hovered {
                egui::Color32::WHITE
            } else {
                egui::Color32::from_rgba_unmultiplied(
                    color.r().saturating_add(60),
                    color.g().saturating_add(60),
                    color.b().saturating_add(60),
                    color.a(),
                )
            },
        );
        painter.circle_stroke(
            center,
            radius,
            egui::Stroke::new(1.0, color.linear_multiply(0.6)),
        );
    }
}
