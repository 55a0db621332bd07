//! Day / week / work-week time grid.

use chrono::{Local, NaiveDate};
use egui::{Align2, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use super::{card_style, paint_card, ViewContext, ViewOutcome};
use crate::models::timeline::format_minutes;
use crate::ui_egui::drag::DropTarget;
use crate::ui_egui::drop_zone::{DropZoneRegistry, ZoneKey};
use crate::ui_egui::gesture::PointerTarget;
use crate::ui_egui::resize::{draw_handles, HandleRects};
use crate::ui_egui::time_grid::{card_rect, slot_to_offset};

const TIME_LABEL_WIDTH: f32 = 50.0;
const HEADER_HEIGHT: f32 = 28.0;
const MIN_COLUMN_WIDTH: f32 = 60.0;

pub(crate) fn show(
    ui: &mut egui::Ui,
    zones: &mut DropZoneRegistry,
    cx: &ViewContext<'_>,
) -> ViewOutcome {
    let dates = cx.snapshot.visible_dates();
    let column_count = dates.len().max(1) as f32;

    show_header(ui, &dates, cx);

    egui::ScrollArea::vertical()
        .id_source("time_grid_scroll")
        .drag_to_scroll(false)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let width = ui
                .available_width()
                .max(TIME_LABEL_WIDTH + MIN_COLUMN_WIDTH * column_count);
            let height = cx.snapshot.timeline.column_height();
            let (grid_rect, _) = ui.allocate_exact_size(Vec2::new(width, height), Sense::hover());
            let column_width = (grid_rect.width() - TIME_LABEL_WIDTH) / column_count;

            let hover = ui
                .input(|i| i.pointer.hover_pos())
                .filter(|pos| ui.clip_rect().contains(*pos));

            paint_time_labels(ui, grid_rect, cx);

            let mut outcome = ViewOutcome::default();
            for (index, date) in dates.iter().enumerate() {
                let column = Rect::from_min_size(
                    Pos2::new(
                        grid_rect.left() + TIME_LABEL_WIDTH + index as f32 * column_width,
                        grid_rect.top(),
                    ),
                    Vec2::new(column_width, height),
                );
                zones.register(ZoneKey::Column(*date), column);
                show_column(ui, *date, column, hover, cx, &mut outcome);
            }
            outcome
        })
        .inner
}

fn show_header(ui: &mut egui::Ui, dates: &[NaiveDate], cx: &ViewContext<'_>) {
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(ui.available_width(), HEADER_HEIGHT),
        Sense::hover(),
    );
    let column_width = (rect.width() - TIME_LABEL_WIDTH) / dates.len().max(1) as f32;
    let painter = ui.painter();
    let today = Local::now().date_naive();

    for (index, date) in dates.iter().enumerate() {
        let cell = Rect::from_min_size(
            Pos2::new(rect.left() + TIME_LABEL_WIDTH + index as f32 * column_width, rect.top()),
            Vec2::new(column_width, HEADER_HEIGHT),
        );
        if *date == today {
            painter.rect_filled(cell, 0.0, cx.palette.today_bg);
        }
        let hours = cx.snapshot.hours_for_day(*date);
        let label = if hours > 0.0 {
            format!("{}  {:.2}h", date.format("%a %d"), hours)
        } else {
            date.format("%a %d").to_string()
        };
        painter.text(
            cell.center(),
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(13.0),
            cx.palette.text,
        );
    }
    painter.hline(rect.x_range(), rect.bottom(), Stroke::new(1.0, cx.palette.divider));
}

fn paint_time_labels(ui: &egui::Ui, grid_rect: Rect, cx: &ViewContext<'_>) {
    let timeline = cx.snapshot.timeline;
    let painter = ui.painter();
    for slot in 0..timeline.slot_count() {
        let minute = timeline.day_start() + slot * timeline.block_size();
        if minute % 60 != 0 {
            continue;
        }
        let y = grid_rect.top() + slot_to_offset(timeline, slot);
        painter.text(
            Pos2::new(grid_rect.left() + TIME_LABEL_WIDTH - 6.0, y + 2.0),
            Align2::RIGHT_TOP,
            format_minutes(minute),
            FontId::proportional(11.0),
            cx.palette.muted_text,
        );
    }
}

fn show_column(
    ui: &egui::Ui,
    date: NaiveDate,
    column: Rect,
    hover: Option<Pos2>,
    cx: &ViewContext<'_>,
    outcome: &mut ViewOutcome,
) {
    let timeline = cx.snapshot.timeline;
    let palette = &cx.palette;
    let painter = ui.painter();

    for slot in 0..timeline.slot_count() {
        let top = column.top() + slot_to_offset(timeline, slot);
        let slot_rect = Rect::from_min_size(
            Pos2::new(column.left(), top),
            Vec2::new(column.width(), timeline.slot_height()),
        );
        let fill = if timeline.is_work_slot(slot) {
            palette.work_bg
        } else {
            palette.regular_bg
        };
        painter.rect_filled(slot_rect, 0.0, fill);
        let minute = timeline.day_start() + slot * timeline.block_size();
        let line = if minute % 60 == 0 {
            palette.hour_line
        } else {
            palette.slot_line
        };
        painter.hline(column.x_range(), top, Stroke::new(0.5, line));
    }
    painter.vline(column.left(), column.y_range(), Stroke::new(1.0, palette.divider));

    paint_drop_preview(painter, date, column, cx);
    paint_create_selection(painter, date, column, cx);

    let layout = cx.snapshot.day_layout(date);
    let resize_draft = cx.gestures.resize_draft();
    let mut hit: Option<(PointerTarget, CursorIcon, Rect)> = None;

    for entry in &layout.entries {
        let (start, end) = match resize_draft {
            Some(draft) if draft.entry_id == entry.id => (draft.start_minute, draft.end_minute),
            _ => (entry.start_minute(), entry.end_minute()),
        };
        let lane = layout.lanes.lane_of(entry.id).unwrap_or(0);
        let rect = card_rect(timeline, column, start, end, lane, layout.lanes.lane_count());
        paint_card(painter, rect, entry, palette, card_style(cx, entry));

        // Later cards paint on top, so the last hit wins
        if let Some(pos) = hover.filter(|pos| rect.contains(*pos)) {
            let handles = HandleRects::for_card(rect);
            hit = Some(match handles.hit_test(pos) {
                Some(handle) => (
                    PointerTarget::Edge {
                        entry_id: entry.id,
                        handle,
                    },
                    handle.cursor_icon(),
                    rect,
                ),
                None => (
                    PointerTarget::Card {
                        entry_id: entry.id,
                        rect,
                    },
                    CursorIcon::Grab,
                    rect,
                ),
            });
        }
    }

    match hit {
        Some((target, cursor, rect)) => {
            if !cx.gestures.is_active() {
                let hovered = match target {
                    PointerTarget::Edge { handle, .. } => Some(handle),
                    _ => None,
                };
                draw_handles(painter, &HandleRects::for_card(rect), hovered, palette.divider);
            }
            outcome.target = Some(target);
            outcome.hover_cursor = Some(cursor);
        }
        None => {
            if let Some(pos) = hover.filter(|pos| column.contains(*pos)) {
                let slot_height = timeline.slot_height();
                let slot_top = pos.y - (pos.y - column.top()) % slot_height;
                let slot_rect = Rect::from_min_size(
                    Pos2::new(column.left(), slot_top),
                    Vec2::new(column.width(), slot_height),
                );
                if !cx.gestures.is_active() {
                    painter.rect_filled(slot_rect, 0.0, palette.hover_overlay);
                }
                outcome.target = Some(PointerTarget::EmptyGrid { date });
            }
        }
    }
}

/// Where a dragged card would land in this column.
fn paint_drop_preview(
    painter: &egui::Painter,
    date: NaiveDate,
    column: Rect,
    cx: &ViewContext<'_>,
) {
    let Some(draft) = cx.gestures.move_draft() else {
        return;
    };
    let Some(DropTarget::Slot { date: target, slot }) = draft.drop_target else {
        return;
    };
    if target != date {
        return;
    }
    let timeline = cx.snapshot.timeline;
    let top = column.top() + slot_to_offset(timeline, slot);
    let rect = Rect::from_min_size(
        Pos2::new(column.left(), top),
        Vec2::new(column.width(), draft.entry_slots as f32 * timeline.slot_height()),
    );
    painter.rect_filled(rect, 3.0, cx.palette.drop_preview);
}

fn paint_create_selection(
    painter: &egui::Painter,
    date: NaiveDate,
    column: Rect,
    cx: &ViewContext<'_>,
) {
    let Some(draft) = cx.gestures.create_draft() else {
        return;
    };
    if draft.date != date {
        return;
    }
    let timeline = cx.snapshot.timeline;
    let (first, last) = draft.range();
    let rect = Rect::from_min_max(
        Pos2::new(column.left(), column.top() + slot_to_offset(timeline, first)),
        Pos2::new(
            column.right(),
            column.top() + slot_to_offset(timeline, last) + timeline.slot_height(),
        ),
    );
    painter.rect_filled(rect, 3.0, cx.palette.selection);
    let start = timeline.day_start() + first * timeline.block_size();
    painter.text(
        rect.left_top() + Vec2::new(4.0, 2.0),
        Align2::LEFT_TOP,
        format_minutes(start),
        FontId::proportional(11.0),
        cx.palette.text,
    );
}
