use chrono::{Datelike, Local, NaiveDate};
use egui::{Align2, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use super::{card_style, paint_card, ViewContext, ViewOutcome};
use crate::ui_egui::drag::DropTarget;
use crate::ui_egui::drop_zone::{DropZoneRegistry, ZoneKey};
use crate::ui_egui::gesture::PointerTarget;

const HEADER_HEIGHT: f32 = 24.0;
const DAY_NUMBER_HEIGHT: f32 = 18.0;
const CHIP_HEIGHT: f32 = 16.0;
const CHIP_SPACING: f32 = 2.0;

pub(crate) fn show(
    ui: &mut egui::Ui,
    zones: &mut DropZoneRegistry,
    cx: &ViewContext<'_>,
) -> ViewOutcome {
    let dates = cx.snapshot.visible_dates();
    let (rect, _) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
    let painter = ui.painter_at(rect);
    let palette = &cx.palette;
    let today = Local::now().date_naive();
    let anchor_month = cx.snapshot.anchor.month();

    let cell_width = rect.width() / 7.0;
    let cell_height = ((rect.height() - HEADER_HEIGHT) / 6.0).max(DAY_NUMBER_HEIGHT + CHIP_HEIGHT);

    for (column, date) in dates.iter().take(7).enumerate() {
        let header = Rect::from_min_size(
            Pos2::new(rect.left() + column as f32 * cell_width, rect.top()),
            Vec2::new(cell_width, HEADER_HEIGHT),
        );
        painter.text(
            header.center(),
            Align2::CENTER_CENTER,
            date.format("%a").to_string(),
            FontId::proportional(13.0),
            palette.text,
        );
    }

    let hover = ui
        .input(|i| i.pointer.hover_pos())
        .filter(|pos| rect.contains(*pos));
    let drop_date = cx
        .gestures
        .move_draft()
        .and_then(|draft| draft.drop_target)
        .and_then(|target| match target {
            DropTarget::Cell { date } => Some(date),
            DropTarget::Slot { .. } => None,
        });

    let mut outcome = ViewOutcome::default();
    for (index, date) in dates.iter().enumerate() {
        let row = index / 7;
        let column = index % 7;
        let cell = Rect::from_min_size(
            Pos2::new(
                rect.left() + column as f32 * cell_width,
                rect.top() + HEADER_HEIGHT + row as f32 * cell_height,
            ),
            Vec2::new(cell_width, cell_height),
        );
        zones.register(ZoneKey::Cell(*date), cell);

        let fill = if *date == today {
            palette.today_bg
        } else if date.month() != anchor_month {
            palette.outside_month_bg
        } else {
            palette.work_bg
        };
        painter.rect_filled(cell, 0.0, fill);
        painter.rect_stroke(cell, 0.0, Stroke::new(0.5, palette.hour_line));
        if drop_date == Some(*date) {
            painter.rect_filled(cell.shrink(1.0), 2.0, palette.drop_preview);
        }

        painter.text(
            cell.left_top() + Vec2::new(4.0, 2.0),
            Align2::LEFT_TOP,
            date.day().to_string(),
            FontId::proportional(12.0),
            if date.month() == anchor_month {
                palette.text
            } else {
                palette.muted_text
            },
        );

        show_chips(&painter, *date, cell, hover, cx, &mut outcome);
    }
    outcome
}

fn show_chips(
    painter: &egui::Painter,
    date: NaiveDate,
    cell: Rect,
    hover: Option<Pos2>,
    cx: &ViewContext<'_>,
    outcome: &mut ViewOutcome,
) {
    let entries = cx.snapshot.entries_for_day(date);
    let available = cell.height() - DAY_NUMBER_HEIGHT;
    let capacity = ((available + CHIP_SPACING) / (CHIP_HEIGHT + CHIP_SPACING)).floor() as usize;
    let overflow = entries.len() > capacity;
    // Keep the last row for the "+N more" label
    let shown = if overflow {
        capacity.saturating_sub(1)
    } else {
        entries.len()
    };

    for (index, entry) in entries.iter().take(shown).enumerate() {
        let chip = Rect::from_min_size(
            Pos2::new(
                cell.left() + 2.0,
                cell.top() + DAY_NUMBER_HEIGHT + index as f32 * (CHIP_HEIGHT + CHIP_SPACING),
            ),
            Vec2::new(cell.width() - 4.0, CHIP_HEIGHT),
        );
        paint_card(painter, chip, entry, &cx.palette, card_style(cx, entry));
        if hover.map_or(false, |pos| chip.contains(pos)) {
            outcome.target = Some(PointerTarget::Card {
                entry_id: entry.id,
                rect: chip,
            });
            outcome.hover_cursor = Some(CursorIcon::Grab);
        }
    }

    if overflow {
        painter.text(
            Pos2::new(cell.left() + 4.0, cell.bottom() - 2.0),
            Align2::LEFT_BOTTOM,
            format!("+{} more", entries.len() - shown),
            FontId::proportional(10.0),
            cx.palette.muted_text,
        );
    }
}
