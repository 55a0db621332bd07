use std::time::Instant;

use chrono::{Local, NaiveDate};

use crate::models::filter::{CreateDefaults, FilterSelection};
use crate::models::settings::EngineSettings;
use crate::models::timeline::TimelineConfig;
use crate::models::ui::ViewType;
use crate::services::appointment::AppointmentStore;
use crate::services::schedule::ScheduleSnapshot;
use crate::services::settings::SettingsService;
use crate::ui_egui::drop_zone::DropZoneRegistry;
use crate::ui_egui::gesture::{GestureController, GestureEnv};
use crate::ui_egui::settle::SettleScheduler;
use crate::ui_egui::surface::InputSurface;
use crate::ui_egui::views::{
    self, grid_view, month_view, SchedulerPalette, ViewContext, ViewOutcome,
};
use crate::utils::date::{step_anchor, visible_dates};

pub struct SchedulerApp {
    settings: EngineSettings,
    settings_service: SettingsService,
    /// Validated once at startup; settings are not edited while running
    timeline: TimelineConfig,
    store: AppointmentStore,
    filter: FilterSelection,
    current_view: ViewType,
    current_date: NaiveDate,
    gestures: GestureController,
    /// Rebuilt by the views every frame
    zones: DropZoneRegistry,
    settle: SettleScheduler,
}

impl eframe::App for SchedulerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_update(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.settings.current_view = self.current_view;
        if let Err(err) = self.settings_service.save(&self.settings) {
            log::error!("Failed to save settings: {:#}", err);
        }
    }
}

impl SchedulerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: EngineSettings,
        settings_service: SettingsService,
        store: AppointmentStore,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self::with_state(settings, settings_service, store)
    }

    fn with_state(
        settings: EngineSettings,
        settings_service: SettingsService,
        store: AppointmentStore,
    ) -> Self {
        let (timeline, warnings) = TimelineConfig::resolve(&settings.timeline);
        if !warnings.is_empty() {
            log::warn!("Timeline settings adjusted ({} warnings)", warnings.len());
        }
        let gestures = GestureController::from_settings(&settings, InputSurface::new());
        let settle = SettleScheduler::from_millis(settings.settle_millis);

        Self {
            current_view: settings.current_view,
            current_date: Local::now().date_naive(),
            settings,
            settings_service,
            timeline,
            store,
            filter: FilterSelection::default(),
            gestures,
            zones: DropZoneRegistry::new(),
            settle,
        }
    }

    fn handle_update(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        self.settle.poll(now);

        self.show_toolbar(ctx);

        let palette = SchedulerPalette::from_visuals(&ctx.style().visuals);
        let outcome = egui::CentralPanel::default()
            .show(ctx, |ui| self.show_calendar(ui, palette, now))
            .inner;

        self.handle_pointer(ctx, outcome, now);

        if let Some(cursor) = self.gestures.cursor() {
            ctx.set_cursor_icon(cursor);
        } else if let Some(cursor) = outcome.hover_cursor {
            ctx.set_cursor_icon(cursor);
        }

        let cx = self.view_context(palette, now);
        views::paint_drag_overlay(ctx, &cx);

        if self.gestures.is_active() {
            ctx.request_repaint();
        } else if let Some(deadline) = self.settle.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }

    fn view_context(&self, palette: SchedulerPalette, now: Instant) -> ViewContext<'_> {
        ViewContext {
            snapshot: ScheduleSnapshot {
                appointments: self.store.appointments(),
                filter: &self.filter,
                timeline: &self.timeline,
                view: self.current_view,
                anchor: self.current_date,
                first_day_of_week: self.settings.first_day_of_week,
            },
            gestures: &self.gestures,
            settle: &self.settle,
            now,
            palette,
        }
    }

    fn show_calendar(
        &mut self,
        ui: &mut egui::Ui,
        palette: SchedulerPalette,
        now: Instant,
    ) -> ViewOutcome {
        let mut zones = std::mem::take(&mut self.zones);
        zones.clear();
        let cx = self.view_context(palette, now);
        let outcome = match self.current_view {
            ViewType::Month => month_view::show(ui, &mut zones, &cx),
            ViewType::Day | ViewType::Week | ViewType::WorkWeek => {
                grid_view::show(ui, &mut zones, &cx)
            }
        };
        self.zones = zones;
        outcome
    }

    fn show_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("◀").clicked() {
                    self.navigate(false);
                }
                if ui.button("Today").clicked() {
                    self.gestures.cancel();
                    self.current_date = Local::now().date_naive();
                }
                if ui.button("▶").clicked() {
                    self.navigate(true);
                }

                let dates = visible_dates(
                    self.current_view,
                    self.current_date,
                    self.settings.first_day_of_week,
                );
                if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
                    ui.label(format!(
                        "{} - {}",
                        first.format("%b %d, %Y"),
                        last.format("%b %d, %Y")
                    ));
                }

                ui.separator();
                for view in ViewType::ALL {
                    if ui
                        .selectable_label(self.current_view == view, view.label())
                        .clicked()
                        && self.current_view != view
                    {
                        self.gestures.cancel();
                        self.current_view = view;
                    }
                }
            });
        });
    }

    fn navigate(&mut self, forward: bool) {
        self.gestures.cancel();
        self.current_date = step_anchor(self.current_view, self.current_date, forward);
    }

    /// Feed this frame's raw pointer state to the gesture controller.
    fn handle_pointer(&mut self, ctx: &egui::Context, outcome: ViewOutcome, now: Instant) {
        let (pressed, released, pos, escape) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
                i.key_pressed(egui::Key::Escape),
            )
        });

        let defaults = CreateDefaults::resolve(
            &self.filter,
            &self.settings.projects,
            &self.settings.task_types,
        );
        let commit = {
            let env = GestureEnv {
                appointments: self.store.appointments(),
                timeline: &self.timeline,
                view: self.current_view,
                zones: &self.zones,
                defaults: &defaults,
                default_create_minutes: self.settings.default_create_minutes,
            };

            if escape {
                self.gestures.cancel();
            }
            if pressed {
                if let (Some(pos), Some(target)) = (pos, outcome.target) {
                    self.gestures.pointer_down(pos, target, &env);
                }
            } else if let Some(pos) = pos.filter(|_| self.gestures.is_active()) {
                self.gestures.pointer_move(pos, &env);
            }

            if released && self.gestures.is_active() {
                if let Some(pos) = pos {
                    self.gestures.pointer_move(pos, &env);
                }
                self.gestures.finish(&env)
            } else {
                None
            }
        };

        if let Some(commit) = commit {
            commit.dispatch(&mut self.store);
            if let Some(id) = self.store.take_last_changed() {
                self.settle.trigger(id, now);
            }
        }
    }
}
