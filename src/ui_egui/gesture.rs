//! Gesture coordinator.
//!
//! Owns the move, resize and create controllers and guarantees that at most
//! one of them is active. Starting a gesture force-cancels whatever was
//! running; the cancelled gesture never commits. While a gesture is active
//! the coordinator holds the input-surface guard, and every way out of the
//! gesture (commit, cancel, preemption, dropping the coordinator) drops it.

use chrono::NaiveDate;
use egui::{CursorIcon, Pos2, Rect};

use super::create::{CreateCommit, CreateController, CreateDraft};
use super::drag::{DragController, DragPhase, MoveCommit, MoveDraft};
use super::drop_zone::{DropZoneRegistry, ZoneKey};
use super::resize::{ResizeCommit, ResizeController, ResizeDraft, ResizeHandle};
use super::surface::{InputSurface, SurfaceGuard};
use super::time_grid::slot_at;
use crate::models::appointment::Appointment;
use crate::models::filter::CreateDefaults;
use crate::models::settings::EngineSettings;
use crate::models::timeline::TimelineConfig;
use crate::models::ui::ViewType;
use crate::services::appointment::ScheduleHandler;

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerTarget {
    /// Body of a card, at its current screen rect
    Card { entry_id: i64, rect: Rect },
    /// Resize handle of a card
    Edge { entry_id: i64, handle: ResizeHandle },
    /// Unoccupied space in a day column
    EmptyGrid { date: NaiveDate },
    /// Context-menu affordance; never starts a gesture
    Menu,
}

/// Per-event inputs the controllers read from.
#[derive(Clone, Copy)]
pub struct GestureEnv<'a> {
    pub appointments: &'a [Appointment],
    pub timeline: &'a TimelineConfig,
    pub view: ViewType,
    pub zones: &'a DropZoneRegistry,
    pub defaults: &'a CreateDefaults,
    pub default_create_minutes: i32,
}

impl<'a> GestureEnv<'a> {
    fn appointment(&self, entry_id: i64) -> Option<&'a Appointment> {
        self.appointments.iter().find(|appt| appt.id == entry_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize,
    Create,
}

/// Result of a completed gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureCommit {
    Move(MoveCommit),
    Resize(ResizeCommit),
    Create(CreateCommit),
}

impl GestureCommit {
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureCommit::Move(_) => GestureKind::Move,
            GestureCommit::Resize(_) => GestureKind::Resize,
            GestureCommit::Create(_) => GestureKind::Create,
        }
    }

    /// Entry the commit changed. `None` for a create, whose id is assigned
    /// by the handler.
    pub fn entry_id(&self) -> Option<i64> {
        match self {
            GestureCommit::Move(commit) => Some(commit.entry_id),
            GestureCommit::Resize(commit) => Some(commit.entry_id),
            GestureCommit::Create(_) => None,
        }
    }

    /// Hand the commit to its handler method.
    pub fn dispatch(&self, handler: &mut dyn ScheduleHandler) {
        match self {
            GestureCommit::Move(commit) => {
                log::info!(
                    "Moving appointment {} to {}",
                    commit.entry_id,
                    commit.new_start
                );
                handler.on_move(commit.entry_id, commit.new_start);
            }
            GestureCommit::Resize(commit) => {
                log::info!(
                    "Resizing appointment {} to {} - {} ({}h)",
                    commit.entry_id,
                    commit.new_start,
                    commit.new_end,
                    commit.elapsed_hours
                );
                handler.on_resize(commit.entry_id, commit.new_start, commit.new_end);
            }
            GestureCommit::Create(commit) => {
                log::info!(
                    "Creating appointment on {} at slot {} for {} minutes",
                    commit.context.date,
                    commit.context.slot,
                    commit.context.duration_minutes
                );
                handler.on_create(commit.draft.clone(), commit.context);
            }
        }
    }
}

pub struct GestureController {
    drag: DragController,
    resize: ResizeController,
    create: CreateController,
    surface: InputSurface,
    guard: Option<SurfaceGuard>,
    /// Pointer position at pointer-down, for cumulative deltas
    origin: Option<Pos2>,
}

impl GestureController {
    pub fn new(surface: InputSurface, drag_activation_distance: f32) -> Self {
        Self {
            drag: DragController::new(drag_activation_distance),
            resize: ResizeController::new(),
            create: CreateController::new(),
            surface,
            guard: None,
            origin: None,
        }
    }

    pub fn from_settings(settings: &EngineSettings, surface: InputSurface) -> Self {
        Self::new(surface, settings.drag_activation_distance)
    }

    pub fn surface(&self) -> &InputSurface {
        &self.surface
    }

    /// Cursor the host should show while a gesture is running.
    pub fn cursor(&self) -> Option<CursorIcon> {
        self.surface.cursor()
    }

    pub fn active_kind(&self) -> Option<GestureKind> {
        if self.drag.is_active() {
            Some(GestureKind::Move)
        } else if self.resize.is_active() {
            Some(GestureKind::Resize)
        } else if self.create.is_active() {
            Some(GestureKind::Create)
        } else {
            None
        }
    }

    pub fn is_active(&self) -> bool {
        self.active_kind().is_some()
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    pub fn move_draft(&self) -> Option<&MoveDraft> {
        self.drag.draft()
    }

    pub fn resize_draft(&self) -> Option<&ResizeDraft> {
        self.resize.draft()
    }

    pub fn create_draft(&self) -> Option<&CreateDraft> {
        self.create.draft()
    }

    /// Route a pointer-down to the gesture its target starts.
    pub fn pointer_down(
        &mut self,
        pos: Pos2,
        target: PointerTarget,
        env: &GestureEnv<'_>,
    ) -> Option<GestureKind> {
        let started = match target {
            PointerTarget::Card { entry_id, rect } => self.begin_move(entry_id, rect, pos, env),
            PointerTarget::Edge { entry_id, handle } => {
                self.begin_resize(entry_id, handle, pos, env)
            }
            PointerTarget::EmptyGrid { date } => self.begin_create(date, pos, env),
            PointerTarget::Menu => false,
        };
        started.then(|| self.active_kind()).flatten()
    }

    /// Arm a move. Valid in every view.
    pub fn begin_move(
        &mut self,
        entry_id: i64,
        card_rect: Rect,
        pos: Pos2,
        env: &GestureEnv<'_>,
    ) -> bool {
        let Some(appointment) = env.appointment(entry_id) else {
            log::debug!("Ignoring move of unknown appointment {}", entry_id);
            return false;
        };
        self.preempt();
        self.drag
            .begin(appointment, card_rect, pos, env.view, env.timeline);
        self.start(pos, None);
        true
    }

    /// Start an edge resize. Grid views only.
    pub fn begin_resize(
        &mut self,
        entry_id: i64,
        handle: ResizeHandle,
        pos: Pos2,
        env: &GestureEnv<'_>,
    ) -> bool {
        if !env.view.supports_resize() {
            return false;
        }
        let Some(appointment) = env.appointment(entry_id) else {
            log::debug!("Ignoring resize of unknown appointment {}", entry_id);
            return false;
        };
        self.preempt();
        self.resize.begin(appointment, handle, pos.y);
        self.start(pos, Some(handle.cursor_icon()));
        log::debug!("Resize started for appointment {} ({:?})", entry_id, handle);
        true
    }

    /// Start selecting a new entry in the column for `date`. Grid views only.
    pub fn begin_create(&mut self, date: NaiveDate, pos: Pos2, env: &GestureEnv<'_>) -> bool {
        if !env.view.supports_create() {
            return false;
        }
        let Some(column) = env.zones.rect_for(ZoneKey::Column(date)) else {
            return false;
        };
        self.preempt();
        let slot = slot_at(env.timeline, column, pos);
        self.create.begin(date, slot, env.timeline);
        self.start(pos, None);
        true
    }

    /// Update the active draft. Never commits.
    pub fn pointer_move(&mut self, pos: Pos2, env: &GestureEnv<'_>) {
        match self.active_kind() {
            Some(GestureKind::Move) => {
                let origin = self.origin.unwrap_or(pos);
                let was_armed = self.drag.phase() == DragPhase::Armed;
                self.drag.update(pos - origin, env.zones, env.timeline);
                if was_armed && self.drag.phase() == DragPhase::Dragging {
                    // Swap in a guard that also carries the grabbing cursor
                    self.guard = Some(self.surface.acquire(Some(CursorIcon::Grabbing)));
                }
            }
            Some(GestureKind::Resize) => self.resize.update(pos.y, env.timeline),
            Some(GestureKind::Create) => self.create.update(pos, env.zones, env.timeline),
            None => {}
        }
    }

    /// Release: finish the active gesture and reset to idle.
    pub fn finish(&mut self, env: &GestureEnv<'_>) -> Option<GestureCommit> {
        let commit = match self.active_kind()? {
            GestureKind::Move => self.drag.finish(env.timeline).map(GestureCommit::Move),
            GestureKind::Resize => {
                let entry_id = self.resize.draft().map(|draft| draft.entry_id);
                let original = entry_id.and_then(|id| env.appointment(id));
                self.resize.finish(original).map(GestureCommit::Resize)
            }
            GestureKind::Create => self
                .create
                .finish(env.timeline, env.defaults, env.default_create_minutes)
                .map(GestureCommit::Create),
        };
        self.release();
        commit
    }

    /// Pointer-up: apply the final position, finish, and dispatch any commit
    /// to `handler`.
    pub fn pointer_up(
        &mut self,
        pos: Pos2,
        env: &GestureEnv<'_>,
        handler: &mut dyn ScheduleHandler,
    ) -> Option<GestureCommit> {
        self.pointer_move(pos, env);
        let commit = self.finish(env)?;
        commit.dispatch(handler);
        Some(commit)
    }

    /// Abort whatever is running. Safe to call when idle.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.drag.cancel() | self.resize.cancel() | self.create.cancel();
        self.release();
        cancelled
    }

    fn preempt(&mut self) {
        if let Some(kind) = self.active_kind() {
            log::debug!("Cancelling active {:?} gesture", kind);
            self.cancel();
        }
    }

    fn start(&mut self, pos: Pos2, cursor: Option<CursorIcon>) {
        self.origin = Some(pos);
        self.guard = Some(self.surface.acquire(cursor));
    }

    fn release(&mut self) {
        self.origin = None;
        self.guard = None;
    }
}

impl Default for GestureController {
    fn default() -> Self {
        Self::from_settings(&EngineSettings::default(), InputSurface::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appointment::{at_minute, AppointmentDraft};
    use crate::services::appointment::CreateContext;
    use crate::ui_egui::time_grid::card_rect;
    use chrono::NaiveDateTime;
    use egui::Vec2;

    #[derive(Default)]
    struct Recorder {
        moves: Vec<(i64, NaiveDateTime)>,
        resizes: Vec<(i64, NaiveDateTime, NaiveDateTime)>,
        creates: Vec<(AppointmentDraft, CreateContext)>,
    }

    impl ScheduleHandler for Recorder {
        fn on_move(&mut self, entry_id: i64, new_start: NaiveDateTime) {
            self.moves.push((entry_id, new_start));
        }
        fn on_resize(&mut self, entry_id: i64, new_start: NaiveDateTime, new_end: NaiveDateTime) {
            self.resizes.push((entry_id, new_start, new_end));
        }
        fn on_create(&mut self, draft: AppointmentDraft, context: CreateContext) {
            self.creates.push((draft, context));
        }
    }

    struct Fixture {
        appointments: Vec<Appointment>,
        timeline: TimelineConfig,
        zones: DropZoneRegistry,
        defaults: CreateDefaults,
    }

    impl Fixture {
        fn new() -> Self {
            let timeline = TimelineConfig::default();
            let mut zones = DropZoneRegistry::new();
            zones.register(
                ZoneKey::Column(day()),
                Rect::from_min_size(Pos2::ZERO, Vec2::new(100.0, timeline.column_height())),
            );
            let appointments = vec![Appointment::builder()
                .id(1)
                .start(at_minute(day(), 9 * 60))
                .end(at_minute(day(), 10 * 60))
                .build(15)
                .unwrap()];
            Self {
                appointments,
                timeline,
                zones,
                defaults: CreateDefaults::default(),
            }
        }

        fn env(&self, view: ViewType) -> GestureEnv<'_> {
            GestureEnv {
                appointments: &self.appointments,
                timeline: &self.timeline,
                view,
                zones: &self.zones,
                defaults: &self.defaults,
                default_create_minutes: 30,
            }
        }

        fn card(&self) -> Rect {
            let column = self.zones.rect_for(ZoneKey::Column(day())).unwrap();
            card_rect(&self.timeline, column, 540, 600, 0, 1)
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_resize_preempts_move_without_commit() {
        let fx = Fixture::new();
        let env = fx.env(ViewType::Week);
        let mut gestures = GestureController::default();
        let mut recorder = Recorder::default();

        let card = fx.card();
        let grab = card.center();
        gestures.pointer_down(grab, PointerTarget::Card { entry_id: 1, rect: card }, &env);
        gestures.pointer_move(grab + Vec2::new(0.0, 100.0), &env);
        assert_eq!(gestures.drag_phase(), DragPhase::Dragging);

        let edge = card.center_bottom();
        let started = gestures.pointer_down(
            edge,
            PointerTarget::Edge {
                entry_id: 1,
                handle: ResizeHandle::Bottom,
            },
            &env,
        );
        assert_eq!(started, Some(GestureKind::Resize));
        assert!(gestures.move_draft().is_none());
        assert_eq!(gestures.cursor(), Some(CursorIcon::ResizeVertical));

        let commit = gestures.pointer_up(edge + Vec2::new(0.0, 48.0), &env, &mut recorder);
        assert_eq!(commit.map(|c| c.kind()), Some(GestureKind::Resize));
        assert!(recorder.moves.is_empty());
        assert_eq!(
            recorder.resizes,
            vec![(1, at_minute(day(), 540), at_minute(day(), 630))]
        );
        assert!(!gestures.surface().is_captured());
        assert_eq!(gestures.cursor(), None);
    }

    #[test]
    fn test_month_view_rejects_resize_and_create() {
        let fx = Fixture::new();
        let env = fx.env(ViewType::Month);
        let mut gestures = GestureController::default();

        let edge = PointerTarget::Edge {
            entry_id: 1,
            handle: ResizeHandle::Top,
        };
        assert_eq!(gestures.pointer_down(Pos2::new(5.0, 5.0), edge, &env), None);
        let empty = PointerTarget::EmptyGrid { date: day() };
        assert_eq!(gestures.pointer_down(Pos2::new(5.0, 5.0), empty, &env), None);
        assert!(!gestures.surface().is_captured());
    }

    #[test]
    fn test_menu_target_starts_nothing() {
        let fx = Fixture::new();
        let env = fx.env(ViewType::Day);
        let mut gestures = GestureController::default();
        assert_eq!(gestures.pointer_down(Pos2::ZERO, PointerTarget::Menu, &env), None);
        assert!(!gestures.is_active());
    }

    #[test]
    fn test_click_on_empty_grid_creates_default_entry() {
        let fx = Fixture::new();
        let env = fx.env(ViewType::Day);
        let mut gestures = GestureController::default();
        let mut recorder = Recorder::default();

        let pos = Pos2::new(50.0, 38.0 * fx.timeline.slot_height() + 3.0);
        gestures.pointer_down(pos, PointerTarget::EmptyGrid { date: day() }, &env);
        assert!(gestures.surface().is_captured());
        gestures.pointer_up(pos, &env, &mut recorder);

        assert_eq!(recorder.creates.len(), 1);
        let (draft, context) = &recorder.creates[0];
        assert_eq!(draft.start, at_minute(day(), 570));
        assert_eq!(context.duration_minutes, 30);
        assert!(!gestures.surface().is_captured());
    }

    #[test]
    fn test_cancel_is_idempotent_and_releases_surface() {
        let fx = Fixture::new();
        let env = fx.env(ViewType::Week);
        let mut gestures = GestureController::default();
        let card = fx.card();
        gestures.pointer_down(card.center(), PointerTarget::Card { entry_id: 1, rect: card }, &env);
        gestures.pointer_move(card.center() + Vec2::new(0.0, 30.0), &env);
        assert_eq!(gestures.cursor(), Some(CursorIcon::Grabbing));

        assert!(gestures.cancel());
        assert!(!gestures.cancel());
        assert!(!gestures.surface().is_captured());
        assert!(gestures.finish(&env).is_none());
    }

    #[test]
    fn test_dropping_controller_releases_surface() {
        let fx = Fixture::new();
        let env = fx.env(ViewType::Week);
        let surface = InputSurface::new();
        {
            let mut gestures = GestureController::new(surface.clone(), 4.0);
            gestures.pointer_down(
                Pos2::new(10.0, 10.0),
                PointerTarget::EmptyGrid { date: day() },
                &env,
            );
            assert!(surface.is_captured());
        }
        assert!(!surface.is_captured());
    }
}
