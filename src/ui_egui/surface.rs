//! Top-level input surface shared by all gestures.
//!
//! A gesture that is in progress holds a [`SurfaceGuard`]. While the guard
//! lives the surface reports the pointer as captured (moves and releases are
//! routed to the gesture even outside the card that started it) and may
//! carry a cursor override. Dropping the guard releases both, so every exit
//! path of a gesture cleans up without matching add/remove calls.

use std::cell::RefCell;
use std::rc::Rc;

use egui::CursorIcon;

#[derive(Debug, Default)]
struct SurfaceState {
    captured: bool,
    cursor: Option<CursorIcon>,
    /// Incremented on every acquire so a stale guard can't release a newer one
    generation: u64,
}

/// Handle to the process-wide input surface. Cheap to clone; all clones
/// share state. Single-threaded by construction.
#[derive(Debug, Clone, Default)]
pub struct InputSurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl InputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the pointer and optionally override the cursor.
    ///
    /// Any previous capture is superseded; its guard becomes inert.
    pub fn acquire(&self, cursor: Option<CursorIcon>) -> SurfaceGuard {
        let mut state = self.state.borrow_mut();
        state.generation += 1;
        state.captured = true;
        state.cursor = cursor;
        SurfaceGuard {
            surface: self.clone(),
            generation: state.generation,
        }
    }

    pub fn is_captured(&self) -> bool {
        self.state.borrow().captured
    }

    /// Cursor the host should show this frame, if overridden.
    pub fn cursor(&self) -> Option<CursorIcon> {
        self.state.borrow().cursor
    }

    fn release(&self, generation: u64) {
        let mut state = self.state.borrow_mut();
        if state.generation == generation {
            state.captured = false;
            state.cursor = None;
        }
    }
}

/// Pointer capture plus cursor override, released on drop.
#[derive(Debug)]
#[must_use = "dropping the guard releases the capture immediately"]
pub struct SurfaceGuard {
    surface: InputSurface,
    generation: u64,
}

impl SurfaceGuard {
    /// Release now. Same as dropping the guard.
    pub fn release(self) {}
}

impl Drop for SurfaceGuard {
    fn drop(&mut self) {
        self.surface.release(self.generation);
    }
}
