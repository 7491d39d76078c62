//! Scene surface observer for XWayland windows
//!
//! Forwards compositor events to the owning [`XWaylandSurface`]. The bridge
//! owns the observer, so the back reference is weak; once the bridge is gone
//! events are dropped.

use super::XWaylandSurface;
use crate::geometry::{Point, Size};
use crate::shell::{SurfaceAttrib, SurfaceObserver, WlSurfaceHandle};
use log::warn;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;

pub struct XWaylandSurfaceObserver {
    surface: Weak<XWaylandSurface>,
    wl_surface: Arc<dyn WlSurfaceHandle>,
    latest_timestamp: Mutex<Duration>,
}

impl XWaylandSurfaceObserver {
    pub fn new(surface: Weak<XWaylandSurface>, wl_surface: Arc<dyn WlSurfaceHandle>) -> Self {
        Self {
            surface,
            wl_surface,
            latest_timestamp: Mutex::new(Duration::ZERO),
        }
    }

    /// Timestamp of the most recent input event seen by the scene surface
    pub fn latest_timestamp(&self) -> Duration {
        *self.latest_timestamp.lock()
    }

    fn with_surface(&self, event: &str, f: impl FnOnce(&XWaylandSurface) -> crate::error::Result<()>) {
        let Some(surface) = self.surface.upgrade() else {
            return;
        };
        if let Err(e) = f(&surface) {
            warn!(
                "Failed to forward {} to window 0x{:x}: {}",
                event,
                surface.window(),
                e
            );
        }
    }
}

impl SurfaceObserver for XWaylandSurfaceObserver {
    fn attrib_changed(&self, attrib: SurfaceAttrib) {
        match attrib {
            SurfaceAttrib::Focus(has_focus) => self.with_surface("focus", |surface| {
                let wl_surface = self.wl_surface.clone();
                surface.run_on_wayland_thread(Box::new(move || {
                    wl_surface.set_keyboard_focus(has_focus);
                }));
                surface.scene_surface_focus_set(has_focus)
            }),
            SurfaceAttrib::State(state) => self.with_surface("state change", |surface| {
                surface.scene_surface_state_set(state)
            }),
        }
    }

    fn resized_to(&self, size: Size) {
        self.with_surface("resize", |surface| surface.scene_surface_resized(size));
    }

    fn moved_to(&self, top_left: Point) {
        self.with_surface("move", |surface| surface.scene_surface_moved_to(top_left));
    }

    fn client_surface_close_requested(&self) {
        self.with_surface("close request", |surface| {
            surface.scene_surface_close_requested()
        });
    }

    fn input_consumed(&self, timestamp: Duration) {
        *self.latest_timestamp.lock() = timestamp;
    }
}
