//! WM_TRANSIENT_FOR resolution
//!
//! Dialogs name their main window through WM_TRANSIENT_FOR. The named window
//! only works as a parent once it has a scene surface; until then the
//! currently focused window stands in, which is what the user is most likely
//! interacting with.

use crate::geometry::{Point, Rectangle, Size};
use crate::shell::{AuxPlacement, PlacementGravity, SceneSurface, SurfaceSpecification};
use crate::wm::XWaylandWm;
use log::debug;
use std::sync::Arc;
use x11rb::protocol::xproto::Window;

/// Find the scene surface `window` should be parented to
///
/// Best effort: any failure degrades to no parent. A window is never resolved
/// as its own parent.
pub fn resolve_parent(
    wm: &XWaylandWm,
    window: Window,
    transient_for: Window,
) -> Option<Arc<dyn SceneSurface>> {
    let verbose = wm.config().verbose_logging;
    let connection = wm.connection();

    if transient_for == x11rb::NONE {
        if verbose {
            debug!("{} is not transient", connection.window_debug_string(window));
        }
        return None;
    }

    let scene_surface_of = |candidate: Window| -> Option<Arc<dyn SceneSurface>> {
        if candidate == window {
            return None;
        }

        let Some(surface) = wm.get_wm_surface(candidate) else {
            if verbose {
                debug!(
                    "{} can not be transient for {} as the latter does not have an XWayland surface",
                    connection.window_debug_string(window),
                    connection.window_debug_string(candidate)
                );
            }
            return None;
        };

        let scene_surface = surface.scene_surface();
        if verbose {
            if scene_surface.is_some() {
                debug!(
                    "{} set as transient for {}",
                    connection.window_debug_string(window),
                    connection.window_debug_string(candidate)
                );
            } else {
                debug!(
                    "{} can not be transient for {} as the latter does not have a scene surface",
                    connection.window_debug_string(window),
                    connection.window_debug_string(candidate)
                );
            }
        }
        scene_surface
    };

    let parent = scene_surface_of(transient_for).or_else(|| match wm.get_focused_window() {
        Some(focused) => {
            if verbose {
                debug!(
                    "Falling back to the currently focused window ({})",
                    connection.window_debug_string(focused)
                );
            }
            scene_surface_of(focused)
        }
        None => {
            if verbose {
                debug!("There is no focused window");
            }
            None
        }
    });

    if parent.is_none() && verbose {
        debug!(
            "Failed to find a window for {} to be transient for",
            connection.window_debug_string(window)
        );
    }

    parent
}

/// Position a window either relative to its parent or absolutely
///
/// `top_left` is the desired global top left of the window's decorations.
/// With a parent the position becomes a 1x1 aux rect anchored north-west
/// against the parent's content origin.
pub fn set_position(
    parent: Option<&Arc<dyn SceneSurface>>,
    top_left: Point,
    spec: &mut SurfaceSpecification,
) {
    match parent {
        Some(parent) => {
            let local_top_left = top_left - parent.top_left() - parent.content_offset();
            spec.placement = Some(AuxPlacement {
                aux_rect: Rectangle::new(local_top_left, Size::new(1, 1)),
                surface_gravity: PlacementGravity::NorthWest,
                aux_rect_gravity: PlacementGravity::NorthWest,
            });
        }
        None => {
            spec.top_left = Some(top_left);
        }
    }
}
