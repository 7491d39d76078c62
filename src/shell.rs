//! The compositor side of the bridge
//!
//! These traits describe what the bridge consumes from the compositor shell
//! and its scene graph. [`crate::headless`] provides an in-memory
//! implementation.

use crate::error::Result;
use crate::geometry::{Point, Rectangle, Size};
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Window states understood by the compositor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeWindowState {
    Unknown,
    Restored,
    Minimized,
    Maximized,
    VertMaximized,
    Fullscreen,
    HorizMaximized,
    Hidden,
    Attached,
}

/// Edge or corner grabbed by an interactive resize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

/// Anchor points used when placing a surface against an auxiliary rect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementGravity {
    Center,
    North,
    South,
    East,
    West,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

/// Scene-graph window type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowType {
    /// No shell semantics; the client places itself
    #[default]
    Freestyle,
}

/// Placement of a child surface relative to its parent's content origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxPlacement {
    pub aux_rect: Rectangle,
    pub surface_gravity: PlacementGravity,
    pub aux_rect_gravity: PlacementGravity,
}

/// A partial set of surface attributes; unset fields are left alone
#[derive(Debug, Clone, Default)]
pub struct SurfaceSpecification {
    pub application_id: Option<String>,
    pub name: Option<String>,
    /// `Some(None)` explicitly clears the parent
    pub parent: Option<Option<Weak<dyn SceneSurface>>>,
    pub top_left: Option<Point>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub state: Option<NativeWindowState>,
    pub placement: Option<AuxPlacement>,
}

impl SurfaceSpecification {
    pub fn is_empty(&self) -> bool {
        self.application_id.is_none()
            && self.name.is_none()
            && self.parent.is_none()
            && self.top_left.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.state.is_none()
            && self.placement.is_none()
    }
}

/// Everything the shell needs to create a scene surface
#[derive(Debug, Clone, Default)]
pub struct SurfaceCreationParameters {
    pub top_left: Point,
    pub size: Size,
    pub window_type: WindowType,
    pub state: Option<NativeWindowState>,
    pub server_side_decorated: bool,
    pub application_id: Option<String>,
    pub name: Option<String>,
    pub parent: Option<Weak<dyn SceneSurface>>,
    pub placement: Option<AuxPlacement>,
}

impl SurfaceCreationParameters {
    /// Fold a pending specification into the creation request
    pub fn update_from(&mut self, spec: &SurfaceSpecification) {
        if let Some(application_id) = &spec.application_id {
            self.application_id = Some(application_id.clone());
        }
        if let Some(name) = &spec.name {
            self.name = Some(name.clone());
        }
        if let Some(parent) = &spec.parent {
            self.parent = parent.clone();
        }
        if let Some(top_left) = spec.top_left {
            self.top_left = top_left;
        }
        if let Some(width) = spec.width {
            self.size.width = width;
        }
        if let Some(height) = spec.height {
            self.size.height = height;
        }
        if let Some(state) = spec.state {
            self.state = Some(state);
        }
        if let Some(placement) = spec.placement {
            self.placement = Some(placement);
        }
    }
}

/// A client session owning scene surfaces
pub trait Session: Send + Sync {
    fn name(&self) -> String;
}

/// A live compositor-native surface
pub trait SceneSurface: Send + Sync {
    fn session(&self) -> Option<Arc<dyn Session>>;
    fn top_left(&self) -> Point;
    /// Offset from the surface's top left to its content (decorations)
    fn content_offset(&self) -> Point;
    fn content_size(&self) -> Size;
    fn parent(&self) -> Option<Arc<dyn SceneSurface>>;
    fn application_id(&self) -> String;
    fn name(&self) -> String;
    fn state(&self) -> NativeWindowState;
    fn remove_observer(&self, observer: &Arc<dyn SurfaceObserver>);
}

/// Attribute changes reported by a scene surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceAttrib {
    Focus(bool),
    State(NativeWindowState),
}

/// Receives compositor-originated events for one scene surface
pub trait SurfaceObserver: Send + Sync {
    fn attrib_changed(&self, attrib: SurfaceAttrib);
    fn resized_to(&self, size: Size);
    fn moved_to(&self, top_left: Point);
    fn client_surface_close_requested(&self);
    /// An input event with the given timestamp was delivered to the surface
    fn input_consumed(&self, timestamp: Duration);
}

/// The low-level buffer surface an X11 window renders into
pub trait WlSurfaceHandle: Send + Sync {
    /// Protocol object id, matched against WL_SURFACE_ID client messages
    fn id(&self) -> u32;
    fn session(&self) -> Arc<dyn Session>;
    /// Deliver keyboard focus; only called on the Wayland thread
    fn set_keyboard_focus(&self, focused: bool);
}

/// Surface management provided by the compositor shell
pub trait Shell: Send + Sync {
    fn create_surface(
        &self,
        session: &Arc<dyn Session>,
        params: SurfaceCreationParameters,
        observer: Arc<dyn SurfaceObserver>,
    ) -> Result<Arc<dyn SceneSurface>>;

    fn destroy_surface(&self, session: Option<Arc<dyn Session>>, surface: &Arc<dyn SceneSurface>);

    fn modify_surface(
        &self,
        session: Option<Arc<dyn Session>>,
        surface: &Arc<dyn SceneSurface>,
        spec: &SurfaceSpecification,
    );

    fn request_move(
        &self,
        session: Option<Arc<dyn Session>>,
        surface: &Arc<dyn SceneSurface>,
        timestamp: Duration,
    );

    fn request_resize(
        &self,
        session: Option<Arc<dyn Session>>,
        surface: &Arc<dyn SceneSurface>,
        timestamp: Duration,
        edge: ResizeEdge,
    );
}

/// Identity comparison that ignores trait object metadata
pub fn same_object<T: ?Sized, U: ?Sized>(a: &Arc<T>, b: &Arc<U>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

/// Whether a specification's parent refers to the same surface as `current`
pub fn same_parent(
    requested: &Option<Weak<dyn SceneSurface>>,
    current: &Option<Arc<dyn SceneSurface>>,
) -> bool {
    match (requested.as_ref().and_then(Weak::upgrade), current) {
        (None, None) => true,
        (Some(requested), Some(current)) => same_object(&requested, current),
        _ => false,
    }
}
