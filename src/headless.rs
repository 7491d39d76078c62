//! In-memory scene graph
//!
//! A complete [`Shell`] that keeps surfaces in memory. It applies
//! specifications the way a compositor would, tells observers about the
//! results and records every request. The binary runs bridges against it
//! when there is no compositor to hand them to, and the tests inspect what
//! the bridge asked for.

use crate::error::{Result, XwmError};
use crate::geometry::{Point, Size};
use crate::shell::{
    same_object, NativeWindowState, ResizeEdge, SceneSurface, Session, Shell, SurfaceAttrib,
    SurfaceCreationParameters, SurfaceObserver, SurfaceSpecification, WindowType, WlSurfaceHandle,
};
use log::{debug, info};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

/// A named client session
#[derive(Debug)]
pub struct HeadlessSession {
    name: String,
}

impl HeadlessSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Session for HeadlessSession {
    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Stand-in for the wl_surface an X11 window renders into
pub struct HeadlessBufferSurface {
    id: u32,
    session: Arc<dyn Session>,
    keyboard_focus: AtomicBool,
}

impl HeadlessBufferSurface {
    pub fn new(id: u32, session: Arc<dyn Session>) -> Self {
        Self {
            id,
            session,
            keyboard_focus: AtomicBool::new(false),
        }
    }

    pub fn has_keyboard_focus(&self) -> bool {
        self.keyboard_focus.load(Ordering::SeqCst)
    }
}

impl WlSurfaceHandle for HeadlessBufferSurface {
    fn id(&self) -> u32 {
        self.id
    }

    fn session(&self) -> Arc<dyn Session> {
        self.session.clone()
    }

    fn set_keyboard_focus(&self, focused: bool) {
        self.keyboard_focus.store(focused, Ordering::SeqCst);
    }
}

/// A request the shell received
#[derive(Debug, Clone)]
pub enum ShellRequest {
    Create(SurfaceCreationParameters),
    Destroy { surface: u64 },
    Modify { surface: u64, spec: SurfaceSpecification },
    Move { surface: u64, timestamp: Duration },
    Resize { surface: u64, timestamp: Duration, edge: ResizeEdge },
}

struct SurfaceData {
    /// Top left of the decorations
    top_left: Point,
    /// Content size; decorations are not included
    size: Size,
    application_id: String,
    name: String,
    parent: Option<Weak<dyn SceneSurface>>,
    state: NativeWindowState,
    focused: bool,
    observers: Vec<Arc<dyn SurfaceObserver>>,
}

/// A scene surface living in a [`HeadlessShell`]
pub struct HeadlessSurface {
    id: u64,
    session: Weak<dyn Session>,
    window_type: WindowType,
    server_side_decorated: bool,
    titlebar_height: i32,
    /// Ignore observer removal, to exercise leak detection
    retain_observers: bool,
    data: Mutex<SurfaceData>,
}

/// Observer notification collected under the surface lock, sent after it
enum Notification {
    Attrib(SurfaceAttrib),
    Moved(Point),
    Resized(Size),
}

impl HeadlessSurface {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    pub fn is_server_side_decorated(&self) -> bool {
        self.server_side_decorated
    }

    pub fn has_focus(&self) -> bool {
        self.data.lock().focused
    }

    pub fn observer_count(&self) -> usize {
        self.data.lock().observers.len()
    }

    /// Compositor focus change
    pub fn set_focus(&self, focused: bool) {
        let changed = {
            let mut data = self.data.lock();
            std::mem::replace(&mut data.focused, focused) != focused
        };
        if changed {
            self.notify(vec![Notification::Attrib(SurfaceAttrib::Focus(focused))]);
        }
    }

    /// Compositor state change, e.g. from a keybinding
    pub fn set_state(&self, state: NativeWindowState) {
        let changed = {
            let mut data = self.data.lock();
            std::mem::replace(&mut data.state, state) != state
        };
        if changed {
            self.notify(vec![Notification::Attrib(SurfaceAttrib::State(state))]);
        }
    }

    /// Compositor move; `top_left` includes decorations
    pub fn move_to(&self, top_left: Point) {
        self.data.lock().top_left = top_left;
        self.notify(vec![Notification::Moved(top_left)]);
    }

    /// Compositor resize of the content
    pub fn resize(&self, size: Size) {
        self.data.lock().size = size;
        self.notify(vec![Notification::Resized(size)]);
    }

    /// The user asked to close the surface
    pub fn request_close(&self) {
        for observer in self.observers() {
            observer.client_surface_close_requested();
        }
    }

    /// An input event was delivered to the surface
    pub fn consume_input(&self, timestamp: Duration) {
        for observer in self.observers() {
            observer.input_consumed(timestamp);
        }
    }

    fn observers(&self) -> Vec<Arc<dyn SurfaceObserver>> {
        self.data.lock().observers.clone()
    }

    fn notify(&self, notifications: Vec<Notification>) {
        let observers = self.observers();
        for notification in &notifications {
            for observer in &observers {
                match notification {
                    Notification::Attrib(attrib) => observer.attrib_changed(*attrib),
                    Notification::Moved(top_left) => observer.moved_to(*top_left),
                    Notification::Resized(size) => observer.resized_to(*size),
                }
            }
        }
    }

    fn apply(&self, spec: &SurfaceSpecification) {
        let mut notifications = Vec::new();

        {
            let mut data = self.data.lock();

            if let Some(application_id) = &spec.application_id {
                data.application_id = application_id.clone();
            }
            if let Some(name) = &spec.name {
                data.name = name.clone();
            }
            if let Some(parent) = &spec.parent {
                data.parent = parent.clone();
            }

            let placed = spec.placement.and_then(|placement| {
                let parent = data.parent.as_ref().and_then(Weak::upgrade)?;
                Some(parent.top_left() + parent.content_offset() + placement.aux_rect.top_left)
            });
            if let Some(top_left) = placed.or(spec.top_left) {
                if data.top_left != top_left {
                    data.top_left = top_left;
                    notifications.push(Notification::Moved(top_left));
                }
            }

            let size = Size::new(
                spec.width.unwrap_or(data.size.width),
                spec.height.unwrap_or(data.size.height),
            );
            if data.size != size {
                data.size = size;
                notifications.push(Notification::Resized(size));
            }

            if let Some(state) = spec.state {
                if data.state != state {
                    data.state = state;
                    notifications.push(Notification::Attrib(SurfaceAttrib::State(state)));
                }
            }
        }

        self.notify(notifications);
    }
}

impl SceneSurface for HeadlessSurface {
    fn session(&self) -> Option<Arc<dyn Session>> {
        self.session.upgrade()
    }

    fn top_left(&self) -> Point {
        self.data.lock().top_left
    }

    fn content_offset(&self) -> Point {
        if self.server_side_decorated {
            Point::new(0, self.titlebar_height)
        } else {
            Point::default()
        }
    }

    fn content_size(&self) -> Size {
        self.data.lock().size
    }

    fn parent(&self) -> Option<Arc<dyn SceneSurface>> {
        self.data.lock().parent.as_ref().and_then(Weak::upgrade)
    }

    fn application_id(&self) -> String {
        self.data.lock().application_id.clone()
    }

    fn name(&self) -> String {
        self.data.lock().name.clone()
    }

    fn state(&self) -> NativeWindowState {
        self.data.lock().state
    }

    fn remove_observer(&self, observer: &Arc<dyn SurfaceObserver>) {
        if self.retain_observers {
            return;
        }
        self.data
            .lock()
            .observers
            .retain(|existing| !same_object(existing, observer));
    }
}

/// Shell keeping its scene graph in memory
#[derive(Default)]
pub struct HeadlessShell {
    titlebar_height: AtomicI32,
    next_id: AtomicU64,
    fail_creation: AtomicBool,
    retain_observers: AtomicBool,
    surfaces: Mutex<Vec<Arc<HeadlessSurface>>>,
    /// Destroyed surfaces kept alive while observers are retained
    retained: Mutex<Vec<Arc<HeadlessSurface>>>,
    requests: Mutex<Vec<ShellRequest>>,
}

impl HeadlessShell {
    pub fn new(titlebar_height: i32) -> Self {
        let shell = Self::default();
        shell.set_titlebar_height(titlebar_height);
        shell
    }

    /// Height of server-side decorations for surfaces created from now on
    pub fn set_titlebar_height(&self, height: i32) {
        self.titlebar_height.store(height, Ordering::SeqCst);
    }

    /// Make every following surface creation fail
    pub fn set_fail_creation(&self, fail: bool) {
        self.fail_creation.store(fail, Ordering::SeqCst);
    }

    /// Surfaces created from now on keep their observers forever
    pub fn set_retain_observers(&self, retain: bool) {
        self.retain_observers.store(retain, Ordering::SeqCst);
    }

    /// Live surfaces in creation order
    pub fn surfaces(&self) -> Vec<Arc<HeadlessSurface>> {
        self.surfaces.lock().clone()
    }

    pub fn requests(&self) -> Vec<ShellRequest> {
        self.requests.lock().clone()
    }

    /// Parameters of every creation request, including failed ones
    pub fn created(&self) -> Vec<SurfaceCreationParameters> {
        self.requests
            .lock()
            .iter()
            .filter_map(|request| match request {
                ShellRequest::Create(params) => Some(params.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn modifications(&self) -> Vec<SurfaceSpecification> {
        self.requests
            .lock()
            .iter()
            .filter_map(|request| match request {
                ShellRequest::Modify { spec, .. } => Some(spec.clone()),
                _ => None,
            })
            .collect()
    }

    fn find(&self, surface: &Arc<dyn SceneSurface>) -> Option<Arc<HeadlessSurface>> {
        self.surfaces
            .lock()
            .iter()
            .find(|candidate| same_object(*candidate, surface))
            .cloned()
    }

    fn record(&self, request: ShellRequest) {
        self.requests.lock().push(request);
    }
}

impl Shell for HeadlessShell {
    fn create_surface(
        &self,
        session: &Arc<dyn Session>,
        params: SurfaceCreationParameters,
        observer: Arc<dyn SurfaceObserver>,
    ) -> Result<Arc<dyn SceneSurface>> {
        self.record(ShellRequest::Create(params.clone()));

        if self.fail_creation.load(Ordering::SeqCst) {
            return Err(XwmError::SurfaceCreation(format!(
                "headless shell refused surface for session {}",
                session.name()
            )));
        }

        let parent = params.parent.clone();
        let top_left = params
            .placement
            .and_then(|placement| {
                let parent = parent.as_ref().and_then(Weak::upgrade)?;
                Some(parent.top_left() + parent.content_offset() + placement.aux_rect.top_left)
            })
            .unwrap_or(params.top_left);

        let surface = Arc::new(HeadlessSurface {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            session: Arc::downgrade(session),
            window_type: params.window_type,
            server_side_decorated: params.server_side_decorated,
            titlebar_height: self.titlebar_height.load(Ordering::SeqCst),
            retain_observers: self.retain_observers.load(Ordering::SeqCst),
            data: Mutex::new(SurfaceData {
                top_left,
                size: params.size,
                application_id: params.application_id.unwrap_or_default(),
                name: params.name.unwrap_or_default(),
                parent,
                state: params.state.unwrap_or(NativeWindowState::Restored),
                focused: false,
                observers: vec![observer],
            }),
        });

        info!(
            "🪟 Created surface {} \"{}\" for session {}",
            surface.id,
            surface.name(),
            session.name()
        );

        self.surfaces.lock().push(surface.clone());
        Ok(surface as Arc<dyn SceneSurface>)
    }

    fn destroy_surface(&self, _session: Option<Arc<dyn Session>>, surface: &Arc<dyn SceneSurface>) {
        let Some(found) = self.find(surface) else {
            debug!("Asked to destroy a surface the headless shell does not own");
            return;
        };

        self.record(ShellRequest::Destroy { surface: found.id });
        self.surfaces
            .lock()
            .retain(|candidate| !Arc::ptr_eq(candidate, &found));

        if found.retain_observers {
            self.retained.lock().push(found);
        } else {
            found.data.lock().observers.clear();
            debug!("Destroyed surface {}", found.id);
        }
    }

    fn modify_surface(
        &self,
        _session: Option<Arc<dyn Session>>,
        surface: &Arc<dyn SceneSurface>,
        spec: &SurfaceSpecification,
    ) {
        let Some(found) = self.find(surface) else {
            debug!("Asked to modify a surface the headless shell does not own");
            return;
        };

        self.record(ShellRequest::Modify {
            surface: found.id,
            spec: spec.clone(),
        });
        found.apply(spec);
    }

    fn request_move(
        &self,
        _session: Option<Arc<dyn Session>>,
        surface: &Arc<dyn SceneSurface>,
        timestamp: Duration,
    ) {
        if let Some(found) = self.find(surface) {
            self.record(ShellRequest::Move {
                surface: found.id,
                timestamp,
            });
        }
    }

    fn request_resize(
        &self,
        _session: Option<Arc<dyn Session>>,
        surface: &Arc<dyn SceneSurface>,
        timestamp: Duration,
        edge: ResizeEdge,
    ) {
        if let Some(found) = self.find(surface) {
            self.record(ShellRequest::Resize {
                surface: found.id,
                timestamp,
                edge,
            });
        }
    }
}
