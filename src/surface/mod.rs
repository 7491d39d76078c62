//! Per-window bridge between an X11 window and its scene surface
//!
//! An [`XWaylandSurface`] is created for every X11 window the window manager
//! sees. It mirrors the window-manager-visible state of the window (mapped or
//! withdrawn, minimized, maximized, fullscreen, title, class, parent) into the
//! compositor's scene surface once the client attaches a wl_surface, and it
//! reports compositor-driven changes (focus, geometry, state, close requests)
//! back to the client as ICCCM/EWMH properties and client messages.
//!
//! Events arrive from two threads: the X event thread and the compositor
//! thread. All mutable state sits behind one mutex. Anything needed outside the
//! lock is copied out first; X requests and shell calls are always made
//! without holding it, because either side may call straight back in.

mod observer;


pub use observer::XWaylandSurfaceObserver;

use crate::config::XWaylandConfig;
use crate::connection::{PropertyData, XConnection};
use crate::error::{Result, XwmError};
use crate::geometry::{Point, Size};
use crate::pending::{drop_redundant, PendingSpec};
use crate::property::{fetch, PropertyCompletion, WatchedProperty, WmClass};
use crate::shell::{
    NativeWindowState, ResizeEdge, SceneSurface, Session, Shell, SurfaceCreationParameters,
    SurfaceObserver, SurfaceSpecification, WindowType, WlSurfaceHandle,
};
use crate::transient::{resolve_parent, set_position};
use crate::window_state::{
    NetWmMoveResize, NetWmStateAction, SourceIndication, WindowState, WmState,
};
use crate::wm::XWaylandWm;
use log::{debug, error, warn};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::{Arc, Weak};
use std::time::Duration;
use x11rb::protocol::xproto::{
    Atom, ConfigWindow, ConfigureNotifyEvent, ConfigureRequestEvent, CreateNotifyEvent, EventMask,
    StackMode, Window,
};

/// Window state last seen from the X side
#[derive(Debug, Clone, Default)]
struct CachedState {
    /// Fixed at creation; the window places and decorates itself
    override_redirect: bool,
    top_left: Point,
    size: Size,
    /// WM_PROTOCOLS advertised by the client (WM_DELETE_WINDOW, WM_TAKE_FOCUS, ...)
    supported_wm_protocols: HashSet<Atom>,
    state: WindowState,
}

/// Everything guarded by the bridge mutex
struct SurfaceState {
    cached: CachedState,
    pending_spec: PendingSpec,
    scene_surface: Option<Weak<dyn SceneSurface>>,
    session: Option<Weak<dyn Session>>,
    observer: Option<Arc<XWaylandSurfaceObserver>>,
    /// Set by close, cleared by map and attach
    closed: bool,
}

impl SurfaceState {
    fn scene_surface(&self) -> Option<Arc<dyn SceneSurface>> {
        self.scene_surface.as_ref().and_then(Weak::upgrade)
    }

    fn session(&self) -> Option<Arc<dyn Session>> {
        self.session.as_ref().and_then(Weak::upgrade)
    }

    fn latest_input_timestamp(&self) -> Duration {
        match &self.observer {
            Some(observer) => observer.latest_timestamp(),
            None => {
                warn!("Can not get timestamp because surface observer is null");
                Duration::ZERO
            }
        }
    }
}

/// The bridge for a single X11 window
pub struct XWaylandSurface {
    /// Owner; the window manager keeps the table of bridges
    wm: Weak<XWaylandWm>,
    connection: Arc<dyn XConnection>,
    shell: Arc<dyn Shell>,
    window: Window,
    /// _NET_WM_DESKTOP value written on map
    desktop: u32,
    verbose: bool,
    state: Mutex<SurfaceState>,
}

impl XWaylandSurface {
    /// Create the bridge for a newly created X11 window
    ///
    /// The window starts out withdrawn with the geometry from the event.
    pub fn new(
        wm: Weak<XWaylandWm>,
        connection: Arc<dyn XConnection>,
        shell: Arc<dyn Shell>,
        config: &XWaylandConfig,
        event: &CreateNotifyEvent,
    ) -> Result<Self> {
        connection.select_window_events(
            event.window,
            EventMask::PROPERTY_CHANGE | EventMask::FOCUS_CHANGE,
        )?;

        let cached = CachedState {
            override_redirect: event.override_redirect,
            top_left: Point::new(event.x.into(), event.y.into()),
            size: Size::new(event.width.into(), event.height.into()),
            supported_wm_protocols: HashSet::new(),
            state: WindowState {
                withdrawn: true,
                ..Default::default()
            },
        };

        Ok(Self {
            wm,
            connection,
            shell,
            window: event.window,
            desktop: config.desktop,
            verbose: config.verbose_logging,
            state: Mutex::new(SurfaceState {
                cached,
                pending_spec: PendingSpec::default(),
                scene_surface: None,
                session: None,
                observer: None,
                closed: false,
            }),
        })
    }

    pub fn window(&self) -> Window {
        self.window
    }

    /// The live scene surface, if a wl_surface has been attached
    pub fn scene_surface(&self) -> Option<Arc<dyn SceneSurface>> {
        self.state.lock().scene_surface()
    }

    /// Current window state as last reported to the client
    pub fn window_state(&self) -> WindowState {
        self.state.lock().cached.state
    }

    /// Last known X-side geometry
    pub fn geometry(&self) -> (Point, Size) {
        let state = self.state.lock();
        (state.cached.top_left, state.cached.size)
    }

    pub fn is_override_redirect(&self) -> bool {
        self.state.lock().cached.override_redirect
    }

    pub fn supports_protocol(&self, protocol: Atom) -> bool {
        self.state.lock().cached.supported_wm_protocols.contains(&protocol)
    }

    /// Timestamp of the latest input event delivered to the scene surface
    pub fn latest_input_timestamp(&self) -> Duration {
        self.state.lock().latest_input_timestamp()
    }

    /// Show the window
    pub fn map(&self) -> Result<()> {
        let mut state = {
            let mut guard = self.state.lock();
            guard.closed = false;
            guard.cached.state
        };
        let atoms = self.connection.atoms();

        self.connection.set_property(
            self.window,
            atoms.net_wm_desktop,
            PropertyData::Cardinal(vec![self.desktop]),
        )?;

        state.withdrawn = false;
        self.inform_client_of_window_state(state)?;
        self.request_scene_surface_state(state.to_native_state());

        self.connection.map_window(self.window)?;
        self.connection.flush()
    }

    /// Withdraw the window and tear down its scene surface and observer
    ///
    /// Teardown always runs to completion; X errors are logged. Panics if the
    /// observer is still referenced once the scene surface is gone, since it
    /// could otherwise deliver events for a dead bridge.
    pub fn close(&self) {
        let (state, scene_surface, observer) = {
            let mut guard = self.state.lock();
            guard.closed = true;
            let scene_surface = guard.scene_surface();
            guard.scene_surface = None;
            guard.session = None;
            (guard.cached.state, scene_surface, guard.observer.take())
        };

        if let Err(e) = self.withdraw(state) {
            warn!(
                "Failed to withdraw {}: {}",
                self.connection.window_debug_string(self.window),
                e
            );
        }

        if let Some(scene_surface) = scene_surface {
            if let Some(observer) = &observer {
                let observer: Arc<dyn SurfaceObserver> = observer.clone();
                scene_surface.remove_observer(&observer);
            }
            // Someone else may still hold the surface; that is fine
            self.shell.destroy_surface(scene_surface.session(), &scene_surface);
        }

        if let Some(observer) = observer {
            let weak_observer = Arc::downgrade(&observer);
            drop(observer);
            if let Some(survivor) = weak_observer.upgrade() {
                panic!(
                    "surface observer should have been deleted, but was not (use count {})",
                    Arc::strong_count(&survivor) - 1
                );
            }
        }
    }

    fn withdraw(&self, mut state: WindowState) -> Result<()> {
        let atoms = self.connection.atoms();
        self.connection.delete_property(self.window, atoms.net_wm_desktop)?;

        state.withdrawn = true;
        self.inform_client_of_window_state(state)?;

        self.connection.unmap_window(self.window)?;
        self.connection.flush()
    }

    /// Give the window input focus
    pub fn take_focus(&self) -> Result<()> {
        let atoms = self.connection.atoms();
        let supports_take_focus = {
            let state = self.state.lock();
            if state.cached.override_redirect {
                return Ok(());
            }
            state.cached.supported_wm_protocols.contains(&atoms.wm_take_focus)
        };

        if supports_take_focus {
            self.connection.send_client_message(
                self.window,
                atoms.wm_protocols,
                EventMask::SUBSTRUCTURE_REDIRECT,
                [atoms.wm_take_focus, x11rb::CURRENT_TIME, 0, 0, 0],
            )?;
        }

        // Clients without a focus protocol still expect plain input focus
        self.connection.set_input_focus(self.window)?;
        self.connection.flush()
    }

    /// Handle a client's request to change its geometry
    pub fn configure_request(&self, event: &ConfigureRequestEvent) -> Result<()> {
        let mask = u16::from(event.value_mask);
        let requested = |field: ConfigWindow| mask & u16::from(field) != 0;

        let scene_surface = self.state.lock().scene_surface();

        let Some(scene_surface) = scene_surface else {
            let (top_left, size) = {
                let mut state = self.state.lock();
                let cached = &mut state.cached;
                if requested(ConfigWindow::X) {
                    cached.top_left.x = event.x.into();
                }
                if requested(ConfigWindow::Y) {
                    cached.top_left.y = event.y.into();
                }
                if requested(ConfigWindow::WIDTH) {
                    cached.size.width = event.width.into();
                }
                if requested(ConfigWindow::HEIGHT) {
                    cached.size.height = event.height.into();
                }
                (cached.top_left, cached.size)
            };

            self.connection
                .configure_window(self.window, Some(top_left), Some(size), None)?;
            return self.connection.flush();
        };

        let content_offset = scene_surface.content_offset();

        let old_position = scene_surface.top_left() + content_offset;
        let new_position = Point::new(
            if requested(ConfigWindow::X) { event.x.into() } else { old_position.x },
            if requested(ConfigWindow::Y) { event.y.into() } else { old_position.y },
        );

        let old_size = scene_surface.content_size();
        let new_size = Size::new(
            if requested(ConfigWindow::WIDTH) { event.width.into() } else { old_size.width },
            if requested(ConfigWindow::HEIGHT) { event.height.into() } else { old_size.height },
        );

        let mut mods = SurfaceSpecification::default();

        if old_position != new_position {
            set_position(
                scene_surface.parent().as_ref(),
                new_position - content_offset,
                &mut mods,
            );
        }

        if old_size != new_size {
            // The shell does not reliably honor one dimension on its own
            mods.width = Some(new_size.width);
            mods.height = Some(new_size.height);
        }

        if !mods.is_empty() {
            self.shell
                .modify_surface(scene_surface.session(), &scene_surface, &mods);
        }

        Ok(())
    }

    /// Record geometry the X server has already applied
    pub fn configure_notify(&self, event: &ConfigureNotifyEvent) {
        let mut state = self.state.lock();
        state.cached.override_redirect = event.override_redirect;
        state.cached.top_left = Point::new(event.x.into(), event.y.into());
        state.cached.size = Size::new(event.width.into(), event.height.into());
    }

    /// EWMH `_NET_WM_STATE` request from the client
    ///
    /// `data` is `[action, first property, second property, source, 0]`.
    /// Maximized horizontally is taken to mean maximized in both directions.
    pub fn net_wm_state_client_message(&self, data: &[u32; 5]) -> Result<()> {
        let action =
            NetWmStateAction::try_from(data[0]).map_err(XwmError::InvalidNetWmStateAction)?;
        let properties = [data[1], data[2]];
        let source = SourceIndication::try_from(data[3]).unwrap_or(SourceIndication::Unknown);

        if self.verbose {
            debug!(
                "{} requested {:?} of {:?} (source {:?})",
                self.connection.window_debug_string(self.window),
                action,
                properties,
                source
            );
        }

        let atoms = self.connection.atoms();
        let new_window_state = {
            let state = self.state.lock();
            let mut new_window_state = state.cached.state;

            // An unused second property is 0
            for property in properties.into_iter().filter(|p| *p != x11rb::NONE) {
                if property == atoms.net_wm_state_hidden {
                    action.apply(&mut new_window_state.minimized);
                } else if property == atoms.net_wm_state_maximized_horz {
                    action.apply(&mut new_window_state.maximized);
                } else if property == atoms.net_wm_state_fullscreen {
                    action.apply(&mut new_window_state.fullscreen);
                }
            }

            new_window_state
        };

        self.inform_client_of_window_state(new_window_state)?;
        self.request_scene_surface_state(new_window_state.to_native_state());
        Ok(())
    }

    /// ICCCM WM_CHANGE_STATE request from the client
    ///
    /// Only NormalState and IconicState may be requested; anything else is
    /// rejected before any state changes.
    pub fn wm_change_state_client_message(&self, data: &[u32; 5]) -> Result<()> {
        let requested_state = data[0];

        let new_window_state = {
            let state = self.state.lock();
            let mut new_window_state = state.cached.state;

            match WmState::try_from(requested_state) {
                Ok(WmState::Normal) => new_window_state.minimized = false,
                Ok(WmState::Iconic) => new_window_state.minimized = true,
                Ok(WmState::Withdrawn) | Err(_) => {
                    return Err(XwmError::InvalidWmChangeState(requested_state));
                }
            }

            new_window_state
        };

        self.inform_client_of_window_state(new_window_state)?;
        self.request_scene_surface_state(new_window_state.to_native_state());
        Ok(())
    }

    /// A property on the window changed
    pub fn property_notify(&self, property: Atom) -> Result<()> {
        let Some(watched) = WatchedProperty::from_atom(property, self.connection.atoms()) else {
            return Ok(());
        };

        let completion = self.property_fetch(watched);
        completion();

        let (scene_surface, spec) = {
            let mut state = self.state.lock();
            (state.scene_surface(), state.pending_spec.consume())
        };

        if let (Some(spec), Some(scene_surface)) = (spec, scene_surface) {
            if let Some(spec) = drop_redundant(spec, scene_surface.as_ref()) {
                self.shell
                    .modify_surface(scene_surface.session(), &scene_surface, &spec);
            }
        }

        Ok(())
    }

    /// Attach the wl_surface the client renders into and create the scene surface
    ///
    /// May only succeed once per attachment; the surface is published only
    /// after the shell has created it. A failed creation leaves the bridge
    /// detached.
    pub fn attach(self: &Arc<Self>, wl_surface: Arc<dyn WlSurfaceHandle>) -> Result<()> {
        if self.verbose {
            debug!(
                "Attaching wl_surface@{} to {}...",
                wl_surface.id(),
                self.connection.window_debug_string(self.window)
            );
        }

        let observer = Arc::new(XWaylandSurfaceObserver::new(
            Arc::downgrade(self),
            wl_surface.clone(),
        ));

        let (state, session, mut params) = {
            let mut guard = self.state.lock();

            if guard.observer.is_some() || guard.session().is_some() || guard.scene_surface().is_some()
            {
                return Err(XwmError::SurfaceAlreadyAttached(self.window));
            }

            let session = wl_surface.session();
            guard.observer = Some(observer.clone());
            guard.session = Some(Arc::downgrade(&session));

            let mut state = guard.cached.state;
            state.withdrawn = false;

            let params = SurfaceCreationParameters {
                top_left: guard.cached.top_left,
                size: guard.cached.size,
                window_type: WindowType::Freestyle,
                state: Some(state.to_native_state()),
                server_side_decorated: !guard.cached.override_redirect,
                ..Default::default()
            };

            (state, session, params)
        };

        // Issue every read before waiting on any of them
        let completions: Vec<PropertyCompletion<'_>> = WatchedProperty::ALL
            .into_iter()
            .map(|property| self.property_fetch(property))
            .collect();
        for completion in completions {
            completion();
        }

        if let Some(spec) = self.state.lock().pending_spec.consume() {
            params.update_from(&spec);
        }

        let surface = match self.shell.create_surface(&session, params, observer) {
            Ok(surface) => surface,
            Err(e) => {
                let mut guard = self.state.lock();
                guard.observer = None;
                guard.session = None;
                return Err(e);
            }
        };
        {
            let mut guard = self.state.lock();
            guard.scene_surface = Some(Arc::downgrade(&surface));
            guard.closed = false;
        }

        self.inform_client_of_window_state(state.updated_from(surface.state()))?;
        self.connection.configure_window(
            self.window,
            Some(surface.top_left() + surface.content_offset()),
            Some(surface.content_size()),
            Some(StackMode::ABOVE),
        )?;
        self.connection.flush()
    }

    /// EWMH `_NET_WM_MOVERESIZE` request from the client
    pub fn move_resize(&self, detail: u32) -> Result<()> {
        let (scene_surface, timestamp) = {
            let state = self.state.lock();
            (state.scene_surface(), state.latest_input_timestamp())
        };

        let action = match NetWmMoveResize::try_from(detail) {
            Ok(action) => action,
            Err(detail) => {
                warn!("move_resize() called with unknown detail {}", detail);
                return Ok(());
            }
        };

        match (action, resize_edge(action)) {
            (NetWmMoveResize::Move, _) => {
                if let Some(scene_surface) = scene_surface {
                    self.shell
                        .request_move(scene_surface.session(), &scene_surface, timestamp);
                }
            }
            (_, Some(edge)) => {
                if let Some(scene_surface) = scene_surface {
                    self.shell.request_resize(
                        scene_surface.session(),
                        &scene_surface,
                        timestamp,
                        edge,
                    );
                }
            }
            // TODO: keyboard driven move/resize and cancel need seat grab support in the shell
            (action, None) => {
                debug!(
                    "move_resize() {:?} for {} is not implemented",
                    action,
                    self.connection.window_debug_string(self.window)
                );
            }
        }

        Ok(())
    }

    /// The scene surface gained or lost focus
    pub fn scene_surface_focus_set(&self, has_focus: bool) -> Result<()> {
        if let Some(wm) = self.wm.upgrade() {
            wm.set_focus(self.window, has_focus)?;
        }

        // A focused window is not necessarily on top, but the real stacking
        // order is not available here
        self.connection
            .configure_window(self.window, None, None, Some(StackMode::ABOVE))?;
        self.connection.flush()
    }

    /// The compositor changed the surface's state
    pub fn scene_surface_state_set(&self, new_state: NativeWindowState) -> Result<()> {
        let state = self.state.lock().cached.state.updated_from(new_state);
        self.inform_client_of_window_state(state)?;

        if matches!(
            new_state,
            NativeWindowState::Minimized | NativeWindowState::Hidden
        ) {
            self.connection
                .configure_window(self.window, None, None, Some(StackMode::BELOW))?;
            self.connection.flush()?;
        }

        Ok(())
    }

    /// The compositor resized the surface's content
    pub fn scene_surface_resized(&self, new_size: Size) -> Result<()> {
        self.connection
            .configure_window(self.window, None, Some(new_size), None)?;
        self.connection.flush()
    }

    /// The compositor moved the surface; `new_top_left` includes decorations
    pub fn scene_surface_moved_to(&self, new_top_left: Point) -> Result<()> {
        let content_offset = self
            .scene_surface()
            .map(|surface| surface.content_offset())
            .unwrap_or_default();

        self.connection.configure_window(
            self.window,
            Some(new_top_left + content_offset),
            None,
            None,
        )?;
        self.connection.flush()
    }

    /// The user asked to close the window
    pub fn scene_surface_close_requested(&self) -> Result<()> {
        let atoms = self.connection.atoms();
        let delete_window = self
            .state
            .lock()
            .cached
            .supported_wm_protocols
            .contains(&atoms.wm_delete_window);

        if delete_window {
            if self.verbose {
                debug!(
                    "Sending WM_DELETE_WINDOW request to {}",
                    self.connection.window_debug_string(self.window)
                );
            }
            self.connection.send_client_message(
                self.window,
                atoms.wm_protocols,
                EventMask::NO_EVENT,
                [atoms.wm_delete_window, x11rb::CURRENT_TIME, 0, 0, 0],
            )?;
        } else {
            if self.verbose {
                debug!(
                    "Killing {} because it does not support WM_DELETE_WINDOW",
                    self.connection.window_debug_string(self.window)
                );
            }
            self.connection.kill_client(self.window)?;
        }

        self.connection.flush()
    }

    /// The wl_surface backing this window went away
    pub fn wl_surface_destroyed(&self) {
        if self.verbose {
            debug!(
                "{}'s wl_surface destroyed",
                self.connection.window_debug_string(self.window)
            );
        }
        self.close();
    }

    /// Run `work` on the Wayland thread, inline if already on it
    pub fn run_on_wayland_thread(&self, work: Box<dyn FnOnce() + Send>) {
        match self.wm.upgrade() {
            Some(wm) => wm.run_on_wayland_thread(work),
            None => error!(
                "Dropping Wayland thread work for {}: window manager is gone",
                self.connection.window_debug_string(self.window)
            ),
        }
    }

    /// Push window state to the client as WM_STATE and `_NET_WM_STATE`
    ///
    /// Does nothing when `new_window_state` matches what was last pushed.
    pub fn inform_client_of_window_state(&self, new_window_state: WindowState) -> Result<()> {
        {
            let mut state = self.state.lock();
            if state.cached.state == new_window_state {
                return Ok(());
            }
            state.cached.state = new_window_state;
        }

        if self.verbose {
            debug!(
                "{} state set to {}",
                self.connection.window_debug_string(self.window),
                new_window_state
            );
        }

        let atoms = self.connection.atoms();

        self.connection.set_property(
            self.window,
            atoms.wm_state,
            PropertyData::WmState([new_window_state.wm_state() as u32, x11rb::NONE]),
        )?;

        if new_window_state.withdrawn {
            self.connection
                .delete_property(self.window, atoms.net_wm_state)?;
        } else {
            self.connection.set_property(
                self.window,
                atoms.net_wm_state,
                PropertyData::Atoms(new_window_state.net_wm_state_atoms(atoms)),
            )?;
        }

        self.connection.flush()
    }

    fn request_scene_surface_state(&self, new_state: NativeWindowState) {
        let Some(scene_surface) = self.scene_surface() else {
            return;
        };

        if scene_surface.state() != new_state {
            let mods = SurfaceSpecification {
                state: Some(new_state),
                ..Default::default()
            };
            self.shell
                .modify_surface(scene_surface.session(), &scene_surface, &mods);
        }
    }

    /// Phase one of reading `property`; the completion applies the reply
    fn property_fetch(&self, property: WatchedProperty) -> PropertyCompletion<'_> {
        let connection = self.connection.as_ref();
        let atom = property.atom(connection.atoms());

        match property {
            WatchedProperty::Class => fetch(
                connection,
                self.window,
                atom,
                move |class: WmClass| {
                    self.state.lock().pending_spec.get_or_create().application_id =
                        Some(class.application_id().to_owned());
                },
                || {},
            ),
            WatchedProperty::Name | WatchedProperty::NetName => fetch(
                connection,
                self.window,
                atom,
                move |name: String| {
                    self.state.lock().pending_spec.get_or_create().name = Some(name);
                },
                || {},
            ),
            WatchedProperty::TransientFor => fetch(
                connection,
                self.window,
                atom,
                move |transient_for: Window| self.is_transient_for(transient_for),
                move || self.is_transient_for(x11rb::NONE),
            ),
            WatchedProperty::Protocols => fetch(
                connection,
                self.window,
                atom,
                move |protocols: Vec<Atom>| {
                    self.state.lock().cached.supported_wm_protocols =
                        protocols.into_iter().collect();
                },
                move || self.state.lock().cached.supported_wm_protocols.clear(),
            ),
        }
    }

    /// Resolve the parent and stage it, with the matching position, in the pending spec
    fn is_transient_for(&self, transient_for: Window) {
        // Resolution locks other bridges, so it runs before taking our own lock
        let parent = self
            .wm
            .upgrade()
            .and_then(|wm| resolve_parent(&wm, self.window, transient_for));

        let mut state = self.state.lock();
        let top_left = state.cached.top_left;
        let spec = state.pending_spec.get_or_create();
        spec.parent = Some(parent.as_ref().map(Arc::downgrade));
        set_position(parent.as_ref(), top_left, spec);
    }
}

impl Drop for XWaylandSurface {
    fn drop(&mut self) {
        if !self.state.get_mut().closed {
            self.close();
        }
    }
}

fn resize_edge(action: NetWmMoveResize) -> Option<ResizeEdge> {
    match action {
        NetWmMoveResize::SizeTopLeft => Some(ResizeEdge::NorthWest),
        NetWmMoveResize::SizeTop => Some(ResizeEdge::North),
        NetWmMoveResize::SizeTopRight => Some(ResizeEdge::NorthEast),
        NetWmMoveResize::SizeRight => Some(ResizeEdge::East),
        NetWmMoveResize::SizeBottomRight => Some(ResizeEdge::SouthEast),
        NetWmMoveResize::SizeBottom => Some(ResizeEdge::South),
        NetWmMoveResize::SizeBottomLeft => Some(ResizeEdge::SouthWest),
        NetWmMoveResize::SizeLeft => Some(ResizeEdge::West),
        NetWmMoveResize::Move
        | NetWmMoveResize::SizeKeyboard
        | NetWmMoveResize::MoveKeyboard
        | NetWmMoveResize::Cancel => None,
    }
}
