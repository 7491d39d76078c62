//! XWayland window manager
//!
//! Owns one [`XWaylandSurface`] per X11 window and routes X events to it. The
//! table lock is only held long enough to look up or clone a bridge; bridges
//! are always driven without it.

use crate::config::XWaylandConfig;
use crate::connection::XConnection;
use crate::error::{Result, XwmError};
use crate::executor::{WaylandExecutor, WaylandWork};
use crate::shell::{Shell, WlSurfaceHandle};
use crate::surface::XWaylandSurface;
use log::{debug, error, info, warn};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use x11rb::protocol::xproto::{ClientMessageEvent, CreateNotifyEvent, Window};
use x11rb::protocol::Event;

pub struct XWaylandWm {
    me: Weak<XWaylandWm>,
    connection: Arc<dyn XConnection>,
    shell: Arc<dyn Shell>,
    executor: Arc<dyn WaylandExecutor>,
    config: XWaylandConfig,
    surfaces: RwLock<HashMap<Window, Arc<XWaylandSurface>>>,
    focused_window: Mutex<Option<Window>>,
    /// wl_surface ids announced through WL_SURFACE_ID, not yet attached
    wl_surface_pairings: Mutex<HashMap<u32, Window>>,
}

impl XWaylandWm {
    pub fn new(
        connection: Arc<dyn XConnection>,
        shell: Arc<dyn Shell>,
        executor: Arc<dyn WaylandExecutor>,
        config: XWaylandConfig,
    ) -> Arc<Self> {
        info!("🔗 Initializing XWayland window manager");

        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            connection,
            shell,
            executor,
            config,
            surfaces: RwLock::new(HashMap::new()),
            focused_window: Mutex::new(None),
            wl_surface_pairings: Mutex::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &XWaylandConfig {
        &self.config
    }

    pub fn connection(&self) -> &dyn XConnection {
        self.connection.as_ref()
    }

    /// The bridge for `window`, if the window manager knows the window
    pub fn get_wm_surface(&self, window: Window) -> Option<Arc<XWaylandSurface>> {
        self.surfaces.read().get(&window).cloned()
    }

    /// Windows with a bridge, in no particular order
    pub fn windows(&self) -> Vec<Window> {
        self.surfaces.read().keys().copied().collect()
    }

    pub fn get_focused_window(&self) -> Option<Window> {
        *self.focused_window.lock()
    }

    /// Record a focus change and hand X input focus to a newly focused window
    pub fn set_focus(&self, window: Window, has_focus: bool) -> Result<()> {
        if has_focus {
            *self.focused_window.lock() = Some(window);
            if let Some(surface) = self.get_wm_surface(window) {
                surface.take_focus()?;
            }
        } else {
            let mut focused = self.focused_window.lock();
            if *focused == Some(window) {
                *focused = None;
            }
        }
        Ok(())
    }

    pub fn run_on_wayland_thread(&self, work: WaylandWork) {
        self.executor.spawn(work);
    }

    /// Route one X event to the bridge it concerns
    ///
    /// Protocol violations by a client are logged and do not fail the call;
    /// only errors talking to the X server are returned.
    pub fn handle_event(&self, event: &Event) -> Result<()> {
        let result = match event {
            Event::CreateNotify(event) => self.create_notify(event),
            Event::DestroyNotify(event) => {
                self.destroy_notify(event.window);
                Ok(())
            }
            Event::MapRequest(event) => self.with_surface(event.window, "MapRequest", |surface| {
                surface.map()
            }),
            Event::UnmapNotify(event) => {
                if self.config.verbose_logging {
                    debug!(
                        "UnmapNotify for {}",
                        self.connection.window_debug_string(event.window)
                    );
                }
                Ok(())
            }
            Event::ConfigureRequest(event) => {
                self.with_surface(event.window, "ConfigureRequest", |surface| {
                    surface.configure_request(event)
                })
            }
            Event::ConfigureNotify(event) => {
                self.with_surface(event.window, "ConfigureNotify", |surface| {
                    surface.configure_notify(event);
                    Ok(())
                })
            }
            Event::PropertyNotify(event) => {
                self.with_surface(event.window, "PropertyNotify", |surface| {
                    surface.property_notify(event.atom)
                })
            }
            Event::ClientMessage(event) => self.client_message(event),
            _ => Ok(()),
        };

        match result {
            Err(e @ (XwmError::InvalidWmChangeState(_) | XwmError::InvalidNetWmStateAction(_))) => {
                warn!("Ignoring invalid client request: {}", e);
                Ok(())
            }
            other => other,
        }
    }

    fn with_surface(
        &self,
        window: Window,
        event: &str,
        f: impl FnOnce(&Arc<XWaylandSurface>) -> Result<()>,
    ) -> Result<()> {
        match self.get_wm_surface(window) {
            Some(surface) => f(&surface),
            None => {
                debug!("{} for unknown window 0x{:x}", event, window);
                Ok(())
            }
        }
    }

    fn create_notify(&self, event: &CreateNotifyEvent) -> Result<()> {
        if self.get_wm_surface(event.window).is_some() {
            warn!("CreateNotify for known window 0x{:x}", event.window);
            return Ok(());
        }

        let surface = Arc::new(XWaylandSurface::new(
            self.me.clone(),
            self.connection.clone(),
            self.shell.clone(),
            &self.config,
            event,
        )?);

        if self.config.verbose_logging {
            debug!(
                "Created bridge for {}",
                self.connection.window_debug_string(event.window)
            );
        }

        self.surfaces.write().insert(event.window, surface);
        Ok(())
    }

    fn destroy_notify(&self, window: Window) {
        let removed = self.surfaces.write().remove(&window);

        {
            let mut focused = self.focused_window.lock();
            if *focused == Some(window) {
                *focused = None;
            }
        }
        self.wl_surface_pairings
            .lock()
            .retain(|_, paired| *paired != window);

        match removed {
            Some(surface) => surface.close(),
            None => debug!("DestroyNotify for unknown window 0x{:x}", window),
        }
    }

    fn client_message(&self, event: &ClientMessageEvent) -> Result<()> {
        let atoms = self.connection.atoms();
        let data = event.data.as_data32();

        if event.type_ == atoms.wl_surface_id {
            if self.config.verbose_logging {
                debug!(
                    "{} paired with wl_surface@{}",
                    self.connection.window_debug_string(event.window),
                    data[0]
                );
            }
            self.wl_surface_pairings.lock().insert(data[0], event.window);
            return Ok(());
        }

        self.with_surface(event.window, "ClientMessage", |surface| {
            if event.type_ == atoms.net_wm_state {
                surface.net_wm_state_client_message(&data)
            } else if event.type_ == atoms.wm_change_state {
                surface.wm_change_state_client_message(&data)
            } else if event.type_ == atoms.net_wm_moveresize {
                surface.move_resize(data[2])
            } else {
                if self.config.verbose_logging {
                    debug!(
                        "Unhandled client message type {} for {}",
                        event.type_,
                        self.connection.window_debug_string(event.window)
                    );
                }
                Ok(())
            }
        })
    }

    /// The window a WL_SURFACE_ID message paired with wl_surface `id`
    pub fn take_wl_surface_pairing(&self, id: u32) -> Option<Window> {
        self.wl_surface_pairings.lock().remove(&id)
    }

    /// Attach the wl_surface the client renders `window` into
    pub fn attach_wl_surface(
        &self,
        window: Window,
        wl_surface: Arc<dyn WlSurfaceHandle>,
    ) -> Result<()> {
        let Some(surface) = self.get_wm_surface(window) else {
            debug!("Cannot attach wl_surface to unknown window 0x{:x}", window);
            return Ok(());
        };

        surface.attach(wl_surface).map_err(|e| {
            error!(
                "Failed to attach wl_surface to {}: {}",
                self.connection.window_debug_string(window),
                e
            );
            e
        })
    }

    /// The wl_surface backing `window` was destroyed
    pub fn wl_surface_destroyed(&self, window: Window) {
        if let Some(surface) = self.get_wm_surface(window) {
            surface.wl_surface_destroyed();
        }
    }

    /// Close every window; the window manager is going away
    pub fn shutdown(&self) {
        let surfaces: Vec<_> = self.surfaces.write().drain().map(|(_, surface)| surface).collect();
        *self.focused_window.lock() = None;
        self.wl_surface_pairings.lock().clear();

        info!("🛑 Closing {} XWayland windows", surfaces.len());
        for surface in surfaces {
            surface.close();
        }
    }
}
