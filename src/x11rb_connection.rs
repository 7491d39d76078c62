//! [`XConnection`] over a real X server
//!
//! Wraps an x11rb `RustConnection`. Requests are queued without waiting for
//! the server; errors for them arrive later as X error events.

use crate::connection::{Atoms, PendingProperty, PropertyData, PropertyReply, XConnection};
use crate::error::Result;
use crate::geometry::{Point, Size};
use log::info;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    Atom, AtomEnum, ChangeWindowAttributesAux, ClientMessageEvent, ConfigureWindowAux,
    ConnectionExt as _, EventMask, InputFocus, PropMode, StackMode, Window,
};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

x11rb::atom_manager! {
    pub AtomCollection: AtomCollectionCookie {
        WM_PROTOCOLS,
        WM_TAKE_FOCUS,
        WM_DELETE_WINDOW,
        WM_STATE,
        WM_CHANGE_STATE,
        _NET_WM_NAME,
        _NET_WM_STATE,
        _NET_WM_STATE_HIDDEN,
        _NET_WM_STATE_MAXIMIZED_HORZ,
        _NET_WM_STATE_MAXIMIZED_VERT,
        _NET_WM_STATE_FULLSCREEN,
        _NET_WM_DESKTOP,
        _NET_WM_MOVERESIZE,
        WL_SURFACE_ID,
        UTF8_STRING,
    }
}

impl From<AtomCollection> for Atoms {
    fn from(atoms: AtomCollection) -> Self {
        Atoms {
            wm_protocols: atoms.WM_PROTOCOLS,
            wm_take_focus: atoms.WM_TAKE_FOCUS,
            wm_delete_window: atoms.WM_DELETE_WINDOW,
            wm_state: atoms.WM_STATE,
            wm_change_state: atoms.WM_CHANGE_STATE,
            net_wm_name: atoms._NET_WM_NAME,
            net_wm_state: atoms._NET_WM_STATE,
            net_wm_state_hidden: atoms._NET_WM_STATE_HIDDEN,
            net_wm_state_maximized_horz: atoms._NET_WM_STATE_MAXIMIZED_HORZ,
            net_wm_state_maximized_vert: atoms._NET_WM_STATE_MAXIMIZED_VERT,
            net_wm_state_fullscreen: atoms._NET_WM_STATE_FULLSCREEN,
            net_wm_desktop: atoms._NET_WM_DESKTOP,
            net_wm_moveresize: atoms._NET_WM_MOVERESIZE,
            wl_surface_id: atoms.WL_SURFACE_ID,
            utf8_string: atoms.UTF8_STRING,
        }
    }
}

/// Longest property value read, in 32 bit units
const MAX_PROPERTY_LENGTH: u32 = 2048;

pub struct X11rbConnection {
    conn: RustConnection,
    screen_num: usize,
    atoms: Atoms,
}

impl X11rbConnection {
    /// Connect to `display` (or $DISPLAY) and intern atoms
    pub fn connect(display: Option<&str>) -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(display)?;
        let atoms: Atoms = AtomCollection::new(&conn)?.reply()?.into();

        info!(
            "🔌 Connected to X server {} (screen {})",
            display.unwrap_or("$DISPLAY"),
            screen_num
        );

        Ok(Self {
            conn,
            screen_num,
            atoms,
        })
    }

    pub fn root(&self) -> Window {
        self.conn.setup().roots[self.screen_num].root
    }

    /// Take over window management on the root window
    ///
    /// Fails if another window manager is running.
    pub fn become_wm(&self) -> Result<()> {
        let attributes = ChangeWindowAttributesAux::new()
            .event_mask(EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY);
        self.conn
            .change_window_attributes(self.root(), &attributes)?
            .check()?;
        Ok(())
    }

    /// Block until the next event
    pub fn wait_for_event(&self) -> Result<Event> {
        Ok(self.conn.wait_for_event()?)
    }
}

impl XConnection for X11rbConnection {
    fn atoms(&self) -> &Atoms {
        &self.atoms
    }

    fn read_property(&self, window: Window, property: Atom) -> PendingProperty<'_> {
        let cookie = self.conn.get_property(
            false,
            window,
            property,
            AtomEnum::ANY,
            0,
            MAX_PROPERTY_LENGTH,
        );

        Box::new(move || {
            let reply = cookie?.reply()?;
            if reply.type_ == x11rb::NONE {
                return Ok(None);
            }
            Ok(Some(PropertyReply {
                type_: reply.type_,
                format: reply.format,
                value: reply.value,
            }))
        })
    }

    fn set_property(&self, window: Window, property: Atom, data: PropertyData) -> Result<()> {
        match data {
            PropertyData::Cardinal(values) => {
                self.conn.change_property32(
                    PropMode::REPLACE,
                    window,
                    property,
                    AtomEnum::CARDINAL,
                    &values,
                )?;
            }
            PropertyData::WmState(state) => {
                self.conn.change_property32(
                    PropMode::REPLACE,
                    window,
                    property,
                    self.atoms.wm_state,
                    &state,
                )?;
            }
            PropertyData::Atoms(atoms) => {
                self.conn.change_property32(
                    PropMode::REPLACE,
                    window,
                    property,
                    AtomEnum::ATOM,
                    &atoms,
                )?;
            }
        }
        Ok(())
    }

    fn delete_property(&self, window: Window, property: Atom) -> Result<()> {
        self.conn.delete_property(window, property)?;
        Ok(())
    }

    fn send_client_message(
        &self,
        window: Window,
        message_type: Atom,
        event_mask: EventMask,
        data: [u32; 5],
    ) -> Result<()> {
        let event = ClientMessageEvent::new(32, window, message_type, data);
        self.conn.send_event(false, window, event_mask, event)?;
        Ok(())
    }

    fn configure_window(
        &self,
        window: Window,
        top_left: Option<Point>,
        size: Option<Size>,
        stack_mode: Option<StackMode>,
    ) -> Result<()> {
        let mut aux = ConfigureWindowAux::new();
        if let Some(top_left) = top_left {
            aux = aux.x(top_left.x).y(top_left.y);
        }
        if let Some(size) = size {
            let (width, height) = size.to_x11();
            aux = aux.width(width).height(height);
        }
        if let Some(stack_mode) = stack_mode {
            aux = aux.stack_mode(stack_mode);
        }
        self.conn.configure_window(window, &aux)?;
        Ok(())
    }

    fn select_window_events(&self, window: Window, event_mask: EventMask) -> Result<()> {
        let attributes = ChangeWindowAttributesAux::new().event_mask(event_mask);
        self.conn.change_window_attributes(window, &attributes)?;
        Ok(())
    }

    fn map_window(&self, window: Window) -> Result<()> {
        self.conn.map_window(window)?;
        Ok(())
    }

    fn unmap_window(&self, window: Window) -> Result<()> {
        self.conn.unmap_window(window)?;
        Ok(())
    }

    fn set_input_focus(&self, window: Window) -> Result<()> {
        self.conn
            .set_input_focus(InputFocus::POINTER_ROOT, window, x11rb::CURRENT_TIME)?;
        Ok(())
    }

    fn kill_client(&self, window: Window) -> Result<()> {
        self.conn.kill_client(window)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.conn.flush()?;
        Ok(())
    }
}
