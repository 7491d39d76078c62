//! The X11 side of the bridge
//!
//! Bridges talk to the X server through [`XConnection`] so that the same state
//! machine runs against a real server ([`crate::x11rb_connection::X11rbConnection`])
//! or a recording fake in tests. Requests are fire-and-forget: the bridge only
//! waits for replies when it reads properties.

use crate::error::Result;
use crate::geometry::{Point, Size};
use x11rb::protocol::xproto::{Atom, EventMask, StackMode, Window};

/// Atoms interned once when the connection is established
///
/// Shared by reference with every bridge; never mutated after init.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atoms {
    pub wm_protocols: Atom,
    pub wm_take_focus: Atom,
    pub wm_delete_window: Atom,
    pub wm_state: Atom,
    pub wm_change_state: Atom,
    pub net_wm_name: Atom,
    pub net_wm_state: Atom,
    pub net_wm_state_hidden: Atom,
    pub net_wm_state_maximized_horz: Atom,
    pub net_wm_state_maximized_vert: Atom,
    pub net_wm_state_fullscreen: Atom,
    pub net_wm_desktop: Atom,
    pub net_wm_moveresize: Atom,
    pub wl_surface_id: Atom,
    pub utf8_string: Atom,
}

/// Raw contents of a window property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyReply {
    /// Type atom of the property (e.g. STRING, UTF8_STRING, WINDOW, ATOM)
    pub type_: Atom,
    /// 8, 16 or 32
    pub format: u8,
    pub value: Vec<u8>,
}

impl PropertyReply {
    /// Interpret the value as native-endian 32 bit items
    pub fn value32(&self) -> Option<Vec<u32>> {
        if self.format != 32 {
            return None;
        }
        Some(
            self.value
                .chunks_exact(4)
                .map(|chunk| u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
                .collect(),
        )
    }
}

/// Typed property payloads the bridge writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyData {
    /// CARDINAL, format 32
    Cardinal(Vec<u32>),
    /// ICCCM WM_STATE: state and icon window
    WmState([u32; 2]),
    /// ATOM, format 32
    Atoms(Vec<Atom>),
}

/// Second phase of a property read: blocks until the reply is available
///
/// `Ok(None)` means the property is not set on the window.
pub type PendingProperty<'a> = Box<dyn FnOnce() -> Result<Option<PropertyReply>> + 'a>;

/// Capabilities the bridge needs from the X connection
pub trait XConnection: Send + Sync {
    /// Interned atoms for this connection
    fn atoms(&self) -> &Atoms;

    /// Issue a property read now and return a closure that waits for the reply
    fn read_property(&self, window: Window, property: Atom) -> PendingProperty<'_>;

    fn set_property(&self, window: Window, property: Atom, data: PropertyData) -> Result<()>;

    fn delete_property(&self, window: Window, property: Atom) -> Result<()>;

    /// Send a format 32 client message to `window`
    fn send_client_message(
        &self,
        window: Window,
        message_type: Atom,
        event_mask: EventMask,
        data: [u32; 5],
    ) -> Result<()>;

    /// Change any of the window's position, size and stacking
    fn configure_window(
        &self,
        window: Window,
        top_left: Option<Point>,
        size: Option<Size>,
        stack_mode: Option<StackMode>,
    ) -> Result<()>;

    /// Replace the event mask selected on `window`
    fn select_window_events(&self, window: Window, event_mask: EventMask) -> Result<()>;

    fn map_window(&self, window: Window) -> Result<()>;

    fn unmap_window(&self, window: Window) -> Result<()>;

    /// Give the window input focus, reverting to the pointer root
    fn set_input_focus(&self, window: Window) -> Result<()>;

    /// Forcibly disconnect the client owning `window`
    fn kill_client(&self, window: Window) -> Result<()>;

    fn flush(&self) -> Result<()>;

    /// Human readable description of a window for diagnostics
    fn window_debug_string(&self, window: Window) -> String {
        format!("window 0x{window:x}")
    }
}
