//! Shared fixtures for unit tests

use crate::config::XWaylandConfig;
use crate::connection::{Atoms, PendingProperty, PropertyData, PropertyReply, XConnection};
use crate::error::Result;
use crate::executor::InlineExecutor;
use crate::geometry::{Point, Size};
use crate::headless::{HeadlessBufferSurface, HeadlessSession, HeadlessShell};
use crate::shell::{SurfaceAttrib, SurfaceObserver};
use crate::surface::XWaylandSurface;
use crate::wm::XWaylandWm;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use x11rb::protocol::xproto::{Atom, AtomEnum, CreateNotifyEvent, EventMask, StackMode, Window};
use x11rb::protocol::Event;

pub fn test_atoms() -> Atoms {
    Atoms {
        wm_protocols: 100,
        wm_take_focus: 101,
        wm_delete_window: 102,
        wm_state: 103,
        wm_change_state: 104,
        net_wm_name: 105,
        net_wm_state: 106,
        net_wm_state_hidden: 107,
        net_wm_state_maximized_horz: 108,
        net_wm_state_maximized_vert: 109,
        net_wm_state_fullscreen: 110,
        net_wm_desktop: 111,
        net_wm_moveresize: 112,
        wl_surface_id: 113,
        utf8_string: 114,
    }
}

pub fn string_property(value: &[u8]) -> PropertyReply {
    PropertyReply {
        type_: AtomEnum::STRING.into(),
        format: 8,
        value: value.to_vec(),
    }
}

pub fn utf8_property(value: &[u8]) -> PropertyReply {
    PropertyReply {
        type_: test_atoms().utf8_string,
        format: 8,
        value: value.to_vec(),
    }
}

pub fn window_property(window: Window) -> PropertyReply {
    PropertyReply {
        type_: AtomEnum::WINDOW.into(),
        format: 32,
        value: window.to_ne_bytes().to_vec(),
    }
}

pub fn atom_list_property(atoms: &[Atom]) -> PropertyReply {
    PropertyReply {
        type_: AtomEnum::ATOM.into(),
        format: 32,
        value: atoms.iter().flat_map(|atom| atom.to_ne_bytes()).collect(),
    }
}

/// A request the bridge made of the X server
#[derive(Debug, Clone, PartialEq)]
pub enum XCall {
    SetProperty {
        window: Window,
        property: Atom,
        data: PropertyData,
    },
    DeleteProperty {
        window: Window,
        property: Atom,
    },
    ClientMessage {
        window: Window,
        message_type: Atom,
        data: [u32; 5],
    },
    Configure {
        window: Window,
        top_left: Option<Point>,
        size: Option<Size>,
        stack_mode: Option<StackMode>,
    },
    SelectEvents(Window),
    Map(Window),
    Unmap(Window),
    SetInputFocus(Window),
    KillClient(Window),
    Flush,
}

impl XCall {
    pub fn is_configure(&self) -> bool {
        matches!(self, XCall::Configure { .. })
    }

    pub fn is_property_write(&self) -> bool {
        matches!(self, XCall::SetProperty { .. } | XCall::DeleteProperty { .. })
    }
}

/// Fake X connection that serves canned properties and records requests
pub struct RecordingConnection {
    atoms: Atoms,
    properties: Mutex<HashMap<(Window, Atom), PropertyReply>>,
    calls: Mutex<Vec<XCall>>,
    issued_reads: AtomicUsize,
    completed_reads: AtomicUsize,
}

impl RecordingConnection {
    pub fn new() -> Self {
        Self {
            atoms: test_atoms(),
            properties: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            issued_reads: AtomicUsize::new(0),
            completed_reads: AtomicUsize::new(0),
        }
    }

    pub fn set_window_property(&self, window: Window, property: Atom, reply: PropertyReply) {
        self.properties.lock().insert((window, property), reply);
    }

    pub fn remove_window_property(&self, window: Window, property: Atom) {
        self.properties.lock().remove(&(window, property));
    }

    pub fn issued_reads(&self) -> usize {
        self.issued_reads.load(Ordering::SeqCst)
    }

    pub fn completed_reads(&self) -> usize {
        self.completed_reads.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<XCall> {
        self.calls.lock().clone()
    }

    /// Recorded calls, clearing the record
    pub fn take_calls(&self) -> Vec<XCall> {
        std::mem::take(&mut *self.calls.lock())
    }

    fn record(&self, call: XCall) -> Result<()> {
        self.calls.lock().push(call);
        Ok(())
    }
}

impl XConnection for RecordingConnection {
    fn atoms(&self) -> &Atoms {
        &self.atoms
    }

    fn read_property(&self, window: Window, property: Atom) -> PendingProperty<'_> {
        self.issued_reads.fetch_add(1, Ordering::SeqCst);
        Box::new(move || {
            self.completed_reads.fetch_add(1, Ordering::SeqCst);
            Ok(self.properties.lock().get(&(window, property)).cloned())
        })
    }

    fn set_property(&self, window: Window, property: Atom, data: PropertyData) -> Result<()> {
        self.record(XCall::SetProperty {
            window,
            property,
            data,
        })
    }

    fn delete_property(&self, window: Window, property: Atom) -> Result<()> {
        self.record(XCall::DeleteProperty { window, property })
    }

    fn send_client_message(
        &self,
        window: Window,
        message_type: Atom,
        _event_mask: EventMask,
        data: [u32; 5],
    ) -> Result<()> {
        self.record(XCall::ClientMessage {
            window,
            message_type,
            data,
        })
    }

    fn configure_window(
        &self,
        window: Window,
        top_left: Option<Point>,
        size: Option<Size>,
        stack_mode: Option<StackMode>,
    ) -> Result<()> {
        self.record(XCall::Configure {
            window,
            top_left,
            size,
            stack_mode,
        })
    }

    fn select_window_events(&self, window: Window, _event_mask: EventMask) -> Result<()> {
        self.record(XCall::SelectEvents(window))
    }

    fn map_window(&self, window: Window) -> Result<()> {
        self.record(XCall::Map(window))
    }

    fn unmap_window(&self, window: Window) -> Result<()> {
        self.record(XCall::Unmap(window))
    }

    fn set_input_focus(&self, window: Window) -> Result<()> {
        self.record(XCall::SetInputFocus(window))
    }

    fn kill_client(&self, window: Window) -> Result<()> {
        self.record(XCall::KillClient(window))
    }

    fn flush(&self) -> Result<()> {
        self.record(XCall::Flush)
    }
}

/// Observer that ignores everything
pub struct NullObserver;

impl SurfaceObserver for NullObserver {
    fn attrib_changed(&self, _attrib: SurfaceAttrib) {}
    fn resized_to(&self, _size: Size) {}
    fn moved_to(&self, _top_left: Point) {}
    fn client_surface_close_requested(&self) {}
    fn input_consumed(&self, _timestamp: Duration) {}
}

/// Window manager over a recording connection and a headless shell
pub fn test_wm() -> (Arc<XWaylandWm>, Arc<HeadlessShell>, Arc<RecordingConnection>) {
    let connection = Arc::new(RecordingConnection::new());
    let shell = Arc::new(HeadlessShell::default());
    let config = XWaylandConfig {
        verbose_logging: true,
        ..Default::default()
    };
    let wm = XWaylandWm::new(
        connection.clone(),
        shell.clone(),
        Arc::new(InlineExecutor),
        config,
    );
    (wm, shell, connection)
}

/// Announce a new window to the window manager and return its bridge
pub fn create_window(
    wm: &XWaylandWm,
    window: Window,
    (x, y): (i16, i16),
    (width, height): (u16, u16),
    override_redirect: bool,
) -> Arc<XWaylandSurface> {
    wm.handle_event(&Event::CreateNotify(CreateNotifyEvent {
        window,
        x,
        y,
        width,
        height,
        override_redirect,
        ..Default::default()
    }))
    .unwrap();
    wm.get_wm_surface(window).unwrap()
}

/// Attach a fresh buffer surface, creating the scene surface
pub fn attach(surface: &Arc<XWaylandSurface>) -> Arc<HeadlessBufferSurface> {
    let session = Arc::new(HeadlessSession::new("xwayland"));
    let buffer = Arc::new(HeadlessBufferSurface::new(surface.window(), session));
    surface.attach(buffer.clone()).unwrap();
    buffer
}
