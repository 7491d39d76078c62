//! Error types for the XWayland bridge
//!
//! Missing or unreadable X properties are not errors: they are handled by the
//! property fetch error path and never surface here.

use thiserror::Error;
use x11rb::protocol::xproto::Window;

/// Errors produced while bridging an X11 window into the scene graph
#[derive(Debug, Error)]
pub enum XwmError {
    /// Connecting to the X server failed
    #[error("failed to connect to X server: {0}")]
    Connect(#[from] x11rb::errors::ConnectError),

    /// The X connection failed while sending a request
    #[error("X connection error: {0}")]
    Connection(#[from] x11rb::errors::ConnectionError),

    /// The X server answered a request with an error
    #[error("X reply error: {0}")]
    Reply(#[from] x11rb::errors::ReplyError),

    /// Allocating an X resource id or waiting for a reply failed
    #[error("X reply or id error: {0}")]
    ReplyOrId(#[from] x11rb::errors::ReplyOrIdError),

    /// ICCCM only allows clients to request NormalState or IconicState
    #[error("WM_CHANGE_STATE client message sent invalid state {0}")]
    InvalidWmChangeState(u32),

    /// `_NET_WM_STATE` actions are limited to remove, add and toggle
    #[error("_NET_WM_STATE client message sent invalid action {0}")]
    InvalidNetWmStateAction(u32),

    /// A wl_surface may only be attached to a window once
    #[error("wl_surface attached to window 0x{0:x} more than once")]
    SurfaceAlreadyAttached(Window),

    /// The shell refused to create a scene surface
    #[error("failed to create scene surface: {0}")]
    SurfaceCreation(String),
}

/// Result type used throughout the bridge
pub type Result<T, E = XwmError> = std::result::Result<T, E>;
