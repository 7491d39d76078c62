//! # XWayland bridge
//!
//! Window management for X11 clients running under XWayland: every X11 window
//! gets a bridge that mirrors its ICCCM/EWMH state into a compositor scene
//! surface and reports compositor decisions back to the client.
//!
//! ## Architecture
//!
//! - `wm`: owns the per-window bridges and routes X events to them
//! - `surface`: the per-window bridge and its scene surface observer
//! - `window_state`: X11 window state and its mapping to compositor states
//! - `property`, `pending`, `transient`: property reads, change coalescing
//!   and WM_TRANSIENT_FOR parenting
//! - `connection`, `x11rb_connection`: the X11 side
//! - `shell`, `headless`: the compositor side and an in-memory implementation
//! - `executor`: running work on the Wayland thread
//! - `config`, `logging`: configuration and logger setup
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use xwayland_bridge::config::XWaylandConfig;
//! use xwayland_bridge::executor::InlineExecutor;
//! use xwayland_bridge::headless::HeadlessShell;
//! use xwayland_bridge::x11rb_connection::X11rbConnection;
//! use xwayland_bridge::XWaylandWm;
//!
//! fn main() -> anyhow::Result<()> {
//!     let connection = Arc::new(X11rbConnection::connect(None)?);
//!     connection.become_wm()?;
//!     let wm = XWaylandWm::new(
//!         connection.clone(),
//!         Arc::new(HeadlessShell::default()),
//!         Arc::new(InlineExecutor),
//!         XWaylandConfig::default(),
//!     );
//!     loop {
//!         wm.handle_event(&connection.wait_for_event()?)?;
//!     }
//! }
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod executor;
pub mod geometry;
pub mod headless;
pub mod logging;
pub mod pending;
pub mod property;
pub mod shell;
pub mod surface;
pub mod transient;
pub mod window_state;
pub mod wm;
pub mod x11rb_connection;

#[cfg(test)]
mod test_support;

pub use config::BridgeConfig;
pub use error::XwmError;
pub use surface::XWaylandSurface;
pub use wm::XWaylandWm;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_metadata() {
        assert!(!VERSION.is_empty());
        assert!(DESCRIPTION.contains("XWayland"));
    }
}
