//! Running work on the Wayland thread
//!
//! Keyboard focus and buffer surface operations must happen on the thread that
//! drives the Wayland event loop. X events arrive on a different thread, so
//! the window manager hands such work to a [`WaylandExecutor`].

use calloop::channel::{self, Channel, Sender};
use log::{debug, warn};
use parking_lot::Mutex;
use std::thread::{self, ThreadId};

/// A unit of work for the Wayland thread
pub type WaylandWork = Box<dyn FnOnce() + Send>;

/// Event source carrying queued work; insert it into the Wayland event loop
pub type WaylandWorkSource = Channel<WaylandWork>;

pub trait WaylandExecutor: Send + Sync {
    /// Run `work` on the Wayland thread
    ///
    /// Runs inline when already on that thread.
    fn spawn(&self, work: WaylandWork);
}

/// Executor backed by a calloop channel
pub struct ChannelExecutor {
    sender: Mutex<Sender<WaylandWork>>,
    owner: ThreadId,
}

impl ChannelExecutor {
    /// Create an executor owned by the calling thread
    ///
    /// Must be called on the Wayland thread. The returned source has to be
    /// inserted into that thread's event loop with [`run_work`] as callback.
    pub fn new() -> (Self, WaylandWorkSource) {
        let (sender, source) = channel::channel();
        let executor = Self {
            sender: Mutex::new(sender),
            owner: thread::current().id(),
        };
        (executor, source)
    }

    pub fn is_wayland_thread(&self) -> bool {
        thread::current().id() == self.owner
    }
}

impl WaylandExecutor for ChannelExecutor {
    fn spawn(&self, work: WaylandWork) {
        if self.is_wayland_thread() {
            work();
            return;
        }

        if self.sender.lock().send(work).is_err() {
            warn!("Wayland event loop is gone, dropping queued work");
        }
    }
}

/// Event loop callback for a [`WaylandWorkSource`]
pub fn run_work(event: channel::Event<WaylandWork>) {
    match event {
        channel::Event::Msg(work) => work(),
        channel::Event::Closed => debug!("Wayland work queue closed"),
    }
}

/// Executor for single-threaded setups: everything runs on the caller's thread
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl WaylandExecutor for InlineExecutor {
    fn spawn(&self, work: WaylandWork) {
        work();
    }
}
