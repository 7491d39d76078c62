//! # xwayland-bridge
//!
//! Standalone XWayland window manager. Takes over window management on an X
//! server and runs every window through the bridge, backed by the in-memory
//! scene graph.
//!
//! X events are read on a dedicated thread; Wayland-side work runs on a
//! calloop event loop on the main thread.

use anyhow::{Context, Result};
use calloop::EventLoop;
use clap::Parser;
use log::{error, info, warn};
use std::sync::Arc;
use std::thread;
use x11rb::protocol::Event;
use xwayland_bridge::config::BridgeConfig;
use xwayland_bridge::executor::{run_work, ChannelExecutor};
use xwayland_bridge::headless::{HeadlessBufferSurface, HeadlessSession, HeadlessShell};
use xwayland_bridge::shell::Session;
use xwayland_bridge::x11rb_connection::X11rbConnection;
use xwayland_bridge::{logging, XWaylandWm};

#[derive(Parser)]
#[command(name = "xwayland-bridge")]
#[command(about = xwayland_bridge::DESCRIPTION)]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "~/.config/xwayland-bridge/bridge.toml")]
    config: String,

    /// X11 display number (overrides configuration and $DISPLAY)
    #[arg(long)]
    display: Option<u32>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Per-window diagnostics
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = BridgeConfig::load(&cli.config);
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => BridgeConfig::default(),
    };

    logging::init(&config.logging, cli.debug)?;

    info!("🚀 Starting xwayland-bridge");
    info!(
        "📄 Version: {} (built {}, commit {})",
        xwayland_bridge::VERSION,
        env!("BUILD_DATE"),
        option_env!("GIT_COMMIT").unwrap_or("unknown")
    );

    match loaded {
        Ok(_) => info!("✅ Configuration loaded from: {}", cli.config),
        Err(e) => {
            error!("❌ Failed to load configuration: {:#}", e);
            info!("📝 Using default configuration");
        }
    }

    if let Some(display) = cli.display {
        config.xwayland.display = Some(display);
    }
    if cli.verbose {
        config.xwayland.verbose_logging = true;
    }

    if !config.xwayland.enabled {
        info!("🚫 XWayland is disabled in configuration");
        return Ok(());
    }

    let display_name = config.xwayland.display.map(|display| format!(":{}", display));
    let connection = Arc::new(
        X11rbConnection::connect(display_name.as_deref())
            .context("Failed to connect to the X server")?,
    );
    connection
        .become_wm()
        .context("Failed to become the window manager (is another one running?)")?;

    let mut event_loop: EventLoop<'static, ()> =
        EventLoop::try_new().context("Failed to create event loop")?;
    let (executor, work_source) = ChannelExecutor::new();
    event_loop
        .handle()
        .insert_source(work_source, |event, _, _| run_work(event))
        .map_err(|e| e.error)
        .context("Failed to register the Wayland work queue")?;

    let shell = Arc::new(HeadlessShell::new(config.headless.titlebar_height));
    let wm = XWaylandWm::new(
        connection.clone(),
        shell.clone(),
        Arc::new(executor),
        config.xwayland.clone(),
    );

    let reader = {
        let wm = wm.clone();
        let connection = connection.clone();
        let signal = event_loop.get_signal();
        let auto_attach = config.headless.auto_attach;
        let session: Arc<dyn Session> = Arc::new(HeadlessSession::new("xwayland"));

        thread::Builder::new()
            .name("x11-events".to_string())
            .spawn(move || -> Result<()> {
                let result = dispatch_x_events(&wm, &connection, &session, auto_attach);
                signal.stop();
                signal.wakeup();
                result
            })
            .context("Failed to spawn X event thread")?
    };

    info!("✅ Managing X11 windows");
    event_loop
        .run(None, &mut (), |_| {})
        .context("Wayland event loop failed")?;

    match reader.join() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("❌ X event thread stopped: {:#}", e),
        Err(_) => error!("❌ X event thread panicked"),
    }

    info!("📋 {} windows still managed at exit", wm.windows().len());
    wm.shutdown();
    info!(
        "👋 Shutting down after {} shell requests",
        shell.requests().len()
    );

    Ok(())
}

/// Read X events until the connection fails
fn dispatch_x_events(
    wm: &Arc<XWaylandWm>,
    connection: &X11rbConnection,
    session: &Arc<dyn Session>,
    auto_attach: bool,
) -> Result<()> {
    loop {
        let event = connection
            .wait_for_event()
            .context("Lost connection to the X server")?;

        if let Event::Error(x_error) = &event {
            warn!(
                "X error {:?} for request {}",
                x_error.error_kind, x_error.major_opcode
            );
            continue;
        }

        if let Err(e) = wm.handle_event(&event) {
            warn!("Failed to handle X event: {}", e);
        }

        if !auto_attach {
            continue;
        }

        match event {
            Event::MapRequest(request) => {
                let window = request.window;
                let session = session.clone();
                let attaching = wm.clone();
                wm.run_on_wayland_thread(Box::new(move || {
                    let buffer = Arc::new(HeadlessBufferSurface::new(window, session));
                    // Failures are logged by the window manager
                    let _ = attaching.attach_wl_surface(window, buffer);
                }));
            }
            Event::UnmapNotify(notify) if wm.get_wm_surface(notify.window).is_some() => {
                let window = notify.window;
                let detaching = wm.clone();
                wm.run_on_wayland_thread(Box::new(move || {
                    detaching.wl_surface_destroyed(window);
                }));
            }
            _ => {}
        }
    }
}
