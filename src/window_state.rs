//! Window state as seen by X11 clients
//!
//! The X side tracks minimized, maximized and fullscreen as independent flags
//! (plus withdrawn while unmapped). The compositor has a single window state,
//! so this module owns the mapping in both directions together with the ICCCM
//! and EWMH encodings of the same information.

use crate::connection::Atoms;
use crate::shell::NativeWindowState;
use x11rb::protocol::xproto::Atom;

/// ICCCM 4.1.3.1 WM_STATE values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum WmState {
    Withdrawn = 0,
    Normal = 1,
    Iconic = 3,
}

impl TryFrom<u32> for WmState {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(WmState::Withdrawn),
            1 => Ok(WmState::Normal),
            3 => Ok(WmState::Iconic),
            other => Err(other),
        }
    }
}

/// `_NET_WM_STATE` client message actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetWmStateAction {
    Remove,
    Add,
    Toggle,
}

impl NetWmStateAction {
    pub fn apply(self, flag: &mut bool) {
        match self {
            NetWmStateAction::Remove => *flag = false,
            NetWmStateAction::Add => *flag = true,
            NetWmStateAction::Toggle => *flag = !*flag,
        }
    }
}

impl TryFrom<u32> for NetWmStateAction {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(NetWmStateAction::Remove),
            1 => Ok(NetWmStateAction::Add),
            2 => Ok(NetWmStateAction::Toggle),
            other => Err(other),
        }
    }
}

/// EWMH source indication carried by client messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceIndication {
    Unknown,
    Application,
    Pager,
}

impl TryFrom<u32> for SourceIndication {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SourceIndication::Unknown),
            1 => Ok(SourceIndication::Application),
            2 => Ok(SourceIndication::Pager),
            other => Err(other),
        }
    }
}

/// `_NET_WM_MOVERESIZE` directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetWmMoveResize {
    SizeTopLeft,
    SizeTop,
    SizeTopRight,
    SizeRight,
    SizeBottomRight,
    SizeBottom,
    SizeBottomLeft,
    SizeLeft,
    /// Movement only
    Move,
    SizeKeyboard,
    MoveKeyboard,
    Cancel,
}

impl TryFrom<u32> for NetWmMoveResize {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => NetWmMoveResize::SizeTopLeft,
            1 => NetWmMoveResize::SizeTop,
            2 => NetWmMoveResize::SizeTopRight,
            3 => NetWmMoveResize::SizeRight,
            4 => NetWmMoveResize::SizeBottomRight,
            5 => NetWmMoveResize::SizeBottom,
            6 => NetWmMoveResize::SizeBottomLeft,
            7 => NetWmMoveResize::SizeLeft,
            8 => NetWmMoveResize::Move,
            9 => NetWmMoveResize::SizeKeyboard,
            10 => NetWmMoveResize::MoveKeyboard,
            11 => NetWmMoveResize::Cancel,
            other => return Err(other),
        })
    }
}

/// The window-manager-visible state of an X11 window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowState {
    /// Only true while the window is unmapped
    pub withdrawn: bool,
    pub minimized: bool,
    pub maximized: bool,
    pub fullscreen: bool,
}

impl WindowState {
    /// The compositor state to request for this window
    ///
    /// Minimized wins over fullscreen, which wins over maximized. `withdrawn`
    /// only affects what X clients see and is ignored here.
    pub fn to_native_state(&self) -> NativeWindowState {
        if self.minimized {
            NativeWindowState::Minimized
        } else if self.fullscreen {
            NativeWindowState::Fullscreen
        } else if self.maximized {
            NativeWindowState::Maximized
        } else {
            NativeWindowState::Restored
        }
    }

    /// Apply a state reported by the compositor
    ///
    /// A window with a compositor state is never withdrawn.
    pub fn updated_from(&self, state: NativeWindowState) -> WindowState {
        let mut updated = *self;
        updated.withdrawn = false;

        match state {
            NativeWindowState::Hidden | NativeWindowState::Minimized => {
                updated.minimized = true;
            }
            NativeWindowState::Fullscreen => {
                updated.minimized = false;
                updated.fullscreen = true;
            }
            NativeWindowState::Maximized
            | NativeWindowState::VertMaximized
            | NativeWindowState::HorizMaximized => {
                updated.minimized = false;
                updated.maximized = true;
                updated.fullscreen = false;
            }
            NativeWindowState::Restored
            | NativeWindowState::Unknown
            | NativeWindowState::Attached => {
                updated.minimized = false;
                updated.maximized = false;
                updated.fullscreen = false;
            }
        }

        updated
    }

    /// ICCCM projection written to WM_STATE
    pub fn wm_state(&self) -> WmState {
        if self.withdrawn {
            WmState::Withdrawn
        } else if self.minimized {
            WmState::Iconic
        } else {
            WmState::Normal
        }
    }

    /// EWMH projection written to `_NET_WM_STATE`
    ///
    /// Maximized is always reported as both horizontal and vertical.
    pub fn net_wm_state_atoms(&self, atoms: &Atoms) -> Vec<Atom> {
        let mut states = Vec::new();
        if self.minimized {
            states.push(atoms.net_wm_state_hidden);
        }
        if self.maximized {
            states.push(atoms.net_wm_state_maximized_horz);
            states.push(atoms.net_wm_state_maximized_vert);
        }
        if self.fullscreen {
            states.push(atoms.net_wm_state_fullscreen);
        }
        states
    }
}

impl std::fmt::Display for WindowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.withdrawn {
            write!(f, "withdrawn, ")?;
        }
        if self.minimized {
            write!(f, "minimized, ")?;
        }
        if self.fullscreen {
            write!(f, "fullscreen, ")?;
        }
        if self.maximized {
            write!(f, "maximized")
        } else {
            write!(f, "unmaximized")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_atoms;
    use proptest::prelude::*;

    const ALL_NATIVE_STATES: [NativeWindowState; 9] = [
        NativeWindowState::Unknown,
        NativeWindowState::Restored,
        NativeWindowState::Minimized,
        NativeWindowState::Maximized,
        NativeWindowState::VertMaximized,
        NativeWindowState::Fullscreen,
        NativeWindowState::HorizMaximized,
        NativeWindowState::Hidden,
        NativeWindowState::Attached,
    ];

    prop_compose! {
        fn any_window_state()(
            withdrawn in any::<bool>(),
            minimized in any::<bool>(),
            maximized in any::<bool>(),
            fullscreen in any::<bool>(),
        ) -> WindowState {
            WindowState { withdrawn, minimized, maximized, fullscreen }
        }
    }

    proptest! {
        #[test]
        fn prop_native_state_round_trip_keeps_visible_flags(state in any_window_state()) {
            let updated = state.updated_from(state.to_native_state());

            prop_assert_eq!(updated, WindowState { withdrawn: false, ..state });
        }

        #[test]
        fn prop_updated_from_never_withdrawn(
            state in any_window_state(),
            index in 0usize..ALL_NATIVE_STATES.len(),
        ) {
            prop_assert!(!state.updated_from(ALL_NATIVE_STATES[index]).withdrawn);
        }
    }

    #[test]
    fn test_native_state_precedence() {
        let all = WindowState {
            withdrawn: true,
            minimized: true,
            maximized: true,
            fullscreen: true,
        };
        assert_eq!(all.to_native_state(), NativeWindowState::Minimized);

        let fullscreen_and_maximized = WindowState {
            maximized: true,
            fullscreen: true,
            ..Default::default()
        };
        assert_eq!(
            fullscreen_and_maximized.to_native_state(),
            NativeWindowState::Fullscreen
        );

        let withdrawn = WindowState { withdrawn: true, ..Default::default() };
        assert_eq!(withdrawn.to_native_state(), NativeWindowState::Restored);
    }

    #[test]
    fn test_updated_from_table() {
        let start = WindowState {
            withdrawn: true,
            minimized: false,
            maximized: true,
            fullscreen: true,
        };

        let hidden = start.updated_from(NativeWindowState::Hidden);
        assert_eq!(
            hidden,
            WindowState { withdrawn: false, minimized: true, maximized: true, fullscreen: true }
        );

        let fullscreen = hidden.updated_from(NativeWindowState::Fullscreen);
        assert_eq!(
            fullscreen,
            WindowState { withdrawn: false, minimized: false, maximized: true, fullscreen: true }
        );

        for maximized in [
            NativeWindowState::Maximized,
            NativeWindowState::VertMaximized,
            NativeWindowState::HorizMaximized,
        ] {
            assert_eq!(
                hidden.updated_from(maximized),
                WindowState { withdrawn: false, minimized: false, maximized: true, fullscreen: false }
            );
        }

        for restored in [
            NativeWindowState::Restored,
            NativeWindowState::Unknown,
            NativeWindowState::Attached,
        ] {
            assert_eq!(hidden.updated_from(restored), WindowState::default());
        }
    }

    #[test]
    fn test_wm_state_projection() {
        let withdrawn = WindowState { withdrawn: true, minimized: true, ..Default::default() };
        assert_eq!(withdrawn.wm_state(), WmState::Withdrawn);

        let iconic = WindowState { minimized: true, ..Default::default() };
        assert_eq!(iconic.wm_state(), WmState::Iconic);

        assert_eq!(WindowState::default().wm_state(), WmState::Normal);
    }

    #[test]
    fn test_net_wm_state_pairs_maximized_atoms() {
        let atoms = test_atoms();
        let state = WindowState { maximized: true, fullscreen: true, ..Default::default() };

        assert_eq!(
            state.net_wm_state_atoms(&atoms),
            vec![
                atoms.net_wm_state_maximized_horz,
                atoms.net_wm_state_maximized_vert,
                atoms.net_wm_state_fullscreen,
            ]
        );
        assert!(WindowState::default().net_wm_state_atoms(&atoms).is_empty());
    }

    #[test]
    fn test_protocol_value_decoding() {
        assert_eq!(WmState::try_from(3), Ok(WmState::Iconic));
        assert_eq!(WmState::try_from(2), Err(2));
        assert_eq!(NetWmStateAction::try_from(2), Ok(NetWmStateAction::Toggle));
        assert_eq!(NetWmStateAction::try_from(3), Err(3));
        assert_eq!(NetWmMoveResize::try_from(8), Ok(NetWmMoveResize::Move));
        assert_eq!(NetWmMoveResize::try_from(11), Ok(NetWmMoveResize::Cancel));
        assert_eq!(NetWmMoveResize::try_from(12), Err(12));
        assert_eq!(SourceIndication::try_from(2), Ok(SourceIndication::Pager));
    }
}
