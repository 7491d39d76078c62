//! Two-phase property reads
//!
//! [`fetch`] sends the GetProperty request immediately and hands back a
//! completion. Running the completion waits for the reply, decodes it and calls
//! the value or error handler. Issuing every read before running any completion
//! costs one round trip instead of one per property.

use crate::connection::{Atoms, PropertyReply, XConnection};
use encoding_rs::WINDOWS_1252;
use log::debug;
use x11rb::protocol::xproto::{Atom, AtomEnum, Window};

/// Phase two of a property fetch
pub type PropertyCompletion<'a> = Box<dyn FnOnce() + 'a>;

/// Decode a property value into a typed value
pub trait FromProperty: Sized {
    fn from_property(reply: &PropertyReply, atoms: &Atoms) -> Option<Self>;
}

/// Decode text by its type: STRING is Latin-1, UTF8_STRING is UTF-8
fn decode_text(type_: Atom, bytes: &[u8], atoms: &Atoms) -> Option<String> {
    if type_ == Atom::from(AtomEnum::STRING) {
        Some(WINDOWS_1252.decode(bytes).0.into_owned())
    } else if type_ == atoms.utf8_string {
        String::from_utf8(bytes.to_vec()).ok()
    } else {
        None
    }
}

impl FromProperty for String {
    fn from_property(reply: &PropertyReply, atoms: &Atoms) -> Option<Self> {
        if reply.format != 8 {
            return None;
        }
        let text = decode_text(reply.type_, &reply.value, atoms)?;
        Some(text.trim_end_matches('\0').to_owned())
    }
}

/// A single window reference or atom (WM_TRANSIENT_FOR)
impl FromProperty for u32 {
    fn from_property(reply: &PropertyReply, _atoms: &Atoms) -> Option<Self> {
        reply.value32()?.first().copied()
    }
}

/// A list of atoms (WM_PROTOCOLS)
impl FromProperty for Vec<u32> {
    fn from_property(reply: &PropertyReply, _atoms: &Atoms) -> Option<Self> {
        reply.value32()
    }
}

/// ICCCM WM_CLASS: two NUL terminated strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WmClass {
    pub instance: String,
    pub class: String,
}

impl WmClass {
    /// The class names the application; the instance is the fallback
    pub fn application_id(&self) -> &str {
        if self.class.is_empty() {
            &self.instance
        } else {
            &self.class
        }
    }
}

impl FromProperty for WmClass {
    fn from_property(reply: &PropertyReply, atoms: &Atoms) -> Option<Self> {
        if reply.format != 8 {
            return None;
        }
        let mut parts = reply.value.split(|byte| *byte == 0);
        let mut next_part = || match parts.next() {
            Some(part) => decode_text(reply.type_, part, atoms),
            None => Some(String::new()),
        };
        let instance = next_part()?;
        let class = next_part()?;
        if instance.is_empty() && class.is_empty() {
            return None;
        }
        Some(WmClass { instance, class })
    }
}

/// Properties mirrored from an X11 window into its scene surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchedProperty {
    /// WM_CLASS, becomes the application id
    Class,
    /// WM_NAME, becomes the title
    Name,
    /// _NET_WM_NAME, becomes the title
    NetName,
    /// WM_TRANSIENT_FOR, becomes the parent
    TransientFor,
    /// WM_PROTOCOLS, becomes the supported protocol set
    Protocols,
}

impl WatchedProperty {
    pub const ALL: [WatchedProperty; 5] = [
        WatchedProperty::Class,
        WatchedProperty::Name,
        WatchedProperty::NetName,
        WatchedProperty::TransientFor,
        WatchedProperty::Protocols,
    ];

    pub fn atom(self, atoms: &Atoms) -> Atom {
        match self {
            WatchedProperty::Class => AtomEnum::WM_CLASS.into(),
            WatchedProperty::Name => AtomEnum::WM_NAME.into(),
            WatchedProperty::NetName => atoms.net_wm_name,
            WatchedProperty::TransientFor => AtomEnum::WM_TRANSIENT_FOR.into(),
            WatchedProperty::Protocols => atoms.wm_protocols,
        }
    }

    pub fn from_atom(atom: Atom, atoms: &Atoms) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|property| property.atom(atoms) == atom)
    }
}

/// Start reading `property` and return the completion that applies it
///
/// `on_error` runs when the property is missing, cannot be decoded as `T`, or
/// the read fails.
pub fn fetch<'a, T, F, E>(
    connection: &'a dyn XConnection,
    window: Window,
    property: Atom,
    on_value: F,
    on_error: E,
) -> PropertyCompletion<'a>
where
    T: FromProperty + 'a,
    F: FnOnce(T) + 'a,
    E: FnOnce() + 'a,
{
    let pending = connection.read_property(window, property);

    Box::new(move || match pending() {
        Ok(Some(reply)) => match T::from_property(&reply, connection.atoms()) {
            Some(value) => on_value(value),
            None => {
                debug!(
                    "Property {} of window 0x{:x} has unexpected type {} (format {})",
                    property, window, reply.type_, reply.format
                );
                on_error();
            }
        },
        Ok(None) => on_error(),
        Err(e) => {
            debug!("Failed to read property {} of window 0x{:x}: {}", property, window, e);
            on_error();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        string_property, test_atoms, utf8_property, window_property, RecordingConnection,
    };
    use std::cell::RefCell;

    #[test]
    fn test_wm_class_prefers_class_component() {
        let atoms = test_atoms();
        let reply = string_property(b"xterm\0XTerm\0");
        let class = WmClass::from_property(&reply, &atoms).unwrap();
        assert_eq!(class.instance, "xterm");
        assert_eq!(class.application_id(), "XTerm");

        let instance_only = WmClass::from_property(&string_property(b"tool\0"), &atoms).unwrap();
        assert_eq!(instance_only.application_id(), "tool");
    }

    #[test]
    fn test_string_decoding_strips_terminator() {
        let atoms = test_atoms();
        let reply = string_property(b"Terminal\0");
        assert_eq!(String::from_property(&reply, &atoms).as_deref(), Some("Terminal"));
        assert_eq!(String::from_property(&window_property(5), &atoms), None);
    }

    #[test]
    fn test_latin1_string_is_decoded() {
        let atoms = test_atoms();
        let reply = string_property(b"Caf\xe9");
        assert_eq!(String::from_property(&reply, &atoms).as_deref(), Some("Café"));

        let class = WmClass::from_property(&string_property(b"r\xe9seau\0R\xe9seau\0"), &atoms);
        assert_eq!(class.unwrap().application_id(), "Réseau");
    }

    #[test]
    fn test_utf8_string_is_decoded() {
        let atoms = test_atoms();
        let reply = utf8_property("Café ☕".as_bytes());
        assert_eq!(String::from_property(&reply, &atoms).as_deref(), Some("Café ☕"));

        // Invalid UTF-8 is rejected rather than mangled
        assert_eq!(String::from_property(&utf8_property(b"Caf\xe9"), &atoms), None);
    }

    #[test]
    fn test_unknown_text_type_is_rejected() {
        let atoms = test_atoms();
        let mut reply = string_property(b"title");
        reply.type_ = AtomEnum::INTEGER.into();
        assert_eq!(String::from_property(&reply, &atoms), None);
    }

    #[test]
    fn test_watched_property_atom_mapping() {
        let connection = RecordingConnection::new();
        let atoms = connection.atoms();
        for property in WatchedProperty::ALL {
            assert_eq!(
                WatchedProperty::from_atom(property.atom(atoms), atoms),
                Some(property)
            );
        }
        assert_eq!(WatchedProperty::from_atom(atoms.net_wm_state, atoms), None);
    }

    #[test]
    fn test_fetch_issues_request_before_completion() {
        let connection = RecordingConnection::new();
        connection.set_window_property(7, AtomEnum::WM_NAME.into(), string_property(b"Editor"));

        let title = RefCell::new(None);
        let completion = fetch::<String, _, _>(
            &connection,
            7,
            AtomEnum::WM_NAME.into(),
            |value| *title.borrow_mut() = Some(value),
            || panic!("property should be present"),
        );

        assert_eq!(connection.issued_reads(), 1);
        assert_eq!(connection.completed_reads(), 0);
        assert!(title.borrow().is_none());

        completion();

        assert_eq!(connection.completed_reads(), 1);
        assert_eq!(title.borrow().as_deref(), Some("Editor"));
    }

    #[test]
    fn test_fetch_missing_property_runs_error_handler() {
        let connection = RecordingConnection::new();
        let errored = RefCell::new(false);

        fetch::<u32, _, _>(
            &connection,
            7,
            AtomEnum::WM_TRANSIENT_FOR.into(),
            |_| panic!("property should be missing"),
            || *errored.borrow_mut() = true,
        )();

        assert!(*errored.borrow());
    }

    #[test]
    fn test_fetch_wrong_format_runs_error_handler() {
        let connection = RecordingConnection::new();
        connection.set_window_property(7, AtomEnum::WM_TRANSIENT_FOR.into(), string_property(b"x"));
        let errored = RefCell::new(false);

        fetch::<u32, _, _>(
            &connection,
            7,
            AtomEnum::WM_TRANSIENT_FOR.into(),
            |_| panic!("string is not a window"),
            || *errored.borrow_mut() = true,
        )();

        assert!(*errored.borrow());
    }
}
