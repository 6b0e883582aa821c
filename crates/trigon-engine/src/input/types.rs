/// Keyboard key identifier.
///
/// Only the keys this program reacts to (or could plausibly react to) get a
/// named variant; everything else is `Unknown` with the platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,

    /// Key without a named variant; carries a stable platform code.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic key transition emitted by the runtime.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
    /// True when the event comes from OS key-repeat.
    pub repeat: bool,
}
