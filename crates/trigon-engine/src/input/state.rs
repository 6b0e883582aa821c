use std::collections::HashSet;

use super::types::{Key, KeyEvent, KeyState};

/// Current keyboard state for a single window.
#[derive(Debug, Default)]
pub struct Keyboard {
    keys_down: HashSet<Key>,
}

impl Keyboard {
    /// Applies a key transition.
    ///
    /// Repeats fold into the existing held entry, so a held key is observed
    /// as a single continuous press.
    pub fn apply(&mut self, ev: KeyEvent) {
        match ev.state {
            KeyState::Pressed => {
                self.keys_down.insert(ev.key);
            }
            KeyState::Released => {
                self.keys_down.remove(&ev.key);
            }
        }
    }

    /// Clears held keys when focus is lost.
    ///
    /// Release events are not delivered to an unfocused window; without this
    /// a key pressed across a focus change would stick forever.
    pub fn set_focused(&mut self, focused: bool) {
        if !focused {
            self.keys_down.clear();
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key, repeat: bool) -> KeyEvent {
        KeyEvent { key, state: KeyState::Pressed, repeat }
    }

    fn release(key: Key) -> KeyEvent {
        KeyEvent { key, state: KeyState::Released, repeat: false }
    }

    #[test]
    fn press_marks_key_down() {
        let mut kb = Keyboard::default();
        kb.apply(press(Key::Escape, false));
        assert!(kb.is_down(Key::Escape));
    }

    #[test]
    fn release_clears_key() {
        let mut kb = Keyboard::default();
        kb.apply(press(Key::Escape, false));
        kb.apply(release(Key::Escape));
        assert!(!kb.is_down(Key::Escape));
    }

    #[test]
    fn repeat_does_not_disturb_held_state() {
        let mut kb = Keyboard::default();
        kb.apply(press(Key::Space, false));
        kb.apply(press(Key::Space, true));
        assert!(kb.is_down(Key::Space));
        kb.apply(release(Key::Space));
        assert!(!kb.is_down(Key::Space));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut kb = Keyboard::default();
        kb.apply(press(Key::Escape, false));
        kb.apply(press(Key::Enter, false));
        kb.set_focused(false);
        assert!(!kb.is_down(Key::Escape));
        assert!(!kb.is_down(Key::Enter));
    }

    #[test]
    fn regaining_focus_starts_from_empty_state() {
        let mut kb = Keyboard::default();
        kb.apply(press(Key::Tab, false));
        kb.set_focused(false);
        kb.set_focused(true);
        assert!(!kb.is_down(Key::Tab));
    }
}
