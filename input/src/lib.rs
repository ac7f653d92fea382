// keyboard
// ----

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKey {
    /// linux key code [1].
    ///
    /// [1]: https://github.com/torvalds/linux/blob/8d561baae505bab6b3f133e10dc48e27e4505cbe/include/uapi/linux/input-event-codes.h
    Unix(u32),
    Unidentified,
}

/// physical location of the key, regardless of the keyboard layout.
///
/// escape is the only key that gets a name, everything else is carried as `Unidentified`.
///
/// https://github.com/torvalds/linux/blob/231825b2e1ff6ba799c5eaf396d3ab2354e37c6b/include/uapi/linux/input-event-codes.h#L76
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scancode {
    /// KEY_ESC (1)
    Esc,
    Unidentified(RawKey),
}

impl Scancode {
    pub fn from_unix(code: u32) -> Self {
        match code {
            1 => Self::Esc,
            other => Self::Unidentified(RawKey::Unix(other)),
        }
    }
}

impl std::hash::Hash for RawKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::Unix(code) => state.write_u32(*code),
            Self::Unidentified => state.write_u32(u32::MAX),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Clone)]
pub enum KeyboardEvent {
    Key {
        state: KeyState,
        scancode: Scancode,
        /// true if this is a key repeat
        repeat: bool,
    },
}

impl KeyboardEvent {
    /// true for the initial press of the key, repeats are not counted.
    pub fn is_press_of(&self, which: Scancode) -> bool {
        match *self {
            Self::Key {
                state: KeyState::Pressed,
                scancode,
                repeat: false,
            } => scancode == which,
            _ => false,
        }
    }
}

#[test]
fn test_scancode_from_unix() {
    assert_eq!(Scancode::from_unix(1), Scancode::Esc);
    assert_eq!(
        Scancode::from_unix(57),
        Scancode::Unidentified(RawKey::Unix(57))
    );
    assert_eq!(
        Scancode::from_unix(30),
        Scancode::Unidentified(RawKey::Unix(30))
    );
}

#[test]
fn test_keyboard_event_is_press_of() {
    let press = |state, repeat| KeyboardEvent::Key {
        state,
        scancode: Scancode::Esc,
        repeat,
    };

    assert!(press(KeyState::Pressed, false).is_press_of(Scancode::Esc));
    assert!(
        !press(KeyState::Pressed, false)
            .is_press_of(Scancode::Unidentified(RawKey::Unix(57)))
    );
    assert!(!press(KeyState::Pressed, true).is_press_of(Scancode::Esc));
    assert!(!press(KeyState::Released, false).is_press_of(Scancode::Esc));
}
