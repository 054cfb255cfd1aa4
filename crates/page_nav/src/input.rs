use crate::catalog::Category;
use crate::traversal::Direction;

/// A keydown as delivered by the host.
///
/// `code` is the physical key name (`"KeyH"`, `"ArrowUp"`); hosts that only
/// report the legacy numeric key code leave it empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyEvent<E> {
    pub code: String,
    pub key_code: Option<u32>,
    /// Element the event was targeted at, if any.
    pub target: Option<E>,
}

impl<E> KeyEvent<E> {
    pub fn from_code(code: &str) -> Self {
        Self {
            code: code.to_owned(),
            key_code: None,
            target: None,
        }
    }

    pub const fn from_key_code(key_code: u32) -> Self {
        Self {
            code: String::new(),
            key_code: Some(key_code),
            target: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: E) -> Self {
        self.target = Some(target);
        self
    }
}

/// What a recognised key asks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    SetDirection(Direction),
    Navigate(Category),
}

/// Tags whose elements take typed text; keys aimed at them are left alone.
pub const TEXT_ENTRY_TAGS: [&str; 3] = ["input", "textarea", "select"];

pub fn is_text_entry_tag(tag: &str) -> bool {
    TEXT_ENTRY_TAGS
        .iter()
        .any(|entry| entry.eq_ignore_ascii_case(tag))
}

/// Map a key to its action. The physical code wins when present; the legacy
/// numeric code is only consulted when the code is empty.
pub fn decode_key<E>(event: &KeyEvent<E>) -> Option<KeyAction> {
    if !event.code.is_empty() {
        return decode_code(&event.code);
    }
    event.key_code.and_then(decode_key_code)
}

fn decode_code(code: &str) -> Option<KeyAction> {
    Some(match code {
        "ArrowUp" => KeyAction::SetDirection(Direction::Backward),
        "ArrowDown" => KeyAction::SetDirection(Direction::Forward),
        "KeyH" => KeyAction::Navigate(Category::Heading),
        "KeyL" => KeyAction::Navigate(Category::Link),
        "KeyM" => KeyAction::Navigate(Category::Landmark),
        _ => return None,
    })
}

const fn decode_key_code(key_code: u32) -> Option<KeyAction> {
    Some(match key_code {
        38 => KeyAction::SetDirection(Direction::Backward),
        40 => KeyAction::SetDirection(Direction::Forward),
        72 => KeyAction::Navigate(Category::Heading),
        76 => KeyAction::Navigate(Category::Link),
        77 => KeyAction::Navigate(Category::Landmark),
        _ => return None,
    })
}
