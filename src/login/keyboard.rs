//! Keyboard-language guard for credential fields
//!
//! Credentials typed with the wrong layout active (Persian instead of
//! English, say) silently fail to match. Key-downs are classified here; the
//! view suppresses non-English characters and shows a warning banner.

use crate::utils::config::MessagesConfig;

/// The parts of a `KeyboardEvent` the classifier needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyStroke {
    /// `KeyboardEvent.key`
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl KeyStroke {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Ctrl+Alt is how AltGr reports on Windows; it types characters.
    fn is_alt_graph(&self) -> bool {
        self.ctrl && self.alt
    }

    fn is_shortcut(&self) -> bool {
        self.meta || (self.ctrl && !self.is_alt_graph())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardLanguage {
    English,
    Persian,
    Cyrillic,
    Hebrew,
    Greek,
    Other,
}

impl KeyboardLanguage {
    pub fn is_english(self) -> bool {
        self == KeyboardLanguage::English
    }

    /// Banner label for this layout
    pub fn label(self, messages: &MessagesConfig) -> String {
        match self {
            KeyboardLanguage::English => messages.english_label.clone(),
            KeyboardLanguage::Persian => {
                format!("{} | {}", messages.persian_label, messages.other_label)
            }
            _ => messages.other_label.clone(),
        }
    }
}

/// Classify a key-down.
///
/// Named keys (`Enter`, `Backspace`, `ArrowLeft`, ...) and shortcuts held with
/// Ctrl or Meta never insert text, so they count as English. AltGr chords do
/// insert text and are classified by the character they produce.
pub fn classify(stroke: &KeyStroke) -> KeyboardLanguage {
    if stroke.is_shortcut() {
        return KeyboardLanguage::English;
    }

    let mut chars = stroke.key.chars();
    let ch = match (chars.next(), chars.next()) {
        (Some(ch), None) => ch,
        _ => return KeyboardLanguage::English,
    };

    if ch.is_ascii() {
        return KeyboardLanguage::English;
    }

    match ch as u32 {
        0x0600..=0x06FF | 0x0750..=0x077F | 0x08A0..=0x08FF | 0xFB50..=0xFDFF | 0xFE70..=0xFEFF => {
            KeyboardLanguage::Persian
        }
        // ZWNJ is on the Persian layout's shift+space
        0x200C => KeyboardLanguage::Persian,
        0x0400..=0x052F => KeyboardLanguage::Cyrillic,
        0x0590..=0x05FF => KeyboardLanguage::Hebrew,
        0x0370..=0x03FF => KeyboardLanguage::Greek,
        _ => KeyboardLanguage::Other,
    }
}

/// What the host should do with a key-down in a credential field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDownOutcome {
    pub language: KeyboardLanguage,
    /// Call `preventDefault()` on the event
    pub prevent_default: bool,
}
