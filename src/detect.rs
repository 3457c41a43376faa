//! Language detection for transcripts and records.

use crate::locale::Lang;

/// Detect the language of a piece of text.
///
/// Text containing any Cyrillic letter is Russian; everything else is English.
///
/// # Example
/// ```
/// use recap::detect::detect_language;
/// use recap::Lang;
///
/// assert_eq!(detect_language("Встреча в понедельник"), Lang::Ru);
/// assert_eq!(detect_language("Meeting on Monday"), Lang::En);
/// ```
pub fn detect_language(text: &str) -> Lang {
    if text.chars().any(is_cyrillic) {
        Lang::Ru
    } else {
        Lang::En
    }
}

/// Detect the language of a loose input record by scanning every string in it.
pub fn detect_record_language(record: &serde_json::Value) -> Lang {
    if value_has_cyrillic(record) {
        Lang::Ru
    } else {
        Lang::En
    }
}

fn value_has_cyrillic(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::String(s) => s.chars().any(is_cyrillic),
        serde_json::Value::Array(items) => items.iter().any(value_has_cyrillic),
        serde_json::Value::Object(map) => map.values().any(value_has_cyrillic),
        _ => false,
    }
}

/// Check whether a character is a Cyrillic letter (including Ё/ё).
pub fn is_cyrillic(ch: char) -> bool {
    matches!(ch, '\u{0400}'..='\u{04FF}' | '\u{0500}'..='\u{052F}') && ch.is_alphabetic()
}
