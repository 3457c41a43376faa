//! Greedy width-based line breaking.

use super::TextMeasurer;
use crate::error::Result;
use crate::model::FontSpec;
use serde::{Deserialize, Serialize};

/// Prefix of the first line of a bullet.
pub const BULLET_PREFIX: &str = "• ";

/// Prefix of wrapped continuation lines of a bullet.
pub const CONTINUATION_PREFIX: &str = "  ";

/// One width-bounded line of a bullet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Line text without prefix
    pub text: String,
    /// Whether this line continues the previous line's bullet
    pub continuation: bool,
}

impl Line {
    /// Prefix to draw in front of this line.
    pub fn prefix(&self) -> &'static str {
        if self.continuation {
            CONTINUATION_PREFIX
        } else {
            BULLET_PREFIX
        }
    }

    /// Text with its prefix, as drawn.
    pub fn display(&self) -> String {
        format!("{}{}", self.prefix(), self.text)
    }
}

/// Split `text` into lines no wider than `max_width`.
///
/// Words are taken in order and appended to the current line while the
/// measured line stays within `max_width`; otherwise the line is flushed and
/// the word starts a new one. A word wider than `max_width` on its own gets a
/// line to itself, unbroken. The result is never empty: whitespace-only text
/// yields a single empty line.
///
/// # Example
///
/// ```
/// use recap::model::FontSpec;
/// use recap::render::{wrap, MonospaceMeasurer};
///
/// // 5 points per character at size 10
/// let measurer = MonospaceMeasurer::new(0.5);
/// let lines = wrap("one two three", 40.0, &FontSpec::regular(10.0), &measurer).unwrap();
/// assert_eq!(lines, vec!["one two", "three"]);
/// ```
pub fn wrap(
    text: &str,
    max_width: f32,
    font: &FontSpec,
    measurer: &dyn TextMeasurer,
) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", current, word);
        if measurer.measure(&candidate, font)? <= max_width {
            current = candidate;
        } else {
            log::trace!("Line break before {:?} at width {}", word, max_width);
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}

/// Wrap a bullet into [`Line`]s, marking every line after the first as a continuation.
pub fn wrap_bullet(
    text: &str,
    max_width: f32,
    font: &FontSpec,
    measurer: &dyn TextMeasurer,
) -> Result<Vec<Line>> {
    Ok(wrap(text, max_width, font, measurer)?
        .into_iter()
        .enumerate()
        .map(|(i, text)| Line {
            text,
            continuation: i > 0,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::render::MonospaceMeasurer;

    fn font() -> FontSpec {
        FontSpec::regular(10.0)
    }

    // 5 points per character
    fn measurer() -> MonospaceMeasurer {
        MonospaceMeasurer::new(0.5)
    }

    #[test]
    fn test_wrap_fits_on_one_line() {
        let lines = wrap("short text", 100.0, &font(), &measurer()).unwrap();
        assert_eq!(lines, vec!["short text"]);
    }

    #[test]
    fn test_wrap_greedy() {
        // 8 chars fit per line
        let lines = wrap("aa bb cc dd ee", 40.0, &font(), &measurer()).unwrap();
        assert_eq!(lines, vec!["aa bb cc", "dd ee"]);
    }

    #[test]
    fn test_wrap_exact_fit() {
        let lines = wrap("abcd efg", 40.0, &font(), &measurer()).unwrap();
        assert_eq!(lines, vec!["abcd efg"]);
    }

    #[test]
    fn test_wrap_collapses_whitespace() {
        let lines = wrap("  a \n\t b  ", 100.0, &font(), &measurer()).unwrap();
        assert_eq!(lines, vec!["a b"]);
    }

    #[test]
    fn test_wrap_empty_and_whitespace() {
        assert_eq!(wrap("", 40.0, &font(), &measurer()).unwrap(), vec![""]);
        assert_eq!(wrap(" \n ", 40.0, &font(), &measurer()).unwrap(), vec![""]);
    }

    #[test]
    fn test_wrap_overlong_word() {
        let lines = wrap("a supercalifragilistic b", 30.0, &font(), &measurer()).unwrap();
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_wrap_width_bound_and_word_order() {
        let m = measurer();
        let text = "the quick brown fox jumps over the lazy dog and keeps running far away";
        for max in [20.0f32, 35.0, 50.0, 75.0, 120.0] {
            let lines = wrap(text, max, &font(), &m).unwrap();
            for line in &lines {
                let width = m.measure(line, &font()).unwrap();
                assert!(width <= max || !line.contains(' '), "{:?} at {}", line, max);
            }
            let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
            let expected: Vec<&str> = text.split_whitespace().collect();
            assert_eq!(rejoined, expected);
        }
    }

    #[test]
    fn test_wrap_bullet_flags() {
        let lines = wrap_bullet("aa bb cc dd ee", 40.0, &font(), &measurer()).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(!lines[0].continuation);
        assert!(lines[1].continuation);
        assert_eq!(lines[0].display(), "• aa bb cc");
        assert_eq!(lines[1].display(), "  dd ee");
    }

    struct FailingMeasurer;

    impl TextMeasurer for FailingMeasurer {
        fn measure(&self, _text: &str, _font: &FontSpec) -> Result<f32> {
            Err(Error::Measure("no font".into()))
        }
    }

    #[test]
    fn test_wrap_propagates_measure_error() {
        let result = wrap("two words", 40.0, &font(), &FailingMeasurer);
        assert!(matches!(result, Err(Error::Measure(_))));
        // A single word never needs measuring
        assert_eq!(wrap("word", 40.0, &font(), &FailingMeasurer).unwrap(), vec!["word"]);
    }
}
