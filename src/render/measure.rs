//! Text measurement used by line breaking and centering.

use crate::error::Result;
use crate::model::{FontFace, FontSpec};

/// Measures the rendered width of text, in the same units as page geometry.
///
/// Implementations must be deterministic and free of side effects; one
/// measurer may be shared by concurrent renders. A measurer that cannot
/// produce a width (missing font, backend fault) returns
/// [`Error::Measure`](crate::Error::Measure), which aborts the render.
pub trait TextMeasurer: Send + Sync {
    /// Width of `text` set in `font`.
    fn measure(&self, text: &str, font: &FontSpec) -> Result<f32>;
}

/// Glyph-class width model for proportional sans-serif faces.
///
/// Close enough to Helvetica metrics for line fitting without loading a font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicMeasurer {
    /// Extra width factor applied to bold text
    pub bold_scale: f32,
}

impl HeuristicMeasurer {
    /// Create a measurer with default scaling.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for HeuristicMeasurer {
    fn default() -> Self {
        Self { bold_scale: 1.05 }
    }
}

impl TextMeasurer for HeuristicMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<f32> {
        let em_sum: f32 = text.chars().map(glyph_em_width).sum();
        let scale = match font.face {
            FontFace::Regular => 1.0,
            FontFace::Bold => self.bold_scale,
        };
        Ok(em_sum * font.size * scale)
    }
}

fn glyph_em_width(ch: char) -> f32 {
    match ch {
        ' ' | '\u{00A0}' => 0.28,
        'i' | 'l' | 'I' | 'j' | '|' | '!' => 0.24,
        '.' | ',' | ':' | ';' | '\'' | '"' | '`' => 0.28,
        '-' | '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' => 0.34,
        '\u{2014}' => 1.0,
        '\u{2022}' => 0.35,
        '(' | ')' | '[' | ']' | '{' | '}' => 0.33,
        'f' | 't' | 'r' => 0.30,
        'm' | 'w' | 'M' | 'W' | '@' | '%' | '&' | '#' => 0.83,
        c if c.is_ascii_digit() => 0.56,
        c if c.is_ascii_uppercase() => 0.67,
        c if c.is_ascii_lowercase() => 0.52,
        c if c.is_whitespace() => 0.28,
        c if c.is_ascii_punctuation() => 0.47,
        c if crate::detect::is_cyrillic(c) => {
            if c.is_uppercase() {
                0.68
            } else {
                0.55
            }
        }
        _ => 0.6,
    }
}

/// Fixed-advance measurer: every character is `advance * size` wide.
///
/// Useful for tests and for backends that draw with a monospaced face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Advance per character in ems
    pub advance: f32,
}

impl MonospaceMeasurer {
    /// Create a measurer with the given advance in ems.
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<f32> {
        Ok(text.chars().count() as f32 * self.advance * font.size)
    }
}
