//! Text cleanup for record fields and bullets.
//!
//! Every stage is idempotent and the stages are ordered so that the whole
//! pipeline is idempotent too: running it on its own output is a no-op.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Whitespace collapsing only
    Minimal,
    /// Unicode NFC, ligature and junk-character removal, list-marker stripping
    #[default]
    Standard,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Fix ligatures (fi, fl, etc.)
    pub fix_ligatures: bool,

    /// Remove Private Use Area (PUA) characters
    pub remove_pua: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Strip list markers (•, -, * ...) a summarizer put in front of bullets
    pub strip_list_markers: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: false,
            fix_ligatures: false,
            remove_pua: false,
            remove_replacement_char: false,
            strip_list_markers: false,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            remove_pua: true,
            remove_replacement_char: true,
            strip_list_markers: true,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
pub struct CleanupPipeline {
    options: CleanupOptions,
    whitespace_regex: Regex,
    list_marker_regex: Regex,
    ligature_map: Vec<(&'static str, &'static str)>,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self {
            options,
            whitespace_regex: Regex::new(r"\s+").unwrap(),
            list_marker_regex: Regex::new(r"^(?:[•●○■□◆◇▪▫►▻]\s*|[-*–—]\s+)+").unwrap(),
            ligature_map: vec![
                ("\u{FB00}", "ff"),  // ﬀ
                ("\u{FB01}", "fi"),  // ﬁ
                ("\u{FB02}", "fl"),  // ﬂ
                ("\u{FB03}", "ffi"), // ﬃ
                ("\u{FB04}", "ffl"), // ﬄ
                ("\u{FB05}", "st"),  // ﬅ (long s + t)
                ("\u{FB06}", "st"),  // ﬆ
            ],
        }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Options this pipeline was built with.
    pub fn options(&self) -> &CleanupOptions {
        &self.options
    }

    /// Clean a free-text field (title, description): one line, trimmed.
    pub fn clean_text(&self, text: &str) -> String {
        let mut result = self.remove_junk(text);

        // Ligatures expand before composition so marks after them still compose.
        if self.options.fix_ligatures {
            for (ligature, replacement) in &self.ligature_map {
                result = result.replace(ligature, replacement);
            }
        }

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        self.collapse_whitespace(&result)
    }

    /// Clean a bullet. An empty result means the bullet should be dropped.
    pub fn clean_bullet(&self, text: &str) -> String {
        let result = self.clean_text(text);
        if self.options.strip_list_markers {
            self.list_marker_regex
                .replace(&result, "")
                .trim()
                .to_string()
        } else {
            result
        }
    }

    // Character removal runs before NFC so composition sees the final sequence.
    fn remove_junk(&self, text: &str) -> String {
        text.chars()
            .filter(|c| !(self.options.remove_replacement_char && *c == '\u{FFFD}'))
            .filter(|c| !(self.options.remove_pua && is_private_use(*c)))
            .collect()
    }

    fn collapse_whitespace(&self, text: &str) -> String {
        self.whitespace_regex
            .replace_all(text, " ")
            .trim()
            .to_string()
    }
}

impl Default for CleanupPipeline {
    fn default() -> Self {
        Self::new(CleanupOptions::default())
    }
}

fn is_private_use(c: char) -> bool {
    let code = c as u32;
    (0xE000..=0xF8FF).contains(&code)
        || (0xF0000..=0xFFFFD).contains(&code)
        || (0x100000..=0x10FFFD).contains(&code)
}
