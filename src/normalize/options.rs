//! Normalization options and configuration.

use super::CleanupOptions;
use crate::locale::Lang;
use chrono::{DateTime, Utc};

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 120;

/// Maximum short description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 400;

/// Options for normalizing loose records.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Output language; detected from the input when `None`
    pub lang: Option<Lang>,

    /// Timestamp used when the record carries none; `Utc::now()` when `None`
    pub created_at: Option<DateTime<Utc>>,

    /// Maximum title length in characters
    pub title_max_chars: usize,

    /// Maximum short description length in characters
    pub description_max_chars: usize,

    /// Raw transcript the record was summarized from
    pub transcript: Option<String>,

    /// Excerpt sizes for the degraded fallback
    pub fallback: FallbackLimits,

    /// Text cleanup options
    pub cleanup: CleanupOptions,
}

impl NormalizeOptions {
    /// Create new normalize options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the output language.
    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = Some(lang);
        self
    }

    /// Set the fallback creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set the raw transcript used for language detection and the degraded fallback.
    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = Some(transcript.into());
        self
    }

    /// Set the maximum title length.
    pub fn with_title_max_chars(mut self, max: usize) -> Self {
        self.title_max_chars = max;
        self
    }

    /// Set the maximum short description length.
    pub fn with_description_max_chars(mut self, max: usize) -> Self {
        self.description_max_chars = max;
        self
    }

    /// Set the degraded fallback excerpt sizes.
    pub fn with_fallback(mut self, fallback: FallbackLimits) -> Self {
        self.fallback = fallback;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: super::CleanupPreset) -> Self {
        self.cleanup = CleanupOptions::from_preset(preset);
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            lang: None,
            created_at: None,
            title_max_chars: TITLE_MAX_CHARS,
            description_max_chars: DESCRIPTION_MAX_CHARS,
            transcript: None,
            fallback: FallbackLimits::default(),
            cleanup: CleanupOptions::default(),
        }
    }
}

/// How much raw text the degraded fallback copies into each field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackLimits {
    /// Characters copied into the title
    pub title_chars: usize,

    /// Characters copied into the short description
    pub description_chars: usize,

    /// Characters copied into the single summary bullet
    pub summary_chars: usize,
}

impl Default for FallbackLimits {
    fn default() -> Self {
        Self {
            title_chars: 80,
            description_chars: 200,
            summary_chars: 1000,
        }
    }
}
