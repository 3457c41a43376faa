//! Slide types produced by the chunk renderer.

use crate::locale::SectionKey;
use serde::{Deserialize, Serialize};

/// Bullet marker used in slide bodies.
pub const SLIDE_BULLET: &str = "• ";

/// One slide of a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Slide heading, suffixed with " (n)" on continuation chunks
    pub heading: String,

    /// Subtitle (title slide only)
    pub subtitle: Option<String>,

    /// Section the slide belongs to (`None` for the title slide)
    pub section: Option<SectionKey>,

    /// 0-based chunk index within the section
    pub chunk: usize,

    /// Bullets on this slide
    pub bullets: Vec<String>,
}

impl Slide {
    /// Create the title slide.
    pub fn title(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            heading: title.into(),
            subtitle: Some(subtitle.into()),
            section: None,
            chunk: 0,
            bullets: Vec::new(),
        }
    }

    /// Create a section slide.
    pub fn section(
        heading: impl Into<String>,
        section: SectionKey,
        chunk: usize,
        bullets: Vec<String>,
    ) -> Self {
        Self {
            heading: heading.into(),
            subtitle: None,
            section: Some(section),
            chunk,
            bullets,
        }
    }

    /// Check if this is the title slide.
    pub fn is_title(&self) -> bool {
        self.section.is_none()
    }

    /// Body text: one bullet-prefixed line per bullet.
    pub fn body(&self) -> String {
        self.bullets
            .iter()
            .map(|b| format!("{}{}", SLIDE_BULLET, b))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Stable object identifier, e.g. `title-slide` or `key_tasks-1`.
    pub fn object_id(&self) -> String {
        match self.section {
            None => "title-slide".to_string(),
            Some(key) => format!("{}-{}", key.record_key(), self.chunk),
        }
    }
}
