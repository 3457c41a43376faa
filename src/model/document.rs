//! Document-level types.

use crate::locale::{resolve, Lang, SectionKey};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A canonical, fully normalized summary record.
///
/// Built once per request by the normalizer and consumed by exactly one
/// renderer. Every section is present in display order even when it has no
/// bullets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Language of headings and chrome text
    pub lang: Lang,

    /// Document title (never empty)
    pub title: String,

    /// One-paragraph description, possibly empty
    pub short_description: String,

    /// Creation timestamp shown in page headers
    pub created_at: DateTime<Utc>,

    /// Sections in fixed order: summary, key tasks, action plan, conclusion
    pub sections: Vec<Section>,
}

impl StructuredDocument {
    /// Create a document with the localized default title and four empty sections.
    pub fn new(lang: Lang, created_at: DateTime<Utc>) -> Self {
        Self {
            lang,
            title: resolve(lang, crate::locale::StatusKey::DefaultTitle).to_string(),
            short_description: String::new(),
            created_at,
            sections: SectionKey::ALL
                .iter()
                .map(|&key| Section::new(key, lang))
                .collect(),
        }
    }

    /// Get a section by key.
    pub fn section(&self, key: SectionKey) -> Option<&Section> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Get a mutable section by key.
    pub fn section_mut(&mut self, key: SectionKey) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.key == key)
    }

    /// Sections that have at least one bullet, in display order.
    pub fn non_empty_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| !s.is_empty())
    }

    /// Total number of bullets across all sections.
    pub fn bullet_count(&self) -> usize {
        self.sections.iter().map(|s| s.bullets.len()).sum()
    }

    /// Check if every section is empty.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.is_empty())
    }

    /// Convert back into the loose record shape accepted by the normalizer.
    pub fn to_record(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert("lang".into(), self.lang.as_tag().into());
        map.insert("title".into(), self.title.clone().into());
        map.insert(
            "short_description".into(),
            self.short_description.clone().into(),
        );
        map.insert(
            "created_at".into(),
            self.created_at
                .to_rfc3339_opts(SecondsFormat::AutoSi, true)
                .into(),
        );
        for section in &self.sections {
            map.insert(
                section.key.record_key().into(),
                serde_json::Value::Array(
                    section
                        .bullets
                        .iter()
                        .map(|b| serde_json::Value::String(b.clone()))
                        .collect(),
                ),
            );
        }
        serde_json::Value::Object(map)
    }

    /// Plain-text outline of the document.
    pub fn plain_text(&self) -> String {
        let mut lines = vec![self.title.clone()];
        if !self.short_description.is_empty() {
            lines.push(self.short_description.clone());
        }
        for section in self.non_empty_sections() {
            lines.push(String::new());
            lines.push(section.heading.clone());
            for bullet in &section.bullets {
                lines.push(format!("• {}", bullet));
            }
        }
        lines.join("\n")
    }
}

/// One named group of bullets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section identity
    pub key: SectionKey,

    /// Localized heading
    pub heading: String,

    /// Cleaned, non-empty bullet texts
    pub bullets: Vec<String>,
}

impl Section {
    /// Create an empty section with its localized heading.
    pub fn new(key: SectionKey, lang: Lang) -> Self {
        Self {
            key,
            heading: resolve(lang, key).to_string(),
            bullets: Vec::new(),
        }
    }

    /// Create a section with bullets.
    pub fn with_bullets(key: SectionKey, lang: Lang, bullets: Vec<String>) -> Self {
        Self {
            bullets,
            ..Self::new(key, lang)
        }
    }

    /// Check if the section has no bullets.
    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }
}
