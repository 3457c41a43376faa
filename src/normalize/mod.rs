//! Normalization of loosely typed summary records.
//!
//! A summarization service hands back a mapping whose fields may be missing,
//! scalars, lists, or something else entirely, and sometimes not JSON at all.
//! The [`Normalizer`] turns any of that into a complete
//! [`StructuredDocument`]. It never fails: input that cannot be read as a
//! record takes the degraded path, which keeps an excerpt of the raw text.
//!
//! # Example
//!
//! ```
//! use recap::normalize::{Normalizer, NormalizeOptions};
//! use recap::{Lang, SectionKey};
//!
//! let normalizer = Normalizer::new(NormalizeOptions::new().with_lang(Lang::En));
//! let doc = normalizer.normalize_str(r#"{"title": "Plan", "key_tasks": "Ship  it\n"}"#);
//!
//! assert_eq!(doc.title, "Plan");
//! assert_eq!(doc.section(SectionKey::KeyTasks).unwrap().bullets, vec!["Ship it"]);
//! ```

mod cleanup;
mod options;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use options::{FallbackLimits, NormalizeOptions, DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};

use crate::detect::{detect_language, detect_record_language};
use crate::locale::{resolve, Lang, SectionKey, StatusKey};
use crate::model::{Section, StructuredDocument};
use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};

/// Raw upstream output, before any field is looked at.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    /// A JSON object; fields are decoded individually
    Structured(Map<String, Value>),
    /// Anything that is not a JSON object, kept as best-effort text
    Unparseable {
        /// Best-effort text of the input
        raw: String,
    },
}

impl RawRecord {
    /// Classify an already parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => RawRecord::Structured(map),
            Value::String(raw) => RawRecord::Unparseable { raw },
            other => RawRecord::Unparseable {
                raw: other.to_string(),
            },
        }
    }

    /// Parse text that should contain a JSON object.
    pub fn parse_str(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_value(value),
            Err(e) => {
                log::debug!("Record is not valid JSON: {}", e);
                RawRecord::Unparseable {
                    raw: text.to_string(),
                }
            }
        }
    }

    /// Parse bytes that should contain a UTF-8 JSON object.
    pub fn parse_bytes(data: &[u8]) -> Self {
        match std::str::from_utf8(data) {
            Ok(text) => Self::parse_str(text),
            Err(e) => {
                log::debug!("Record is not valid UTF-8: {}", e);
                RawRecord::Unparseable {
                    raw: String::from_utf8_lossy(data).into_owned(),
                }
            }
        }
    }

    /// Check if the record could not be read as a mapping.
    pub fn is_unparseable(&self) -> bool {
        matches!(self, RawRecord::Unparseable { .. })
    }
}

/// Shape of one field of a structured record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Key not present
    Missing,
    /// JSON null
    Null,
    /// Boolean
    Bool(bool),
    /// Number
    Number(&'a Number),
    /// String
    Text(&'a str),
    /// Array
    List(&'a [Value]),
    /// Nested object
    Object(&'a Map<String, Value>),
}

impl<'a> FieldValue<'a> {
    /// Look up and classify a field.
    pub fn of(map: &'a Map<String, Value>, key: &str) -> Self {
        map.get(key).map_or(FieldValue::Missing, Self::classify)
    }

    /// Classify a JSON value.
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => FieldValue::Number(n),
            Value::String(s) => FieldValue::Text(s),
            Value::Array(items) => FieldValue::List(items),
            Value::Object(map) => FieldValue::Object(map),
        }
    }

    /// String form of the value; falsy values stringify to the empty string.
    pub fn stringify(&self) -> String {
        match self {
            FieldValue::Missing | FieldValue::Null | FieldValue::Bool(false) => String::new(),
            FieldValue::Bool(true) => "true".to_string(),
            FieldValue::Number(n) if is_zero(n) => String::new(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.to_string(),
            FieldValue::List(items) if items.is_empty() => String::new(),
            FieldValue::List(items) => Value::Array(items.to_vec()).to_string(),
            FieldValue::Object(map) if map.is_empty() => String::new(),
            FieldValue::Object(map) => Value::Object((*map).clone()).to_string(),
        }
    }
}

fn is_zero(n: &Number) -> bool {
    n.as_f64() == Some(0.0)
}

/// Converts raw records into structured documents.
pub struct Normalizer {
    options: NormalizeOptions,
    pipeline: CleanupPipeline,
}

impl Normalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        let pipeline = CleanupPipeline::new(options.cleanup.clone());
        Self { options, pipeline }
    }

    /// Options this normalizer was built with.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize a JSON value.
    pub fn normalize_value(&self, value: &Value) -> StructuredDocument {
        match value {
            Value::Object(map) => self.normalize_map(map),
            other => self.normalize(&RawRecord::from_value(other.clone())),
        }
    }

    /// Normalize text that should hold a JSON object.
    pub fn normalize_str(&self, text: &str) -> StructuredDocument {
        self.normalize(&RawRecord::parse_str(text))
    }

    /// Normalize bytes that should hold a UTF-8 JSON object.
    pub fn normalize_bytes(&self, data: &[u8]) -> StructuredDocument {
        self.normalize(&RawRecord::parse_bytes(data))
    }

    /// Normalize a classified raw record.
    pub fn normalize(&self, record: &RawRecord) -> StructuredDocument {
        match record {
            RawRecord::Structured(map) => self.normalize_map(map),
            RawRecord::Unparseable { raw } => self.degraded(raw),
        }
    }

    fn normalize_map(&self, map: &Map<String, Value>) -> StructuredDocument {
        let lang = self.options.lang.unwrap_or_else(|| {
            match (FieldValue::of(map, "lang"), self.transcript()) {
                (FieldValue::Text(tag), _) => Lang::from_tag(tag),
                (_, Some(transcript)) => detect_language(transcript),
                _ => detect_record_language(&Value::Object(map.clone())),
            }
        });

        let mut doc = StructuredDocument::new(lang, self.created_at(map));
        doc.title = self.title(FieldValue::of(map, "title"), lang);
        doc.short_description = self.description(FieldValue::of(map, "short_description"));
        doc.sections = SectionKey::ALL
            .iter()
            .map(|&key| {
                let bullets = self.bullets(FieldValue::of(map, key.record_key()));
                Section::with_bullets(key, lang, bullets)
            })
            .collect();

        log::debug!(
            "Normalized record: lang={}, {} bullets in {} non-empty sections",
            lang,
            doc.bullet_count(),
            doc.non_empty_sections().count()
        );
        doc
    }

    /// Terminal fallback for input that is not a record at all.
    fn degraded(&self, raw: &str) -> StructuredDocument {
        let source = match self.transcript() {
            Some(transcript) => transcript,
            None => raw,
        };
        log::warn!(
            "Summarizer output is not a record ({} chars), using raw text excerpt",
            raw.chars().count()
        );

        let lang = self
            .options
            .lang
            .unwrap_or_else(|| detect_language(source));
        let limits = self.options.fallback;

        let mut doc = StructuredDocument::new(lang, self.options.created_at.unwrap_or_else(Utc::now));
        let title = take_chars(source, limits.title_chars);
        doc.title = self.title(FieldValue::Text(&title), lang);
        let description = take_chars(source, limits.description_chars);
        doc.short_description = self.description(FieldValue::Text(&description));

        let summary = take_chars(source, limits.summary_chars);
        if let Some(section) = doc.section_mut(SectionKey::Summary) {
            section.bullets = self.bullets(FieldValue::Text(&summary));
        }
        doc
    }

    fn title(&self, field: FieldValue<'_>, lang: Lang) -> String {
        let title = self.clean_truncated(field, self.options.title_max_chars);
        if title.is_empty() {
            resolve(lang, StatusKey::DefaultTitle).to_string()
        } else {
            title
        }
    }

    fn description(&self, field: FieldValue<'_>) -> String {
        self.clean_truncated(field, self.options.description_max_chars)
    }

    fn clean_truncated(&self, field: FieldValue<'_>, max_chars: usize) -> String {
        let cleaned = self.pipeline.clean_text(&field.stringify());
        take_chars(&cleaned, max_chars).trim_end().to_string()
    }

    fn bullets(&self, field: FieldValue<'_>) -> Vec<String> {
        let raw: Vec<String> = match field {
            FieldValue::Text(s) => vec![s.to_string()],
            FieldValue::List(items) => items
                .iter()
                .map(|item| FieldValue::classify(item).stringify())
                .collect(),
            FieldValue::Missing
            | FieldValue::Null
            | FieldValue::Bool(_)
            | FieldValue::Number(_)
            | FieldValue::Object(_) => Vec::new(),
        };

        raw.iter()
            .map(|item| self.pipeline.clean_bullet(item))
            .filter(|item| !item.is_empty())
            .collect()
    }

    fn created_at(&self, map: &Map<String, Value>) -> DateTime<Utc> {
        if let FieldValue::Text(s) = FieldValue::of(map, "created_at") {
            match DateTime::parse_from_rfc3339(s.trim()) {
                Ok(parsed) => return parsed.with_timezone(&Utc),
                Err(e) => log::debug!("Ignoring unparseable created_at {:?}: {}", s, e),
            }
        }
        self.options.created_at.unwrap_or_else(Utc::now)
    }

    fn transcript(&self) -> Option<&str> {
        self.options
            .transcript
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

fn take_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
