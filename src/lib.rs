//! # recap
//!
//! Turns loosely structured meeting summaries into paginated documents and
//! slide decks.
//!
//! A summary record (title, short description, summary, key tasks, action
//! plan, conclusion) is first normalized into a [`StructuredDocument`], then
//! laid out by one of two renderers:
//!
//! - the flow renderer, which wraps bullets to the page width and paginates
//!   them with repeated headers, footers, and section headings;
//! - the slide renderer, which splits each section into fixed-size chunks.
//!
//! ## Quick Start
//!
//! ```
//! use recap::Recap;
//!
//! fn main() -> recap::Result<()> {
//!     let result = Recap::new().normalize_str(
//!         r#"{"title": "Weekly sync", "summary": ["Release is on track"], "key_tasks": "Fix login"}"#,
//!     );
//!
//!     let pages = result.render_flow()?;
//!     assert_eq!(pages.len(), 3);
//!
//!     let slides = result.render_slides();
//!     assert_eq!(slides[1].heading, "Summary");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Lenient input**: missing, mistyped, or unparseable fields never fail
//! - **Greedy line breaking** against a pluggable [`TextMeasurer`]
//! - **Localized headings**: English and Russian
//! - **Backends**: plain text, SVG, JSON
//! - **Parallel batches**: uses Rayon when the `parallel` feature is on

pub mod detect;
pub mod error;
pub mod locale;
pub mod model;
pub mod normalize;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_language, detect_record_language};
pub use error::{Error, Result};
pub use locale::{resolve, Lang, SectionKey, StatusKey, TextKey};
pub use model::{
    DrawOp, FontFace, FontSpec, Page, PageKind, RuleOp, Section, Slide, StructuredDocument,
    TextOp, TextRole,
};
pub use normalize::{CleanupPreset, NormalizeOptions, Normalizer, RawRecord};
pub use render::{
    FlowOptions, FlowResult, Geometry, HeuristicMeasurer, JsonFormat, MonospaceMeasurer,
    RenderStats, SlideOptions, TextMeasurer,
};

use std::path::Path;
use std::sync::Arc;

/// Normalize a summary record given as text.
///
/// # Example
///
/// ```
/// let doc = recap::normalize_str("not json at all");
/// assert_eq!(doc.title, "not json at all");
/// ```
pub fn normalize_str(text: &str) -> StructuredDocument {
    Normalizer::new(NormalizeOptions::default()).normalize_str(text)
}

/// Read and normalize a summary record from a file.
///
/// Only reading the file can fail; its contents are always accepted.
pub fn normalize_file<P: AsRef<Path>>(path: P) -> Result<StructuredDocument> {
    let data = std::fs::read(path)?;
    Ok(Normalizer::new(NormalizeOptions::default()).normalize_bytes(&data))
}

/// Builder for normalizing and rendering summaries.
///
/// # Example
///
/// ```
/// use recap::{Lang, Recap};
///
/// let pages = Recap::new()
///     .with_lang(Lang::Ru)
///     .with_product_label("Notes")
///     .with_chunk_capacity(5)
///     .normalize_str(r#"{"title": "План", "conclusion": ["Готово"]}"#)
///     .render_flow()?;
/// assert_eq!(pages.len(), 2);
/// # Ok::<(), recap::Error>(())
/// ```
pub struct Recap {
    normalize_options: NormalizeOptions,
    flow_options: FlowOptions,
    slide_options: SlideOptions,
    measurer: Arc<dyn TextMeasurer>,
}

impl Recap {
    /// Create a new builder with default options and the heuristic measurer.
    pub fn new() -> Self {
        Self {
            normalize_options: NormalizeOptions::default(),
            flow_options: FlowOptions::default(),
            slide_options: SlideOptions::default(),
            measurer: Arc::new(HeuristicMeasurer::default()),
        }
    }

    /// Force the output language instead of detecting it.
    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.normalize_options = self.normalize_options.with_lang(lang);
        self
    }

    /// Supply the transcript used for language detection and the degraded fallback.
    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.normalize_options = self.normalize_options.with_transcript(transcript);
        self
    }

    /// Set the creation timestamp used when the record carries none.
    pub fn with_created_at(mut self, created_at: chrono::DateTime<chrono::Utc>) -> Self {
        self.normalize_options = self.normalize_options.with_created_at(created_at);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.normalize_options = self.normalize_options.with_cleanup_preset(preset);
        self
    }

    /// Set all normalization options.
    pub fn with_normalize_options(mut self, options: NormalizeOptions) -> Self {
        self.normalize_options = options;
        self
    }

    /// Set page geometry.
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.flow_options = self.flow_options.with_geometry(geometry);
        self
    }

    /// Set all flow options.
    pub fn with_flow_options(mut self, options: FlowOptions) -> Self {
        self.flow_options = options;
        self
    }

    /// Set the footer label.
    pub fn with_product_label(mut self, label: impl Into<String>) -> Self {
        self.flow_options = self.flow_options.with_product_label(label);
        self
    }

    /// Set the number of bullets per slide.
    pub fn with_chunk_capacity(mut self, capacity: usize) -> Self {
        self.slide_options = self.slide_options.with_chunk_capacity(capacity);
        self
    }

    /// Use a custom text measurer.
    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Arc::new(measurer);
        self
    }

    /// Normalize a record given as text.
    pub fn normalize_str(self, text: &str) -> RecapResult {
        let document = Normalizer::new(self.normalize_options.clone()).normalize_str(text);
        self.into_result(document)
    }

    /// Normalize a record given as raw bytes.
    pub fn normalize_bytes(self, data: &[u8]) -> RecapResult {
        let document = Normalizer::new(self.normalize_options.clone()).normalize_bytes(data);
        self.into_result(document)
    }

    /// Normalize an already parsed JSON value.
    pub fn normalize_value(self, value: &serde_json::Value) -> RecapResult {
        let document = Normalizer::new(self.normalize_options.clone()).normalize_value(value);
        self.into_result(document)
    }

    /// Read and normalize a record from a file.
    pub fn normalize_file<P: AsRef<Path>>(self, path: P) -> Result<RecapResult> {
        let data = std::fs::read(path)?;
        Ok(self.normalize_bytes(&data))
    }

    /// Wrap an existing document for rendering.
    pub fn document(self, document: StructuredDocument) -> RecapResult {
        self.into_result(document)
    }

    fn into_result(self, document: StructuredDocument) -> RecapResult {
        RecapResult {
            document,
            flow_options: self.flow_options,
            slide_options: self.slide_options,
            measurer: self.measurer,
        }
    }
}

impl Default for Recap {
    fn default() -> Self {
        Self::new()
    }
}

/// A normalized document together with its render settings.
pub struct RecapResult {
    /// The normalized document
    pub document: StructuredDocument,
    flow_options: FlowOptions,
    slide_options: SlideOptions,
    measurer: Arc<dyn TextMeasurer>,
}

impl RecapResult {
    /// Paginate the document.
    pub fn render_flow(&self) -> Result<Vec<Page>> {
        render::render_flow(&self.document, self.measurer.as_ref(), &self.flow_options)
    }

    /// Paginate the document and collect statistics.
    pub fn render_flow_with_stats(&self) -> Result<FlowResult> {
        render::render_flow_with_stats(&self.document, self.measurer.as_ref(), &self.flow_options)
    }

    /// Split the document into slides.
    pub fn render_slides(&self) -> Vec<Slide> {
        render::render_slides(&self.document, &self.slide_options)
    }

    /// Paginate and paint as plain text.
    pub fn to_text(&self) -> Result<String> {
        render::pages_to_text(&self.render_flow()?)
    }

    /// Paginate and paint as one SVG per page.
    pub fn to_svg(&self) -> Result<Vec<String>> {
        render::pages_to_svg(&self.render_flow()?)
    }

    /// Serialize the normalized document.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Plain-text outline of the document.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &StructuredDocument {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_recap_builder() {
        let recap = Recap::new()
            .with_lang(Lang::Ru)
            .with_product_label("Notes")
            .with_chunk_capacity(3)
            .with_cleanup(CleanupPreset::Minimal);

        assert_eq!(recap.normalize_options.lang, Some(Lang::Ru));
        assert_eq!(recap.flow_options.product_label, "Notes");
        assert_eq!(recap.slide_options.chunk_capacity, 3);
    }

    #[test]
    fn test_recap_builder_default() {
        let recap = Recap::default();
        assert_eq!(recap.slide_options.chunk_capacity, 7);
        assert_eq!(recap.flow_options, FlowOptions::default());
    }

    #[test]
    fn test_recap_end_to_end() {
        let result = Recap::new()
            .with_created_at(Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap())
            .normalize_str(r#"{"title": "Sync", "summary": ["One", "Two"], "conclusion": "Done"}"#);

        assert_eq!(result.document().lang, Lang::En);
        let pages = result.render_flow().unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].kind, PageKind::Section(SectionKey::Summary));
        assert_eq!(pages[2].kind, PageKind::Section(SectionKey::Conclusion));

        let slides = result.render_slides();
        assert_eq!(slides.len(), 3);

        let text = result.to_text().unwrap();
        assert!(text.contains("• One"));
        assert!(text.contains("2024-03-05 09:30 UTC"));
        assert_eq!(result.to_svg().unwrap().len(), 3);
    }

    #[test]
    fn test_recap_with_measurer() {
        let stats = Recap::new()
            .with_measurer(MonospaceMeasurer::new(0.6))
            .normalize_str(r#"{"summary": "x"}"#)
            .render_flow_with_stats()
            .unwrap()
            .stats;
        assert_eq!(stats.page_count, 2);
        assert_eq!(stats.bullet_count, 1);
    }

    #[test]
    fn test_recap_invalid_geometry() {
        let result = Recap::new()
            .with_geometry(Geometry {
                page_width: 0.0,
                ..Geometry::a4()
            })
            .normalize_str("{}");
        assert!(matches!(result.render_flow(), Err(Error::Config(_))));
        // Slides do not depend on geometry
        assert_eq!(result.render_slides().len(), 1);
    }

    #[test]
    fn test_normalize_str_never_fails() {
        let doc = normalize_str("");
        assert_eq!(doc.title, "Summary");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_normalize_file_missing() {
        let result = normalize_file("/nonexistent/recap/input.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_json_format_variants() {
        let result = Recap::new().normalize_str(r#"{"title": "T"}"#);
        assert!(result.to_json(JsonFormat::Pretty).unwrap().contains('\n'));
        assert!(!result.to_json(JsonFormat::Compact).unwrap().contains('\n'));
    }
}
