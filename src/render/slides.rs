//! Fixed-capacity slide deck rendering.

use crate::model::{Section, Slide, StructuredDocument};

use super::SlideOptions;

/// Split a document into slides.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use recap::locale::{Lang, SectionKey};
/// use recap::model::StructuredDocument;
/// use recap::render::{render_slides, SlideOptions};
///
/// let mut doc = StructuredDocument::new(Lang::En, Utc::now());
/// doc.section_mut(SectionKey::Summary).unwrap().bullets =
///     (1..=10).map(|i| format!("Point {}", i)).collect();
///
/// let slides = render_slides(&doc, &SlideOptions::default());
/// assert_eq!(slides.len(), 3);
/// assert_eq!(slides[1].heading, "Summary");
/// assert_eq!(slides[2].heading, "Summary (2)");
/// assert_eq!(slides[2].bullets.len(), 3);
/// ```
pub fn render_slides(doc: &StructuredDocument, options: &SlideOptions) -> Vec<Slide> {
    SlideChunkRenderer::new(*options).render(doc)
}

/// Slide renderer. Stateless apart from its options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlideChunkRenderer {
    options: SlideOptions,
}

impl SlideChunkRenderer {
    /// Create a new slide renderer.
    pub fn new(options: SlideOptions) -> Self {
        Self { options }
    }

    /// Bullets per slide, never zero.
    pub fn capacity(&self) -> usize {
        self.options.chunk_capacity.max(1)
    }

    /// Render the title slide followed by each non-empty section's chunks.
    pub fn render(&self, doc: &StructuredDocument) -> Vec<Slide> {
        let mut slides = vec![Slide::title(&doc.title, &doc.short_description)];
        for section in doc.non_empty_sections() {
            slides.extend(self.render_section(section));
        }
        log::debug!(
            "Chunked {:?} into {} slides at {} bullets each",
            doc.title,
            slides.len(),
            self.capacity()
        );
        slides
    }

    /// Render one section as `ceil(n / capacity)` slides.
    pub fn render_section(&self, section: &Section) -> Vec<Slide> {
        section
            .bullets
            .chunks(self.capacity())
            .enumerate()
            .map(|(i, chunk)| {
                Slide::section(
                    chunk_heading(&section.heading, i),
                    section.key,
                    i,
                    chunk.to_vec(),
                )
            })
            .collect()
    }
}

/// Heading of the `index`-th chunk: verbatim for the first, then " (2)", " (3)", ...
pub fn chunk_heading(heading: &str, index: usize) -> String {
    if index == 0 {
        heading.to_string()
    } else {
        format!("{} ({})", heading, index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{Lang, SectionKey};
    use chrono::{TimeZone, Utc};

    fn doc() -> StructuredDocument {
        let created = Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap();
        let mut doc = StructuredDocument::new(Lang::En, created);
        doc.title = "Plan".into();
        doc.short_description = "Weekly sync".into();
        doc
    }

    fn bullets(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Point {}", i)).collect()
    }

    #[test]
    fn test_title_slide() {
        let slides = render_slides(&doc(), &SlideOptions::default());
        assert_eq!(slides.len(), 1);
        assert!(slides[0].is_title());
        assert_eq!(slides[0].heading, "Plan");
        assert_eq!(slides[0].subtitle.as_deref(), Some("Weekly sync"));
    }

    #[test]
    fn test_ten_bullets_capacity_seven() {
        let mut d = doc();
        d.section_mut(SectionKey::Summary).unwrap().bullets = bullets(10);

        let slides = render_slides(&d, &SlideOptions::new().with_chunk_capacity(7));
        assert_eq!(slides.len(), 3);
        assert_eq!(slides[1].heading, "Summary");
        assert_eq!(slides[1].bullets, bullets(7));
        assert_eq!(slides[2].heading, "Summary (2)");
        assert_eq!(slides[2].bullets, vec!["Point 8", "Point 9", "Point 10"]);
        assert_eq!(slides[2].chunk, 1);
        assert_eq!(slides[2].object_id(), "summary-1");
    }

    #[test]
    fn test_slide_count_is_ceiling() {
        for capacity in 1..=5 {
            for n in 0..=12 {
                let mut d = doc();
                d.section_mut(SectionKey::KeyTasks).unwrap().bullets = bullets(n);
                let slides = render_slides(&d, &SlideOptions::new().with_chunk_capacity(capacity));
                assert_eq!(slides.len() - 1, n.div_ceil(capacity), "n={} C={}", n, capacity);
                assert!(slides.iter().all(|s| s.bullets.len() <= capacity));
            }
        }
    }

    #[test]
    fn test_suffixes_are_one_based() {
        let mut d = doc();
        d.section_mut(SectionKey::ActionPlan).unwrap().bullets = bullets(5);
        let slides = render_slides(&d, &SlideOptions::new().with_chunk_capacity(2));
        let headings: Vec<&str> = slides[1..].iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Action plan", "Action plan (2)", "Action plan (3)"]);
    }

    #[test]
    fn test_sections_in_order_and_empty_skipped() {
        let mut d = doc();
        d.section_mut(SectionKey::Conclusion).unwrap().bullets = bullets(1);
        d.section_mut(SectionKey::Summary).unwrap().bullets = bullets(2);
        let slides = render_slides(&d, &SlideOptions::default());
        let sections: Vec<Option<SectionKey>> = slides.iter().map(|s| s.section).collect();
        assert_eq!(
            sections,
            vec![None, Some(SectionKey::Summary), Some(SectionKey::Conclusion)]
        );
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut d = doc();
        d.section_mut(SectionKey::Summary).unwrap().bullets = bullets(3);
        let options = SlideOptions { chunk_capacity: 0 };
        let slides = render_slides(&d, &options);
        assert_eq!(slides.len(), 4);
    }

    #[test]
    fn test_body_text() {
        let mut d = doc();
        d.section_mut(SectionKey::Summary).unwrap().bullets = bullets(2);
        let slides = render_slides(&d, &SlideOptions::default());
        assert_eq!(slides[1].body(), "• Point 1\n• Point 2");
    }

    #[test]
    fn test_russian_headings() {
        let created = Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap();
        let mut d = StructuredDocument::new(Lang::Ru, created);
        d.section_mut(SectionKey::KeyTasks).unwrap().bullets = bullets(8);
        let slides = render_slides(&d, &SlideOptions::default());
        assert_eq!(slides[0].heading, "Конспект");
        assert_eq!(slides[2].heading, "Ключевые задачи (2)");
    }
}
