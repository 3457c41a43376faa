//! Continuous-flow pagination.
//!
//! Lays a [`StructuredDocument`] out as a title page followed by one run of
//! pages per non-empty section. Bullets are wrapped to the content width and
//! may span a page break; a continuation page repeats the section heading.

use crate::error::{Error, Result};
use crate::model::{
    DrawOp, FontSpec, Page, PageKind, RuleOp, Section, StructuredDocument, TextOp, TextRole,
};
use chrono::format::StrftimeItems;
use std::fmt::Write;

use super::linebreak::{wrap, wrap_bullet, BULLET_PREFIX};
use super::{FlowOptions, FlowResult, RenderStats, TextMeasurer};

/// Title line advance as a multiple of the title font size.
const TITLE_LEADING: f32 = 1.2;

/// Paginate a document.
pub fn render_flow(
    doc: &StructuredDocument,
    measurer: &dyn TextMeasurer,
    options: &FlowOptions,
) -> Result<Vec<Page>> {
    let renderer = PageFlowRenderer::new(options.clone());
    renderer.render(doc, measurer)
}

/// Paginate a document and collect statistics.
pub fn render_flow_with_stats(
    doc: &StructuredDocument,
    measurer: &dyn TextMeasurer,
    options: &FlowOptions,
) -> Result<FlowResult> {
    let renderer = PageFlowRenderer::new(options.clone());
    renderer.render_with_stats(doc, measurer)
}

/// Paginate many documents. Results keep the input order.
#[cfg(feature = "parallel")]
pub fn render_flow_batch(
    docs: &[StructuredDocument],
    measurer: &dyn TextMeasurer,
    options: &FlowOptions,
) -> Vec<Result<Vec<Page>>> {
    use rayon::prelude::*;

    let renderer = PageFlowRenderer::new(options.clone());
    docs.par_iter()
        .map(|doc| renderer.render(doc, measurer))
        .collect()
}

/// Paginate many documents. Results keep the input order.
#[cfg(not(feature = "parallel"))]
pub fn render_flow_batch(
    docs: &[StructuredDocument],
    measurer: &dyn TextMeasurer,
    options: &FlowOptions,
) -> Vec<Result<Vec<Page>>> {
    let renderer = PageFlowRenderer::new(options.clone());
    docs.iter()
        .map(|doc| renderer.render(doc, measurer))
        .collect()
}

/// Mutable pagination state for one render call.
#[derive(Debug)]
struct LayoutState {
    /// Baseline of the next line
    y: f32,
    /// Number of the last opened page
    page_number: u32,
    /// Body lines drawn on the open page
    lines_on_page: usize,
    /// Page being drawn
    current: Option<Page>,
    /// Finished pages
    pages: Vec<Page>,
    /// Header text shared by every page
    timestamp: String,
    stats: RenderStats,
}

impl LayoutState {
    fn new(timestamp: String) -> Self {
        Self {
            y: 0.0,
            page_number: 0,
            lines_on_page: 0,
            current: None,
            pages: Vec::new(),
            timestamp,
            stats: RenderStats::new(),
        }
    }

    fn draw(&mut self, op: DrawOp) -> Result<()> {
        match self.current.as_mut() {
            Some(page) => {
                page.push(op);
                Ok(())
            }
            None => Err(Error::Render("draw with no open page".to_string())),
        }
    }
}

/// Flow renderer. Holds only immutable options and may be shared across threads.
#[derive(Debug, Clone)]
pub struct PageFlowRenderer {
    options: FlowOptions,
}

impl PageFlowRenderer {
    /// Create a new flow renderer.
    pub fn new(options: FlowOptions) -> Self {
        Self { options }
    }

    /// Get the renderer options.
    pub fn options(&self) -> &FlowOptions {
        &self.options
    }

    /// Paginate a document.
    pub fn render(
        &self,
        doc: &StructuredDocument,
        measurer: &dyn TextMeasurer,
    ) -> Result<Vec<Page>> {
        Ok(self.render_with_stats(doc, measurer)?.pages)
    }

    /// Paginate a document and collect statistics.
    pub fn render_with_stats(
        &self,
        doc: &StructuredDocument,
        measurer: &dyn TextMeasurer,
    ) -> Result<FlowResult> {
        self.options.validate()?;

        let mut state = LayoutState::new(self.format_timestamp(doc)?);

        self.render_title_page(&mut state, doc, measurer)?;
        for section in doc.non_empty_sections() {
            self.render_section(&mut state, section, measurer)?;
        }

        log::debug!(
            "Paginated {:?}: {} pages, {} bullets, {} overflow breaks",
            doc.title,
            state.stats.page_count,
            state.stats.bullet_count,
            state.stats.overflow_breaks
        );

        Ok(FlowResult::new(state.pages, state.stats))
    }

    fn format_timestamp(&self, doc: &StructuredDocument) -> Result<String> {
        let mut out = String::new();
        let items = StrftimeItems::new(&self.options.timestamp_format);
        write!(out, "{}", doc.created_at.format_with_items(items)).map_err(|_| {
            Error::Config(format!(
                "invalid timestamp format: {:?}",
                self.options.timestamp_format
            ))
        })?;
        Ok(out)
    }

    fn render_title_page(
        &self,
        state: &mut LayoutState,
        doc: &StructuredDocument,
        measurer: &dyn TextMeasurer,
    ) -> Result<()> {
        let g = &self.options.geometry;
        self.open_page(state, PageKind::Title)?;

        let title_font = g.title_font();
        let mut y = g.margin_top + g.title_offset;
        let mut last_title_y = y;
        for line in wrap(&doc.title, g.content_width(), &title_font, measurer)? {
            let x = self.centered_x(&line, &title_font, measurer)?;
            state.draw(text_op(x, y, line, title_font, TextRole::Title))?;
            last_title_y = y;
            y += g.title_size * TITLE_LEADING;
        }

        if !doc.short_description.trim().is_empty() {
            let font = g.body_font();
            let mut y = last_title_y + g.description_offset;
            for line in wrap(&doc.short_description, g.content_width(), &font, measurer)? {
                let x = self.centered_x(&line, &font, measurer)?;
                state.draw(text_op(x, y, line, font, TextRole::Description))?;
                y += g.line_height;
            }
        }

        self.finish_page(state, measurer)
    }

    fn render_section(
        &self,
        state: &mut LayoutState,
        section: &Section,
        measurer: &dyn TextMeasurer,
    ) -> Result<()> {
        let g = &self.options.geometry;
        let kind = PageKind::Section(section.key);
        let font = g.body_font();
        let max_width = g.content_width() - measurer.measure(BULLET_PREFIX, &font)?;

        self.open_section_page(state, kind, &section.heading)?;

        for bullet in &section.bullets {
            for line in wrap_bullet(bullet, max_width, &font, measurer)? {
                if state.lines_on_page > 0 && !g.fits(state.y) {
                    log::debug!(
                        "Overflow at y={} on page {}, continuing {:?}",
                        state.y,
                        state.page_number,
                        section.heading
                    );
                    self.finish_page(state, measurer)?;
                    self.open_section_page(state, kind, &section.heading)?;
                    state.stats.add_overflow_break();
                }

                let role = if line.continuation {
                    TextRole::BulletContinuation
                } else {
                    TextRole::BulletStart
                };
                log::trace!("Line at y={}: {:?}", state.y, line.text);
                let y = state.y;
                state.draw(text_op(g.margin_left, y, line.display(), font, role))?;
                state.y += g.line_height;
                state.lines_on_page += 1;
                state.stats.add_line();
            }
            state.stats.add_bullet();
            state.y += g.line_height;
        }

        self.finish_page(state, measurer)
    }

    fn open_section_page(&self, state: &mut LayoutState, kind: PageKind, heading: &str) -> Result<()> {
        let g = &self.options.geometry;
        self.open_page(state, kind)?;
        state.draw(text_op(
            g.margin_left,
            g.heading_y(),
            heading.to_string(),
            g.heading_font(),
            TextRole::Heading,
        ))?;
        state.y = g.body_top();
        Ok(())
    }

    /// Start a new page and draw its header.
    fn open_page(&self, state: &mut LayoutState, kind: PageKind) -> Result<()> {
        if state.current.is_some() {
            return Err(Error::Render(format!(
                "page {} opened before page {} was finished",
                state.page_number + 1,
                state.page_number
            )));
        }

        let g = &self.options.geometry;
        state.page_number += 1;
        state.lines_on_page = 0;
        state.current = Some(Page::new(state.page_number, kind, g.page_width, g.page_height));

        let timestamp = state.timestamp.clone();
        state.draw(text_op(
            g.margin_left,
            g.header_baseline,
            timestamp,
            g.chrome_font(),
            TextRole::Header,
        ))?;
        state.draw(self.rule(g.margin_top - g.rule_gap))
    }

    /// Draw the footer and move the open page to the finished list.
    fn finish_page(&self, state: &mut LayoutState, measurer: &dyn TextMeasurer) -> Result<()> {
        let g = &self.options.geometry;
        let font = g.chrome_font();
        let label = self.options.product_label.clone();
        let x = self.centered_x(&label, &font, measurer)?;

        state.draw(self.rule(g.content_bottom() + g.rule_gap))?;
        state.draw(text_op(
            x,
            g.page_height - g.footer_baseline,
            label,
            font,
            TextRole::Footer,
        ))?;

        let page = state
            .current
            .take()
            .ok_or_else(|| Error::Render("no open page to finish".to_string()))?;
        state.stats.add_page(page.section().is_some());
        state.pages.push(page);
        Ok(())
    }

    fn rule(&self, y: f32) -> DrawOp {
        let g = &self.options.geometry;
        DrawOp::Rule(RuleOp {
            x1: g.margin_left,
            x2: g.page_width - g.margin_right,
            y,
            thickness: g.rule_thickness,
        })
    }

    fn centered_x(&self, text: &str, font: &FontSpec, measurer: &dyn TextMeasurer) -> Result<f32> {
        let g = &self.options.geometry;
        let width = measurer.measure(text, font)?;
        Ok(g.margin_left + ((g.content_width() - width) / 2.0).max(0.0))
    }
}

fn text_op(x: f32, y: f32, text: String, font: FontSpec, role: TextRole) -> DrawOp {
    DrawOp::Text(TextOp {
        x,
        y,
        text,
        font,
        role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{Lang, SectionKey};
    use crate::render::{Geometry, MonospaceMeasurer};
    use chrono::{TimeZone, Utc};

    // Content width 200, body font 10 at 5 points per character. After the
    // bullet prefix 190 points remain: seven four-letter words per line.
    // Body baselines 80..=270 give twenty lines per page.
    fn geometry() -> Geometry {
        Geometry {
            page_width: 300.0,
            page_height: 400.0,
            margin_left: 50.0,
            margin_right: 50.0,
            margin_top: 40.0,
            margin_bottom: 120.0,
            header_baseline: 20.0,
            footer_baseline: 20.0,
            heading_offset: 20.0,
            body_offset: 20.0,
            line_height: 10.0,
            min_remaining: 10.0,
            body_size: 10.0,
            ..Geometry::a4()
        }
    }

    fn options() -> FlowOptions {
        FlowOptions::new().with_geometry(geometry())
    }

    fn measurer() -> MonospaceMeasurer {
        MonospaceMeasurer::new(0.5)
    }

    fn doc() -> StructuredDocument {
        let created = Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap();
        let mut doc = StructuredDocument::new(Lang::En, created);
        doc.title = "Plan".into();
        doc
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn set(doc: &mut StructuredDocument, key: SectionKey, bullets: Vec<String>) {
        doc.section_mut(key).unwrap().bullets = bullets;
    }

    #[test]
    fn test_title_page_only() {
        let pages = render_flow(&doc(), &measurer(), &options()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].kind, PageKind::Title);
        assert_eq!(pages[0].texts_with_role(TextRole::Title).count(), 1);
        assert_eq!(pages[0].texts_with_role(TextRole::Description).count(), 0);
    }

    #[test]
    fn test_title_is_centered() {
        let pages = render_flow(&doc(), &measurer(), &options()).unwrap();
        let title = pages[0].texts_with_role(TextRole::Title).next().unwrap();
        // "Plan" at 22pt bold: 4 * 0.5 * 22 = 44 wide in a 200 wide column
        assert_eq!(title.x, 50.0 + (200.0 - 44.0) / 2.0);
        assert_eq!(title.text, "Plan");
    }

    #[test]
    fn test_description_below_title() {
        let mut d = doc();
        d.short_description = words(60);
        let pages = render_flow(&d, &measurer(), &options()).unwrap();
        let title_y = pages[0].texts_with_role(TextRole::Title).next().unwrap().y;
        let desc: Vec<&TextOp> = pages[0].texts_with_role(TextRole::Description).collect();
        assert!(desc.len() > 1);
        assert!(desc.iter().all(|t| t.y > title_y));
        let rejoined: Vec<&str> = desc.iter().flat_map(|t| t.text.split_whitespace()).collect();
        assert_eq!(rejoined.len(), 60);
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let mut d = doc();
        set(&mut d, SectionKey::ActionPlan, vec!["Ship it".into()]);
        let pages = render_flow(&d, &measurer(), &options()).unwrap();
        let kinds: Vec<PageKind> = pages.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![PageKind::Title, PageKind::Section(SectionKey::ActionPlan)]
        );
        let heading = pages[1].texts_with_role(TextRole::Heading).next().unwrap();
        assert_eq!(heading.text, "Action plan");
    }

    #[test]
    fn test_one_long_bullet_spans_pages() {
        // 45 lines at 20 lines per page: 3 summary pages
        let mut d = doc();
        set(&mut d, SectionKey::Summary, vec![words(7 * 45)]);

        let pages = render_flow(&d, &measurer(), &options()).unwrap();
        assert_eq!(pages.len(), 1 + 3);

        let lines: Vec<usize> = pages[1..].iter().map(|p| p.body_line_count()).collect();
        assert_eq!(lines, vec![20, 20, 5]);

        for page in &pages[1..] {
            assert_eq!(page.kind, PageKind::Section(SectionKey::Summary));
            let headings: Vec<&str> = page
                .texts_with_role(TextRole::Heading)
                .map(|t| t.text.as_str())
                .collect();
            assert_eq!(headings, vec!["Summary"]);
        }
        assert_eq!(pages[1].bullet_count(), 1);
        assert_eq!(pages[2].bullet_count(), 0);
        assert_eq!(pages[3].bullet_count(), 0);
    }

    #[test]
    fn test_exact_page_fill_has_no_extra_page() {
        let mut d = doc();
        set(&mut d, SectionKey::Summary, vec![words(7 * 20)]);
        let pages = render_flow(&d, &measurer(), &options()).unwrap();
        assert_eq!(pages.len(), 2);

        set(&mut d, SectionKey::Summary, vec![words(7 * 20 + 1)]);
        let pages = render_flow(&d, &measurer(), &options()).unwrap();
        assert_eq!(pages.len(), 3);
    }

    #[test]
    fn test_body_lines_stay_above_limit() {
        let mut d = doc();
        set(
            &mut d,
            SectionKey::KeyTasks,
            (0..30).map(|i| format!("task {} {}", i, words(i % 17))).collect(),
        );
        let g = geometry();
        let pages = render_flow(&d, &measurer(), &options()).unwrap();
        for page in &pages {
            for op in page.text_ops().filter(|t| t.role.is_body()) {
                assert!(op.y >= g.body_top());
                assert!(g.fits(op.y), "line at {} overflows", op.y);
            }
        }
    }

    #[test]
    fn test_bullet_conservation_and_order() {
        let mut d = doc();
        set(
            &mut d,
            SectionKey::Summary,
            (0..12).map(|i| format!("s{} {}", i, words(i * 3))).collect(),
        );
        set(&mut d, SectionKey::Conclusion, vec!["done".into(), words(40)]);

        let pages = render_flow(&d, &measurer(), &options()).unwrap();
        let starts: usize = pages.iter().map(|p| p.bullet_count()).sum();
        assert_eq!(starts, d.bullet_count());

        let mut last_index = 0;
        for page in &pages[1..] {
            let key = page.section().unwrap();
            assert!(key.index() >= last_index);
            last_index = key.index();
        }
    }

    #[test]
    fn test_every_page_has_chrome() {
        let mut d = doc();
        set(&mut d, SectionKey::Summary, vec![words(7 * 50)]);
        set(&mut d, SectionKey::KeyTasks, vec!["a".into(), "b".into()]);

        let pages = render_flow(&d, &measurer(), &options()).unwrap();
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.number as usize, i + 1);
            let headers: Vec<&TextOp> = page.texts_with_role(TextRole::Header).collect();
            let footers: Vec<&TextOp> = page.texts_with_role(TextRole::Footer).collect();
            assert_eq!(headers.len(), 1);
            assert_eq!(footers.len(), 1);
            assert_eq!(headers[0].text, "2024-03-05 09:30 UTC");
            assert_eq!(footers[0].text, "Recap");
            let rules = page
                .ops
                .iter()
                .filter(|op| matches!(op, DrawOp::Rule(_)))
                .count();
            assert_eq!(rules, 2);
        }
    }

    #[test]
    fn test_bullet_prefixes() {
        let mut d = doc();
        set(&mut d, SectionKey::Summary, vec![words(10)]);
        let pages = render_flow(&d, &measurer(), &options()).unwrap();
        let body: Vec<&TextOp> = pages[1].text_ops().filter(|t| t.role.is_body()).collect();
        assert_eq!(body.len(), 2);
        assert!(body[0].text.starts_with("• word"));
        assert!(body[1].text.starts_with("  word"));
        assert_eq!(body[1].y - body[0].y, 10.0);
    }

    #[test]
    fn test_render_with_stats() {
        let mut d = doc();
        set(&mut d, SectionKey::Summary, vec![words(7 * 45)]);
        set(&mut d, SectionKey::Conclusion, vec!["ok".into(), "fine".into()]);

        let result = render_flow_with_stats(&d, &measurer(), &options()).unwrap();
        assert_eq!(result.page_count(), 5);
        assert_eq!(result.stats.page_count, 5);
        assert_eq!(result.stats.section_page_count, 4);
        assert_eq!(result.stats.bullet_count, 3);
        assert_eq!(result.stats.line_count, 47);
        assert_eq!(result.stats.overflow_breaks, 2);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = FlowOptions::new().with_geometry(Geometry {
            line_height: -1.0,
            ..geometry()
        });
        let result = render_flow(&doc(), &measurer(), &options);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    struct FailingMeasurer;

    impl TextMeasurer for FailingMeasurer {
        fn measure(&self, _text: &str, _font: &FontSpec) -> Result<f32> {
            Err(Error::Measure("font unavailable".into()))
        }
    }

    #[test]
    fn test_measure_error_aborts_render() {
        let result = render_flow(&doc(), &FailingMeasurer, &options());
        assert!(matches!(result, Err(Error::Measure(_))));
    }

    #[test]
    fn test_renderer_is_reusable() {
        let renderer = PageFlowRenderer::new(options());
        let mut d = doc();
        set(&mut d, SectionKey::Summary, vec![words(30)]);
        let first = renderer.render(&d, &measurer()).unwrap();
        let second = renderer.render(&d, &measurer()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_flow_batch() {
        let mut long = doc();
        set(&mut long, SectionKey::Summary, vec![words(7 * 45)]);
        let docs = vec![doc(), long];

        let results = render_flow_batch(&docs, &measurer(), &options());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().len(), 1);
        assert_eq!(results[1].as_ref().unwrap().len(), 4);
    }
}
