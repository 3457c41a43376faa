//! Drawing backends for rendered pages.
//!
//! Pages are plain lists of draw operations. A [`PageBackend`] receives them
//! in paint order; [`paint`] drives any backend over a page sequence.
//!
//! # Example
//!
//! ```
//! use recap::model::{Page, RuleOp};
//! use recap::render::{paint, PageBackend};
//! use recap::Result;
//!
//! #[derive(Default)]
//! struct RuleCounter(usize);
//!
//! impl PageBackend for RuleCounter {
//!     fn draw_rule(&mut self, _rule: &RuleOp) -> Result<()> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//! }
//!
//! let mut counter = RuleCounter::default();
//! paint(&[], &mut counter).unwrap();
//! assert_eq!(counter.0, 0);
//! ```

use crate::error::{Error, Result};
use crate::model::{DrawOp, FontFace, Page, RuleOp, Slide, TextOp};
use std::fmt::Write;

/// Receiver of draw operations.
///
/// All methods do nothing by default. A backend fault is reported as
/// [`Error::Backend`] and stops painting.
pub trait PageBackend {
    /// Called before the first operation of a page.
    fn begin_page(&mut self, page: &Page) -> Result<()> {
        let _ = page;
        Ok(())
    }

    /// Draw a positioned text run.
    fn draw_text(&mut self, text: &TextOp) -> Result<()> {
        let _ = text;
        Ok(())
    }

    /// Draw a horizontal rule.
    fn draw_rule(&mut self, rule: &RuleOp) -> Result<()> {
        let _ = rule;
        Ok(())
    }

    /// Called after the last operation of a page.
    fn end_page(&mut self, page: &Page) -> Result<()> {
        let _ = page;
        Ok(())
    }
}

/// Paint pages onto a backend in order.
pub fn paint(pages: &[Page], backend: &mut dyn PageBackend) -> Result<()> {
    for page in pages {
        backend.begin_page(page)?;
        for op in &page.ops {
            match op {
                DrawOp::Text(text) => backend.draw_text(text)?,
                DrawOp::Rule(rule) => backend.draw_rule(rule)?,
            }
        }
        backend.end_page(page)?;
    }
    Ok(())
}

/// Plain-text backend: one line per text run, pages separated by markers.
#[derive(Debug, Default)]
pub struct TextBackend {
    output: String,
}

impl TextBackend {
    /// Create an empty text backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the backend and return the text.
    pub fn into_string(self) -> String {
        self.output.trim_end().to_string()
    }
}

impl PageBackend for TextBackend {
    fn begin_page(&mut self, page: &Page) -> Result<()> {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        writeln!(self.output, "--- Page {} ---", page.number).map_err(fmt_error)
    }

    fn draw_text(&mut self, text: &TextOp) -> Result<()> {
        writeln!(self.output, "{}", text.text).map_err(fmt_error)
    }

    fn draw_rule(&mut self, _rule: &RuleOp) -> Result<()> {
        self.output.push_str("----------------------------------------\n");
        Ok(())
    }
}

/// SVG backend: one standalone SVG document per page.
#[derive(Debug, Default)]
pub struct SvgBackend {
    pages: Vec<String>,
    current: Option<String>,
}

impl SvgBackend {
    /// Create an empty SVG backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the backend and return the finished SVG pages.
    pub fn into_pages(self) -> Vec<String> {
        self.pages
    }

    fn current(&mut self) -> Result<&mut String> {
        self.current
            .as_mut()
            .ok_or_else(|| Error::Backend("draw outside of a page".to_string()))
    }
}

impl PageBackend for SvgBackend {
    fn begin_page(&mut self, page: &Page) -> Result<()> {
        if self.current.is_some() {
            return Err(Error::Backend(format!(
                "page {} started before the previous page ended",
                page.number
            )));
        }
        let mut svg = String::new();
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = page.width,
            h = page.height
        )
        .map_err(fmt_error)?;
        writeln!(
            svg,
            r#"<rect width="{}" height="{}" fill="white"/>"#,
            page.width, page.height
        )
        .map_err(fmt_error)?;
        self.current = Some(svg);
        Ok(())
    }

    fn draw_text(&mut self, text: &TextOp) -> Result<()> {
        let weight = match text.font.face {
            FontFace::Regular => "normal",
            FontFace::Bold => "bold",
        };
        let line = format!(
            r#"<text x="{}" y="{}" font-family="Helvetica, Arial, sans-serif" font-size="{}" font-weight="{}" xml:space="preserve">{}</text>"#,
            text.x,
            text.y,
            text.font.size,
            weight,
            escape_xml(&text.text)
        );
        let svg = self.current()?;
        svg.push_str(&line);
        svg.push('\n');
        Ok(())
    }

    fn draw_rule(&mut self, rule: &RuleOp) -> Result<()> {
        let line = format!(
            r#"<line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="black" stroke-width="{}"/>"#,
            rule.x1,
            rule.x2,
            rule.thickness,
            y = rule.y
        );
        let svg = self.current()?;
        svg.push_str(&line);
        svg.push('\n');
        Ok(())
    }

    fn end_page(&mut self, page: &Page) -> Result<()> {
        let mut svg = self.current.take().ok_or_else(|| {
            Error::Backend(format!("page {} ended without being started", page.number))
        })?;
        svg.push_str("</svg>\n");
        self.pages.push(svg);
        Ok(())
    }
}

/// Render pages as plain text.
pub fn pages_to_text(pages: &[Page]) -> Result<String> {
    let mut backend = TextBackend::new();
    paint(pages, &mut backend)?;
    Ok(backend.into_string())
}

/// Render pages as one SVG document each.
pub fn pages_to_svg(pages: &[Page]) -> Result<Vec<String>> {
    let mut backend = SvgBackend::new();
    paint(pages, &mut backend)?;
    Ok(backend.into_pages())
}

/// Render slides as plain text, one block per slide.
pub fn slides_to_text(slides: &[Slide]) -> String {
    slides
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            let mut block = format!("=== Slide {} ===\n{}", i + 1, slide.heading);
            if let Some(subtitle) = slide.subtitle.as_deref().filter(|s| !s.is_empty()) {
                block.push('\n');
                block.push_str(subtitle);
            }
            if !slide.bullets.is_empty() {
                block.push_str("\n\n");
                block.push_str(&slide.body());
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn fmt_error(e: std::fmt::Error) -> Error {
    Error::Backend(format!("write failed: {}", e))
}
