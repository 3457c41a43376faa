//! Page-level types produced by the flow renderer.

use crate::locale::SectionKey;
use serde::{Deserialize, Serialize};

/// One self-contained, paintable page.
///
/// Coordinates are in points measured from the top-left corner of the page;
/// text positions are baselines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// What this page holds
    pub kind: PageKind,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Draw operations in paint order
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Create a new empty page.
    pub fn new(number: u32, kind: PageKind, width: f32, height: f32) -> Self {
        Self {
            number,
            kind,
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Add a draw operation.
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Text operations on the page.
    pub fn text_ops(&self) -> impl Iterator<Item = &TextOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(t) => Some(t),
            DrawOp::Rule(_) => None,
        })
    }

    /// Text operations with the given role.
    pub fn texts_with_role(&self, role: TextRole) -> impl Iterator<Item = &TextOp> {
        self.text_ops().filter(move |t| t.role == role)
    }

    /// Number of bullets that start on this page.
    pub fn bullet_count(&self) -> usize {
        self.texts_with_role(TextRole::BulletStart).count()
    }

    /// Number of body lines (bullet starts and continuations) on this page.
    pub fn body_line_count(&self) -> usize {
        self.text_ops().filter(|t| t.role.is_body()).count()
    }

    /// Section this page belongs to, if any.
    pub fn section(&self) -> Option<SectionKey> {
        match self.kind {
            PageKind::Title => None,
            PageKind::Section(key) => Some(key),
        }
    }

    /// Check if the page has no draw operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Plain text of the page in paint order, one text op per line.
    pub fn plain_text(&self) -> String {
        self.text_ops()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Content class of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "section", rename_all = "snake_case")]
pub enum PageKind {
    /// Title page with title and short description
    Title,
    /// A page of one section's bullets
    Section(SectionKey),
}

/// A single drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// A positioned text run
    Text(TextOp),
    /// A horizontal divider
    Rule(RuleOp),
}

/// A positioned run of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOp {
    /// Left edge in points
    pub x: f32,
    /// Baseline in points from the top of the page
    pub y: f32,
    /// Text to draw, including any bullet prefix
    pub text: String,
    /// Font face and size
    pub font: FontSpec,
    /// What the text represents
    pub role: TextRole,
}

/// A horizontal line across the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOp {
    /// Start x in points
    pub x1: f32,
    /// End x in points
    pub x2: f32,
    /// Vertical position in points from the top of the page
    pub y: f32,
    /// Stroke width in points
    pub thickness: f32,
}

/// Role of a text run on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    /// Document title on the title page
    Title,
    /// Short description on the title page
    Description,
    /// Section heading
    Heading,
    /// First line of a bullet
    BulletStart,
    /// Wrapped continuation line of a bullet
    BulletContinuation,
    /// Page header (timestamp)
    Header,
    /// Page footer (product label)
    Footer,
}

impl TextRole {
    /// Check if this role is bullet body text.
    pub fn is_body(&self) -> bool {
        matches!(self, TextRole::BulletStart | TextRole::BulletContinuation)
    }

    /// Check if this role is page chrome (header or footer).
    pub fn is_chrome(&self) -> bool {
        matches!(self, TextRole::Header | TextRole::Footer)
    }
}

/// Font identity understood by text measurers and backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFace {
    /// Regular sans-serif
    #[default]
    Regular,
    /// Bold sans-serif
    Bold,
}

impl FontFace {
    /// Conventional PostScript name of the face.
    pub fn postscript_name(&self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }
}

/// A font face at a size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Face
    pub face: FontFace,
    /// Size in points
    pub size: f32,
}

impl FontSpec {
    /// Regular face at the given size.
    pub fn regular(size: f32) -> Self {
        Self {
            face: FontFace::Regular,
            size,
        }
    }

    /// Bold face at the given size.
    pub fn bold(size: f32) -> Self {
        Self {
            face: FontFace::Bold,
            size,
        }
    }
}
