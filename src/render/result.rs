//! Rendering statistics.

use crate::model::Page;
use serde::{Deserialize, Serialize};

/// Result of a flow render: pages plus statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowResult {
    /// Rendered pages in order
    pub pages: Vec<Page>,

    /// Pagination statistics
    pub stats: RenderStats,
}

impl FlowResult {
    /// Create a new flow result.
    pub fn new(pages: Vec<Page>, stats: RenderStats) -> Self {
        Self { pages, stats }
    }

    /// Number of rendered pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Statistics collected while paginating a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Total pages, title page included
    pub page_count: u32,

    /// Pages that hold section bullets
    pub section_page_count: u32,

    /// Bullet lines drawn (starts and continuations)
    pub line_count: u32,

    /// Bullets drawn
    pub bullet_count: u32,

    /// Page breaks forced by vertical overflow
    pub overflow_breaks: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished page.
    pub fn add_page(&mut self, section: bool) {
        self.page_count += 1;
        if section {
            self.section_page_count += 1;
        }
    }

    /// Record a drawn bullet line.
    pub fn add_line(&mut self) {
        self.line_count += 1;
    }

    /// Record a drawn bullet.
    pub fn add_bullet(&mut self) {
        self.bullet_count += 1;
    }

    /// Record an overflow page break.
    pub fn add_overflow_break(&mut self) {
        self.overflow_breaks += 1;
    }
}
