//! Rendering options and configuration.

use crate::error::{Error, Result};
use crate::model::FontSpec;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of bullets per slide.
pub const DEFAULT_CHUNK_CAPACITY: usize = 7;

/// Page geometry for the flow renderer, in points from the top-left corner.
///
/// All numbers are configuration: the renderer makes no assumption about
/// them beyond what [`Geometry::validate`] checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// Page width
    pub page_width: f32,

    /// Page height
    pub page_height: f32,

    /// Left margin
    pub margin_left: f32,

    /// Right margin
    pub margin_right: f32,

    /// Top band reserved for the header
    pub margin_top: f32,

    /// Bottom band reserved for the footer
    pub margin_bottom: f32,

    /// Header text baseline, from the top edge
    pub header_baseline: f32,

    /// Footer text baseline, from the bottom edge
    pub footer_baseline: f32,

    /// Distance between a header/footer divider and the content area
    pub rule_gap: f32,

    /// Divider stroke width
    pub rule_thickness: f32,

    /// Title baseline below `margin_top` on the title page
    pub title_offset: f32,

    /// Gap from the last title line to the first description line
    pub description_offset: f32,

    /// Section heading baseline below `margin_top`
    pub heading_offset: f32,

    /// First body line baseline below the heading
    pub body_offset: f32,

    /// Distance between body baselines
    pub line_height: f32,

    /// Room required between the cursor and the content bottom to place a line
    pub min_remaining: f32,

    /// Title font size
    pub title_size: f32,

    /// Section heading font size
    pub heading_size: f32,

    /// Body and description font size
    pub body_size: f32,

    /// Header and footer font size
    pub chrome_size: f32,
}

impl Geometry {
    /// A4 portrait (210 x 297 mm).
    pub fn a4() -> Self {
        Self {
            page_width: 595.28,
            page_height: 841.89,
            margin_left: 72.0,
            margin_right: 72.0,
            margin_top: 60.0,
            margin_bottom: 60.0,
            header_baseline: 36.0,
            footer_baseline: 30.0,
            rule_gap: 8.0,
            rule_thickness: 0.5,
            title_offset: 30.0,
            description_offset: 30.0,
            heading_offset: 20.0,
            body_offset: 30.0,
            line_height: 14.0,
            min_remaining: 20.0,
            title_size: 22.0,
            heading_size: 16.0,
            body_size: 11.0,
            chrome_size: 8.0,
        }
    }

    /// US Letter portrait (8.5 x 11 inches).
    pub fn letter() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            ..Self::a4()
        }
    }

    /// Parse geometry from JSON. Missing fields take A4 defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let geometry: Geometry = serde_json::from_str(json)?;
        geometry.validate()?;
        Ok(geometry)
    }

    /// Load geometry from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Width available to text between the margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Lowest y a body line may reach.
    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margin_bottom
    }

    /// Baseline of a section heading.
    pub fn heading_y(&self) -> f32 {
        self.margin_top + self.heading_offset
    }

    /// Baseline of the first body line on a section page.
    pub fn body_top(&self) -> f32 {
        self.heading_y() + self.body_offset
    }

    /// Whether a line may be placed with the cursor at `y`.
    pub fn fits(&self, y: f32) -> bool {
        self.content_bottom() - y >= self.min_remaining
    }

    /// Number of body lines (bullet lines plus spacing) one section page holds.
    ///
    /// Fails with [`Error::Config`] for geometry that [`validate`](Self::validate) rejects.
    pub fn body_lines_per_page(&self) -> Result<usize> {
        self.validate()?;
        let mut count = 1;
        let mut y = self.body_top() + self.line_height;
        while self.fits(y) {
            count += 1;
            y += self.line_height;
        }
        Ok(count)
    }

    /// Title font.
    pub fn title_font(&self) -> FontSpec {
        FontSpec::bold(self.title_size)
    }

    /// Section heading font.
    pub fn heading_font(&self) -> FontSpec {
        FontSpec::bold(self.heading_size)
    }

    /// Body and description font.
    pub fn body_font(&self) -> FontSpec {
        FontSpec::regular(self.body_size)
    }

    /// Header and footer font.
    pub fn chrome_font(&self) -> FontSpec {
        FontSpec::regular(self.chrome_size)
    }

    /// Check that the geometry leaves room for content.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("line_height", self.line_height),
            ("title_size", self.title_size),
            ("heading_size", self.heading_size),
            ("body_size", self.body_size),
            ("chrome_size", self.chrome_size),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!("{} must be positive, got {}", name, value)));
            }
        }
        if self.content_width() <= 0.0 {
            return Err(Error::Config(format!(
                "margins leave no content width ({} - {} - {})",
                self.page_width, self.margin_left, self.margin_right
            )));
        }
        if !self.fits(self.body_top()) {
            return Err(Error::Config(format!(
                "no body line fits: first baseline {} is below the limit {}",
                self.body_top(),
                self.content_bottom() - self.min_remaining
            )));
        }
        Ok(())
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Options for the flow renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowOptions {
    /// Page geometry
    pub geometry: Geometry,

    /// Text centered in every page footer
    pub product_label: String,

    /// chrono format string for the header timestamp
    pub timestamp_format: String,
}

impl FlowOptions {
    /// Create new flow options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the footer label.
    pub fn with_product_label(mut self, label: impl Into<String>) -> Self {
        self.product_label = label.into();
        self
    }

    /// Set the header timestamp format.
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Parse options from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: FlowOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check geometry and the timestamp format.
    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;
        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::Config(format!(
                "invalid timestamp format: {:?}",
                self.timestamp_format
            )));
        }
        Ok(())
    }
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            product_label: "Recap".to_string(),
            timestamp_format: "%Y-%m-%d %H:%M UTC".to_string(),
        }
    }
}

/// Options for the slide renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideOptions {
    /// Maximum bullets per slide (at least 1)
    pub chunk_capacity: usize,
}

impl SlideOptions {
    /// Create new slide options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of bullets per slide.
    pub fn with_chunk_capacity(mut self, capacity: usize) -> Self {
        self.chunk_capacity = capacity.max(1);
        self
    }
}

impl Default for SlideOptions {
    fn default() -> Self {
        Self {
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
        }
    }
}
