//! Rendering module: line breaking, pagination, slide chunking, and output backends.
//!
//! Both renderers consume a [`StructuredDocument`](crate::model::StructuredDocument):
//! [`render_flow`] lays it out as self-contained [`Page`](crate::model::Page)s,
//! [`render_slides`] splits it into fixed-capacity [`Slide`](crate::model::Slide)s.

mod backend;
mod flow;
mod json;
mod linebreak;
mod measure;
mod options;
mod result;
mod slides;

pub use backend::{
    paint, pages_to_svg, pages_to_text, slides_to_text, PageBackend, SvgBackend, TextBackend,
};
pub use flow::{render_flow, render_flow_batch, render_flow_with_stats, PageFlowRenderer};
pub use json::{to_json, JsonFormat};
pub use linebreak::{wrap, wrap_bullet, Line, BULLET_PREFIX, CONTINUATION_PREFIX};
pub use measure::{HeuristicMeasurer, MonospaceMeasurer, TextMeasurer};
pub use options::{FlowOptions, Geometry, SlideOptions, DEFAULT_CHUNK_CAPACITY};
pub use result::{FlowResult, RenderStats};
pub use slides::{chunk_heading, render_slides, SlideChunkRenderer};
