//! Document model types shared by the normalizer and both renderers.
//!
//! [`StructuredDocument`] is the canonical input to rendering. [`Page`] and
//! [`Slide`] are the outputs of the flow and slide renderers respectively.

mod document;
mod page;
mod slide;

pub use document::{Section, StructuredDocument};
pub use page::{DrawOp, FontFace, FontSpec, Page, PageKind, RuleOp, TextOp, TextRole};
pub use slide::{Slide, SLIDE_BULLET};
