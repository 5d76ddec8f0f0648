//! Per-site extraction: one generic pipeline driven by [`Recipe`] data.

pub mod document;
pub mod measure;
pub mod recipe;
pub mod recipes;
pub mod segment;

pub use document::Page;
pub use measure::normalize;
pub use recipe::{image_formula, Extraction, Recipe};
pub use segment::segment;
