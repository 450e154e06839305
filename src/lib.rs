//! Image annotation engine: freehand, shape and text markup over a raster
//! image, with linear undo, fit-to-container rendering and PNG export.
//!
//! The [`engine::AnnotationEngine`] is the entry point for hosts; the other
//! modules are exposed so tools (such as the CLI and schema dumper) can share
//! the annotation model, configuration and export helpers.

pub mod config;
pub mod draw;
pub mod engine;
pub mod export;
pub mod geometry;
pub mod input;
pub mod replay;
pub mod util;

pub use config::Config;
pub use engine::{AnnotationEngine, EngineOptions};
