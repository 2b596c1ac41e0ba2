//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Error annotations and decoration channel ids
//! - Themes and their annotation styles
//! - Document identity and application settings
//! - Message types for the event system

pub mod annotation;
pub mod document;
pub mod messages;
pub mod settings;
pub mod theme;

pub use annotation::{
    Annotation, ErrorAnnotation, IndicatorId, MarkerId, ERROR_MARKER, SEARCH_INDICATOR,
    SQUIGGLE_INDICATOR,
};
pub use document::DocumentState;
pub use messages::{FindOptions, FindRequest, Message};
pub use settings::AppSettings;
pub use theme::{style_for, AnnotationStyle, Rgb, Rgba, Theme};
