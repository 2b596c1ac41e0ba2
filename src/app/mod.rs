//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (annotations, themes, settings, messages)
//! - `controllers/` - Orchestration (OverlayManager)
//! - `services/` - Business operations (text_ops, search)
//! - `infrastructure/` - External integrations (file I/O, error)
//! - `decorations.rs` - Annotation, marker and indicator bookkeeping
//! - `widget.rs` - The editor widget seam and its headless implementation
//! - `state.rs` - Main application coordinator (GUI builds only)

pub mod controllers;
pub mod decorations;
pub mod domain;
pub mod infrastructure;
pub mod services;
#[cfg(feature = "gui")]
pub mod state;
pub mod widget;

// Re-exports for convenient external access
pub use controllers::overlay::OverlayManager;
pub use decorations::Decorations;
pub use domain::{AppSettings, DocumentState, ErrorAnnotation, FindOptions, FindRequest, Message, Theme};
pub use infrastructure::error::{AppError, Result};
pub use widget::{EditorWidget, MemoryEditor};
