//! Editor window for Turing source files.
//!
//! The `app` layer holds everything that runs headless: the overlay manager
//! that draws compiler errors and search hits over the document, the text
//! services behind find/replace, settings and file I/O. The `ui` layer binds
//! it to an FLTK window and is only built with the `gui` feature.

pub mod app;
#[cfg(feature = "gui")]
pub mod ui;
